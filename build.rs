use rustc_version::{Channel, version_meta};

fn has_cfg(name: &str) -> bool {
    std::env::var_os(format!("CARGO_CFG_{}", name.to_uppercase())).is_some()
}

fn make_overridable_cfg(name: &str, logic: impl FnOnce() -> &'static str) -> String {
    let env_name = format!("STRUCTEX_{}", name.to_uppercase());
    println!("cargo::rerun-if-env-changed={env_name}");
    let value = std::env::var(env_name).unwrap_or_else(|_| logic().to_string());
    println!("cargo::rustc-cfg={name}=\"{value}\"");
    value
}

fn main() {
    let is_nightly = version_meta().is_ok_and(|meta| meta.channel == Channel::Nightly);

    // The `#[thread_local]` attribute avoids the lazy-init check of `thread_local!` on the
    // throw path, but is nightly-only.
    make_overridable_cfg("thread_local", || {
        if is_nightly && has_cfg("target_thread_local") {
            "attribute"
        } else {
            "std"
        }
    });

    // Fatal diagnostics attach a backtrace when the toolchain has `std::backtrace`.
    let ac = autocfg::new();
    if ac.probe_path("std::backtrace::Backtrace") {
        println!("cargo::rustc-cfg=has_backtrace");
    }
}
