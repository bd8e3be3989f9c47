use super::{
    config::{self, FatalAction},
    exception::Exception,
};
use std::io::Write;

/// Report an exception that no try region is left to catch, then terminate the process.
#[cold]
pub(crate) fn unhandled(ex: &Exception) -> ! {
    let config = config::get();
    log::error!("unhandled {ex}");

    let mut stderr = std::io::stderr().lock();
    // Nothing sensible is left to do if stderr is gone.
    let _ = write_report(&mut stderr, ex);
    if config.backtrace {
        let _ = write_backtrace(&mut stderr);
    }
    let _ = stderr.flush();
    drop(stderr);

    match config.action {
        FatalAction::Exit => std::process::exit(config.exit_code),
        FatalAction::Abort => std::process::abort(),
    }
}

/// Write the diagnostic block for an unhandled exception.
fn write_report(out: &mut impl Write, ex: &Exception) -> std::io::Result<()> {
    writeln!(out, "Unhandled exception: {}", ex.name())?;
    writeln!(out, "  message: {}", ex.message())?;
    writeln!(out, "  thrown at: {}:{}", ex.file(), ex.line())
}

#[cfg(has_backtrace)]
fn write_backtrace(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "backtrace:\n{}", std::backtrace::Backtrace::force_capture())
}

#[cfg(not(has_backtrace))]
fn write_backtrace(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "backtrace: unavailable on this toolchain")
}
