use anyhow::anyhow;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use structex::{Exception, ExceptionType, Try, r#try, throw_again, throw_new};

fn bench_context(c: &mut Criterion) {
    fn rust() {
        fn imp(n: u32) {
            let n = black_box(n);
            if n == 0 {
                std::panic::resume_unwind(Box::new(anyhow!("Hello, world!")));
            } else {
                match std::panic::catch_unwind(|| imp(n - 1)) {
                    Ok(x) => x,
                    Err(mut bx) => {
                        let err = bx.downcast_mut::<anyhow::Error>().unwrap();
                        replace_with::replace_with_or_abort(err, |e| e.context("In imp"));
                        std::panic::resume_unwind(bx);
                    }
                }
            }
        }
        let _ = black_box(std::panic::catch_unwind(|| {
            imp(5);
        }));
    }

    fn result() {
        fn imp(n: u32) -> anyhow::Result<()> {
            let n = black_box(n);
            if n == 0 {
                Err(anyhow!("Hello, world!"))
            } else {
                imp(n - 1).map_err(|e| e.context("In imp"))
            }
        }
        let _ = black_box(imp(5));
    }

    fn structex() {
        fn imp(n: u32) {
            let n = black_box(n);
            if n == 0 {
                throw_new!(InvalidOperation, "Hello, world!");
            }
            Try::new(|| imp(n - 1))
                .catch(ExceptionType::Exception, |ex| {
                    let merged = ex.with_message(format!("In imp: {}", ex.message()));
                    throw_again(merged)
                })
                .run();
        }
        let _ = black_box(r#try(|| imp(5)));
    }

    let mut group = c.benchmark_group("context");
    group.bench_function("Rust", |b| b.iter(|| rust()));
    group.bench_function("Result", |b| b.iter(|| result()));
    group.bench_function("structex", |b| b.iter(|| structex()));
    group.finish();
}

fn bench_simple(c: &mut Criterion) {
    fn rust() {
        fn imp(n: u32) {
            let n = black_box(n);
            if n == 0 {
                std::panic::resume_unwind(Box::new("Hello, world!"));
            } else {
                match std::panic::catch_unwind(|| imp(n - 1)) {
                    Ok(x) => x,
                    Err(bx) => std::panic::resume_unwind(bx),
                }
            }
        }
        let _ = black_box(std::panic::catch_unwind(|| {
            imp(5);
        }));
    }

    fn structex() {
        fn imp(n: u32) {
            let n = black_box(n);
            if n == 0 {
                throw_new(ExceptionType::Format, "Hello, world!");
            }
            Try::new(|| imp(n - 1))
                .catch(ExceptionType::Exception, |ex: Exception| throw_again(black_box(ex)))
                .run();
        }
        let _ = black_box(r#try(|| imp(5)));
    }

    fn structex_finally() {
        fn imp(n: u32) {
            let n = black_box(n);
            if n == 0 {
                throw_new(ExceptionType::Format, "Hello, world!");
            }
            Try::new(|| imp(n - 1)).finally(|| black_box(())).run();
        }
        let _ = black_box(r#try(|| imp(5)));
    }

    let mut group = c.benchmark_group("simple");
    group.bench_function("Rust", |b| b.iter(|| rust()));
    group.bench_function("structex catch", |b| b.iter(|| structex()));
    group.bench_function("structex finally", |b| b.iter(|| structex_finally()));
    group.finish();
}

fn bench_success(c: &mut Criterion) {
    let mut group = c.benchmark_group("success");
    group.bench_function("Try", |b| {
        b.iter(|| {
            Try::new(|| black_box(1_u32))
                .catch(ExceptionType::Exception, |_| 0)
                .run()
        });
    });
    group.bench_function("try", |b| b.iter(|| r#try(|| black_box(1_u32))));
    group.finish();
}

criterion_group!(benches, bench_context, bench_simple, bench_success);
criterion_main!(benches);
