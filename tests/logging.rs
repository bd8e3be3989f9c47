//! A logger that inspects the scope stack while the runtime is logging.

use log::{LevelFilter, Log, Metadata, Record};
use std::sync::atomic::{AtomicUsize, Ordering};
use structex::{ExceptionType, Try, TryFrame, depth, throw_new, top};

struct StackLogger {
    records: AtomicUsize,
}

impl Log for StackLogger {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        let _ = format!("[depth {} top {:?}] {}", depth(), top(), record.args());
        self.records.fetch_add(1, Ordering::Relaxed);
    }

    fn flush(&self) {}
}

static LOGGER: StackLogger = StackLogger {
    records: AtomicUsize::new(0),
};

#[test]
fn loggers_can_read_the_stack() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    assert_eq!(Try::new(|| 1).run(), 1);

    let caught = Try::new(|| -> u8 { throw_new!(NotSupported, "read-only") })
        .catch(ExceptionType::Exception, |ex| {
            assert_eq!(ex.message(), "read-only");
            2
        })
        .finally(|| ())
        .run();
    assert_eq!(caught, 2);

    let outer = TryFrame::begin();
    let inner = TryFrame::begin();
    drop(outer);
    assert_eq!(top(), Some(inner.id()));
    inner.end();

    assert_eq!(depth(), 0);
    assert!(LOGGER.records.load(Ordering::Relaxed) > 0);
}
