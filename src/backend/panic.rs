use super::Backend;
use crate::exception::Exception;
use std::panic::{AssertUnwindSafe, catch_unwind, resume_unwind};

pub(crate) struct ActiveBackend;

impl Backend for ActiveBackend {
    fn throw(ex: Exception) -> ! {
        // `resume_unwind` skips the panic hook, so nothing is printed for exceptions that get
        // caught.
        resume_unwind(Box::new(InFlight(ex)));
    }

    fn intercept<Func: FnOnce() -> R, R>(func: Func) -> Result<R, Exception> {
        catch_unwind(AssertUnwindSafe(func)).map_err(|payload| match payload.downcast::<InFlight>() {
            Ok(in_flight) => in_flight.0,
            Err(payload) => resume_unwind(payload),
        })
    }
}

/// Unwind payload marking an exception, as opposed to a Rust panic.
struct InFlight(Exception);
