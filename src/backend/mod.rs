use super::exception::Exception;

/// An unwinding backend.
///
/// Unwinding is a mechanism of forcefully "returning" through multiple call frames, called
/// *throwing*, up until a special call frame, called *interceptor*. Interceptors are the resume
/// points of try regions: [`TryFrame::begin`](crate::TryFrame::begin) runs the try body inside
/// one.
///
/// It's crucial that unwinding doesn't require (source-level) cooperation from the intermediate
/// call frames.
///
/// # Contract
///
/// Implementations of this trait must ensure that when an exception is thrown, unwinding
/// proceeds to the closest (most nested) `intercept` frame and that `intercept` returns this exact
/// record, without modifying it.
///
/// During unwinding, all destructors of locals must be run, as if `return` was called.
///
/// Unwinding that did not originate from [`Backend::throw`] (i.e. ordinary Rust panics) must pass
/// through `intercept` untouched.
///
/// Several exceptions can co-exist at once, even in a single thread. This can happen if a
/// destructor that uses exceptions (without letting them escape past `drop`) is invoked during
/// unwinding from another exception. This can be nested arbitrarily. In this context, the order of
/// catching must be in the reverse order of throwing.
pub trait Backend {
    /// Throw an exception.
    ///
    /// The caller must make sure an interceptor is active on the current thread. Throwing without
    /// one lets the unwind escape to the thread boundary.
    fn throw(ex: Exception) -> !;

    /// Catch an exception.
    ///
    /// This function returns `Ok` if the function returns normally, or `Err` if it throws (and the
    /// thrown exception is not caught by a nested interceptor).
    fn intercept<Func: FnOnce() -> R, R>(func: Func) -> Result<R, Exception>;
}

#[path = "panic.rs"]
mod imp;

pub(crate) use imp::ActiveBackend;

#[cfg(test)]
mod test {
    use super::*;
    use crate::kind::ExceptionType;

    fn record(message: &'static str) -> Exception {
        Exception::new(ExceptionType::InvalidOperation, message)
    }

    #[test]
    fn intercept_ok() {
        let result = ActiveBackend::intercept(|| String::from("Hello, world!"));
        assert_eq!(result.unwrap(), "Hello, world!");
    }

    #[test]
    fn intercept_err() {
        let ex = record("Hello, world!");
        let thrown = ex.clone();
        let result = ActiveBackend::intercept(|| ActiveBackend::throw(thrown));
        let caught = result.unwrap_err();
        assert!(caught.ptr_eq(&ex));
        assert_eq!(caught.message(), "Hello, world!");
    }

    #[test]
    fn intercept_panic() {
        let result = std::panic::catch_unwind(|| {
            ActiveBackend::intercept(|| std::panic::resume_unwind(Box::new("Hello, world!")))
                .unwrap()
        });
        assert_eq!(
            *result.unwrap_err().downcast_ref::<&'static str>().unwrap(),
            "Hello, world!",
        );
    }

    #[test]
    fn nested_intercept() {
        let ex = record("Hello, world!");
        let thrown = ex.clone();
        let result =
            ActiveBackend::intercept(|| ActiveBackend::intercept(|| ActiveBackend::throw(thrown)));
        let caught = result.unwrap().unwrap_err();
        assert!(caught.ptr_eq(&ex));
    }

    #[test]
    fn rethrow() {
        let ex = record("Hello, world!");
        let thrown = ex.clone();
        let result = ActiveBackend::intercept(|| {
            let inner = ActiveBackend::intercept(|| ActiveBackend::throw(thrown)).unwrap_err();
            assert!(inner.ptr_eq(&ex));
            ActiveBackend::throw(inner);
        });
        assert!(result.unwrap_err().ptr_eq(&ex));
    }

    #[test]
    fn destructors_are_run() {
        struct Dropper<'a>(&'a mut bool);
        impl Drop for Dropper<'_> {
            fn drop(&mut self) {
                *self.0 = true;
            }
        }

        let mut destructor_was_run = false;
        let result = ActiveBackend::intercept(|| {
            let _dropper = Dropper(&mut destructor_was_run);
            ActiveBackend::throw(record("Hello, world!"));
        });
        assert_eq!(result.unwrap_err().message(), "Hello, world!");
        assert!(destructor_was_run);
    }

    #[test]
    fn nested_with_drop() {
        struct Dropper;
        impl Drop for Dropper {
            fn drop(&mut self) {
                let result = ActiveBackend::intercept(|| ActiveBackend::throw(record("Awful idea")));
                assert_eq!(result.unwrap_err().message(), "Awful idea");
            }
        }

        let result = ActiveBackend::intercept(|| {
            let _dropper = Dropper;
            ActiveBackend::throw(record("Hello, world!"));
        });
        assert_eq!(result.unwrap_err().message(), "Hello, world!");
    }
}
