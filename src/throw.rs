use super::{
    backend::{ActiveBackend, Backend},
    exception::Exception,
    fatal,
    kind::ExceptionType,
    stack,
};
use alloc::borrow::Cow;
use core::panic::Location;

/// Throw an exception from the caller's location.
///
/// The record's file and line are overwritten with the location of this call. Use
/// [`throw_again`] to keep the original throw site.
///
/// Control resumes at the innermost active try region on this thread. If there is none, the
/// exception is unhandled: diagnostics are written to stderr and the process terminates (see
/// [`FatalConfig`](crate::FatalConfig)).
///
/// Throwing from a destructor that runs while another exception (or panic) is unwinding aborts
/// the process, just like panicking there would.
///
/// # Example
///
/// ```rust
/// use structex::{Exception, ExceptionType, r#try, throw};
///
/// let ex = Exception::new(ExceptionType::Format, "bad digit");
/// let caught = r#try(|| throw(ex)).unwrap_err();
/// assert_eq!(caught.line(), line!() - 1);
/// ```
#[inline]
#[track_caller]
pub fn throw(ex: Exception) -> ! {
    let location = Location::caller();
    raise(ex.relocate(location.file(), location.line()))
}

/// Throw an exception again, keeping the throw site it already carries.
///
/// This is the way to resume propagation of an exception taken by a catch clause.
#[inline]
pub fn throw_again(ex: Exception) -> ! {
    log::debug!("rethrowing {ex}");
    raise(ex)
}

/// Create an exception located at the caller and throw it.
///
/// An empty `message` is replaced by the kind's [default
/// message](ExceptionType::default_message).
#[inline]
#[track_caller]
pub fn throw_new(kind: ExceptionType, message: impl Into<Cow<'static, str>>) -> ! {
    let ex = Exception::new(kind, message);
    log::debug!("throwing {ex}");
    raise(ex)
}

/// Create an exception with an explicit location and throw it.
///
/// This is what the [`throw_new!`](crate::throw_new!) macro expands to.
#[inline]
pub fn throw_at(
    kind: ExceptionType,
    message: impl Into<Cow<'static, str>>,
    file: &'static str,
    line: u32,
) -> ! {
    let ex = Exception::at(kind, message, file, line);
    log::debug!("throwing {ex}");
    raise(ex)
}

fn raise(ex: Exception) -> ! {
    if !stack::is_catching() {
        fatal::unhandled(&ex);
    }
    ActiveBackend::throw(ex)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::api::r#try;

    #[test]
    fn throw_stamps_the_call_site() {
        let ex = Exception::at(ExceptionType::Argument, "x", "elsewhere.rs", 1);
        let line = line!() + 1;
        let caught = r#try(|| throw(ex)).unwrap_err();
        assert_eq!((caught.file(), caught.line()), (file!(), line));
        assert_eq!(caught.message(), "x");
    }

    #[test]
    fn throw_again_keeps_the_original_site() {
        let ex = Exception::at(ExceptionType::Argument, "x", "elsewhere.rs", 1);
        let caught = r#try(|| throw_again(ex.clone())).unwrap_err();
        assert!(caught.ptr_eq(&ex));
        assert_eq!((caught.file(), caught.line()), ("elsewhere.rs", 1));
    }

    #[test]
    fn rethrow_through_two_regions_keeps_the_first_site() {
        let line = line!() + 3;
        let caught = r#try(|| {
            let inner = r#try(|| {
                throw_new(ExceptionType::OutOfMemory, "arena exhausted");
            });
            if let Err(ex) = inner {
                throw_again(ex);
            }
        })
        .unwrap_err();
        assert_eq!((caught.file(), caught.line()), (file!(), line));
    }

    #[test]
    fn throw_at_uses_the_given_site() {
        let caught = r#try(|| throw_at(ExceptionType::Skip, "", "gen.rs", 77)).unwrap_err();
        assert_eq!((caught.file(), caught.line()), ("gen.rs", 77));
        assert_eq!(caught.message(), ExceptionType::Skip.default_message());
    }
}
