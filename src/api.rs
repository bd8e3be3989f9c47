use super::{
    exception::Exception,
    frame::TryFrame,
    kind::ExceptionType,
    stack,
    throw::{throw, throw_again, throw_new},
};
use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::vec::Vec;

type Handler<'a, R> = Box<dyn FnOnce(Exception) -> R + 'a>;

/// A try/catch/finally statement.
///
/// Build the statement with [`Try::new`], add catch clauses with [`Try::catch`] and an optional
/// finalizer with [`Try::finally`], and execute it with [`Try::run`].
///
/// - Catch clauses are tested in the order they were added. The first clause whose kind is the
///   thrown kind or an ancestor of it handles the exception, and the others are skipped.
/// - The finalizer runs exactly once, whether the body completed, an exception was caught, or an
///   exception is propagating. This includes exceptions thrown by catch handlers.
/// - An exception that no clause handles propagates to the enclosing statement after the
///   finalizer has run.
///
/// Rust panics are propagated as-is and not caught, and the finalizer doesn't run for them.
///
/// # Example
///
/// ```rust
/// use structex::{ExceptionType, Try, throw_new};
///
/// let mut closed = false;
/// let message = Try::new(|| -> String { throw_new!(ArgumentNull, "path") })
///     .catch(ExceptionType::InvalidOperation, |_| unreachable!())
///     .catch(ExceptionType::Argument, |ex| ex.message().to_owned())
///     .finally(|| closed = true)
///     .run();
/// assert_eq!(message, "path");
/// assert!(closed);
/// ```
#[must_use = "a `Try` does nothing until `run` is called"]
pub struct Try<'a, R> {
    body: Box<dyn FnOnce() -> R + 'a>,
    handlers: Vec<(ExceptionType, Handler<'a, R>)>,
    finalizer: Option<Box<dyn FnOnce() + 'a>>,
}

impl<'a, R> Try<'a, R> {
    /// Start a statement with `body` as the try block.
    #[inline]
    pub fn new(body: impl FnOnce() -> R + 'a) -> Self {
        Self {
            body: Box::new(body),
            handlers: Vec::new(),
            finalizer: None,
        }
    }

    /// Add a catch clause for `kind` and its descendants.
    #[inline]
    pub fn catch(mut self, kind: ExceptionType, handler: impl FnOnce(Exception) -> R + 'a) -> Self {
        self.handlers.push((kind, Box::new(handler)));
        self
    }

    /// Set the finalizer, replacing any previous one.
    #[inline]
    pub fn finally(mut self, finalizer: impl FnOnce() + 'a) -> Self {
        self.finalizer = Some(Box::new(finalizer));
        self
    }

    /// Execute the statement.
    ///
    /// Returns the value of the body, or of the catch handler that took the exception. Does not
    /// return if the exception was not handled.
    #[inline]
    pub fn run(self) -> R {
        let Self {
            body,
            handlers,
            finalizer,
        } = self;

        let mut frame = TryFrame::begin();
        let mut value = frame.run(body);
        if value.is_none() {
            for (kind, handler) in handlers {
                if let Some(ex) = frame.catch(kind) {
                    // The frame is already popped, so a throw here belongs to the enclosing
                    // region. Intercept it anyway to run the finalizer first.
                    match stack::intercepting(|| handler(ex)) {
                        Ok(handled) => value = Some(handled),
                        Err(ex) => frame.defer(ex),
                    }
                    break;
                }
            }
        }
        if let Some(finalizer) = finalizer {
            frame.finally();
            finalizer();
        }
        frame.end();
        match value {
            Some(value) => value,
            None => unreachable!("try statement finished without a value or an exception"),
        }
    }
}

/// The result of running a throwing computation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
#[expect(
    clippy::exhaustive_enums,
    reason = "a computation either completes or raises"
)]
pub enum Outcome<T> {
    /// The computation returned normally.
    Completed(T),
    /// The computation threw.
    Raised(Exception),
}

impl<T> Outcome<T> {
    #[inline]
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_raised(&self) -> bool {
        matches!(self, Self::Raised(_))
    }

    /// The exception, if the computation threw.
    #[inline]
    #[must_use]
    pub const fn exception(&self) -> Option<&Exception> {
        match self {
            Self::Completed(_) => None,
            Self::Raised(ex) => Some(ex),
        }
    }

    /// Convert into a [`Result`].
    #[inline]
    #[expect(clippy::missing_errors_doc, reason = "`Err` is the raised exception")]
    pub fn into_result(self) -> Result<T, Exception> {
        match self {
            Self::Completed(value) => Ok(value),
            Self::Raised(ex) => Err(ex),
        }
    }

    /// Return the value, or resume propagating the exception with its original throw site.
    #[inline]
    pub fn unwrap_or_rethrow(self) -> T {
        match self {
            Self::Completed(value) => value,
            Self::Raised(ex) => throw_again(ex),
        }
    }

    #[inline]
    pub fn map<U>(self, func: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Completed(value) => Outcome::Completed(func(value)),
            Self::Raised(ex) => Outcome::Raised(ex),
        }
    }
}

impl<T> From<Outcome<T>> for Result<T, Exception> {
    #[inline]
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_result()
    }
}

impl<T, E: Into<Exception>> From<Result<T, E>> for Outcome<T> {
    #[inline]
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Completed(value),
            Err(err) => Self::Raised(err.into()),
        }
    }
}

/// Run `body`, catching any exception it throws.
///
/// Rust panics are propagated as-is and not caught.
///
/// ```rust
/// use structex::{ExceptionType, Outcome, attempt, throw_new};
///
/// let outcome = attempt(|| -> u32 { throw_new!(Format, "not a number: {}", "x1") });
/// let ex = outcome.exception().unwrap();
/// assert_eq!(ex.message(), "not a number: x1");
///
/// assert_eq!(attempt(|| 4), Outcome::Completed(4));
/// ```
#[inline]
pub fn attempt<R>(body: impl FnOnce() -> R) -> Outcome<R> {
    let mut frame = TryFrame::begin();
    let value = frame.run(body);
    let outcome = match value {
        Some(value) => Outcome::Completed(value),
        None => match frame.catch(ExceptionType::Exception) {
            Some(ex) => Outcome::Raised(ex),
            None => unreachable!("try body neither completed nor threw"),
        },
    };
    frame.end();
    outcome
}

/// Run `body`, catching any exception it throws.
///
/// If `body` returns a value, this function wraps it in [`Ok`]. If it throws, this function
/// returns the exception wrapped in [`Err`].
///
/// Rust panics are propagated as-is and not caught.
///
/// ```rust
/// use structex::{ExceptionType, r#try, throw_new};
///
/// let result = r#try(|| throw_new(ExceptionType::Argument, "Oops!"));
/// assert_eq!(result.map_err(|ex| ex.message().to_owned()), Err("Oops!".to_owned()));
/// ```
#[expect(clippy::missing_errors_doc, reason = "`Err` value is described immediately")]
#[inline]
pub fn r#try<R>(body: impl FnOnce() -> R) -> Result<R, Exception> {
    attempt(body).into_result()
}

/// Turn a fallible value into a throwing call.
pub trait OrThrow<T> {
    /// What the value holds instead of a `T`.
    type Error;

    /// Return the value or throw the error from the caller's location.
    fn or_throw(self) -> T
    where
        Self::Error: Into<Exception>;

    /// Return the value or throw an exception of `kind` with `message` from the caller's
    /// location, discarding the error.
    fn or_throw_new(self, kind: ExceptionType, message: impl Into<Cow<'static, str>>) -> T;
}

impl<T, E> OrThrow<T> for Result<T, E> {
    type Error = E;

    #[inline]
    #[track_caller]
    fn or_throw(self) -> T
    where
        E: Into<Exception>,
    {
        match self {
            Ok(value) => value,
            Err(err) => throw(err.into()),
        }
    }

    #[inline]
    #[track_caller]
    fn or_throw_new(self, kind: ExceptionType, message: impl Into<Cow<'static, str>>) -> T {
        match self {
            Ok(value) => value,
            Err(_) => throw_new(kind, message),
        }
    }
}

/// `None` is thrown as [`ExceptionType::ArgumentNull`].
impl<T> OrThrow<T> for Option<T> {
    type Error = Exception;

    #[inline]
    #[track_caller]
    fn or_throw(self) -> T {
        match self {
            Some(value) => value,
            None => throw_new(ExceptionType::ArgumentNull, ""),
        }
    }

    #[inline]
    #[track_caller]
    fn or_throw_new(self, kind: ExceptionType, message: impl Into<Cow<'static, str>>) -> T {
        match self {
            Some(value) => value,
            None => throw_new(kind, message),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ConfigError;
    use core::cell::Cell;

    #[test]
    fn completes_without_handlers() {
        let ran = Cell::new(0);
        let value = Try::new(|| 7)
            .catch(ExceptionType::Exception, |_| unreachable!())
            .finally(|| ran.set(ran.get() + 1))
            .run();
        assert_eq!(value, 7);
        assert_eq!(ran.get(), 1);
        assert_eq!(stack::depth(), 0);
    }

    #[test]
    fn only_first_matching_handler_runs() {
        let trace = core::cell::RefCell::new(Vec::new());
        let value = Try::new(|| -> u8 { throw_new(ExceptionType::ArgumentOutOfRange, "") })
            .catch(ExceptionType::NotSupported, |_| {
                trace.borrow_mut().push("not supported");
                0
            })
            .catch(ExceptionType::Argument, |_| {
                trace.borrow_mut().push("argument");
                1
            })
            .catch(ExceptionType::ArgumentOutOfRange, |_| {
                trace.borrow_mut().push("out of range");
                2
            })
            .run();
        assert_eq!(value, 1);
        assert_eq!(*trace.borrow(), ["argument"]);
    }

    #[test]
    fn unhandled_exception_runs_finalizer_then_propagates() {
        let finalized = Cell::new(0);
        let result = r#try(|| {
            Try::new(|| throw_new(ExceptionType::Skip, "later"))
                .catch(ExceptionType::Argument, |_| ())
                .finally(|| finalized.set(finalized.get() + 1))
                .run();
        });
        assert_eq!(finalized.get(), 1);
        let ex = result.unwrap_err();
        assert_eq!(ex.kind(), ExceptionType::Skip);
        assert_eq!(ex.message(), "later");
        assert_eq!(stack::depth(), 0);
    }

    #[test]
    fn throwing_handler_still_finalizes() {
        let finalized = Cell::new(false);
        let result = r#try(|| {
            Try::new(|| throw_new(ExceptionType::Format, "first"))
                .catch(ExceptionType::Format, |_| throw_new(ExceptionType::InvalidOperation, "second"))
                .finally(|| {
                    assert_eq!(stack::depth(), 1);
                    finalized.set(true);
                })
                .run();
        });
        assert!(finalized.get());
        let ex = result.unwrap_err();
        assert_eq!(ex.kind(), ExceptionType::InvalidOperation);
        assert_eq!(ex.message(), "second");
    }

    #[test]
    fn handler_can_rethrow_with_original_site() {
        let line = line!() + 2;
        let result = r#try(|| {
            Try::new(|| throw_new(ExceptionType::Assertion, "2 + 2 != 5"))
                .catch(ExceptionType::Exception, throw_again)
                .run();
        });
        assert_eq!(result.unwrap_err().line(), line);
    }

    #[test]
    fn depth_inside_handlers() {
        let depth = Try::new(|| -> usize { throw_new(ExceptionType::Success, "") })
            .catch(ExceptionType::TestSignal, |_| stack::depth())
            .run();
        assert_eq!(depth, 0);
    }

    #[test]
    fn outcome_conversions() {
        let outcome = attempt(|| -> i32 { throw_new(ExceptionType::OutOfMemory, "") });
        assert!(outcome.is_raised());
        assert_eq!(
            outcome.clone().map(|value| value + 1).exception().map(Exception::kind),
            Some(ExceptionType::OutOfMemory),
        );
        let result: Result<i32, Exception> = outcome.into();
        assert!(result.is_err());

        let completed: Outcome<i32> = Ok::<_, ConfigError>(3).into();
        assert!(completed.is_completed());
        assert_eq!(completed.unwrap_or_rethrow(), 3);

        let raised: Outcome<i32> = Err(ConfigError::ZeroExitCode).into();
        assert_eq!(raised.exception().map(Exception::kind), Some(ExceptionType::Argument));
    }

    #[test]
    fn unwrap_or_rethrow_keeps_site() {
        let outcome = attempt::<()>(|| throw_new(ExceptionType::NotImplemented, ""));
        let line = outcome.exception().map(Exception::line);
        let result = r#try(|| outcome.unwrap_or_rethrow());
        assert_eq!(result.unwrap_err().line(), line.unwrap());
    }

    #[test]
    fn or_throw() {
        let line = line!() + 1;
        let ex = r#try(|| Err::<(), _>(ConfigError::AlreadyInitialized).or_throw()).unwrap_err();
        assert_eq!(ex.kind(), ExceptionType::InvalidOperation);
        assert_eq!((ex.file(), ex.line()), (file!(), line));

        let ex = r#try(|| None::<u8>.or_throw()).unwrap_err();
        assert_eq!(ex.kind(), ExceptionType::ArgumentNull);

        let ex = r#try(|| "x".parse::<u8>().or_throw_new(ExceptionType::Format, "not a byte"))
            .unwrap_err();
        assert_eq!(ex.message(), "not a byte");

        assert_eq!(Some(3).or_throw(), 3);
    }
}
