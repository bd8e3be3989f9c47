/// Throw a new exception of the named [kind](crate::ExceptionType), located at the macro call.
///
/// The kind is given by its short variant name. The message is optional and is either an
/// expression convertible into a string, or a format string with arguments. Without a message, or
/// with an empty one, the kind's default message is used.
///
/// ```rust
/// use structex::{ExceptionType, r#try, throw_new};
///
/// let ex = r#try(|| throw_new!(ArgumentOutOfRange, "index {} out of {}", 4, 3)).unwrap_err();
/// assert_eq!(ex.kind(), ExceptionType::ArgumentOutOfRange);
/// assert_eq!(ex.message(), "index 4 out of 3");
/// assert_eq!(ex.line(), line!() - 3);
///
/// let ex = r#try(|| throw_new!(NotImplemented)).unwrap_err();
/// assert_eq!(ex.message(), "The method or operation is not implemented.");
/// ```
#[macro_export]
macro_rules! throw_new {
    ($kind:ident $(,)?) => {
        $crate::throw_at($crate::ExceptionType::$kind, "", ::core::file!(), ::core::line!())
    };
    ($kind:ident, $message:literal $(,)?) => {
        $crate::throw_at(
            $crate::ExceptionType::$kind,
            ::std::format!($message),
            ::core::file!(),
            ::core::line!(),
        )
    };
    ($kind:ident, $message:expr $(,)?) => {
        $crate::throw_at($crate::ExceptionType::$kind, $message, ::core::file!(), ::core::line!())
    };
    ($kind:ident, $fmt:expr, $($arg:tt)+) => {
        $crate::throw_at(
            $crate::ExceptionType::$kind,
            ::std::format!($fmt, $($arg)+),
            ::core::file!(),
            ::core::line!(),
        )
    };
}

/// Throw a new exception unless a condition holds.
///
/// Takes the condition followed by the same arguments as [`throw_new!`](crate::throw_new!).
///
/// ```rust
/// use structex::{ExceptionType, ensure, r#try};
///
/// fn checked_div(a: u32, b: u32) -> u32 {
///     ensure!(b != 0, Argument, "divisor of {} is zero", a);
///     a / b
/// }
///
/// assert_eq!(r#try(|| checked_div(6, 3)).unwrap(), 2);
/// let ex = r#try(|| checked_div(6, 0)).unwrap_err();
/// assert_eq!(ex.message(), "divisor of 6 is zero");
/// ```
#[macro_export]
macro_rules! ensure {
    ($condition:expr, $($rest:tt)+) => {
        if !$condition {
            $crate::throw_new!($($rest)+);
        }
    };
}
