use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// The kind of an exception.
///
/// Kinds form a closed "is-a" hierarchy rooted at [`ExceptionType::Exception`]. The hierarchy is
/// fixed at compile time and encoded by [`ExceptionType::parent`]:
///
/// ```text
/// Exception
/// ├── ArgumentException
/// │   ├── ArgumentNullException
/// │   └── ArgumentOutOfRangeException
/// ├── InvalidOperationException
/// │   └── ObjectDisposedException
/// ├── NotSupportedException
/// │   └── NotImplementedException
/// ├── OutOfMemoryException
/// ├── IndexOutOfRangeException
/// ├── FormatException
/// ├── AssertionException
/// └── TestSignalException
///     ├── SuccessException
///     ├── SkipException
///     └── InconclusiveException
/// ```
///
/// The signal kinds under [`ExceptionType::TestSignal`] are used by test harnesses for control
/// flow rather than to report failure.
///
/// Kinds print and parse as their full names, and parsing also accepts the short variant name:
///
/// ```rust
/// use structex::ExceptionType;
///
/// assert_eq!(ExceptionType::ArgumentNull.to_string(), "ArgumentNullException");
/// assert_eq!("ArgumentNull".parse(), Ok(ExceptionType::ArgumentNull));
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[expect(
    clippy::exhaustive_enums,
    reason = "the hierarchy is closed, extending it is a breaking change"
)]
pub enum ExceptionType {
    /// Root of the hierarchy. Catching it catches everything.
    #[strum(to_string = "Exception")]
    Exception,
    #[strum(to_string = "ArgumentException", serialize = "Argument")]
    Argument,
    #[strum(to_string = "ArgumentNullException", serialize = "ArgumentNull")]
    ArgumentNull,
    #[strum(
        to_string = "ArgumentOutOfRangeException",
        serialize = "ArgumentOutOfRange"
    )]
    ArgumentOutOfRange,
    /// The operation is invalid for the current state of the receiver.
    #[strum(
        to_string = "InvalidOperationException",
        serialize = "InvalidOperation"
    )]
    InvalidOperation,
    #[strum(to_string = "ObjectDisposedException", serialize = "ObjectDisposed")]
    ObjectDisposed,
    #[strum(to_string = "NotSupportedException", serialize = "NotSupported")]
    NotSupported,
    #[strum(to_string = "NotImplementedException", serialize = "NotImplemented")]
    NotImplemented,
    #[strum(to_string = "OutOfMemoryException", serialize = "OutOfMemory")]
    OutOfMemory,
    #[strum(to_string = "IndexOutOfRangeException", serialize = "IndexOutOfRange")]
    IndexOutOfRange,
    #[strum(to_string = "FormatException", serialize = "Format")]
    Format,
    /// A failed assertion.
    #[strum(to_string = "AssertionException", serialize = "Assertion")]
    Assertion,
    /// Common ancestor of the test signal kinds.
    #[strum(to_string = "TestSignalException", serialize = "TestSignal")]
    TestSignal,
    #[strum(to_string = "SuccessException", serialize = "Success")]
    Success,
    #[strum(to_string = "SkipException", serialize = "Skip")]
    Skip,
    #[strum(to_string = "InconclusiveException", serialize = "Inconclusive")]
    Inconclusive,
}

impl ExceptionType {
    /// The immediate ancestor of this kind, or `None` for the root.
    #[inline]
    #[must_use]
    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::Exception => None,
            Self::ArgumentNull | Self::ArgumentOutOfRange => Some(Self::Argument),
            Self::ObjectDisposed => Some(Self::InvalidOperation),
            Self::NotImplemented => Some(Self::NotSupported),
            Self::Success | Self::Skip | Self::Inconclusive => Some(Self::TestSignal),
            Self::Argument
            | Self::InvalidOperation
            | Self::NotSupported
            | Self::OutOfMemory
            | Self::IndexOutOfRange
            | Self::Format
            | Self::Assertion
            | Self::TestSignal => Some(Self::Exception),
        }
    }

    /// Check whether `self` is `ancestor` or descends from it.
    ///
    /// ```rust
    /// use structex::ExceptionType;
    ///
    /// assert!(ExceptionType::ArgumentNull.is_a(ExceptionType::Argument));
    /// assert!(ExceptionType::ArgumentNull.is_a(ExceptionType::Exception));
    /// assert!(!ExceptionType::Argument.is_a(ExceptionType::ArgumentNull));
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_a(self, ancestor: Self) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind as u8 == ancestor as u8 {
                return true;
            }
            current = kind.parent();
        }
        false
    }

    /// Number of edges between this kind and the root.
    #[inline]
    #[must_use]
    pub const fn depth(self) -> usize {
        match self.parent() {
            None => 0,
            Some(parent) => parent.depth() + 1,
        }
    }

    /// The full name of the kind, e.g. `"ArgumentNullException"`.
    #[inline]
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// The message a record of this kind carries when it is thrown without one.
    #[inline]
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::Exception => "An exception was thrown.",
            Self::Argument => "Value does not fall within the expected range.",
            Self::ArgumentNull => "Value cannot be null.",
            Self::ArgumentOutOfRange => "Specified argument was out of the range of valid values.",
            Self::InvalidOperation => {
                "Operation is not valid due to the current state of the object."
            }
            Self::ObjectDisposed => "Cannot access a disposed object.",
            Self::NotSupported => "Specified method is not supported.",
            Self::NotImplemented => "The method or operation is not implemented.",
            Self::OutOfMemory => "Insufficient memory to continue the execution of the program.",
            Self::IndexOutOfRange => "Index was outside the bounds of the array.",
            Self::Format => "Input string was not in a correct format.",
            Self::Assertion => "Assertion failed.",
            Self::TestSignal => "Test signal raised.",
            Self::Success => "Test succeeded.",
            Self::Skip => "Test skipped.",
            Self::Inconclusive => "Test is inconclusive.",
        }
    }
}

/// The catch predicate: does a clause declared for `declared` handle an exception of `actual`?
///
/// A clause matches its own kind and every descendant. Clauses for the root kind match anything.
#[inline]
#[must_use]
pub const fn matches(declared: ExceptionType, actual: ExceptionType) -> bool {
    actual.is_a(declared)
}
