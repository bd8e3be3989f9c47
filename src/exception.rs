use super::kind::ExceptionType;
use alloc::borrow::Cow;
use alloc::sync::Arc;
use core::fmt;
use core::panic::Location;

/// The shared, immutable body of an [`Exception`].
#[derive(Clone, Debug, PartialEq, Eq)]
struct Record {
    kind: ExceptionType,
    message: Cow<'static, str>,
    file: &'static str,
    line: u32,
}

/// An exception record.
///
/// A record describes one thrown exception: its [kind](ExceptionType), a message, and the source
/// location of the throw site. Records are immutable once created and reference-counted, so
/// cloning a record is cheap and every clone observes the same contents.
///
/// Records are usually created and thrown in one step with [`throw_new`](crate::throw_new) or the
/// [`throw_new!`](crate::throw_new!) macro, and received by catch clauses.
///
/// # Example
///
/// ```rust
/// use structex::{Exception, ExceptionType};
///
/// let ex = Exception::new(ExceptionType::ArgumentNull, "");
/// assert_eq!(ex.message(), "Value cannot be null.");
/// assert_eq!(ex.name(), "ArgumentNullException");
/// assert!(ex.is_instance_of(ExceptionType::Argument));
/// ```
#[derive(Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", DisplayRecord(.0))]
pub struct Exception(Arc<Record>);

impl Exception {
    /// Create a record located at the caller.
    ///
    /// An empty `message` is replaced by the kind's [default
    /// message](ExceptionType::default_message).
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(kind: ExceptionType, message: impl Into<Cow<'static, str>>) -> Self {
        let location = Location::caller();
        Self::at(kind, message, location.file(), location.line())
    }

    /// Create a record with an explicit source location.
    ///
    /// An empty `message` is replaced by the kind's [default
    /// message](ExceptionType::default_message).
    #[inline]
    #[must_use]
    pub fn at(
        kind: ExceptionType,
        message: impl Into<Cow<'static, str>>,
        file: &'static str,
        line: u32,
    ) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            message = Cow::Borrowed(kind.default_message());
        }
        Self(Arc::new(Record {
            kind,
            message,
            file,
            line,
        }))
    }

    /// Create a record whose message is explicitly left empty.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn bare(kind: ExceptionType) -> Self {
        let location = Location::caller();
        Self(Arc::new(Record {
            kind,
            message: Cow::Borrowed(""),
            file: location.file(),
            line: location.line(),
        }))
    }

    /// The kind of the exception.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ExceptionType {
        self.0.kind
    }

    /// The full name of the exception kind.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.0.kind.name()
    }

    /// The exception message. Empty only for [bare](Exception::bare) records.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.0.message
    }

    /// The source file of the throw site.
    #[inline]
    #[must_use]
    pub fn file(&self) -> &'static str {
        self.0.file
    }

    /// The source line of the throw site.
    #[inline]
    #[must_use]
    pub fn line(&self) -> u32 {
        self.0.line
    }

    /// Check if the exception is of kind `kind` or one of its descendants.
    #[inline]
    #[must_use]
    pub fn is_instance_of(&self, kind: ExceptionType) -> bool {
        self.0.kind.is_a(kind)
    }

    /// Derive a record with a different message, keeping the kind and throw site.
    ///
    /// The receiver is left untouched. This is meant for collaborators that merge context into a
    /// caught exception before re-throwing or recording it.
    #[inline]
    #[must_use]
    pub fn with_message(&self, message: impl Into<Cow<'static, str>>) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            message = Cow::Borrowed(self.0.kind.default_message());
        }
        Self(Arc::new(Record {
            message,
            ..(*self.0).clone()
        }))
    }

    /// Move the record to a new throw site.
    ///
    /// Only clones the body if other handles to it exist.
    pub(crate) fn relocate(mut self, file: &'static str, line: u32) -> Self {
        let record = Arc::make_mut(&mut self.0);
        record.file = file;
        record.line = line;
        self
    }

    /// Whether two handles share one record body.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Check if `ex` is of kind `kind` or one of its descendants.
///
/// This classifies an already caught exception without a catch clause per kind.
#[inline]
#[must_use]
pub fn is_instance_of(ex: &Exception, kind: ExceptionType) -> bool {
    ex.is_instance_of(kind)
}

struct DisplayRecord<'a>(&'a Record);

impl fmt::Display for DisplayRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.0;
        if record.message.is_empty() {
            write!(f, "{} at {}:{}", record.kind, record.file, record.line)
        } else {
            write!(
                f,
                "{}: {} at {}:{}",
                record.kind, record.message, record.file, record.line,
            )
        }
    }
}

impl fmt::Debug for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exception")
            .field("kind", &self.0.kind)
            .field("message", &self.0.message)
            .field("file", &self.0.file)
            .field("line", &self.0.line)
            .finish()
    }
}
