use super::{api::Outcome, exception::Exception, kind::ExceptionType};

/// How a test harness reads the outcome of a test body.
///
/// The signal kinds let a test end early with a result other than failure: throwing
/// [`ExceptionType::Success`] passes, [`ExceptionType::Skip`] skips and
/// [`ExceptionType::Inconclusive`] marks the test inconclusive. Any other exception fails it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[non_exhaustive]
pub enum Verdict {
    Passed,
    Failed,
    Skipped,
    Inconclusive,
}

impl Verdict {
    /// Classify an exception that escaped a test body.
    #[inline]
    #[must_use]
    pub fn of(ex: &Exception) -> Self {
        if ex.is_instance_of(ExceptionType::Success) {
            Self::Passed
        } else if ex.is_instance_of(ExceptionType::Skip) {
            Self::Skipped
        } else if ex.is_instance_of(ExceptionType::Inconclusive) {
            Self::Inconclusive
        } else {
            Self::Failed
        }
    }

    /// Classify the outcome of a test body. Completing normally passes.
    #[inline]
    #[must_use]
    pub fn of_outcome<T>(outcome: &Outcome<T>) -> Self {
        outcome.exception().map_or(Self::Passed, Self::of)
    }
}
