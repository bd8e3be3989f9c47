use super::{
    exception::Exception,
    kind::ExceptionType,
    stack::{self, FrameId},
    throw::throw_again,
};

/// Where a try region is in its try/catch/finally sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[non_exhaustive]
pub enum ScopeState {
    /// The region is entered. No exception is pending.
    Trying,
    /// The body threw and no catch clause has handled the exception yet.
    Propagating,
    /// A catch clause took the exception.
    Caught,
    /// The finally clause is running or has run.
    Finalizing,
}

/// One try region.
///
/// This is the low-level interface the [`Try`](crate::Try) builder is built on. A region is driven
/// through the following calls, in order:
///
/// 1. [`TryFrame::begin`] enters the region, pushing it onto the thread's scope stack.
/// 2. [`TryFrame::run`] runs the body. It returns `None` if the body threw, in which case the
///    exception is pending on the frame.
/// 3. [`TryFrame::catch`] is evaluated once per catch clause, in declaration order. The first
///    clause whose kind matches the pending exception receives it.
/// 4. [`TryFrame::finally`] is evaluated before the finalizer runs, if there is one.
/// 5. [`TryFrame::end`] finishes the region and re-throws the exception to the enclosing region
///    if no clause took it.
///
/// The first `catch` or `finally` pops the region off the scope stack, so code in handlers and
/// finalizers belongs to the enclosing region. An exception thrown from there propagates past
/// this frame (its finalizer does not run). Dropping a frame without calling `end` pops it too,
/// and discards any pending exception.
///
/// Regions are expected to finish in reverse order of entry. A frame that outlives its enclosing
/// region, for example one returned out of the outer body, breaks this: the outer region leaves
/// the scope stack from under it, a warning is logged, and the inner region stays counted until
/// it finishes.
///
/// # Example
///
/// ```rust
/// use structex::{ExceptionType, TryFrame, depth, throw_new};
///
/// let mut frame = TryFrame::begin();
/// let value: Option<()> = frame.run(|| throw_new!(NotSupported, "read-only"));
/// assert!(value.is_none());
/// assert!(frame.catch(ExceptionType::Argument).is_none());
/// let ex = frame.catch(ExceptionType::NotSupported).unwrap();
/// assert_eq!(ex.message(), "read-only");
/// assert_eq!(depth(), 0);
/// frame.end();
/// ```
// Invariant: the frame is on the scope stack iff `popped` is false.
#[derive(Debug)]
pub struct TryFrame {
    id: FrameId,
    parent: Option<FrameId>,
    pending: Option<Exception>,
    popped: bool,
    entered: bool,
    state: ScopeState,
}

impl TryFrame {
    /// Enter a try region.
    #[inline]
    #[must_use = "try regions are exited by `TryFrame::end`"]
    pub fn begin() -> Self {
        let (id, parent) = stack::push();
        Self {
            id,
            parent,
            pending: None,
            popped: false,
            entered: false,
            state: ScopeState::Trying,
        }
    }

    /// Run the body of the region.
    ///
    /// Returns `Some` with the value if the body completed, or `None` if it threw. The thrown
    /// exception is then pending until a catch clause takes it.
    ///
    /// The body runs at most once per frame: later calls return `None` without running it.
    ///
    /// Rust panics are propagated as-is and not caught.
    #[inline]
    pub fn run<R>(&mut self, body: impl FnOnce() -> R) -> Option<R> {
        if self.entered || self.popped {
            debug_assert!(false, "{:?} ran its body twice", self.id);
            return None;
        }
        self.entered = true;
        match stack::intercepting(body) {
            Ok(value) => Some(value),
            Err(ex) => {
                log::debug!("{:?} resumed with {ex}", self.id);
                self.defer(ex);
                None
            }
        }
    }

    /// Evaluate a catch clause for `kind`.
    ///
    /// Returns the pending exception if it is of kind `kind` or a descendant of it. The exception
    /// is then handled: later clauses, and [`TryFrame::end`], no longer see it.
    #[inline]
    pub fn catch(&mut self, kind: ExceptionType) -> Option<Exception> {
        self.pop_for_handlers();
        let ex = self.pending.take_if(|ex| ex.is_instance_of(kind))?;
        log::debug!("{:?} caught {} as {kind}", self.id, ex.kind());
        self.state = ScopeState::Caught;
        Some(ex)
    }

    /// Evaluate the finally clause. The finalizer is expected to run right after this call.
    #[inline]
    pub fn finally(&mut self) {
        self.pop_for_handlers();
        self.state = ScopeState::Finalizing;
    }

    /// Finish the region.
    ///
    /// If the exception thrown by the body was not taken by any catch clause, it is re-thrown
    /// to the enclosing region with its original throw site, and this function does not return.
    #[inline]
    pub fn end(mut self) {
        self.pop_for_handlers();
        if let Some(ex) = self.pending.take() {
            log::debug!("{:?} did not handle {ex}, propagating", self.id);
            drop(self);
            throw_again(ex);
        }
    }

    /// Make `ex` the pending exception, replacing any previous one.
    pub(crate) fn defer(&mut self, ex: Exception) {
        self.pending = Some(ex);
        self.state = ScopeState::Propagating;
    }

    /// Pop the frame off the scope stack if it's still there.
    fn pop_for_handlers(&mut self) {
        if !self.popped {
            self.popped = true;
            stack::pop(self.id);
        }
    }

    /// The identifier of this region on the scope stack.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> FrameId {
        self.id
    }

    /// The region that was innermost when this one was entered.
    #[inline]
    #[must_use]
    pub const fn parent(&self) -> Option<FrameId> {
        self.parent
    }

    /// The exception waiting for a catch clause, if any.
    #[inline]
    #[must_use]
    pub const fn pending(&self) -> Option<&Exception> {
        self.pending.as_ref()
    }

    /// Whether the region has already left the scope stack.
    #[inline]
    #[must_use]
    pub const fn is_popped(&self) -> bool {
        self.popped
    }

    /// Where the region is in its try/catch/finally sequence.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> ScopeState {
        self.state
    }
}

impl Drop for TryFrame {
    #[inline]
    fn drop(&mut self) {
        self.pop_for_handlers();
        if let Some(ex) = &self.pending {
            log::debug!("{:?} dropped with {ex} pending", self.id);
        }
    }
}
