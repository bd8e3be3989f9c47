use super::{
    backend::{ActiveBackend, Backend},
    exception::Exception,
};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

/// Identifier of a try region on its thread's scope stack.
///
/// Identifiers are unique per thread for the lifetime of the thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(u64);

/// A thread-local stack of active try regions.
// Invariants:
// - `frames` is ordered by push order, the last entry being the innermost region.
// - `interceptors` counts live `intercepting` calls on this thread. An exception thrown while it's
//   zero has nowhere to go.
pub(crate) struct ScopeStack {
    frames: RefCell<Vec<FrameId>>,
    interceptors: Cell<usize>,
    next_id: Cell<u64>,
}

impl ScopeStack {
    const fn new() -> Self {
        Self {
            frames: RefCell::new(Vec::new()),
            interceptors: Cell::new(0),
            next_id: Cell::new(0),
        }
    }

    /// Push a new frame, returning its identifier and the identifier of the enclosing frame.
    fn push(&self) -> (FrameId, Option<FrameId>) {
        let id = FrameId(self.next_id.get());
        self.next_id.set(self.next_id.get().wrapping_add(1));
        let (parent, depth) = {
            let mut frames = self.frames.borrow_mut();
            let parent = frames.last().copied();
            frames.push(id);
            (parent, frames.len())
        };
        // Logged after the borrow ends, loggers may inspect the stack.
        log::trace!("push {id:?} (depth {depth})");
        (id, parent)
    }

    /// Remove a frame. Frames are expected to leave in LIFO order; a frame leaving out of order
    /// is still removed, and the frames above it stay on the stack.
    fn pop(&self, id: FrameId) {
        let popped = {
            let mut frames = self.frames.borrow_mut();
            frames.iter().rposition(|frame| *frame == id).map(|position| {
                let above = frames.len().saturating_sub(position).saturating_sub(1);
                frames.remove(position);
                (above, frames.len())
            })
        };
        match popped {
            Some((0, depth)) => log::trace!("pop {id:?} (depth {depth})"),
            Some((above, depth)) => {
                log::warn!("{id:?} left out of order, {above} regions above it (depth {depth})");
            }
            None => log::warn!("{id:?} is not on the scope stack"),
        }
    }
}

#[cfg(thread_local = "std")]
std::thread_local! {
    /// Thread-local scope stack.
    static STACK: ScopeStack = const { ScopeStack::new() };
}

#[cfg(thread_local = "attribute")]
#[thread_local]
static STACK: ScopeStack = ScopeStack::new();

#[inline]
fn with_stack<R>(func: impl FnOnce(&ScopeStack) -> R) -> R {
    #[cfg(thread_local = "std")]
    return STACK.with(func);

    #[cfg(thread_local = "attribute")]
    return func(&STACK);
}

/// Push a new try region onto the current thread's stack.
pub(crate) fn push() -> (FrameId, Option<FrameId>) {
    with_stack(ScopeStack::push)
}

/// Remove a try region from the current thread's stack.
pub(crate) fn pop(id: FrameId) {
    with_stack(|stack| stack.pop(id));
}

/// Run `func` as a resume point, returning the exception it throws, if any.
///
/// Rust panics are propagated as-is and not caught.
pub(crate) fn intercepting<R>(func: impl FnOnce() -> R) -> Result<R, Exception> {
    struct Leave;

    impl Drop for Leave {
        fn drop(&mut self) {
            with_stack(|stack| {
                stack.interceptors.set(stack.interceptors.get().saturating_sub(1));
            });
        }
    }

    with_stack(|stack| {
        stack.interceptors.set(stack.interceptors.get().saturating_add(1));
    });
    // Decrements on both normal return and unwinding.
    let _leave = Leave;
    ActiveBackend::intercept(func)
}

/// Whether a thrown exception would be caught on this thread.
pub(crate) fn is_catching() -> bool {
    with_stack(|stack| stack.interceptors.get() > 0)
}

/// Number of try regions on the current thread's scope stack.
///
/// A region is counted from [`TryFrame::begin`](crate::TryFrame::begin) until its first catch or
/// finally clause, or until [`TryFrame::end`](crate::TryFrame::end) if it has neither. Every
/// completed region leaves the depth as it found it.
///
/// ```rust
/// use structex::{Try, depth};
///
/// assert_eq!(depth(), 0);
/// Try::new(|| assert_eq!(depth(), 1)).run();
/// assert_eq!(depth(), 0);
/// ```
#[inline]
#[must_use]
pub fn depth() -> usize {
    with_stack(|stack| stack.frames.borrow().len())
}

/// The innermost try region on the current thread, if any.
#[inline]
#[must_use]
pub fn top() -> Option<FrameId> {
    with_stack(|stack| stack.frames.borrow().last().copied())
}
