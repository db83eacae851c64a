use crate::{CleanupAction, Condition, ReleaseFn};
use std::fmt::Display;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StackError {
    /// The stack has no item storage, either never initialized or its allocation failed.
    NoStorage,
    /// Item storage could not be allocated or grown to `requested` slots.
    AllocationFailed { requested: usize },
    /// A fixed-capacity stack is full.
    CapacityExceeded { capacity: usize },
}

impl Display for StackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StackError::NoStorage => Display::fmt("Exit stack has no item storage", f),
            StackError::AllocationFailed { requested } => write!(f, "Failed to allocate storage for {} cleanup actions", requested),
            StackError::CapacityExceeded { capacity } => write!(f, "Fixed exit stack is full, capacity is {}", capacity),
        }
    }
}

impl std::error::Error for StackError {}

/// Append-only stack of cleanup actions that is consumed by a single conditional unwind.
///
/// Implementors only provide storage: access to the pushed actions in registration order,
/// appending, and releasing the storage. Unwinding is the same for every storage.
///
/// Dropping a stack without calling `unwind` or `discard` frees its storage but never runs
/// the registered actions.
pub trait ActionStack: Sized {
    /// Registered actions, oldest first.
    fn actions(&self) -> &[CleanupAction];

    /// Appends a pre-built action. On error the stack is left unchanged.
    fn push_action(&mut self, action: CleanupAction) -> Result<(), StackError>;

    /// Releases the storage without firing any action.
    ///
    /// Use this when ownership of the registered handles was handed elsewhere.
    fn discard(self);

    #[inline(always)]
    fn len(&self) -> usize {
        self.actions().len()
    }

    #[inline(always)]
    fn is_empty(&self) -> bool {
        self.actions().is_empty()
    }

    /// Appends an action built from discrete parts.
    ///
    /// # Safety
    ///
    /// Same contract as `CleanupAction::new`.
    #[inline(always)]
    unsafe fn push_parts(&mut self, object: *mut u8, condition: Condition, release: ReleaseFn) -> Result<(), StackError> {
        self.push_action(CleanupAction::new(object, condition, release))
    }

    /// Registers a heap value to be dropped when the action fires.
    ///
    /// If the push fails the value is dropped immediately.
    fn push_boxed<T>(&mut self, value: Box<T>, condition: Condition) -> Result<(), StackError> {
        let action = CleanupAction::boxed(value, condition);
        let object = action.object();
        self.push_action(action).map_err(|e| {
            unsafe { std::mem::drop(Box::from_raw(object as *mut T)) };
            e
        })
    }

    /// Registers a closure to run when the action fires.
    ///
    /// If the push fails the closure is dropped without running.
    fn push_closure<F>(&mut self, condition: Condition, f: F) -> Result<(), StackError>
        where F: FnOnce() + 'static
    {
        let action = CleanupAction::from_closure(condition, f);
        let object = action.object();
        self.push_action(action).map_err(|e| {
            unsafe { std::mem::drop(Box::from_raw(object as *mut F)) };
            e
        })
    }

    /// Fires the actions matching `condition`, newest first, then releases the storage and
    /// returns `return_value` unchanged.
    ///
    /// `Condition::Always` actions fire for every `condition`. `OnBits` actions fire when they
    /// share a bit with `condition`. Skipped actions are never fired later.
    fn unwind<R>(self, return_value: R, condition: u32) -> R {
        trace!("unwind {} actions on condition {:#x}", self.len(), condition);
        for (index, action) in self.actions().iter().enumerate().rev() {
            if action.condition().matches(condition) {
                trace!("fire action {} ({})", index, action.condition());
                unsafe { action.fire() };
            } else {
                trace!("skip action {} ({})", index, action.condition());
            }
        }
        self.discard();
        return_value
    }
}

/// A heap-owned stack header. Discarding it frees the header as well.
impl<S: ActionStack> ActionStack for Box<S> {
    #[inline(always)]
    fn actions(&self) -> &[CleanupAction] {
        (**self).actions()
    }

    #[inline(always)]
    fn push_action(&mut self, action: CleanupAction) -> Result<(), StackError> {
        (**self).push_action(action)
    }

    fn discard(self) {
        (*self).discard();
    }
}

/// Plain `Vec` storage with the standard amortized growth.
impl ActionStack for Vec<CleanupAction> {
    #[inline(always)]
    fn actions(&self) -> &[CleanupAction] {
        self
    }

    fn push_action(&mut self, action: CleanupAction) -> Result<(), StackError> {
        let requested = self.len() + 1;
        if self.try_reserve(1).is_err() {
            debug!("failed to reserve space for {} cleanup actions", requested);
            return Err(StackError::AllocationFailed { requested });
        }
        Vec::push(self, action);
        Ok(())
    }

    fn discard(self) {
        trace!("discard vec of {} actions", self.len());
    }
}
