use crate::Condition;
use std::fmt::Debug;

/// Release operation for a registered handle. It receives the handle it was registered with.
pub type ReleaseFn = unsafe fn(*mut u8);

/// A pending cleanup: an opaque handle, the condition it fires under, and the function that
/// consumes the handle.
///
/// The stack never dereferences `object`, it only hands it to `release` when the action fires.
/// Fields are fixed at construction and can not be changed afterwards. An action is not
/// `Copy` or `Clone`, so each one can be registered on a stack only once:
///
/// ```compile_fail
/// use exitstack::{ActionStack, CleanupAction, Condition};
///
/// let mut stack = Vec::<CleanupAction>::new();
/// let action = CleanupAction::boxed(Box::new(1u32), Condition::Always);
/// stack.push_action(action).unwrap();
/// stack.push_action(action).unwrap();
/// ```
pub struct CleanupAction {
    object: *mut u8,
    condition: Condition,
    release: ReleaseFn,
}

impl CleanupAction {
    /// Placeholder stored in unused fixed-capacity slots. Firing it does nothing.
    pub(crate) const VACANT: CleanupAction = CleanupAction {
        object: std::ptr::null_mut(),
        condition: Condition::Always,
        release: release_nothing,
    };

    /// Creates an action from discrete parts.
    ///
    /// # Safety
    ///
    /// Calling `release(object)` exactly once, at any point before the stack holding this action
    /// is unwound, must be sound.
    #[inline(always)]
    pub unsafe fn new(object: *mut u8, condition: Condition, release: ReleaseFn) -> CleanupAction {
        CleanupAction {
            object,
            condition,
            release,
        }
    }

    /// Takes ownership of a heap value that is dropped when the action fires.
    ///
    /// If the action never fires (skipped by its condition or the stack is discarded),
    /// the value is leaked.
    pub fn boxed<T>(value: Box<T>, condition: Condition) -> CleanupAction {
        unsafe { CleanupAction::new(Box::into_raw(value) as *mut u8, condition, release_box::<T>) }
    }

    /// Wraps a closure that runs when the action fires.
    ///
    /// The closure is boxed, so an action that never fires leaks it without running it.
    pub fn from_closure<F>(condition: Condition, f: F) -> CleanupAction
        where F: FnOnce() + 'static
    {
        unsafe {
            CleanupAction::new(Box::into_raw(Box::new(f)) as *mut u8, condition, call_closure::<F>)
        }
    }

    #[inline(always)]
    pub fn object(&self) -> *mut u8 {
        self.object
    }

    #[inline(always)]
    pub fn condition(&self) -> Condition {
        self.condition
    }

    #[inline(always)]
    pub fn release(&self) -> ReleaseFn {
        self.release
    }

    /// Runs the release function with the stored handle.
    ///
    /// Must be called at most once per registered action.
    #[inline(always)]
    pub(crate) unsafe fn fire(&self) {
        (self.release)(self.object);
    }
}

impl Debug for CleanupAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CleanupAction")
            .field("object", &self.object)
            .field("condition", &self.condition)
            .field("release", &(self.release as *const ()))
            .finish()
    }
}

/// Release function that frees a `Box<T>` passed as a raw handle.
///
/// # Safety
///
/// `object` must come from `Box::<T>::into_raw` and must not be freed elsewhere.
pub unsafe fn release_box<T>(object: *mut u8) {
    std::mem::drop(Box::from_raw(object as *mut T));
}

unsafe fn release_nothing(_object: *mut u8) {}

unsafe fn call_closure<F: FnOnce()>(object: *mut u8) {
    let f = Box::from_raw(object as *mut F);
    f();
}
