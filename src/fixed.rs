use crate::{ActionStack, CleanupAction, StackError};

/// Exit stack with `N` inline slots and no heap allocation.
///
/// It can not grow. Pushing past `N` through `ActionStack::push_action` is treated as a sizing
/// bug and panics; use `try_push_action` to get `StackError::CapacityExceeded` instead.
/// Discarding is free because there is nothing to deallocate.
pub struct FixedExitStack<const N: usize> {
    items: [CleanupAction; N],
    len: usize,
}

impl<const N: usize> FixedExitStack<N> {
    pub const fn new() -> FixedExitStack<N> {
        FixedExitStack {
            items: [CleanupAction::VACANT; N],
            len: 0,
        }
    }

    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// All slots, including unused ones, which hold a null handle with no release effect.
    #[inline(always)]
    pub fn slots(&self) -> &[CleanupAction; N] {
        &self.items
    }

    /// Appends an action if a slot is free.
    pub fn try_push_action(&mut self, action: CleanupAction) -> Result<(), StackError> {
        match self.items.get_mut(self.len) {
            Some(slot) => {
                *slot = action;
                self.len += 1;
                Ok(())
            },
            None => Err(StackError::CapacityExceeded { capacity: N }),
        }
    }
}

impl<const N: usize> Default for FixedExitStack<N> {
    fn default() -> Self {
        FixedExitStack::new()
    }
}

impl<const N: usize> ActionStack for FixedExitStack<N> {
    #[inline(always)]
    fn actions(&self) -> &[CleanupAction] {
        &self.items[..self.len]
    }

    fn push_action(&mut self, action: CleanupAction) -> Result<(), StackError> {
        if let Err(e) = self.try_push_action(action) {
            panic!("{}", e);
        }
        Ok(())
    }

    #[inline(always)]
    fn discard(self) {}
}

impl<const N: usize> std::fmt::Debug for FixedExitStack<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedExitStack")
            .field("capacity", &N)
            .field("items", &self.actions())
            .finish()
    }
}
