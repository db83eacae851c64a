use crate::{ActionStack, CleanupAction, StackError};

/// Capacity used by `ExitStack::new` and `ExitStack::init` when `0` is requested.
pub const DEFAULT_INITIAL_CAPACITY: usize = 10;

/// Slots added by a growth step when no specific amount is requested.
pub const DEFAULT_CAPACITY_INCREMENT: usize = 10;

/// Growable exit stack.
///
/// Storage grows linearly by `DEFAULT_CAPACITY_INCREMENT` slots whenever a push finds it full.
/// Growth is fallible: if it can not allocate, the push fails and the stack keeps all its
/// actions at the old capacity.
///
/// A header can live in caller memory (`ExitStack::empty` followed by `init`) or on the heap
/// (`ExitStack::new`). In both cases the item storage is heap allocated.
pub struct ExitStack {
    items: Vec<CleanupAction>,
    capacity: usize,
}

impl ExitStack {
    /// A header without storage. Pushing to it fails until `init` succeeds.
    pub const fn empty() -> ExitStack {
        ExitStack {
            items: Vec::new(),
            capacity: 0,
        }
    }

    /// Allocates a heap-owned stack with room for `initial_capacity` actions,
    /// or `DEFAULT_INITIAL_CAPACITY` if it is `0`.
    pub fn new(initial_capacity: usize) -> Result<Box<ExitStack>, StackError> {
        let mut stack = Box::new(ExitStack::empty());
        stack.init(initial_capacity)?;
        Ok(stack)
    }

    /// Allocates item storage for this header, replacing whatever it held before.
    /// Previously registered actions are dropped without firing.
    ///
    /// On failure the header is left empty.
    pub fn init(&mut self, initial_capacity: usize) -> Result<(), StackError> {
        *self = ExitStack::empty();

        let capacity = if initial_capacity == 0 { DEFAULT_INITIAL_CAPACITY } else { initial_capacity };
        let mut items = Vec::new();
        if items.try_reserve_exact(capacity).is_err() {
            debug!("failed to allocate exit stack with capacity {}", capacity);
            return Err(StackError::AllocationFailed { requested: capacity });
        }

        trace!("init exit stack with capacity {}", capacity);
        self.items = items;
        self.capacity = capacity;
        Ok(())
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns false for an empty header or one whose allocation failed.
    #[inline(always)]
    pub fn has_storage(&self) -> bool {
        self.capacity != 0
    }

    /// Adds `added_capacity` slots, or `DEFAULT_CAPACITY_INCREMENT` if it is `0`.
    ///
    /// A stack without storage can not grow. On failure nothing changes.
    pub fn grow(&mut self, added_capacity: usize) -> Result<(), StackError> {
        if !self.has_storage() {
            return Err(StackError::NoStorage);
        }

        let increment = if added_capacity == 0 { DEFAULT_CAPACITY_INCREMENT } else { added_capacity };
        let new_capacity = match self.capacity.checked_add(increment) {
            Some(new_capacity) => new_capacity,
            None => {
                debug!("exit stack capacity {} + {} overflows", self.capacity, increment);
                return Err(StackError::AllocationFailed { requested: usize::MAX });
            }
        };

        if self.items.try_reserve_exact(new_capacity - self.items.len()).is_err() {
            debug!("failed to grow exit stack from {} to {}", self.capacity, new_capacity);
            return Err(StackError::AllocationFailed { requested: new_capacity });
        }

        trace!("grow exit stack from {} to {}", self.capacity, new_capacity);
        self.capacity = new_capacity;
        Ok(())
    }
}

impl Default for ExitStack {
    fn default() -> Self {
        ExitStack::empty()
    }
}

impl ActionStack for ExitStack {
    #[inline(always)]
    fn actions(&self) -> &[CleanupAction] {
        &self.items
    }

    fn push_action(&mut self, action: CleanupAction) -> Result<(), StackError> {
        if !self.has_storage() {
            return Err(StackError::NoStorage);
        }
        if self.items.len() == self.capacity {
            self.grow(0)?;
        }
        self.items.push(action);
        Ok(())
    }

    fn discard(self) {
        trace!("discard exit stack with {} actions, capacity {}", self.items.len(), self.capacity);
    }
}

impl std::fmt::Debug for ExitStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExitStack")
            .field("capacity", &self.capacity)
            .field("items", &self.items)
            .finish()
    }
}
