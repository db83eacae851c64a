//! Helpers shared by the unit tests.

use crate::{ActionStack, Condition};
use std::cell::RefCell;
use std::rc::Rc;

pub type DropFlag<T> = Rc<RefCell<T>>;

/// Counts how many times a value registered for release was dropped.
pub struct Counted {
    pub drops: DropFlag<i32>,
}

impl Drop for Counted {
    fn drop(&mut self) {
        *self.drops.borrow_mut() += 1;
    }
}

pub fn drop_counter() -> DropFlag<i32> {
    DropFlag::new(RefCell::new(0))
}

/// Records the ids of fired actions in firing order.
pub type FireLog = DropFlag<Vec<usize>>;

pub fn fire_log() -> FireLog {
    FireLog::new(RefCell::new(Vec::new()))
}

/// Pushes an action that appends `id` to `log` when it fires.
pub fn push_logged<S: ActionStack>(stack: &mut S, log: &FireLog, id: usize, condition: Condition) {
    let log = log.clone();
    stack
        .push_closure(condition, move || log.borrow_mut().push(id))
        .expect("push logged action");
}

/// Release function that writes `1` into the `i32` behind the handle.
pub unsafe fn set_flag(target: *mut u8) {
    *(target as *mut i32) = 1;
}

