//! Deferred cleanup stacks.
//!
//! Register a `CleanupAction` right after each resource is acquired, tagged with the outcomes
//! it should run for, and finish every exit path with a single `ActionStack::unwind`. The
//! matching actions fire newest first and the stack is released.
//!
//! ```
//! use exitstack::{ActionStack, Condition, ExitStack, ERROR};
//!
//! fn open_both(fail: bool) -> Result<(), &'static str> {
//!     let mut stack = ExitStack::new(0).map_err(|_| "no memory")?;
//!     stack.push_boxed(Box::new(vec![0u8; 16]), Condition::Always).map_err(|_| "no memory")?;
//!     stack.push_closure(Condition::Always, || ()).map_err(|_| "no memory")?;
//!     if fail {
//!         return stack.unwind(Err("second step failed"), ERROR);
//!     }
//!     stack.unwind(Ok(()), 0)
//! }
//!
//! assert!(open_both(false).is_ok());
//! assert!(open_both(true).is_err());
//! ```

#[macro_use]
mod logging;

mod condition;
mod action;
mod stack;
mod exitstack;
mod fixed;

pub use condition::{Condition, SUCCESS, ERROR};
pub use action::{CleanupAction, ReleaseFn, release_box};
pub use stack::{ActionStack, StackError};
pub use exitstack::{ExitStack, DEFAULT_INITIAL_CAPACITY, DEFAULT_CAPACITY_INCREMENT};
pub use fixed::FixedExitStack;

#[cfg(test)]
pub mod dropflag;
