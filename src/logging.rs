#![allow(dead_code)]

//! Log forwarding that only exists with the `logging` feature.
//!
//! Without the feature the arguments are still type-checked, but nothing is formatted or emitted.

pub(crate) const TARGET: &str = "exitstack";

macro_rules! debug {
    ($($arg:tt)+) => (
        #[cfg(feature = "logging")]
        log::debug!(target: $crate::logging::TARGET, $($arg)+);
        #[cfg(not(feature = "logging"))]
        { if false { let _ = format_args!($($arg)+); } }
    )
}

macro_rules! trace {
    ($($arg:tt)+) => (
        #[cfg(feature = "logging")]
        log::trace!(target: $crate::logging::TARGET, $($arg)+);
        #[cfg(not(feature = "logging"))]
        { if false { let _ = format_args!($($arg)+); } }
    )
}
