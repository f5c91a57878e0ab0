//! Atomics used by the counter, switchable to `loom` for model checking.

#[cfg(feature = "loom")]
pub(crate) use loom::sync::atomic::{AtomicUsize, Ordering, fence};
#[cfg(not(feature = "loom"))]
pub(crate) use core::sync::atomic::{AtomicUsize, Ordering, fence};
