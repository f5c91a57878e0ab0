//! Runtime customization of how status codes are described.
//!
//! # Quick Start
//!
//! ```rust
//! use causeway::{Error, KernelStatus, hooks};
//!
//! const DEVICE_ERROR: KernelStatus = KernelStatus::from_bits(0xC000_0185);
//!
//! hooks::register_kernel_text_hook(|code: i32| {
//!     (code == DEVICE_ERROR.raw()).then(|| String::from("The device did not respond"))
//! });
//!
//! let error = Error::kernel(DEVICE_ERROR, "", None, None);
//! assert_eq!(error.error_text(), "The device did not respond");
//!
//! // Codes with a built-in name keep it.
//! let timeout = Error::kernel(KernelStatus::IO_TIMEOUT, "", None, None);
//! assert_eq!(timeout.error_text(), "STATUS_IO_TIMEOUT");
//! ```
//!
//! # Hook Types
//!
//! - **[`register_platform_text_hook`]**: describes
//!   [`PlatformStatus`](crate::PlatformStatus) codes, typically through the
//!   operating system's message table
//! - **[`register_kernel_text_hook`]**: describes
//!   [`KernelStatus`](crate::KernelStatus) codes beyond the built-in name
//!   table
//!
//! Hooks are global. They are stored behind a read-write lock, and are
//! cloned out of it before being called, so a hook may itself create and
//! format errors.

mod hook_lock;
pub mod status_text;

pub use self::status_text::{
    StatusTextHook, debug_status_text_hooks, register_kernel_text_hook,
    register_platform_text_hook, unregister_kernel_text_hook, unregister_platform_text_hook,
};
