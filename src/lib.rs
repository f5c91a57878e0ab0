#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    clippy::as_ptr_cast_mut,
    clippy::ptr_as_ptr,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Extra checks on nightly
#![cfg_attr(nightly_extra_checks, feature(rustdoc_missing_doc_code_examples))]
#![cfg_attr(nightly_extra_checks, forbid(rustdoc::missing_doc_code_examples))]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Reference-counted ownership, intrusive lists and chainable status errors.
//!
//! ## Overview
//!
//! This crate is the object model shared by the lower layers of a systems
//! library. It has three parts:
//!
//! - **Ownership**: [`RefPtr<T>`] is a nullable owning pointer over any type
//!   implementing the [`RefCounted`] contract. [`Counted<T>`] makes any value
//!   reference counted, and [`RefCount`] is the atomic counter to embed in
//!   your own types.
//! - **Containers**: [`IntrusiveList<T>`] keeps its links next to each element
//!   and hands out generation-checked [`Handle`]s, so removing an element
//!   through a stale handle is detected instead of corrupting the list.
//! - **Errors**: an [`Error`] is immutable. It carries an [`ErrorCode`] from
//!   one of four domains, a message, the [`Location`] that raised it and an
//!   optional inner error that caused it. Errors are shared as
//!   [`ErrorRef`]s and travel upwards inside an [`Exception`].
//!
//! ## Quick Example
//!
//! ```
//! use causeway::{KernelStatus, prelude::*};
//!
//! fn open_volume(name: &str) -> Result<(), ErrorRef> {
//!     Err(Error::kernel(KernelStatus::OBJECT_NAME_NOT_FOUND, name, None, None))
//! }
//!
//! fn mount(name: &str) -> causeway::Result<()> {
//!     open_volume(name).context("mounting the data volume")?;
//!     Ok(())
//! }
//!
//! let exception = mount("data0").unwrap_err();
//! let error = exception.error().unwrap();
//! assert_eq!(error.message(), "mounting the data volume");
//! assert_eq!(
//!     error.root_cause().format("{MS} (0x{Cx})"),
//!     "data0 [STATUS_OBJECT_NAME_NOT_FOUND] (0xc0000034)"
//! );
//! ```
//!
//! ## Error Domains
//!
//! | Kind                          | Code type          | Text                                   |
//! |-------------------------------|--------------------|----------------------------------------|
//! | [`Unspecified`]               | `i32`              | always empty                           |
//! | [`Generic`]                   | [`GenericCode`]    | fixed description                      |
//! | [`Platform`]                  | [`PlatformStatus`] | platform message table                 |
//! | [`Kernel`]                    | [`KernelStatus`]   | symbolic name such as `STATUS_TIMEOUT` |
//!
//! The platform and kernel tables can be extended at runtime through the
//! [hook system](crate::hooks).
//!
//! ## Formatting
//!
//! [`Error::format`] expands a small template language. `{M}` is the
//! message, `{S}` the error text, `{MS}` both, and `{FL}` the location. See
//! the [`format`] module for the full list of tags.
//!
//! ## Features
//!
//! - `std` (default): platform text through [`std::io::Error`], the
//!   [`Exception::throw`]/[`catch`](exception::catch) pair and `std` locks for
//!   the hooks.
//! - `tracing`: logging of error chains through the [`log`] module.
//! - `compat-anyhow1`: conversions to and from [`anyhow`].
//!
//! For implementation details, see the [`causeway-internals`] crate.
//!
//! [`causeway-internals`]: causeway_internals
//! [`Unspecified`]: ErrorKind::Unspecified
//! [`Generic`]: ErrorKind::Generic
//! [`Platform`]: ErrorKind::Platform
//! [`Kernel`]: ErrorKind::Kernel
//! [`anyhow`]: https://docs.rs/anyhow

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod macros;

pub mod compat;
pub mod error;
pub mod exception;
pub mod format;
pub mod hooks;
#[cfg(feature = "tracing")]
#[cfg_attr(docsrs, doc(cfg(feature = "tracing")))]
pub mod log;
pub mod prelude;

mod into_error_ref;
mod result_ext;

pub use causeway_internals::{
    Counted, Handle, IntrusiveList, RefCount, RefCounted, RefPtr, Released, list,
};

pub use self::{
    error::{
        Chain, Error, ErrorCode, ErrorKind, ErrorRef, GenericCode, KernelStatus, Location,
        PlatformStatus,
    },
    exception::Exception,
    into_error_ref::IntoErrorRef,
    result_ext::ResultExt,
};

/// A [`Result`](core::result::Result) type alias where the error is an
/// [`Exception`].
///
/// # Examples
///
/// ```
/// use causeway::{Error, GenericCode};
///
/// fn checked_div(a: u32, b: u32) -> causeway::Result<u32> {
///     a.checked_div(b).ok_or_else(|| {
///         Error::generic(GenericCode::InvalidArgument, "division by zero", None, None).into()
///     })
/// }
///
/// assert_eq!(checked_div(8, 2).unwrap(), 4);
/// assert_eq!(checked_div(8, 0).unwrap_err().what(), "Invalid argument");
/// ```
pub type Result<T> = core::result::Result<T, Exception>;

// Not public API. Referenced by macro-generated code.
#[doc(hidden)]
pub mod __private {
    use alloc::{fmt, string::String};

    #[doc(hidden)]
    pub use core::{format_args, result::Result::Err};

    #[doc(hidden)]
    pub use crate::{Error, ErrorRef, IntoErrorRef, Location};

    #[doc(hidden)]
    #[inline]
    #[cold]
    #[must_use]
    pub fn format_message(args: fmt::Arguments<'_>) -> String {
        match args.as_str() {
            Some(message) => String::from(message),
            None => fmt::format(args),
        }
    }
}
