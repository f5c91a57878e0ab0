//! Commonly used items for convenient importing.
//!
//! # Usage
//!
//! ```rust
//! use causeway::prelude::*;
//!
//! fn parse_level(text: &str) -> causeway::Result<u8> {
//!     match text {
//!         "low" => Ok(1),
//!         "high" => Ok(9),
//!         other => bail!("unknown level {other:?}"),
//!     }
//! }
//!
//! assert_eq!(parse_level("high").unwrap(), 9);
//! assert!(parse_level("medium").is_err());
//! ```
//!
//! # What's Included
//!
//! - **[`Error`]**, **[`ErrorRef`]** and **[`Exception`]**: the error model
//! - **[`ResultExt`]** and **[`IntoErrorRef`]**: wrapping the error arm of a
//!   `Result` as the cause of a new error
//! - **[`error!`]**, **[`generic_error!`]** and **[`bail!`]**: macros for
//!   creating and returning errors

pub use crate::{
    Error, ErrorRef, Exception, bail, error, generic_error, into_error_ref::IntoErrorRef,
    result_ext::ResultExt,
};
