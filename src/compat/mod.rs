//! Interoperability with other error handling libraries.
//!
//! # Available Integrations
//!
//! - [`anyhow1`] - Conversions to and from the `anyhow` 1.x error type
//!   (requires the `compat-anyhow1` feature flag)
//!
//! Errors coming from another library are rebuilt as a chain of
//! [unspecified](crate::ErrorKind::Unspecified) errors, one per level of the
//! foreign chain, through [`IntoCauseway`]. Errors leaving this crate are
//! wrapped in a [`SharedError`], which implements [`core::error::Error`] and
//! keeps the original reference so it can be recovered on the way back.
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "compat-anyhow1")] {
//! use causeway::{compat::IntoCauseway, prelude::*};
//!
//! fn legacy_lookup() -> anyhow::Result<u32> {
//!     anyhow::bail!("record not found");
//! }
//!
//! fn lookup() -> causeway::Result<u32> {
//!     Ok(legacy_lookup().into_causeway()?)
//! }
//!
//! let exception = lookup().unwrap_err();
//! assert_eq!(exception.error().unwrap().message(), "record not found");
//! # }
//! ```

use crate::{Error, ErrorRef, Exception};

/// A trait for converting external error types into causeway errors.
///
/// For error types the output is an [`ErrorRef`]. For `Result` types it is
/// `Result<T, ErrorRef>`, which converts into a
/// [`causeway::Result`](crate::Result) with `?`.
///
/// # Implementations
///
/// - [`anyhow1`] provides implementations for [`anyhow::Error`] and
///   [`anyhow::Result<T>`]
///
/// [`anyhow::Error`]: ::anyhow::Error
/// [`anyhow::Result<T>`]: ::anyhow::Result
pub trait IntoCauseway {
    /// The type produced by the conversion.
    type Output;

    /// Converts this value into a causeway type.
    #[track_caller]
    fn into_causeway(self) -> Self::Output;
}

#[cfg(feature = "compat-anyhow1")]
#[cfg_attr(docsrs, doc(cfg(feature = "compat-anyhow1")))]
pub mod anyhow1;

/// An [`Exception`] adapted to implement [`core::error::Error`] for foreign
/// error libraries.
///
/// The wrapper displays the carried error as `{MS}` (or the exception's
/// description if it carries none), and its [`source`] chain walks the inner
/// errors.
///
/// [`source`]: core::error::Error::source
///
/// # Examples
///
/// ```
/// use core::error::Error as _;
///
/// use causeway::{Error, GenericCode, compat::SharedError};
///
/// let cause = Error::new(0, "socket closed", None, None);
/// let error = Error::generic(GenericCode::TimedOut, "sending", None, Some(cause));
/// let shared = SharedError::from(error);
///
/// assert_eq!(shared.to_string(), "sending [Timed out]");
/// assert_eq!(shared.source().unwrap().to_string(), "socket closed");
/// ```
#[derive(Clone)]
pub struct SharedError(pub Exception);

impl SharedError {
    /// Returns the carried error, if any.
    pub fn error(&self) -> Option<&Error> {
        self.0.error().and_then(ErrorRef::get)
    }
}

impl From<ErrorRef> for SharedError {
    fn from(error: ErrorRef) -> Self {
        Self(Exception::new(error))
    }
}

impl From<Exception> for SharedError {
    fn from(exception: Exception) -> Self {
        Self(exception)
    }
}

impl core::fmt::Debug for SharedError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.0, f)
    }
}

impl core::fmt::Display for SharedError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.error() {
            Some(error) => core::fmt::Display::fmt(error, f),
            None => f.write_str(self.0.what()),
        }
    }
}

impl core::error::Error for SharedError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        self.error()
            .and_then(Error::cause)
            .map(|cause| cause as &(dyn core::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use core::error::Error as _;

    use super::*;
    use crate::KernelStatus;

    static_assertions::assert_impl_all!(SharedError: Send, Sync, core::error::Error);

    #[test]
    fn test_unspecified_exception_displays_description() {
        let shared = SharedError::from(Exception::unspecified());
        assert_eq!(shared.to_string(), "Unspecified exception");
        assert!(shared.source().is_none());
        assert!(shared.error().is_none());
    }

    #[test]
    fn test_source_walks_inner_errors() {
        let root = Error::kernel(KernelStatus::ACCESS_DENIED, "token", None, None);
        let middle = Error::new(0, "impersonating", None, Some(root));
        let top = Error::new(0, "serving request", None, Some(middle));
        let shared = SharedError::from(top);

        let middle = shared.source().unwrap();
        assert_eq!(middle.to_string(), "impersonating");
        let root = middle.source().unwrap();
        assert_eq!(root.to_string(), "token [STATUS_ACCESS_DENIED]");
        assert!(root.source().is_none());
    }
}
