//! Bidirectional integration with the [`anyhow`] 1.x error handling library.
//!
//! This module specifically supports `anyhow` version 1.x. To enable this
//! integration, add the `compat-anyhow1` feature flag to your `Cargo.toml`.
//!
//! # Converting from Anyhow to Causeway
//!
//! [`IntoCauseway`] rebuilds the chain of an [`anyhow::Error`] as
//! [unspecified](crate::ErrorKind::Unspecified) errors, outermost first, each
//! with the `Display` text of its level as the message. The outermost error
//! records the caller's location. An `anyhow::Error` that was produced by
//! [`IntoAnyhow`] gives back the original error reference instead.
//!
//! ```
//! use causeway::{compat::IntoCauseway, prelude::*};
//!
//! let wrapped = anyhow::anyhow!("disk full").context("writing snapshot");
//! let error = wrapped.into_causeway();
//! assert_eq!(error.message(), "writing snapshot");
//! assert_eq!(error.inner().unwrap().message(), "disk full");
//! ```
//!
//! # Converting from Causeway to Anyhow
//!
//! [`IntoAnyhow`] wraps the error in a [`SharedError`], so anyhow displays
//! it as `{MS}` and walks the inner errors as its chain.
//!
//! ```
//! use causeway::{GenericCode, compat::anyhow1::IntoAnyhow, prelude::*};
//!
//! fn flush() -> causeway::Result<()> {
//!     Err(generic_error!(GenericCode::TimedOut, "flushing").into())
//! }
//!
//! fn legacy_flush() -> anyhow::Result<()> {
//!     flush().into_anyhow()?;
//!     Ok(())
//! }
//!
//! assert_eq!(legacy_flush().unwrap_err().to_string(), "flushing [Timed out]");
//! ```
//!
//! Note that `?` on a [`causeway::Result`](crate::Result) inside an anyhow
//! function also compiles, through anyhow's blanket conversion for
//! [`core::error::Error`] types. That path displays the exception's
//! description only; use [`IntoAnyhow`] to keep the message.

use alloc::{string::ToString, vec::Vec};

use super::{IntoCauseway, SharedError};
use crate::{Error, ErrorRef, Exception, Location};

impl IntoCauseway for anyhow::Error {
    type Output = ErrorRef;

    #[track_caller]
    fn into_causeway(self) -> Self::Output {
        let location = Location::caller();
        let error = match self.downcast::<SharedError>() {
            Ok(shared) => {
                return shared
                    .0
                    .into_error()
                    .unwrap_or_else(|| Error::new(0, "", Some(location), None));
            }
            Err(error) => error,
        };

        let messages: Vec<_> = error.chain().map(ToString::to_string).collect();
        let mut inner = None;
        let mut messages = messages.into_iter().rev().peekable();
        while let Some(message) = messages.next() {
            let location = messages.peek().is_none().then_some(location);
            inner = Some(Error::new(0, message, location, inner));
        }
        inner.unwrap_or_else(|| Error::new(0, "", Some(location), None))
    }
}

impl<T> IntoCauseway for anyhow::Result<T> {
    type Output = Result<T, ErrorRef>;

    #[track_caller]
    fn into_causeway(self) -> Self::Output {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(error.into_causeway()),
        }
    }
}

/// A trait for converting causeway errors into [`anyhow::Error`].
///
/// Implemented for [`ErrorRef`], [`Exception`] and `Result`s carrying either.
pub trait IntoAnyhow {
    /// The type produced by the conversion.
    type Output;

    /// Converts this value into an anyhow type.
    ///
    /// # Examples
    ///
    /// ```
    /// use causeway::{Exception, compat::anyhow1::IntoAnyhow};
    ///
    /// let error: anyhow::Error = Exception::unspecified().into_anyhow();
    /// assert_eq!(error.to_string(), "Unspecified exception");
    /// ```
    fn into_anyhow(self) -> Self::Output;
}

impl IntoAnyhow for ErrorRef {
    type Output = anyhow::Error;

    fn into_anyhow(self) -> Self::Output {
        anyhow::Error::new(SharedError::from(self))
    }
}

impl IntoAnyhow for Exception {
    type Output = anyhow::Error;

    fn into_anyhow(self) -> Self::Output {
        anyhow::Error::new(SharedError::from(self))
    }
}

impl<T, E: IntoAnyhow<Output = anyhow::Error>> IntoAnyhow for Result<T, E> {
    type Output = anyhow::Result<T>;

    fn into_anyhow(self) -> Self::Output {
        self.map_err(IntoAnyhow::into_anyhow)
    }
}
