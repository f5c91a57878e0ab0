//! Carrying an [`Error`] across a failure boundary.
//!
//! [`Exception`] is the error arm of [`causeway::Result`](crate::Result). It
//! holds the error chain for structured handling, and a narrow description
//! for code that only wants text. The description is rendered once, when the
//! exception is created.
//!
//! With the `std` feature, an exception can also unwind the stack:
//! [`Exception::throw`] raises it as a panic payload and [`catch`] turns such
//! a panic back into an `Err`.

use alloc::string::String;

use crate::{ErrorRef, error::Error};

/// Description of an exception that holds no error.
const UNSPECIFIED: &str = "Unspecified exception";

/// An error reference travelling through a `Result` or an unwinding panic.
///
/// # Examples
///
/// ```
/// use causeway::{Error, Exception, GenericCode};
///
/// fn reserve(bytes: usize) -> causeway::Result<Vec<u8>> {
///     if bytes > 1 << 20 {
///         return Err(Error::generic(GenericCode::OutOfMemory, "reserving", None, None).into());
///     }
///     Ok(Vec::with_capacity(bytes))
/// }
///
/// let exception = reserve(usize::MAX).unwrap_err();
/// assert_eq!(exception.what(), "Out of memory");
/// assert_eq!(exception.error().unwrap().message(), "reserving");
///
/// assert_eq!(Exception::unspecified().what(), "Unspecified exception");
/// ```
#[derive(Clone)]
pub struct Exception {
    /// The carried error. Never a null pointer.
    error: Option<ErrorRef>,
    /// The rendered error text, or `None` for an unspecified exception.
    description: Option<String>,
}

impl Exception {
    /// Wraps an error.
    ///
    /// A null reference results in an [unspecified](Self::unspecified)
    /// exception.
    #[must_use]
    pub fn new(error: ErrorRef) -> Self {
        let description = error.get().map(|error| String::from(error.error_text()));
        Self {
            error: (!error.is_null()).then_some(error),
            description,
        }
    }

    /// Creates an exception that holds no error.
    #[must_use]
    pub const fn unspecified() -> Self {
        Self {
            error: None,
            description: None,
        }
    }

    /// Returns the carried error reference.
    #[inline]
    pub fn error(&self) -> Option<&ErrorRef> {
        self.error.as_ref()
    }

    /// Consumes the exception, returning the carried error reference.
    #[inline]
    pub fn into_error(self) -> Option<ErrorRef> {
        self.error
    }

    /// Returns the narrow description of the exception.
    ///
    /// This is the [error text](Error::error_text) of the carried error,
    /// rendered when the exception was created, or `"Unspecified exception"`
    /// if there is no error.
    #[inline]
    pub fn what(&self) -> &str {
        self.description.as_deref().unwrap_or(UNSPECIFIED)
    }

    fn carried(&self) -> Option<&Error> {
        self.error.as_ref().and_then(ErrorRef::get)
    }
}

impl Default for Exception {
    fn default() -> Self {
        Self::unspecified()
    }
}

impl From<ErrorRef> for Exception {
    #[inline]
    fn from(error: ErrorRef) -> Self {
        Self::new(error)
    }
}

impl core::fmt::Display for Exception {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.what())
    }
}

impl core::fmt::Debug for Exception {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Exception")
            .field("what", &self.what())
            .field("error", &self.carried())
            .finish()
    }
}

impl core::error::Error for Exception {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        self.carried()
            .map(|error| error as &(dyn core::error::Error + 'static))
    }
}

#[cfg(feature = "std")]
mod unwind {
    use core::panic::AssertUnwindSafe;
    use std::panic;

    use super::Exception;

    impl Exception {
        /// Raises the exception by unwinding the stack.
        ///
        /// The exception is the panic payload, and can be recovered with
        /// [`catch`].
        #[cold]
        #[track_caller]
        pub fn throw(self) -> ! {
            panic::panic_any(self)
        }
    }

    /// Runs `f`, turning an [`Exception`] thrown inside it into an `Err`.
    ///
    /// Panics with any other payload are resumed unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use causeway::{Error, GenericCode, exception::catch};
    ///
    /// let result: causeway::Result<()> = catch(|| {
    ///     causeway::Exception::new(Error::generic(GenericCode::TimedOut, "", None, None)).throw()
    /// });
    /// assert_eq!(result.unwrap_err().what(), "Timed out");
    ///
    /// assert_eq!(catch(|| 7).unwrap(), 7);
    /// ```
    pub fn catch<T>(f: impl FnOnce() -> T) -> crate::Result<T> {
        match panic::catch_unwind(AssertUnwindSafe(f)) {
            Ok(value) => Ok(value),
            Err(payload) => match payload.downcast::<Exception>() {
                Ok(exception) => Err(*exception),
                Err(payload) => panic::resume_unwind(payload),
            },
        }
    }
}

#[cfg(feature = "std")]
pub use self::unwind::catch;

#[cfg(test)]
mod tests {
    use alloc::{format, string::ToString};

    use super::*;
    use crate::{GenericCode, KernelStatus};

    static_assertions::assert_impl_all!(Exception: Send, Sync, Clone);

    #[test]
    fn test_unspecified() {
        let exception = Exception::unspecified();
        assert_eq!(exception.what(), "Unspecified exception");
        assert!(exception.error().is_none());
        assert_eq!(Exception::new(ErrorRef::null()).what(), "Unspecified exception");
        assert_eq!(Exception::default().to_string(), "Unspecified exception");
    }

    #[test]
    fn test_description_is_error_text() {
        let error = Error::kernel(KernelStatus::SHARING_VIOLATION, "opening", None, None);
        let exception = Exception::new(error.clone());
        assert_eq!(exception.what(), "STATUS_SHARING_VIOLATION");
        assert!(exception.error().is_some_and(|held| held.ptr_eq(&error)));
        assert_eq!(error.strong_count(), 2);
    }

    #[test]
    fn test_description_is_stable() {
        let exception = Exception::from(Error::generic(GenericCode::Unknown, "", None, None));
        let first = exception.what();
        let second = exception.what();
        assert_eq!(first, second);
        assert!(core::ptr::eq(first, second));
    }

    #[test]
    fn test_source_is_carried_error() {
        use core::error::Error as _;

        let exception = Exception::new(Error::new(1, "carried", None, None));
        assert_eq!(exception.source().map(|e| e.to_string()).as_deref(), Some("carried"));
        assert!(Exception::unspecified().source().is_none());
    }

    #[test]
    fn test_debug_shows_error() {
        let exception = Exception::new(Error::new(1, "carried", None, None));
        let debug = format!("{exception:?}");
        assert!(debug.starts_with("Exception { what: \"\", error: Some(Error {"));
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_throw_and_catch_round_trip() {
        let error = Error::generic(GenericCode::InvalidRequest, "thrown", None, None);
        let caught: crate::Result<()> = catch(|| Exception::new(error.clone()).throw());
        let exception = caught.unwrap_err();
        assert!(exception.error().is_some_and(|held| held.ptr_eq(&error)));
        assert_eq!(exception.what(), "Invalid request");
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_catch_resumes_foreign_panics() {
        let outcome = std::panic::catch_unwind(|| catch::<()>(|| panic!("not an exception")));
        let payload = outcome.unwrap_err();
        assert_eq!(payload.downcast_ref::<&str>(), Some(&"not an exception"));
    }
}
