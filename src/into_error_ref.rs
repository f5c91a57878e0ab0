use crate::{ErrorRef, Exception};

/// Conversion into an error that can become the cause of another one.
///
/// This is what lets [`ResultExt`](crate::ResultExt) wrap the error arm of a
/// `Result` as the inner error of a new [`Error`](crate::Error). An exception that holds no
/// error converts to `None`.
///
/// # Examples
///
/// ```
/// use causeway::{Error, Exception, IntoErrorRef};
///
/// let error = Error::new(1, "cause", None, None);
/// let exception = Exception::new(error.clone());
/// assert!(exception.into_error_ref().unwrap().ptr_eq(&error));
///
/// assert!(Exception::unspecified().into_error_ref().is_none());
/// ```
pub trait IntoErrorRef {
    /// Converts `self` into a shared error.
    #[track_caller]
    fn into_error_ref(self) -> Option<ErrorRef>;
}

impl IntoErrorRef for ErrorRef {
    #[inline]
    fn into_error_ref(self) -> Option<ErrorRef> {
        (!self.is_null()).then_some(self)
    }
}

impl IntoErrorRef for Exception {
    #[inline]
    fn into_error_ref(self) -> Option<ErrorRef> {
        self.into_error()
    }
}

/// I/O errors become [platform](crate::ErrorKind::Platform) errors carrying
/// the OS error code, or `0` for errors that did not come from the OS. The
/// message is the I/O error's own description.
#[cfg(feature = "std")]
impl IntoErrorRef for std::io::Error {
    #[track_caller]
    fn into_error_ref(self) -> Option<ErrorRef> {
        use alloc::string::ToString;

        let code = self.raw_os_error().unwrap_or(0);
        Some(crate::Error::platform(
            code,
            self.to_string(),
            Some(crate::Location::caller()),
            None,
        ))
    }
}
