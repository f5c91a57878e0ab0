use alloc::string::String;

use crate::{Error, Exception, GenericCode, IntoErrorRef, KernelStatus, Location, PlatformStatus};

mod sealed {
    pub trait Sealed {}
    impl<V, E> Sealed for Result<V, E> {}
}

/// Extension methods wrapping the error arm of a `Result` in a new
/// [`Error`].
///
/// Each method keeps `Ok` values untouched. On `Err`, the original error
/// becomes the [inner](Error::inner) error of a new one, raised at the
/// caller's location, and the result is returned as a
/// [`causeway::Result`](crate::Result).
///
/// # Examples
///
/// ```
/// use causeway::{Error, GenericCode, prelude::*};
///
/// fn parse_port(text: &str) -> Result<u16, ErrorRef> {
///     text.parse()
///         .map_err(|_| Error::generic(GenericCode::InvalidArgument, text, None, None))
/// }
///
/// fn load() -> causeway::Result<u16> {
///     parse_port("http").context("loading the listener configuration")
/// }
///
/// let exception = load().unwrap_err();
/// let error = exception.error().unwrap();
/// assert_eq!(error.message(), "loading the listener configuration");
/// assert_eq!(error.root_cause().format("{MS}"), "http [Invalid argument]");
/// ```
pub trait ResultExt<V, E>: sealed::Sealed {
    /// Wraps the error in an [unspecified](crate::ErrorKind::Unspecified)
    /// error with the given message.
    #[track_caller]
    fn context(self, message: impl Into<String>) -> crate::Result<V>
    where
        E: IntoErrorRef;

    /// Like [`context`](Self::context), building the message only on error.
    #[track_caller]
    fn context_lazy<M, F>(self, message: F) -> crate::Result<V>
    where
        E: IntoErrorRef,
        F: FnOnce() -> M,
        M: Into<String>;

    /// Wraps the error in a [generic](crate::ErrorKind::Generic) error.
    #[track_caller]
    fn context_generic(self, code: GenericCode, message: impl Into<String>) -> crate::Result<V>
    where
        E: IntoErrorRef;

    /// Wraps the error in a [platform](crate::ErrorKind::Platform) error.
    #[track_caller]
    fn context_platform(
        self,
        status: impl Into<PlatformStatus>,
        message: impl Into<String>,
    ) -> crate::Result<V>
    where
        E: IntoErrorRef;

    /// Wraps the error in a [kernel](crate::ErrorKind::Kernel) error.
    #[track_caller]
    fn context_kernel(
        self,
        status: impl Into<KernelStatus>,
        message: impl Into<String>,
    ) -> crate::Result<V>
    where
        E: IntoErrorRef;

    /// Converts the error into an [`Exception`] without wrapping it.
    #[track_caller]
    fn into_exception(self) -> crate::Result<V>
    where
        E: IntoErrorRef;

    /// Logs the error chain through [`tracing`] and passes the result on.
    ///
    /// See [`log::log_error`](crate::log::log_error) for the emitted events.
    #[cfg(feature = "tracing")]
    #[cfg_attr(docsrs, doc(cfg(feature = "tracing")))]
    #[track_caller]
    fn log_err(self) -> crate::Result<V>
    where
        E: IntoErrorRef;
}

impl<V, E> ResultExt<V, E> for Result<V, E> {
    #[inline]
    fn context(self, message: impl Into<String>) -> crate::Result<V>
    where
        E: IntoErrorRef,
    {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(Error::new(0, message, Some(Location::caller()), e.into_error_ref()).into()),
        }
    }

    #[inline]
    fn context_lazy<M, F>(self, message: F) -> crate::Result<V>
    where
        E: IntoErrorRef,
        F: FnOnce() -> M,
        M: Into<String>,
    {
        match self {
            Ok(v) => Ok(v),
            Err(e) => {
                Err(Error::new(0, message(), Some(Location::caller()), e.into_error_ref()).into())
            }
        }
    }

    #[inline]
    fn context_generic(self, code: GenericCode, message: impl Into<String>) -> crate::Result<V>
    where
        E: IntoErrorRef,
    {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(Error::generic(
                code,
                message,
                Some(Location::caller()),
                e.into_error_ref(),
            )
            .into()),
        }
    }

    #[inline]
    fn context_platform(
        self,
        status: impl Into<PlatformStatus>,
        message: impl Into<String>,
    ) -> crate::Result<V>
    where
        E: IntoErrorRef,
    {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(Error::platform(
                status,
                message,
                Some(Location::caller()),
                e.into_error_ref(),
            )
            .into()),
        }
    }

    #[inline]
    fn context_kernel(
        self,
        status: impl Into<KernelStatus>,
        message: impl Into<String>,
    ) -> crate::Result<V>
    where
        E: IntoErrorRef,
    {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(Error::kernel(
                status,
                message,
                Some(Location::caller()),
                e.into_error_ref(),
            )
            .into()),
        }
    }

    #[inline]
    fn into_exception(self) -> crate::Result<V>
    where
        E: IntoErrorRef,
    {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(e.into_error_ref().map_or_else(Exception::unspecified, Exception::new)),
        }
    }

    #[cfg(feature = "tracing")]
    #[inline]
    fn log_err(self) -> crate::Result<V>
    where
        E: IntoErrorRef,
    {
        let result = self.into_exception();
        if let Err(exception) = &result {
            crate::log::log_exception(exception);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, ErrorRef};

    fn failing() -> Result<(), ErrorRef> {
        Err(Error::kernel(KernelStatus::IO_TIMEOUT, "read", None, None))
    }

    #[test]
    fn test_ok_passes_through() {
        let ok: Result<u8, ErrorRef> = Ok(3);
        assert_eq!(ok.context("unused").unwrap(), 3);
    }

    #[test]
    fn test_context_wraps_and_records_caller() {
        let line = line!() + 1;
        let exception = failing().context("loading").unwrap_err();
        let error = exception.error().unwrap();
        assert_eq!(error.kind(), ErrorKind::Unspecified);
        assert_eq!(error.message(), "loading");
        assert_eq!(error.file(), Some(file!()));
        assert_eq!(error.line(), line);
        assert_eq!(error.cause().map(Error::kind), Some(ErrorKind::Kernel));
        assert_eq!(exception.what(), "");
    }

    #[test]
    fn test_typed_contexts_stack() {
        let exception = failing()
            .context_generic(GenericCode::TimedOut, "waiting")
            .context_platform(-7, "service")
            .context_lazy(|| alloc::format!("attempt {}", 3))
            .unwrap_err();
        let error = exception.error().unwrap();
        let kinds: alloc::vec::Vec<_> = error.chain().map(Error::kind).collect();
        assert_eq!(
            kinds,
            [
                ErrorKind::Unspecified,
                ErrorKind::Platform,
                ErrorKind::Generic,
                ErrorKind::Kernel
            ]
        );
        assert_eq!(error.message(), "attempt 3");
    }

    #[test]
    fn test_context_kernel() {
        let exception = failing()
            .context_kernel(KernelStatus::CANCELLED, "aborted")
            .unwrap_err();
        assert_eq!(exception.what(), "STATUS_CANCELLED");
    }

    #[test]
    fn test_unspecified_exception_has_no_cause() {
        let result: Result<(), Exception> = Err(Exception::unspecified());
        let exception = result.context("outer").unwrap_err();
        assert!(exception.error().unwrap().inner().is_none());

        let passthrough: Result<(), Exception> = Err(Exception::unspecified());
        assert!(passthrough.into_exception().unwrap_err().error().is_none());
    }
}
