/// Creates an [unspecified](crate::ErrorKind::Unspecified) error.
///
/// The arguments are interpreted in the same way as the [`format!()`] macro
/// and become the message of the new error. The location is the file and
/// line of the macro invocation.
///
/// An inner error can be given first, as `inner: cause,`. It is converted
/// through [`IntoErrorRef`](crate::IntoErrorRef), so it may be an
/// [`ErrorRef`](crate::ErrorRef) or an [`Exception`](crate::Exception).
///
/// [`format!()`]: alloc::format
///
/// # Examples
///
/// ```
/// use causeway::{ErrorKind, prelude::*};
///
/// let key = "retention";
/// let error = error!("missing key {key:?}");
/// assert_eq!(error.kind(), ErrorKind::Unspecified);
/// assert_eq!(error.message(), "missing key \"retention\"");
/// assert_eq!(error.file(), Some(file!()));
///
/// let outer = error!(inner: error.clone(), "loading settings");
/// assert!(outer.inner().unwrap().ptr_eq(&error));
/// ```
#[macro_export]
macro_rules! error {
    (inner: $inner:expr, $($arg:tt)+) => {
        $crate::__private::Error::new(
            0,
            $crate::__private::format_message($crate::__private::format_args!($($arg)+)),
            ::core::option::Option::Some($crate::__private::Location::new(
                ::core::file!(),
                ::core::line!(),
            )),
            $crate::__private::IntoErrorRef::into_error_ref($inner),
        )
    };
    ($($arg:tt)+) => {
        $crate::__private::Error::new(
            0,
            $crate::__private::format_message($crate::__private::format_args!($($arg)+)),
            ::core::option::Option::Some($crate::__private::Location::new(
                ::core::file!(),
                ::core::line!(),
            )),
            ::core::option::Option::None,
        )
    };
}

/// Creates a [generic](crate::ErrorKind::Generic) error.
///
/// The first argument is the [`GenericCode`](crate::GenericCode), the rest
/// are format arguments for the message.
///
/// # Examples
///
/// ```
/// use causeway::{GenericCode, prelude::*};
///
/// let limit = 64;
/// let error = generic_error!(GenericCode::InvalidArgument, "batch larger than {limit}");
/// assert_eq!(error.to_string(), "batch larger than 64 [Invalid argument]");
/// ```
#[macro_export]
macro_rules! generic_error {
    ($code:expr, $($arg:tt)+) => {
        $crate::__private::Error::generic(
            $code,
            $crate::__private::format_message($crate::__private::format_args!($($arg)+)),
            ::core::option::Option::Some($crate::__private::Location::new(
                ::core::file!(),
                ::core::line!(),
            )),
            ::core::option::Option::None,
        )
    };
}

/// Return early with an error.
///
/// This macro is similar to the [`bail!`] macro from the [`anyhow`] crate.
/// It builds an error with the same arguments as the [`error!`] macro, and
/// then returns early from the function with that error wrapped in an `Err`.
///
/// This is equivalent to writing `return Err(error!(...).into());`
///
/// [`bail!`]: https://docs.rs/anyhow/latest/anyhow/macro.bail.html
/// [`anyhow`]: https://docs.rs/anyhow/latest/anyhow/
///
/// # Examples
///
/// ```
/// use causeway::prelude::*;
///
/// fn reserve(slots: usize) -> causeway::Result<usize> {
///     if slots == 0 {
///         bail!("cannot reserve {slots} slots");
///     }
///     Ok(slots)
/// }
///
/// let exception = reserve(0).unwrap_err();
/// assert_eq!(exception.error().unwrap().message(), "cannot reserve 0 slots");
/// ```
#[macro_export]
macro_rules! bail {
    ($($args:tt)*) => {
        return $crate::__private::Err($crate::error!($($args)*).into())
    };
}

#[cfg(test)]
mod tests {
    use crate::{ErrorKind, Exception, GenericCode};

    #[test]
    fn test_error_records_invocation_site() {
        let line = line!() + 1;
        let error = error!("plain");
        assert_eq!(error.message(), "plain");
        assert_eq!(error.raw_code(), 0);
        assert_eq!(error.line(), line);
        assert_eq!(error.file(), Some(file!()));
        assert!(error.inner().is_none());
    }

    #[test]
    fn test_error_with_inner_exception() {
        let cause = generic_error!(GenericCode::TimedOut, "waited {}ms", 250);
        let outer = error!(inner: Exception::new(cause.clone()), "polling {}", "queue");
        assert_eq!(outer.message(), "polling queue");
        assert!(outer.inner().unwrap().ptr_eq(&cause));
        assert_eq!(cause.kind(), ErrorKind::Generic);
        assert_eq!(cause.message(), "waited 250ms");

        let detached = error!(inner: Exception::unspecified(), "no cause");
        assert!(detached.inner().is_none());
    }

    #[test]
    fn test_bail_returns_exception() {
        fn fails(flag: bool) -> crate::Result<u8> {
            if flag {
                bail!("flag was {}", flag);
            }
            Ok(1)
        }

        assert_eq!(fails(false).unwrap(), 1);
        let exception = fails(true).unwrap_err();
        assert_eq!(exception.error().unwrap().message(), "flag was true");
        assert_eq!(exception.what(), "");
    }
}
