//! Structured logging of error chains through [`tracing`].
//!
//! Enabled by the `tracing` feature. The crate itself never installs a
//! subscriber; events go to whatever the application configured.
//!
//! # Examples
//!
//! ```
//! use causeway::{Error, GenericCode, log::log_error};
//!
//! let error = Error::generic(
//!     GenericCode::TimedOut,
//!     "flushing the journal",
//!     None,
//!     Some(Error::new(0, "disk busy", None, None)),
//! );
//! log_error(&error);
//! ```

use crate::{Error, Exception};

/// Emits the error and its causes.
///
/// The error itself is logged as one `ERROR` event with the fields
/// `error.kind`, `error.code`, `error.message`, `error.file` and
/// `error.line`, and its `{MS}` rendering as the event message. Every cause
/// follows as a `DEBUG` event with the same fields and its depth in the
/// chain.
pub fn log_error(error: &Error) {
    tracing::error!(
        error.kind = error.kind().name(),
        error.code = error.raw_code(),
        error.message = error.message(),
        error.file = error.file().unwrap_or_default(),
        error.line = error.line(),
        "{error}"
    );

    for (depth, cause) in error.chain().enumerate().skip(1) {
        tracing::debug!(
            depth,
            error.kind = cause.kind().name(),
            error.code = cause.raw_code(),
            error.message = cause.message(),
            error.file = cause.file().unwrap_or_default(),
            error.line = cause.line(),
            "caused by: {cause}"
        );
    }
}

/// Emits the error carried by an exception, or a single `ERROR` event with
/// the exception's description if it carries none.
pub fn log_exception(exception: &Exception) {
    match exception.error().and_then(|error| error.get()) {
        Some(error) => log_error(error),
        None => tracing::error!("{}", exception.what()),
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use alloc::{string::String, sync::Arc, vec::Vec};
    use std::{
        io,
        sync::{Mutex, PoisonError},
    };

    use super::*;
    use crate::{GenericCode, KernelStatus, Location, ResultExt};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let buffer = SharedBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        buffer.contents()
    }

    #[test]
    fn test_logs_error_and_causes() {
        let error = Error::generic(
            GenericCode::TimedOut,
            "flushing",
            Some(Location::new("journal.rs", 12)),
            Some(Error::kernel(KernelStatus::IO_TIMEOUT, "device", None, None)),
        );
        let output = capture(|| log_error(&error));
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("ERROR"));
        assert!(lines[0].contains("flushing [Timed out]"));
        assert!(lines[0].contains("error.kind=\"Generic\""));
        assert!(lines[0].contains("error.code=3"));
        assert!(lines[0].contains("error.file=\"journal.rs\""));
        assert!(lines[0].contains("error.line=12"));
        assert!(lines[1].contains("DEBUG"));
        assert!(lines[1].contains("caused by: device [STATUS_IO_TIMEOUT]"));
        assert!(lines[1].contains("depth=1"));
    }

    #[test]
    fn test_log_err_passes_result_on() {
        let result: Result<(), _> = Err(Error::new(9, "lost", None, None));
        let mut logged = None;
        let output = capture(|| logged = Some(result.log_err()));

        let exception = logged.unwrap().unwrap_err();
        assert_eq!(exception.error().unwrap().raw_code(), 9);
        assert!(output.contains("lost"));
    }

    #[test]
    fn test_unspecified_exception() {
        let output = capture(|| log_exception(&Exception::unspecified()));
        assert!(output.contains("Unspecified exception"));
    }
}
