//! The immutable, chainable error model.
//!
//! An [`Error`] records *what* failed (a code in one of four domains, see
//! [`ErrorCode`]), *why* in the caller's words (the message), *where* (an
//! optional [`Location`]), and *what caused it* (an optional inner error).
//! Errors are shared through [`ErrorRef`], a reference-counted pointer, and
//! cannot be modified once constructed.
//!
//! # Examples
//!
//! ```
//! use causeway::{Error, GenericCode, KernelStatus, Location};
//!
//! let cause = Error::kernel(
//!     KernelStatus::OBJECT_NAME_NOT_FOUND,
//!     "opening the section",
//!     None,
//!     None,
//! );
//! let error = Error::generic(
//!     GenericCode::InvalidRequest,
//!     "mapping the shared buffer",
//!     Some(Location::new("buffer.rs", 17)),
//!     Some(cause.clone()),
//! );
//!
//! assert_eq!(error.to_string(), "mapping the shared buffer [Invalid request]");
//! assert_eq!(error.format("{T} at {FL}"), "Generic at buffer.rs:17");
//! assert!(error.inner().unwrap().ptr_eq(&cause));
//! assert_eq!(error.root_cause().error_text(), "STATUS_OBJECT_NAME_NOT_FOUND");
//! ```

mod generic;
mod kernel;
mod location;
mod platform;

use alloc::{borrow::Cow, string::String};

use causeway_internals::{RefCount, RefCounted, RefPtr};

pub use self::{
    generic::GenericCode, kernel::KernelStatus, location::Location, platform::PlatformStatus,
};
use crate::format::{self, Formatted};

/// A shared, nullable reference to an [`Error`].
pub type ErrorRef = RefPtr<Error>;

/// The domain an error code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No particular domain. The code is opaque and has no text.
    Unspecified,
    /// A [`GenericCode`] defined by this library.
    Generic,
    /// A [`PlatformStatus`] from the operating system.
    Platform,
    /// A [`KernelStatus`] from the kernel layer.
    Kernel,
}

impl ErrorKind {
    /// Returns the name of the kind, as rendered by the `{T}` tag.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unspecified => "Unspecified",
            Self::Generic => "Generic",
            Self::Platform => "Platform",
            Self::Kernel => "Kernel",
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// A code tagged with the domain that gives it meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// An opaque code without a domain.
    Unspecified(i32),
    /// A library-defined code.
    Generic(GenericCode),
    /// An operating-system status.
    Platform(PlatformStatus),
    /// A kernel status.
    Kernel(KernelStatus),
}

impl ErrorCode {
    /// Returns the domain of the code.
    pub const fn kind(self) -> ErrorKind {
        match self {
            Self::Unspecified(_) => ErrorKind::Unspecified,
            Self::Generic(_) => ErrorKind::Generic,
            Self::Platform(_) => ErrorKind::Platform,
            Self::Kernel(_) => ErrorKind::Kernel,
        }
    }

    /// Returns the numeric value of the code.
    pub const fn raw(self) -> i32 {
        match self {
            Self::Unspecified(code) => code,
            Self::Generic(code) => code.as_raw(),
            Self::Platform(status) => status.raw(),
            Self::Kernel(status) => status.raw(),
        }
    }

    /// Resolves the code to a description in its own domain.
    ///
    /// Unspecified codes have no description.
    pub fn text(self) -> Cow<'static, str> {
        match self {
            Self::Unspecified(_) => Cow::Borrowed(""),
            Self::Generic(code) => Cow::Borrowed(code.text()),
            Self::Platform(status) => Cow::Owned(status.text()),
            Self::Kernel(status) => status.text(),
        }
    }
}

/// An immutable record of a failure.
///
/// Errors are only ever created behind an [`ErrorRef`], through one named
/// constructor per [`ErrorKind`]. The description of the code is resolved
/// once, when the error is built. Dropping the last reference to an error
/// also drops its reference to the inner error.
pub struct Error {
    /// Owner counter for [`ErrorRef`].
    count: RefCount,
    /// What failed.
    code: ErrorCode,
    /// `code` resolved in its own domain at construction.
    text: Cow<'static, str>,
    /// The caller's description, never modified.
    message: String,
    /// Where the error was raised.
    location: Option<Location>,
    /// The error that caused this one. Never a null pointer.
    inner: Option<ErrorRef>,
}

// SAFETY:
// 1. `count` is private to this module and only exposed through this trait.
// 2. The default `release` is kept, and errors are only created through
//    `Error::build`, which allocates each of them in its own `Box` via
//    `RefPtr::new`.
unsafe impl RefCounted for Error {
    #[inline]
    fn ref_count(&self) -> &RefCount {
        &self.count
    }
}

impl Error {
    /// Creates an error without a particular domain.
    ///
    /// # Examples
    ///
    /// ```
    /// use causeway::{Error, ErrorKind};
    ///
    /// let error = Error::new(5, "bad input", None, None);
    /// assert_eq!(error.kind(), ErrorKind::Unspecified);
    /// assert_eq!(error.error_text(), "");
    /// ```
    #[must_use]
    pub fn new(
        code: i32,
        message: impl Into<String>,
        location: Option<Location>,
        inner: Option<ErrorRef>,
    ) -> ErrorRef {
        Self::build(ErrorCode::Unspecified(code), message.into(), location, inner)
    }

    /// Creates an error carrying a library-defined code.
    #[must_use]
    pub fn generic(
        code: GenericCode,
        message: impl Into<String>,
        location: Option<Location>,
        inner: Option<ErrorRef>,
    ) -> ErrorRef {
        Self::build(ErrorCode::Generic(code), message.into(), location, inner)
    }

    /// Creates an error carrying an operating-system status.
    #[must_use]
    pub fn platform(
        status: impl Into<PlatformStatus>,
        message: impl Into<String>,
        location: Option<Location>,
        inner: Option<ErrorRef>,
    ) -> ErrorRef {
        Self::build(
            ErrorCode::Platform(status.into()),
            message.into(),
            location,
            inner,
        )
    }

    /// Creates an error carrying a kernel status.
    #[must_use]
    pub fn kernel(
        status: impl Into<KernelStatus>,
        message: impl Into<String>,
        location: Option<Location>,
        inner: Option<ErrorRef>,
    ) -> ErrorRef {
        Self::build(
            ErrorCode::Kernel(status.into()),
            message.into(),
            location,
            inner,
        )
    }

    fn build(
        code: ErrorCode,
        message: String,
        location: Option<Location>,
        inner: Option<ErrorRef>,
    ) -> ErrorRef {
        RefPtr::new(Self {
            count: RefCount::new(),
            code,
            text: code.text(),
            message,
            location,
            inner: inner.filter(|inner| !inner.is_null()),
        })
    }

    /// Returns the domain of the error code.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    /// Returns the error code together with its domain.
    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Returns the numeric value of the error code.
    #[inline]
    pub fn raw_code(&self) -> i32 {
        self.code.raw()
    }

    /// Returns the message given at construction.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns where the error was raised, if known.
    #[inline]
    pub fn location(&self) -> Option<Location> {
        self.location
    }

    /// Returns the source file the error was raised in, if known.
    #[inline]
    pub fn file(&self) -> Option<&'static str> {
        self.location.map(|location| location.file())
    }

    /// Returns the line the error was raised at, or `0` if unknown.
    #[inline]
    pub fn line(&self) -> u32 {
        self.location.map_or(0, |location| location.line())
    }

    /// Returns the reference to the error that caused this one.
    #[inline]
    pub fn inner(&self) -> Option<&ErrorRef> {
        self.inner.as_ref()
    }

    /// Returns the error that caused this one.
    #[inline]
    pub fn cause(&self) -> Option<&Self> {
        self.inner.as_ref().and_then(RefPtr::get)
    }

    /// Iterates over this error and all of its causes, outermost first.
    ///
    /// # Examples
    ///
    /// ```
    /// use causeway::Error;
    ///
    /// let root = Error::new(1, "disk", None, None);
    /// let middle = Error::new(2, "volume", None, Some(root));
    /// let top = Error::new(3, "mount", None, Some(middle));
    ///
    /// let messages: Vec<_> = top.chain().map(|error| error.message()).collect();
    /// assert_eq!(messages, ["mount", "volume", "disk"]);
    /// ```
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// Returns the innermost error of the chain.
    pub fn root_cause(&self) -> &Self {
        let mut current = self;
        while let Some(cause) = current.cause() {
            current = cause;
        }
        current
    }

    /// Returns the description of the error code in its own domain.
    ///
    /// The text is resolved when the error is built, so hooks registered
    /// later do not change it. Codes without a known description produce an
    /// empty string.
    #[inline]
    pub fn error_text(&self) -> &str {
        &self.text
    }

    /// Renders the error according to a template.
    ///
    /// See the [`format`](crate::format) module for the recognized tags.
    ///
    /// # Examples
    ///
    /// ```
    /// use causeway::{Error, Location};
    ///
    /// let error = Error::new(5, "bad input", Some(Location::new("foo.cpp", 42)), None);
    /// assert_eq!(error.format("{M} ({Cd}) at {FL}"), "bad input (5) at foo.cpp:42");
    /// ```
    pub fn format(&self, template: &str) -> String {
        format::render_to_string(self, template)
    }

    /// Returns a value that renders the error according to a template when
    /// displayed, without allocating the result.
    pub fn formatted<'a>(&'a self, template: &'a str) -> Formatted<'a> {
        Formatted::new(self, template)
    }
}

impl Drop for Error {
    fn drop(&mut self) {
        // Unlink uniquely owned causes one at a time, so dropping a long
        // chain takes constant stack.
        let mut next = self.inner.take();
        while let Some(mut inner) = next {
            next = inner.get_mut().and_then(|error| error.inner.take());
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        format::render(self, "{MS}", f)
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind())
            .field("code", &self.raw_code())
            .field("message", &self.message)
            .field("location", &self.location)
            .field("inner", &self.cause())
            .finish()
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        self.cause().map(|cause| cause as &(dyn core::error::Error + 'static))
    }
}

/// Iterator over an error and its causes.
///
/// Created by [`Error::chain`].
#[derive(Clone, Debug)]
#[must_use]
pub struct Chain<'a> {
    /// The next error to yield.
    next: Option<&'a Error>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Error;

    fn next(&mut self) -> Option<&'a Error> {
        let current = self.next?;
        self.next = current.cause();
        Some(current)
    }
}

impl core::iter::FusedIterator for Chain<'_> {}
