//! Source provenance of an [`Error`](crate::Error).

/// The source file and line where an error was raised.
///
/// Locations are usually captured with [`Location::caller`] or the
/// [`error!`](crate::error!) macro, but can also be given explicitly when an
/// error is reported on behalf of some other code.
///
/// # Examples
///
/// ```
/// use causeway::Location;
///
/// let location = Location::new("foo.cpp", 42);
/// assert_eq!(location.to_string(), "foo.cpp:42");
///
/// let here = Location::caller();
/// assert!(here.file().ends_with(".rs"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    /// The source file path.
    file: &'static str,
    /// The line number, or `0` if unknown.
    line: u32,
}

impl Location {
    /// Creates a location from a file name and a line number.
    #[inline]
    #[must_use]
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Captures the location of the caller.
    ///
    /// Functions marked with `#[track_caller]` forward their own caller, so an
    /// error built deep inside a helper still points at user code.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        let location = core::panic::Location::caller();
        Self::new(location.file(), location.line())
    }

    /// Returns the source file path.
    #[inline]
    pub const fn file(&self) -> &'static str {
        self.file
    }

    /// Returns the line number, or `0` if unknown.
    #[inline]
    pub const fn line(&self) -> u32 {
        self.line
    }
}

impl core::fmt::Display for Location {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

impl From<&'static core::panic::Location<'static>> for Location {
    fn from(location: &'static core::panic::Location<'static>) -> Self {
        Self::new(location.file(), location.line())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[track_caller]
    fn forwarded() -> Location {
        Location::caller()
    }

    #[test]
    fn test_caller_is_forwarded() {
        let expected_line = line!() + 1;
        let location = forwarded();
        assert_eq!(location.line(), expected_line);
        assert_eq!(location.file(), file!());
    }

    #[test]
    fn test_display() {
        assert_eq!(Location::new("a/b.rs", 7).to_string(), "a/b.rs:7");
    }
}
