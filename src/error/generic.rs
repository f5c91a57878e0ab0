//! Library-defined error codes.

/// The closed set of codes carried by [generic](crate::ErrorKind::Generic)
/// errors.
///
/// # Examples
///
/// ```
/// use causeway::GenericCode;
///
/// assert_eq!(GenericCode::TimedOut.text(), "Timed out");
/// assert_eq!(GenericCode::from_raw(3), Some(GenericCode::TimedOut));
/// assert_eq!(GenericCode::from_raw(0), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum GenericCode {
    /// The cause of the failure is not known.
    Unknown = 1,
    /// An allocation failed.
    OutOfMemory = 2,
    /// An operation did not complete in time.
    TimedOut = 3,
    /// An argument was outside of its accepted domain.
    InvalidArgument = 4,
    /// The operation is not implemented.
    NotImplemented = 5,
    /// The request is not valid in the current state.
    InvalidRequest = 6,
}

impl GenericCode {
    /// All codes, in ascending numeric order.
    pub const ALL: [Self; 6] = [
        Self::Unknown,
        Self::OutOfMemory,
        Self::TimedOut,
        Self::InvalidArgument,
        Self::NotImplemented,
        Self::InvalidRequest,
    ];

    /// Looks up the code with the given numeric value.
    #[must_use]
    pub const fn from_raw(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Unknown),
            2 => Some(Self::OutOfMemory),
            3 => Some(Self::TimedOut),
            4 => Some(Self::InvalidArgument),
            5 => Some(Self::NotImplemented),
            6 => Some(Self::InvalidRequest),
            _ => None,
        }
    }

    /// Returns the numeric value of the code.
    #[inline]
    pub const fn as_raw(self) -> i32 {
        self as i32
    }

    /// Returns the human-readable description of the code.
    pub const fn text(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown error",
            Self::OutOfMemory => "Out of memory",
            Self::TimedOut => "Timed out",
            Self::InvalidArgument => "Invalid argument",
            Self::NotImplemented => "Not implemented",
            Self::InvalidRequest => "Invalid request",
        }
    }
}

impl core::fmt::Display for GenericCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.text())
    }
}
