//! Operating-system status codes.

use alloc::string::String;

use crate::hooks::status_text;

/// A status code reported by the platform layer.
///
/// Negative values are failures, following the HRESULT convention. The
/// textual description comes from the hook registered with
/// [`register_platform_text_hook`](crate::hooks::register_platform_text_hook)
/// and, with the `std` feature, falls back to the host's OS error messages.
///
/// # Examples
///
/// ```
/// use causeway::PlatformStatus;
///
/// assert!(PlatformStatus::new(-2147024891).is_failure());
/// assert!(!PlatformStatus::SUCCESS.is_failure());
/// assert_eq!(PlatformStatus::SUCCESS.text(), "");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PlatformStatus(i32);

impl PlatformStatus {
    /// The status of an operation that completed normally.
    pub const SUCCESS: Self = Self(0);

    /// Wraps a raw status code.
    #[inline]
    #[must_use]
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    /// Returns the raw status code.
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Returns `true` if the status denotes a failure.
    #[inline]
    pub const fn is_failure(self) -> bool {
        self.0 < 0
    }

    /// Returns the description of the status.
    ///
    /// The description of [`SUCCESS`](Self::SUCCESS) is always empty.
    pub fn text(self) -> String {
        if self == Self::SUCCESS {
            return String::new();
        }
        status_text::platform_text(self.0).unwrap_or_else(|| os_text(self.0))
    }
}

impl From<i32> for PlatformStatus {
    #[inline]
    fn from(code: i32) -> Self {
        Self(code)
    }
}

#[cfg(feature = "std")]
fn os_text(code: i32) -> String {
    use alloc::string::ToString;

    std::io::Error::from_raw_os_error(code).to_string()
}

#[cfg(not(feature = "std"))]
fn os_text(_code: i32) -> String {
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_is_sign_bit() {
        assert!(PlatformStatus::new(i32::MIN).is_failure());
        assert!(PlatformStatus::new(-1).is_failure());
        assert!(!PlatformStatus::new(1).is_failure());
        assert!(!PlatformStatus::SUCCESS.is_failure());
    }

    #[test]
    fn test_success_has_no_text() {
        assert!(PlatformStatus::SUCCESS.text().is_empty());
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_falls_back_to_os_messages() {
        use alloc::string::ToString;

        let code = 2;
        let expected = std::io::Error::from_raw_os_error(code).to_string();
        assert_eq!(PlatformStatus::new(code).text(), expected);
    }
}
