//! Kernel status codes and their symbolic names.

use alloc::borrow::Cow;

use crate::hooks::status_text;

/// A status code reported by the kernel layer (an `NTSTATUS`).
///
/// The two high bits encode the severity: `0b00` success, `0b01`
/// informational, `0b10` warning and `0b11` error. Success and informational
/// codes are non-negative.
///
/// # Examples
///
/// ```
/// use causeway::KernelStatus;
///
/// assert!(KernelStatus::SUCCESS.is_success());
/// assert!(!KernelStatus::ACCESS_DENIED.is_success());
/// assert_eq!(KernelStatus::ACCESS_DENIED.name(), Some("STATUS_ACCESS_DENIED"));
/// assert_eq!(KernelStatus::from_bits(0xC000_0022), KernelStatus::ACCESS_DENIED);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct KernelStatus(i32);

impl KernelStatus {
    /// `STATUS_SUCCESS`
    pub const SUCCESS: Self = Self::from_bits(0x0000_0000);
    /// `STATUS_TIMEOUT`
    pub const TIMEOUT: Self = Self::from_bits(0x0000_0102);
    /// `STATUS_PENDING`
    pub const PENDING: Self = Self::from_bits(0x0000_0103);
    /// `STATUS_NOT_ALL_ASSIGNED`
    pub const NOT_ALL_ASSIGNED: Self = Self::from_bits(0x0000_0106);
    /// `STATUS_BUFFER_OVERFLOW`
    pub const BUFFER_OVERFLOW: Self = Self::from_bits(0x8000_0005);
    /// `STATUS_NO_MORE_ENTRIES`
    pub const NO_MORE_ENTRIES: Self = Self::from_bits(0x8000_001A);
    /// `STATUS_UNSUCCESSFUL`
    pub const UNSUCCESSFUL: Self = Self::from_bits(0xC000_0001);
    /// `STATUS_NOT_IMPLEMENTED`
    pub const NOT_IMPLEMENTED: Self = Self::from_bits(0xC000_0002);
    /// `STATUS_INFO_LENGTH_MISMATCH`
    pub const INFO_LENGTH_MISMATCH: Self = Self::from_bits(0xC000_0004);
    /// `STATUS_INVALID_HANDLE`
    pub const INVALID_HANDLE: Self = Self::from_bits(0xC000_0008);
    /// `STATUS_INVALID_PARAMETER`
    pub const INVALID_PARAMETER: Self = Self::from_bits(0xC000_000D);
    /// `STATUS_NO_MEMORY`
    pub const NO_MEMORY: Self = Self::from_bits(0xC000_0017);
    /// `STATUS_ACCESS_DENIED`
    pub const ACCESS_DENIED: Self = Self::from_bits(0xC000_0022);
    /// `STATUS_BUFFER_TOO_SMALL`
    pub const BUFFER_TOO_SMALL: Self = Self::from_bits(0xC000_0023);
    /// `STATUS_OBJECT_NAME_INVALID`
    pub const OBJECT_NAME_INVALID: Self = Self::from_bits(0xC000_0033);
    /// `STATUS_OBJECT_NAME_NOT_FOUND`
    pub const OBJECT_NAME_NOT_FOUND: Self = Self::from_bits(0xC000_0034);
    /// `STATUS_OBJECT_PATH_NOT_FOUND`
    pub const OBJECT_PATH_NOT_FOUND: Self = Self::from_bits(0xC000_003A);
    /// `STATUS_OBJECT_PATH_SYNTAX_BAD`
    pub const OBJECT_PATH_SYNTAX_BAD: Self = Self::from_bits(0xC000_003B);
    /// `STATUS_SHARING_VIOLATION`
    pub const SHARING_VIOLATION: Self = Self::from_bits(0xC000_0043);
    /// `STATUS_IO_TIMEOUT`
    pub const IO_TIMEOUT: Self = Self::from_bits(0xC000_00B5);
    /// `STATUS_NOT_SUPPORTED`
    pub const NOT_SUPPORTED: Self = Self::from_bits(0xC000_00BB);
    /// `STATUS_CANCELLED`
    pub const CANCELLED: Self = Self::from_bits(0xC000_0120);
    /// `STATUS_CONNECTION_REFUSED`
    pub const CONNECTION_REFUSED: Self = Self::from_bits(0xC000_0236);

    /// Wraps a raw status code.
    #[inline]
    #[must_use]
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    /// Wraps a status code given by its unsigned bit pattern, the way the
    /// codes are usually written down.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits as i32)
    }

    /// Returns the raw status code.
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Returns the unsigned bit pattern of the status code.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0 as u32
    }

    /// Returns `true` for success and informational codes.
    #[inline]
    pub const fn is_success(self) -> bool {
        self.0 >= 0
    }

    /// Returns `true` for codes of error severity.
    #[inline]
    pub const fn is_error(self) -> bool {
        self.bits() >> 30 == 0b11
    }

    /// Returns the symbolic name of a well-known status code.
    pub fn name(self) -> Option<&'static str> {
        NAMES
            .binary_search_by_key(&self.bits(), |&(bits, _)| bits)
            .ok()
            .map(|index| NAMES[index].1)
    }

    /// Returns the description of the status.
    ///
    /// Codes in the built-in name table are described by their
    /// [`name`](Self::name). Other codes are passed to the registered
    /// [kernel text hook](crate::hooks::register_kernel_text_hook), and are
    /// described as empty if it does not know them either.
    pub fn text(self) -> Cow<'static, str> {
        match self.name() {
            Some(name) => Cow::Borrowed(name),
            None => status_text::kernel_text(self.0).map_or(Cow::Borrowed(""), Cow::Owned),
        }
    }
}

impl From<i32> for KernelStatus {
    #[inline]
    fn from(code: i32) -> Self {
        Self(code)
    }
}

impl core::fmt::Debug for KernelStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "KernelStatus({:#010x})", self.bits()),
        }
    }
}

/// Symbolic names, sorted by bit pattern for binary search.
static NAMES: &[(u32, &str)] = &[
    (0x0000_0000, "STATUS_SUCCESS"),
    (0x0000_0102, "STATUS_TIMEOUT"),
    (0x0000_0103, "STATUS_PENDING"),
    (0x0000_0104, "STATUS_REPARSE"),
    (0x0000_0105, "STATUS_MORE_ENTRIES"),
    (0x0000_0106, "STATUS_NOT_ALL_ASSIGNED"),
    (0x8000_0005, "STATUS_BUFFER_OVERFLOW"),
    (0x8000_0006, "STATUS_NO_MORE_FILES"),
    (0x8000_001A, "STATUS_NO_MORE_ENTRIES"),
    (0xC000_0001, "STATUS_UNSUCCESSFUL"),
    (0xC000_0002, "STATUS_NOT_IMPLEMENTED"),
    (0xC000_0003, "STATUS_INVALID_INFO_CLASS"),
    (0xC000_0004, "STATUS_INFO_LENGTH_MISMATCH"),
    (0xC000_0005, "STATUS_ACCESS_VIOLATION"),
    (0xC000_0008, "STATUS_INVALID_HANDLE"),
    (0xC000_000D, "STATUS_INVALID_PARAMETER"),
    (0xC000_000F, "STATUS_NO_SUCH_FILE"),
    (0xC000_0010, "STATUS_INVALID_DEVICE_REQUEST"),
    (0xC000_0011, "STATUS_END_OF_FILE"),
    (0xC000_0017, "STATUS_NO_MEMORY"),
    (0xC000_0022, "STATUS_ACCESS_DENIED"),
    (0xC000_0023, "STATUS_BUFFER_TOO_SMALL"),
    (0xC000_0024, "STATUS_OBJECT_TYPE_MISMATCH"),
    (0xC000_0033, "STATUS_OBJECT_NAME_INVALID"),
    (0xC000_0034, "STATUS_OBJECT_NAME_NOT_FOUND"),
    (0xC000_0035, "STATUS_OBJECT_NAME_COLLISION"),
    (0xC000_0039, "STATUS_OBJECT_PATH_INVALID"),
    (0xC000_003A, "STATUS_OBJECT_PATH_NOT_FOUND"),
    (0xC000_003B, "STATUS_OBJECT_PATH_SYNTAX_BAD"),
    (0xC000_0043, "STATUS_SHARING_VIOLATION"),
    (0xC000_0056, "STATUS_DELETE_PENDING"),
    (0xC000_009A, "STATUS_INSUFFICIENT_RESOURCES"),
    (0xC000_00B5, "STATUS_IO_TIMEOUT"),
    (0xC000_00BB, "STATUS_NOT_SUPPORTED"),
    (0xC000_0120, "STATUS_CANCELLED"),
    (0xC000_0225, "STATUS_NOT_FOUND"),
    (0xC000_0236, "STATUS_CONNECTION_REFUSED"),
];

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[test]
    fn test_name_table_is_sorted() {
        assert!(NAMES.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn test_success_predicate() {
        assert!(KernelStatus::SUCCESS.is_success());
        assert!(KernelStatus::TIMEOUT.is_success());
        assert!(KernelStatus::NOT_ALL_ASSIGNED.is_success());
        assert!(!KernelStatus::BUFFER_OVERFLOW.is_success());
        assert!(!KernelStatus::NO_MORE_ENTRIES.is_success());
        assert!(!KernelStatus::CANCELLED.is_success());
    }

    #[test]
    fn test_severity() {
        assert!(KernelStatus::ACCESS_DENIED.is_error());
        assert!(!KernelStatus::BUFFER_OVERFLOW.is_error());
        assert!(!KernelStatus::SUCCESS.is_error());
    }

    #[test]
    fn test_named_constants_resolve() {
        let named = [
            KernelStatus::SUCCESS,
            KernelStatus::IO_TIMEOUT,
            KernelStatus::OBJECT_PATH_SYNTAX_BAD,
            KernelStatus::CONNECTION_REFUSED,
            KernelStatus::INFO_LENGTH_MISMATCH,
        ];
        for status in named {
            assert!(status.name().is_some(), "{status:?} has no name");
        }
        assert_eq!(KernelStatus::CANCELLED.name(), Some("STATUS_CANCELLED"));
    }

    #[test]
    fn test_unknown_code() {
        let unknown = KernelStatus::from_bits(0xC0DE_0001);
        assert_eq!(unknown.name(), None);
        assert_eq!(format!("{unknown:?}"), "KernelStatus(0xc0de0001)");
    }
}
