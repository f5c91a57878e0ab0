//! The template mini-language used by [`Error::format`].
//!
//! A template is copied to the output left to right. The following tags are
//! replaced by fields of the error:
//!
//! | Tag    | Output                                                        |
//! |--------|---------------------------------------------------------------|
//! | `{{`   | a literal `{`                                                 |
//! | `{T}`  | the [kind](crate::ErrorKind::name) of the error               |
//! | `{Cd}` | the code in decimal, nothing if the code is `0`               |
//! | `{Cx}` | the code as 8 hex digits, nothing if the code is `0`          |
//! | `{M}`  | the message                                                   |
//! | `{S}`  | the [error text](Error::error_text)                           |
//! | `{MS}` | `message [text]` if both are present, otherwise whichever is  |
//! | `{F}`  | the source file, nothing if unknown                           |
//! | `{L}`  | the source line, nothing if it is `0`                         |
//! | `{FL}` | `file:line`, nothing if the file is unknown                   |
//!
//! Any other `{` is copied through unchanged, so unknown tags such as `{X}`
//! appear verbatim in the output. Only the error itself is rendered: the
//! inner error is never expanded.
//!
//! # Examples
//!
//! ```
//! use causeway::{Error, GenericCode, Location};
//!
//! let error = Error::generic(
//!     GenericCode::OutOfMemory,
//!     "growing the cache",
//!     Some(Location::new("cache.rs", 88)),
//!     None,
//! );
//!
//! assert_eq!(error.format("[{Cx}] {MS} ({F}:{L})"), "[00000002] growing the cache [Out of memory] (cache.rs:88)");
//! assert_eq!(error.format("{{T} is {T}"), "{T} is Generic");
//! assert_eq!(error.format("{X}"), "{X}");
//! ```

use alloc::string::{String, ToString};
use core::fmt::{self, Write};

use crate::Error;

/// A recognized template tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    /// `{{`
    Brace,
    /// `{T}`
    Kind,
    /// `{Cd}`
    DecimalCode,
    /// `{Cx}`
    HexCode,
    /// `{M}`
    Message,
    /// `{S}`
    Text,
    /// `{MS}`
    MessageAndText,
    /// `{F}`
    File,
    /// `{L}`
    Line,
    /// `{FL}`
    FileAndLine,
}

/// Tag spellings, matched against the text following a `{`.
const TAGS: [(&str, Tag); 10] = [
    ("{{", Tag::Brace),
    ("{T}", Tag::Kind),
    ("{Cd}", Tag::DecimalCode),
    ("{Cx}", Tag::HexCode),
    ("{M}", Tag::Message),
    ("{S}", Tag::Text),
    ("{MS}", Tag::MessageAndText),
    ("{F}", Tag::File),
    ("{L}", Tag::Line),
    ("{FL}", Tag::FileAndLine),
];

impl Tag {
    /// Recognizes the tag at the start of `input`, returning it with the
    /// length of its spelling.
    fn parse(input: &str) -> Option<(Self, usize)> {
        TAGS.iter()
            .find(|(spelling, _)| input.starts_with(spelling))
            .map(|&(spelling, tag)| (tag, spelling.len()))
    }

    fn render(self, error: &Error, out: &mut impl Write) -> fmt::Result {
        match self {
            Self::Brace => out.write_char('{'),
            Self::Kind => out.write_str(error.kind().name()),
            Self::DecimalCode => match error.raw_code() {
                0 => Ok(()),
                code => write!(out, "{code}"),
            },
            Self::HexCode => match error.raw_code() {
                0 => Ok(()),
                code => write!(out, "{:08x}", code as u32),
            },
            Self::Message => out.write_str(error.message()),
            Self::Text => out.write_str(error.error_text()),
            Self::MessageAndText => {
                let message = error.message();
                let text = error.error_text();
                if !message.is_empty() && !text.is_empty() {
                    write!(out, "{message} [{text}]")
                } else {
                    out.write_str(message)?;
                    out.write_str(text)
                }
            }
            Self::File => match error.file() {
                Some(file) => out.write_str(file),
                None => Ok(()),
            },
            Self::Line => match error.line() {
                0 => Ok(()),
                line => write!(out, "{line}"),
            },
            Self::FileAndLine => match error.file() {
                Some(file) => write!(out, "{file}:{}", error.line()),
                None => Ok(()),
            },
        }
    }
}

/// Renders `error` according to `template` into `out`.
pub(crate) fn render(error: &Error, template: &str, out: &mut impl Write) -> fmt::Result {
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.write_str(&rest[..start])?;
        rest = &rest[start..];

        match Tag::parse(rest) {
            Some((tag, len)) => {
                tag.render(error, out)?;
                rest = &rest[len..];
            }
            None => {
                out.write_char('{')?;
                rest = &rest[1..];
            }
        }
    }
    out.write_str(rest)
}

pub(crate) fn render_to_string(error: &Error, template: &str) -> String {
    Formatted::new(error, template).to_string()
}

/// An error paired with a template, rendering the template on display.
///
/// Created by [`Error::formatted`].
#[derive(Clone, Copy)]
#[must_use]
pub struct Formatted<'a> {
    /// The error being rendered.
    error: &'a Error,
    /// The template to render it with.
    template: &'a str,
}

impl<'a> Formatted<'a> {
    pub(crate) fn new(error: &'a Error, template: &'a str) -> Self {
        Self { error, template }
    }
}

impl fmt::Display for Formatted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self.error, self.template, f)
    }
}

impl fmt::Debug for Formatted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formatted")
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;
    use crate::{ErrorRef, GenericCode, KernelStatus, Location};

    fn sample() -> ErrorRef {
        Error::new(5, "bad input", Some(Location::new("foo.cpp", 42)), None)
    }

    #[test]
    fn test_double_brace_is_literal() {
        assert_eq!(sample().format("{{"), "{");
        assert_eq!(Error::new(0, "", None, None).format("{{"), "{");
        assert_eq!(sample().format("{{{{"), "{{");
    }

    #[test]
    fn test_message_code_and_location() {
        assert_eq!(sample().format("{M} ({Cd}) at {FL}"), "bad input (5) at foo.cpp:42");
        assert_eq!(sample().format("{F}#{L}"), "foo.cpp#42");
    }

    #[test]
    fn test_zero_code_renders_nothing() {
        let error = Error::new(0, "quiet", None, None);
        assert_eq!(error.format("{Cd}"), "");
        assert_eq!(error.format("{Cx}"), "");
    }

    #[test]
    fn test_hex_code_is_zero_padded_bit_pattern() {
        let error = Error::kernel(KernelStatus::ACCESS_DENIED, "", None, None);
        assert_eq!(error.format("{Cx}"), "c0000022");
        assert_eq!(error.format("{Cd}"), "-1073741790");
        assert_eq!(sample().format("{Cx}"), "00000005");
    }

    #[test]
    fn test_unknown_tags_pass_through() {
        assert_eq!(sample().format("{X}"), "{X}");
        assert_eq!(sample().format("{C}{Cz}{"), "{C}{Cz}{");
        assert_eq!(sample().format("{M"), "{M");
        assert_eq!(sample().format("plain text"), "plain text");
        assert_eq!(sample().format(""), "");
    }

    #[test]
    fn test_message_and_text_variants() {
        let both = Error::generic(GenericCode::TimedOut, "waiting", None, None);
        assert_eq!(both.format("{MS}"), "waiting [Timed out]");

        let text_only = Error::generic(GenericCode::TimedOut, "", None, None);
        assert_eq!(text_only.format("{MS}"), "Timed out");

        let message_only = Error::new(3, "waiting", None, None);
        assert_eq!(message_only.format("{MS}"), "waiting");

        let neither = Error::new(3, "", None, None);
        assert_eq!(neither.format("<{MS}>"), "<>");
    }

    #[test]
    fn test_missing_location_renders_nothing() {
        let error = Error::new(1, "m", None, None);
        assert_eq!(error.format("[{F}][{L}][{FL}]"), "[][][]");

        let no_line = Error::new(1, "m", Some(Location::new("a.rs", 0)), None);
        assert_eq!(no_line.format("[{L}][{FL}]"), "[][a.rs:0]");
    }

    #[test]
    fn test_kind_and_text_tags() {
        let error = Error::kernel(KernelStatus::CANCELLED, "", None, None);
        assert_eq!(error.format("{T}: {S}"), "Kernel: STATUS_CANCELLED");
    }

    #[test]
    fn test_inner_is_not_expanded() {
        let error = Error::new(
            1,
            "outer",
            None,
            Some(Error::new(2, "inner", None, None)),
        );
        assert_eq!(error.format("{M} {MS} {Cd}"), "outer outer 1");
    }

    #[test]
    fn test_formatted_matches_format() {
        let error = sample();
        let template = "{T}/{M}/{Cx}";
        assert_eq!(format!("{}", error.formatted(template)), error.format(template));
    }

    #[test]
    fn test_non_ascii_template() {
        assert_eq!(sample().format("→ {M} ←{"), "→ bad input ←{");
    }
}
