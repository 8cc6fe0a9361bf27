//! Parameter rendering styles.
//!
//! A [`ParamStyle`] names the convention used to turn one parameter
//! assignment into argument-vector tokens: bare flags, valued parameters
//! with either a space or `=` join, and the three list expansions
//! (name-per-item, name/value pairs, delimiter-joined).
//!
//! Styles form a closed registry keyed by canonical token. Comparison
//! against strings is case-insensitive and total: an unrecognized operand
//! simply compares unequal.
//!
//! # Examples
//!
//! ```
//! use command_invoke_core::ParamStyle;
//!
//! assert_eq!(ParamStyle::from_token("FLAG"), Some(ParamStyle::Flag));
//! assert_eq!(ParamStyle::from_token("no-such-style"), None);
//!
//! assert!(ParamStyle::Joined == "joined");
//! assert!(ParamStyle::Joined == "JOINED");
//! assert!(ParamStyle::Joined != "separate");
//!
//! assert!(ParamStyle::Separate.accepts_list());
//! assert!(!ParamStyle::Flag.takes_value());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Rendering convention for a parameter.
///
/// Each variant carries a canonical token used for serialization, display,
/// and string comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParamStyle {
    /// Name token only, no value (e.g., `--verbose`).
    Flag,
    /// Name then value as two separate tokens (e.g., `-o file`).
    SingleValued,
    /// One `name=value` token (e.g., `--output=file`).
    EqualsValued,
    /// List-capable; the name token is repeated before every item.
    Positional,
    /// List-capable; name/value pair repeated once per item.
    Separate,
    /// List-capable; one name token followed by all items joined with the
    /// parameter's delimiter.
    Joined,
}

impl ParamStyle {
    /// The canonical token for this style.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_invoke_core::ParamStyle;
    ///
    /// assert_eq!(ParamStyle::SingleValued.canonical_token(), "single-valued");
    /// ```
    pub const fn canonical_token(&self) -> &'static str {
        match self {
            ParamStyle::Flag => "flag",
            ParamStyle::SingleValued => "single-valued",
            ParamStyle::EqualsValued => "equals-valued",
            ParamStyle::Positional => "positional",
            ParamStyle::Separate => "separate",
            ParamStyle::Joined => "joined",
        }
    }

    /// Looks up a style by canonical token, case-insensitively.
    ///
    /// Returns `None` for unknown tokens rather than failing.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_invoke_core::ParamStyle;
    ///
    /// assert_eq!(ParamStyle::from_token("Equals-Valued"), Some(ParamStyle::EqualsValued));
    /// assert_eq!(ParamStyle::from_token(""), None);
    /// ```
    pub fn from_token(token: &str) -> Option<Self> {
        const ALL: [ParamStyle; 6] = [
            ParamStyle::Flag,
            ParamStyle::SingleValued,
            ParamStyle::EqualsValued,
            ParamStyle::Positional,
            ParamStyle::Separate,
            ParamStyle::Joined,
        ];
        ALL.into_iter()
            .find(|style| style.canonical_token().eq_ignore_ascii_case(token))
    }

    /// Whether this style expands list values.
    pub const fn accepts_list(&self) -> bool {
        matches!(
            self,
            ParamStyle::Positional | ParamStyle::Separate | ParamStyle::Joined
        )
    }

    /// Whether this style consumes a value at all (`false` only for flags).
    pub const fn takes_value(&self) -> bool {
        !matches!(self, ParamStyle::Flag)
    }
}

impl fmt::Display for ParamStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_token())
    }
}

impl PartialEq<str> for ParamStyle {
    fn eq(&self, other: &str) -> bool {
        self.canonical_token().eq_ignore_ascii_case(other)
    }
}

impl PartialEq<&str> for ParamStyle {
    fn eq(&self, other: &&str) -> bool {
        self.canonical_token().eq_ignore_ascii_case(other)
    }
}

impl PartialEq<ParamStyle> for str {
    fn eq(&self, other: &ParamStyle) -> bool {
        other == self
    }
}

impl PartialEq<ParamStyle> for &str {
    fn eq(&self, other: &ParamStyle) -> bool {
        other == self
    }
}
