//! Culture (locale) name type
//!
//! A culture is identified on the wire by its canonical name string, e.g.
//! `"en-US"`, `"zh-Hans-CN"` or `"fr"`. The empty string names the invariant
//! culture.
//!
//! ## Canonical Form
//!
//! Names are BCP-47 style tags. Subtags may be separated by `-` or `_` on
//! input and are always rendered with `-`:
//!
//! | Subtag | Shape | Canonical case | Example |
//! |--------|-------|----------------|---------|
//! | language | 2-3 or 5-8 letters | lower | `en` |
//! | script | 4 letters, right after language | title | `Hans` |
//! | region | 2 letters or 3 digits | upper | `US`, `419` |
//! | variant | 5-8 alphanumerics, or digit + 3 alphanumerics | lower | `valencia` |
//! | private use | `x` followed by 1-8 alphanumerics each | lower | `x-custom` |

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Maximum length of a culture name
pub const MAX_CULTURE_NAME_LENGTH: usize = 85;

/// Canonical culture name
///
/// Construction validates and canonicalizes the name, so two `CultureName`s
/// compare equal exactly when they denote the same culture:
///
/// ```
/// use propbag_core::CultureName;
///
/// let a = CultureName::new("en_us").unwrap();
/// let b = CultureName::new("en-US").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "en-US");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CultureName(String);

/// Error when validating a culture name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CultureNameError {
    /// Name exceeds maximum length
    TooLong {
        /// Actual length of the name
        length: usize,
        /// Maximum allowed length
        max: usize,
    },
    /// Two separators in a row, or a leading/trailing separator
    EmptySubtag {
        /// The rejected name
        name: String,
    },
    /// First subtag is not a language code
    InvalidLanguage {
        /// The rejected subtag
        subtag: String,
    },
    /// A later subtag does not fit any recognized position
    InvalidSubtag {
        /// The rejected subtag
        subtag: String,
        /// Zero-based subtag position
        position: usize,
    },
}

impl fmt::Display for CultureNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CultureNameError::TooLong { length, max } => {
                write!(f, "culture name too long: {} chars (max {})", length, max)
            }
            CultureNameError::EmptySubtag { name } => {
                write!(f, "culture name '{}' contains an empty subtag", name)
            }
            CultureNameError::InvalidLanguage { subtag } => {
                write!(f, "'{}' is not a valid language subtag", subtag)
            }
            CultureNameError::InvalidSubtag { subtag, position } => {
                write!(f, "invalid culture subtag '{}' at position {}", subtag, position)
            }
        }
    }
}

impl std::error::Error for CultureNameError {}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
    Language,
    Script,
    Region,
    Variant,
}

impl CultureName {
    /// Create a new CultureName, validating and canonicalizing the input
    ///
    /// # Errors
    ///
    /// Returns `CultureNameError` if the name is not a well-formed tag.
    pub fn new(name: impl AsRef<str>) -> Result<Self, CultureNameError> {
        Self::canonicalize(name.as_ref()).map(CultureName)
    }

    /// The invariant culture (empty name)
    pub fn invariant() -> Self {
        CultureName(String::new())
    }

    /// Get the canonical name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the canonical name
    pub fn into_string(self) -> String {
        self.0
    }

    /// True for the invariant culture
    pub fn is_invariant(&self) -> bool {
        self.0.is_empty()
    }

    /// The language subtag (`None` for the invariant culture)
    pub fn language(&self) -> Option<&str> {
        self.0.split('-').next().filter(|s| !s.is_empty())
    }

    /// The region subtag, if present
    pub fn region(&self) -> Option<&str> {
        self.0
            .split('-')
            .skip(1)
            .take_while(|s| *s != "x")
            .find(|s| is_region(s))
    }

    fn canonicalize(name: &str) -> Result<String, CultureNameError> {
        if name.is_empty() {
            return Ok(String::new());
        }
        if name.len() > MAX_CULTURE_NAME_LENGTH {
            return Err(CultureNameError::TooLong {
                length: name.len(),
                max: MAX_CULTURE_NAME_LENGTH,
            });
        }

        let mut out: Vec<String> = Vec::new();
        let mut stage = Stage::Language;
        let mut private_use = false;

        for (position, subtag) in name.split(['-', '_']).enumerate() {
            if subtag.is_empty() {
                return Err(CultureNameError::EmptySubtag {
                    name: name.to_string(),
                });
            }
            let invalid = || CultureNameError::InvalidSubtag {
                subtag: subtag.to_string(),
                position,
            };

            if position == 0 {
                let len = subtag.len();
                let alpha = subtag.chars().all(|c| c.is_ascii_alphabetic());
                if !alpha || !((2..=3).contains(&len) || (5..=8).contains(&len)) {
                    return Err(CultureNameError::InvalidLanguage {
                        subtag: subtag.to_string(),
                    });
                }
                out.push(subtag.to_ascii_lowercase());
                stage = Stage::Script;
                continue;
            }

            if private_use {
                if subtag.len() > 8 || !subtag.chars().all(|c| c.is_ascii_alphanumeric()) {
                    return Err(invalid());
                }
                out.push(subtag.to_ascii_lowercase());
                continue;
            }

            if subtag.eq_ignore_ascii_case("x") {
                private_use = true;
                out.push("x".to_string());
                continue;
            }

            if stage <= Stage::Script
                && subtag.len() == 4
                && subtag.chars().all(|c| c.is_ascii_alphabetic())
            {
                let mut script = subtag.to_ascii_lowercase();
                script[..1].make_ascii_uppercase();
                out.push(script);
                stage = Stage::Region;
            } else if stage <= Stage::Region && is_region(subtag) {
                out.push(subtag.to_ascii_uppercase());
                stage = Stage::Variant;
            } else if is_variant(subtag) {
                out.push(subtag.to_ascii_lowercase());
                stage = Stage::Variant;
            } else {
                return Err(invalid());
            }
        }

        if private_use && out.last().map(String::as_str) == Some("x") {
            return Err(CultureNameError::InvalidSubtag {
                subtag: "x".to_string(),
                position: out.len() - 1,
            });
        }

        Ok(out.join("-"))
    }
}

fn is_region(subtag: &str) -> bool {
    (subtag.len() == 2 && subtag.chars().all(|c| c.is_ascii_alphabetic()))
        || (subtag.len() == 3 && subtag.chars().all(|c| c.is_ascii_digit()))
}

fn is_variant(subtag: &str) -> bool {
    let alnum = subtag.chars().all(|c| c.is_ascii_alphanumeric());
    match subtag.len() {
        5..=8 => alnum,
        4 => alnum && subtag.starts_with(|c: char| c.is_ascii_digit()),
        _ => false,
    }
}

impl fmt::Display for CultureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CultureName {
    type Err = CultureNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CultureName::new(s)
    }
}

impl TryFrom<&str> for CultureName {
    type Error = CultureNameError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        CultureName::new(s)
    }
}

impl TryFrom<String> for CultureName {
    type Error = CultureNameError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        CultureName::new(s)
    }
}

impl AsRef<str> for CultureName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for CultureName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CultureName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        CultureName::new(&name).map_err(serde::de::Error::custom)
    }
}
