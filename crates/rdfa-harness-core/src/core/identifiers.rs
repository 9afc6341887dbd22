// crates/rdfa-harness-core/src/core/identifiers.rs
// ============================================================================
// Module: RDFa Harness Identifiers
// Description: Canonical identifiers for test cases, classifications, and syntax families.
// Purpose: Provide strongly typed, serializable identifiers with stable wire forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This module defines the identifiers used throughout the harness. Test
//! numbers are plain integers rendered as four-digit document stems.
//! Classifications are an open label set: known labels get their own variant
//! and anything else is preserved verbatim, so new manifest labels never
//! break loading.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Test Number
// ============================================================================

/// Maximum number of digits accepted in a document stem.
const MAX_STEM_DIGITS: usize = 9;

/// Test case number parsed from a source document name.
///
/// # Invariants
/// - Unique within a manifest; used as the total ordering key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestNumber(u32);

impl TestNumber {
    /// Creates a test number from a raw value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Parses a document stem such as `0042` into a test number.
    ///
    /// Returns `None` unless the stem is one to nine ASCII digits.
    #[must_use]
    pub fn from_stem(stem: &str) -> Option<Self> {
        if stem.is_empty()
            || stem.len() > MAX_STEM_DIGITS
            || !stem.bytes().all(|byte| byte.is_ascii_digit())
        {
            return None;
        }
        stem.parse::<u32>().ok().map(Self)
    }

    /// Returns the zero-padded four-digit document stem (`0042`).
    #[must_use]
    pub fn padded(self) -> String {
        format!("{:04}", self.0)
    }
}

impl fmt::Display for TestNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Classification
// ============================================================================

/// Review or conformance classification attached to a manifest entry.
///
/// # Invariants
/// - `as_str` round-trips through [`Classification::from_label`].
/// - Unknown labels are preserved in [`Classification::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Classification {
    /// Required for conformance.
    Required,
    /// Optional feature.
    Optional,
    /// Known to be incorrect.
    Buggy,
    /// Reviewed and approved.
    Approved,
    /// Not yet reviewed.
    Unreviewed,
    /// Parked pending discussion.
    OnHold,
    /// Any label outside the known set.
    Other(String),
}

impl Classification {
    /// Builds a classification from a bare label.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "required" => Self::Required,
            "optional" => Self::Optional,
            "buggy" => Self::Buggy,
            "approved" => Self::Approved,
            "unreviewed" => Self::Unreviewed,
            "onhold" => Self::OnHold,
            other => Self::Other(other.to_string()),
        }
    }

    /// Builds a classification from a manifest status value.
    ///
    /// Status values are usually vocabulary IRIs such as
    /// `http://www.w3.org/2006/03/test-description#approved`; only the
    /// fragment is kept.
    #[must_use]
    pub fn from_status(status: &str) -> Self {
        let label = status.rsplit('#').next().unwrap_or(status);
        Self::from_label(label)
    }

    /// Returns the label for this classification.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Required => "required",
            Self::Optional => "optional",
            Self::Buggy => "buggy",
            Self::Approved => "approved",
            Self::Unreviewed => "unreviewed",
            Self::OnHold => "onhold",
            Self::Other(label) => label,
        }
    }

    /// Returns true when the label exactly equals the filter.
    #[must_use]
    pub fn matches(&self, filter: &str) -> bool {
        self.as_str() == filter
    }

    /// Returns true when the label belongs to the documented set.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Classification {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

impl From<Classification> for String {
    fn from(value: Classification) -> Self {
        value.as_str().to_string()
    }
}

// ============================================================================
// SECTION: Syntax Families
// ============================================================================

/// Host language a canonical template is rendered into.
///
/// The wire form is the directory segment used in document URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostLanguage {
    /// XHTML 1.1 + RDFa.
    #[serde(rename = "xhtml1")]
    Xhtml1,
    /// HTML 4.01 + RDFa.
    #[serde(rename = "html4")]
    Html4,
    /// HTML5 + RDFa.
    #[serde(rename = "html5")]
    Html5,
    /// SVG + RDFa.
    #[serde(rename = "svg")]
    Svg,
}

impl HostLanguage {
    /// All host languages, in the order they are presented.
    pub const ALL: [Self; 4] = [Self::Xhtml1, Self::Html4, Self::Html5, Self::Svg];

    /// Parses a path segment into a host language.
    #[must_use]
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "xhtml1" => Some(Self::Xhtml1),
            "html4" => Some(Self::Html4),
            "html5" => Some(Self::Html5),
            "svg" => Some(Self::Svg),
            _ => None,
        }
    }

    /// Returns the path segment for this host language.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xhtml1 => "xhtml1",
            Self::Html4 => "html4",
            Self::Html5 => "html5",
            Self::Svg => "svg",
        }
    }

    /// Returns the markup format documents of this family are served as.
    #[must_use]
    pub const fn markup_format(self) -> DocumentFormat {
        match self {
            Self::Xhtml1 => DocumentFormat::Xhtml,
            Self::Html4 | Self::Html5 => DocumentFormat::Html,
            Self::Svg => DocumentFormat::Svg,
        }
    }

    /// Returns true when `NNNN.xhtml` cross-references must be retargeted to `.html`.
    #[must_use]
    pub const fn retargets_cross_references(self) -> bool {
        matches!(self, Self::Html4 | Self::Html5)
    }

    /// Human-readable label used in presentation.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Xhtml1 => "XHTML 1.1",
            Self::Html4 => "HTML4",
            Self::Html5 => "HTML5",
            Self::Svg => "SVG",
        }
    }
}

impl fmt::Display for HostLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document format selected by the requested file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    /// `.xhtml` markup.
    Xhtml,
    /// `.html` markup.
    Html,
    /// `.svg` vector graphics.
    Svg,
    /// `.sparql` boolean query.
    Sparql,
}

impl DocumentFormat {
    /// Parses a file extension (without the dot).
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "xhtml" => Some(Self::Xhtml),
            "html" => Some(Self::Html),
            "svg" => Some(Self::Svg),
            "sparql" => Some(Self::Sparql),
            _ => None,
        }
    }

    /// Returns the file extension (without the dot).
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Xhtml => "xhtml",
            Self::Html => "html",
            Self::Svg => "svg",
            Self::Sparql => "sparql",
        }
    }

    /// Returns the media type served for this format.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Xhtml => "application/xhtml+xml",
            Self::Html => "text/html",
            Self::Svg => "image/svg+xml",
            Self::Sparql => "application/sparql-query",
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
