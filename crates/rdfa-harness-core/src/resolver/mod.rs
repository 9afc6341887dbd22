// crates/rdfa-harness-core/src/resolver/mod.rs
// ============================================================================
// Module: RDFa Harness Test Document Resolver
// Description: Builds per-family test documents from corpus templates.
// Purpose: Map a `[family, filename]` path onto a rendered document.
// Dependencies: regex, thiserror
// ============================================================================

//! ## Overview
//! Every markup rendering of test `N` comes from one shared template,
//! `<root>/test-suite/tests/NNNN.txt`. Query documents come from
//! `<root>/test-suite/tests/<family>/NNNN.sparql` and are never split.
//!
//! Security posture: path segments are untrusted. The family must be a
//! known syntax family and the stem must be ASCII digits, so no request can
//! name a file outside the corpus.

pub mod render;
pub mod template;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

use self::render::wrap_markup;
use self::template::retarget_cross_references;
use self::template::split_preamble;
use self::template::substitute_placeholder;
use crate::core::DocumentFormat;
use crate::core::HostLanguage;
use crate::core::TestNumber;

// ============================================================================
// SECTION: Types
// ============================================================================

/// A rendered test document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDocument {
    /// Response content type.
    pub content_type: &'static str,
    /// Document text.
    pub body: String,
}

/// Resolver errors.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The path names no servable document.
    #[error("test document not found: {0}")]
    NotFound(String),
    /// Reading the template failed for a reason other than absence.
    #[error("template read failed: {0}")]
    Io(String),
}

/// A parsed `[family, filename]` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentVariant {
    /// Test number from the filename stem.
    pub number: TestNumber,
    /// Syntax family segment.
    pub family: HostLanguage,
    /// Requested document format.
    pub format: DocumentFormat,
}

impl DocumentVariant {
    /// Parses path segments into a variant.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NotFound`] for anything other than a known
    /// family followed by `<digits>.<ext>` with an extension valid for that
    /// family.
    pub fn from_segments(segments: &[&str]) -> Result<(Self, String), ResolveError> {
        let not_found = || ResolveError::NotFound(segments.join("/"));
        let [family, filename] = segments else {
            return Err(not_found());
        };
        let family = HostLanguage::from_segment(family).ok_or_else(not_found)?;
        let (stem, extension) = filename.rsplit_once('.').ok_or_else(not_found)?;
        let format = DocumentFormat::from_extension(extension).ok_or_else(not_found)?;
        let number = TestNumber::from_stem(stem).ok_or_else(not_found)?;
        if format != DocumentFormat::Sparql && format != family.markup_format() {
            return Err(not_found());
        }
        Ok((
            Self {
                number,
                family,
                format,
            },
            stem.to_string(),
        ))
    }
}

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Resolves test documents from an on-disk corpus.
#[derive(Debug, Clone)]
pub struct TestDocumentResolver {
    /// Corpus root containing `test-suite/tests`.
    root: PathBuf,
    /// Base URL prefixed to the family segment for `$TCPATH`.
    base_test_case_url: String,
}

impl TestDocumentResolver {
    /// Creates a resolver over `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, base_test_case_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_test_case_url: base_test_case_url.into(),
        }
    }

    /// Returns the corpus root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the test case base URL.
    #[must_use]
    pub fn base_test_case_url(&self) -> &str {
        &self.base_test_case_url
    }

    /// Renders the document named by `[family, filename]`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NotFound`] for invalid paths or absent
    /// templates and [`ResolveError::Io`] for other read failures.
    pub fn resolve(&self, segments: &[&str]) -> Result<ResolvedDocument, ResolveError> {
        let (variant, stem) = DocumentVariant::from_segments(segments)?;
        let tests_dir = self.root.join("test-suite").join("tests");
        let path = if variant.format == DocumentFormat::Sparql {
            tests_dir.join(variant.family.as_str()).join(format!("{stem}.sparql"))
        } else {
            tests_dir.join(format!("{stem}.txt"))
        };
        let template = read_template(&path)?;
        let test_case_path = format!("{}{}", self.base_test_case_url, variant.family.as_str());
        let retarget = |text: String| {
            if variant.family.retargets_cross_references() {
                retarget_cross_references(&text)
            } else {
                text
            }
        };

        if variant.format == DocumentFormat::Sparql {
            let body = retarget(substitute_placeholder(&template, &test_case_path));
            return Ok(ResolvedDocument {
                content_type: DocumentFormat::Sparql.content_type(),
                body,
            });
        }
        let split = split_preamble(&template);
        let body = retarget(substitute_placeholder(&split.body, &test_case_path));
        Ok(ResolvedDocument {
            content_type: variant.format.content_type(),
            body: wrap_markup(variant.family, &split.preamble, &body),
        })
    }
}

/// Reads a template, mapping absence to [`ResolveError::NotFound`].
fn read_template(path: &Path) -> Result<String, ResolveError> {
    std::fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => ResolveError::NotFound(path.display().to_string()),
        _ => ResolveError::Io(format!("{}: {err}", path.display())),
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================
