// crates/rdfa-harness-core/src/resolver/template.rs
// ============================================================================
// Module: RDFa Harness Template Passes
// Description: Text-only rewriting passes over corpus templates.
// Purpose: Split preambles and rewrite placeholders and cross-references.
// Dependencies: regex
// ============================================================================

//! ## Overview
//! Templates are treated as plain text. Fixtures may be deliberately
//! malformed markup, so nothing here parses structure. Passes run in a fixed
//! order: [`split_preamble`], [`substitute_placeholder`], then
//! [`retarget_cross_references`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::LazyLock;

use regex::Regex;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Marker that starts the document body.
const HEAD_MARKER: &str = "<head";
/// SVG namespace; the line carrying it closes the preamble.
const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
/// Placeholder for the per-family test case base URL.
pub const PLACEHOLDER: &str = "$TCPATH";
/// Cross-reference pattern retargeted for HTML families.
#[allow(clippy::expect_used, reason = "Constant pattern; compilation is covered by unit tests.")]
static CROSS_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{4})\.xhtml").expect("cross-reference pattern"));

// ============================================================================
// SECTION: Preamble Split
// ============================================================================

/// A markup template split into root-tag attributes and body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SplitTemplate {
    /// Attribute text placed on the root tag, without its trailing newline.
    pub preamble: String,
    /// Remaining template text.
    pub body: String,
}

/// Splits a markup template at the first line containing `<head`.
///
/// Lines before it form the preamble. A line carrying the SVG namespace is
/// kept in the preamble and ends it.
#[must_use]
pub fn split_preamble(template: &str) -> SplitTemplate {
    let mut split = SplitTemplate::default();
    let mut in_body = false;
    for line in template.split_inclusive('\n') {
        if !in_body && line.contains(HEAD_MARKER) {
            in_body = true;
        }
        if in_body {
            split.body.push_str(line);
        } else {
            split.preamble.push_str(line);
            in_body = line.contains(SVG_NAMESPACE);
        }
    }
    if split.preamble.ends_with('\n') {
        split.preamble.pop();
        if split.preamble.ends_with('\r') {
            split.preamble.pop();
        }
    }
    split
}

// ============================================================================
// SECTION: Rewrites
// ============================================================================

/// Replaces every placeholder token with `test_case_path`.
#[must_use]
pub fn substitute_placeholder(text: &str, test_case_path: &str) -> String {
    text.replace(PLACEHOLDER, test_case_path)
}

/// Rewrites `NNNN.xhtml` references to `NNNN.html`.
#[must_use]
pub fn retarget_cross_references(text: &str) -> String {
    CROSS_REFERENCE.replace_all(text, "${1}.html").into_owned()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
