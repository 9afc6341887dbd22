// crates/rdfa-harness-core/src/encoding.rs
// ============================================================================
// Module: RDFa Harness URL Encoding
// Description: Percent-encoding rules used when chaining service URLs.
// Purpose: Keep extractor and query-engine URLs byte-compatible with existing services.
// Dependencies: percent-encoding
// ============================================================================

//! ## Overview
//! Service URLs are built by appending an encoded value to a configured
//! prefix. [`quote`] leaves ASCII alphanumerics and `_ . - /` untouched
//! and percent-encodes every other byte, so `:` `?` `&` `=` `#` `~` and
//! spaces are always escaped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;
use percent_encoding::percent_decode_str;
use percent_encoding::utf8_percent_encode;

// ============================================================================
// SECTION: Encode Sets
// ============================================================================

/// Bytes left unescaped by [`quote`].
const QUOTE_SET: &AsciiSet =
    &NON_ALPHANUMERIC.remove(b'_').remove(b'.').remove(b'-').remove(b'/');

// ============================================================================
// SECTION: Functions
// ============================================================================

/// Percent-encodes `value` for appending to a service URL prefix.
#[must_use]
pub fn quote(value: &str) -> String {
    utf8_percent_encode(value, QUOTE_SET).to_string()
}

/// Decodes percent escapes; `+` is kept as a literal plus sign.
#[must_use]
pub fn unquote(value: &str) -> String {
    percent_decode_str(value).decode_utf8_lossy().into_owned()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::quote;
    use super::unquote;

    #[test]
    fn quote_keeps_path_separators() {
        assert_eq!(
            quote("http://example.org/tests/0001.xhtml"),
            "http%3A//example.org/tests/0001.xhtml"
        );
    }

    #[test]
    fn quote_escapes_query_syntax() {
        assert_eq!(quote("ASK WHERE { ?s ?p ?o }"), "ASK%20WHERE%20%7B%20%3Fs%20%3Fp%20%3Fo%20%7D");
        assert_eq!(quote("a=b&c#d"), "a%3Db%26c%23d");
    }

    #[test]
    fn quote_escapes_tilde() {
        assert_eq!(quote("http://ex.org/~user/0001.xhtml"), "http%3A//ex.org/%7Euser/0001.xhtml");
        assert_eq!(unquote("%7Euser"), "~user");
    }

    #[test]
    fn unquote_keeps_plus_literal() {
        assert_eq!(unquote("a+b%20c"), "a+b c");
    }

    #[test]
    fn unquote_reverses_quote() {
        let original = "http://example.org/sparql?stylesheet=/x.xsl&query=";
        assert_eq!(unquote(&quote(original)), original);
    }
}
