// crates/rdfa-harness-core/src/resolver/render.rs
// ============================================================================
// Module: RDFa Harness Document Wrappers
// Description: Doctype and root-tag wrappers per syntax family.
// Purpose: Assemble the final document text for a resolved variant.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Wrappers only concatenate text. The preamble is copied onto the root tag
//! verbatim.

use crate::core::HostLanguage;

/// XML declaration used by XML-based families.
const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// XHTML+RDFa 1.0 doctype.
const XHTML_RDFA_DOCTYPE: &str = "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML+RDFa 1.0//EN\" \
                                  \"http://www.w3.org/MarkUp/DTD/xhtml-rdfa-1.dtd\">\n";

/// HTML 4.01 strict doctype.
const HTML4_DOCTYPE: &str = "<!DOCTYPE HTML PUBLIC \"-//W3C//DTD HTML 4.01//EN\" \
                             \"http://www.w3.org/TR/html4/strict.dtd\">\n";

/// HTML5 doctype.
const HTML5_DOCTYPE: &str = "<!DOCTYPE html>\n";

/// Wraps a rewritten body in the family's doctype and root element.
#[must_use]
pub fn wrap_markup(family: HostLanguage, preamble: &str, body: &str) -> String {
    let mut document = String::with_capacity(preamble.len() + body.len() + 256);
    match family {
        HostLanguage::Xhtml1 => {
            document.push_str(XML_DECLARATION);
            document.push_str(XHTML_RDFA_DOCTYPE);
            document.push_str(
                "<html xmlns=\"http://www.w3.org/1999/xhtml\" version=\"XHTML+RDFa 1.0\"\n",
            );
            document.push_str(preamble);
            document.push_str(">\n");
            document.push_str(body);
            document.push_str("</html>");
        }
        HostLanguage::Html4 => {
            document.push_str(HTML4_DOCTYPE);
            document.push_str("<html version=\"XHTML+RDFa 1.0\"\n ");
            document.push_str(preamble);
            document.push_str(">\n");
            document.push_str(body);
            document.push_str("</html>");
        }
        HostLanguage::Html5 => {
            document.push_str(HTML5_DOCTYPE);
            if preamble.is_empty() {
                document.push_str("<html>\n");
            } else {
                document.push_str("<html\n");
                document.push_str(preamble);
                document.push_str(">\n");
            }
            document.push_str(body);
            document.push_str("</html>");
        }
        HostLanguage::Svg => {
            document.push_str(XML_DECLARATION);
            document.push_str("<svg\n");
            document.push_str(preamble);
            document.push_str(">\n");
            document.push_str(body);
            document.push_str("</svg>");
        }
    }
    document
}

#[cfg(test)]
mod tests {
    use super::wrap_markup;
    use crate::core::HostLanguage;

    #[test]
    fn html5_without_preamble_has_bare_root() {
        let document = wrap_markup(HostLanguage::Html5, "", "<head></head>\n");
        assert_eq!(document, "<!DOCTYPE html>\n<html>\n<head></head>\n</html>");
    }

    #[test]
    fn preamble_lands_on_root_tag() {
        let document = wrap_markup(HostLanguage::Svg, "xmlns=\"http://www.w3.org/2000/svg\"", "");
        assert!(document.contains("<svg\nxmlns=\"http://www.w3.org/2000/svg\">\n"));
        assert!(document.ends_with("</svg>"));
    }
}
