//! Listing classification by ordered substring patterns.
//!
//! Patterns overlap (`"package"` also appears in `"Class in package"`), so
//! the table is evaluated top to bottom and the first hit wins.

use javadocset_shared::SymbolKind;

/// Ordered `(substring, kind)` table. Do not reorder.
pub const PATTERNS: &[(&str, SymbolKind)] = &[
    ("Class in", SymbolKind::Class),
    ("Static method in", SymbolKind::Method),
    ("Static variable in", SymbolKind::Field),
    ("Constructor", SymbolKind::Constructor),
    ("Method in", SymbolKind::Method),
    ("Variable in", SymbolKind::Field),
    ("Interface in", SymbolKind::Interface),
    ("Exception in", SymbolKind::Exception),
    ("Error in", SymbolKind::Error),
    ("Enum in", SymbolKind::Enum),
    ("package", SymbolKind::Package),
    ("Annotation Type", SymbolKind::Annotation),
];

/// Classify a listing's shallow text. `None` means the listing is not indexed.
pub fn classify(text: &str) -> Option<SymbolKind> {
    PATTERNS
        .iter()
        .find(|(pattern, _)| text.contains(pattern))
        .map(|&(_, kind)| kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_listing() {
        assert_eq!(classify(" - Class in "), Some(SymbolKind::Class));
        assert_eq!(classify("Foo Class in pkg "), Some(SymbolKind::Class));
    }

    #[test]
    fn static_method_beats_plain_method() {
        assert_eq!(
            classify(" - Static method in class "),
            Some(SymbolKind::Method)
        );
        assert_eq!(classify(" - Method in class "), Some(SymbolKind::Method));
    }

    #[test]
    fn variables_are_fields() {
        assert_eq!(
            classify(" - Static variable in class "),
            Some(SymbolKind::Field)
        );
        assert_eq!(classify(" - Variable in class "), Some(SymbolKind::Field));
    }

    #[test]
    fn constructor_listing() {
        assert_eq!(
            classify(" - Constructor for class "),
            Some(SymbolKind::Constructor)
        );
    }

    #[test]
    fn type_listings() {
        assert_eq!(classify(" - Interface in "), Some(SymbolKind::Interface));
        assert_eq!(classify(" - Exception in "), Some(SymbolKind::Exception));
        assert_eq!(classify(" - Error in "), Some(SymbolKind::Error));
        assert_eq!(classify(" - Enum in "), Some(SymbolKind::Enum));
        assert_eq!(classify(" - package "), Some(SymbolKind::Package));
        assert_eq!(classify(" - Annotation Type "), Some(SymbolKind::Annotation));
    }

    #[test]
    fn class_wins_over_later_patterns() {
        assert_eq!(
            classify(" - Class in package "),
            Some(SymbolKind::Class)
        );
    }

    #[test]
    fn package_wins_over_annotation_type() {
        assert_eq!(
            classify(" - Annotation Type in package "),
            Some(SymbolKind::Package)
        );
    }

    #[test]
    fn unmatched_text_is_dropped() {
        assert_eq!(classify("See Also"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(classify(" - method in class "), None);
    }
}
