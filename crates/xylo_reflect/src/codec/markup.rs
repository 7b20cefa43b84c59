//! The attribute and tag vocabulary of encoded documents.

use alloc::string::String;

/// Fully qualified runtime type path of the value a node holds.
pub(super) const ATTR_CLASSPATH: &str = "classpath";
/// Position of a sequence element within its parent.
pub(super) const ATTR_INDEX: &str = "index";
/// Reference id assigned to a non-scalar node in document order.
pub(super) const ATTR_REF_ID: &str = "refId";
/// Back reference to the `refId` of an earlier shared value.
pub(super) const ATTR_SEE_REF_ID: &str = "seeRefId";
/// Type path of the terminal ancestor of a struct's base chain.
pub(super) const ATTR_SUPERCLASS: &str = "superclass";

/// Child tag of one map entry or sequence element.
pub(super) const TAG_ENTRY: &str = "entry";
/// Child tag of a map entry's key.
pub(super) const TAG_KEY: &str = "key";
/// Child tag of a map entry's value.
pub(super) const TAG_VALUE: &str = "value";

/// Swaps `#` and `.` in a field name.
///
/// Raw identifiers keep their `r#` prefix in field metadata, and `#` is
/// not allowed in an element tag, while `.` is. The swap is its own
/// inverse, so the same function maps field names to tags and tags back
/// to field names.
pub(super) fn swap_reserved(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '#' => '.',
            '.' => '#',
            other => other,
        })
        .collect()
}

/// Returns the tag for a document root holding a type with the given
/// ident.
///
/// Idents that are not usable as an element tag (arrays report the ident
/// `array`, but a hand-written implementation may report anything) fall
/// back to `value`.
pub(super) fn root_tag(ident: &'static str) -> &'static str {
    let mut chars = ident.chars();
    let starts_well = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if starts_well && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        ident
    } else {
        "value"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_is_an_involution() {
        assert_eq!(swap_reserved("r#type"), "r.type");
        assert_eq!(swap_reserved("r.type"), "r#type");
        assert_eq!(swap_reserved("plain_name"), "plain_name");
    }

    #[test]
    fn root_tag_falls_back_for_unusable_idents() {
        assert_eq!(root_tag("Station"), "Station");
        assert_eq!(root_tag("array"), "array");
        assert_eq!(root_tag("[i32; 4]"), "value");
        assert_eq!(root_tag(""), "value");
        assert_eq!(root_tag("1st"), "value");
    }
}
