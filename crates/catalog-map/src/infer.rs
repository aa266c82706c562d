//! Header-based mapping inference.

use catalog_model::{Property, PropertyMapping, normalize_header};
use tracing::debug;

/// Known header spellings that stand for a canonical property.
pub const HEADER_ALIASES: &[(&str, Property)] = &[
    ("Image", Property::ProductImageUrl),
    ("Product Name(English)", Property::ProductNameEnglish),
    ("Product Name(Local Language)", Property::ProductNameLocal),
    ("Product Name (Local)", Property::ProductNameLocal),
];

/// Property a header alias stands for, if any.
pub fn alias_for(header: &str) -> Option<&'static Property> {
    let header = normalize_header(header);
    HEADER_ALIASES
        .iter()
        .find(|(alias, _)| *alias == header)
        .map(|(_, property)| property)
}

/// Infer a mapping from the headers alone.
///
/// Headers equal to a canonical label (or a declared extra) map to it. An
/// alias then replaces any literal match, so when both `Image` and
/// `Product Image URL` are present the alias column wins.
pub fn infer_mapping<S: AsRef<str>>(headers: &[S], extras: &[String]) -> PropertyMapping {
    let mut mapping = PropertyMapping::new();
    for header in headers {
        let header = normalize_header(header.as_ref());
        if let Some(property) = Property::resolve(&header, extras) {
            if !mapping.is_mapped(&property) {
                mapping.insert(property, header);
            }
        }
    }
    for header in headers {
        let header = normalize_header(header.as_ref());
        if let Some(property) = alias_for(&header) {
            if let Some(previous) = mapping.insert(property.clone(), header.clone()) {
                debug!(property = property.label(), from = %previous, to = %header, "alias replaces literal header");
            }
        }
    }
    mapping
}
