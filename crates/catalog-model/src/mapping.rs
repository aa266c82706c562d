//! Canonical property → header mapping.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::property::Property;

/// Canonical `property → header` table for one validation run.
///
/// Holds at most one header per property. A header may back several
/// properties when the source reuses one column for two logical fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PropertyMapping {
    entries: BTreeMap<Property, String>,
    extra_identifiers: Vec<Property>,
}

impl PropertyMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a property to a header, returning the header it replaced.
    pub fn insert(&mut self, property: Property, header: impl Into<String>) -> Option<String> {
        self.entries.insert(property, header.into())
    }

    #[must_use]
    pub fn with(mut self, property: Property, header: impl Into<String>) -> Self {
        self.insert(property, header);
        self
    }

    /// Declare the extra identifier properties for this run, in caller order.
    #[must_use]
    pub fn with_extra_identifiers(mut self, extras: Vec<Property>) -> Self {
        self.extra_identifiers = Vec::new();
        for extra in extras {
            if !self.extra_identifiers.contains(&extra) {
                self.extra_identifiers.push(extra);
            }
        }
        self
    }

    pub fn extra_identifiers(&self) -> &[Property] {
        &self.extra_identifiers
    }

    pub fn header(&self, property: &Property) -> Option<&str> {
        self.entries.get(property).map(String::as_str)
    }

    pub fn is_mapped(&self, property: &Property) -> bool {
        self.entries.contains_key(property)
    }

    /// Reverse lookup: every property backed by `header`.
    pub fn properties_for_header(&self, header: &str) -> Vec<&Property> {
        self.entries
            .iter()
            .filter(|(_, mapped)| mapped.as_str() == header)
            .map(|(property, _)| property)
            .collect()
    }

    /// Reverse lookup returning the first property backed by `header`.
    pub fn property_for_header(&self, header: &str) -> Option<&Property> {
        self.properties_for_header(header).into_iter().next()
    }

    /// Distinct mapped headers, in property order.
    pub fn headers(&self) -> Vec<&str> {
        let mut headers: Vec<&str> = Vec::new();
        for header in self.entries.values() {
            if !headers.contains(&header.as_str()) {
                headers.push(header);
            }
        }
        headers
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Property, &str)> {
        self.entries
            .iter()
            .map(|(property, header)| (property, header.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_lookup_handles_shared_headers() {
        let mapping = PropertyMapping::new()
            .with(Property::ProductImageUrl, "Image")
            .with(Property::ProductUrl, "Image")
            .with(Property::Sku, "Code");

        assert_eq!(mapping.header(&Property::Sku), Some("Code"));
        assert_eq!(mapping.properties_for_header("Image").len(), 2);
        assert_eq!(mapping.headers(), vec!["Image", "Code"]);
        assert_eq!(mapping.property_for_header("Missing"), None);
    }

    #[test]
    fn insert_replaces_previous_header() {
        let mut mapping = PropertyMapping::new();
        assert_eq!(mapping.insert(Property::Brand, "Brand A"), None);
        assert_eq!(
            mapping.insert(Property::Brand, "Brand B"),
            Some("Brand A".to_string())
        );
        assert_eq!(mapping.len(), 1);
    }
}
