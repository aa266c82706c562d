//! Orientation detection and canonicalization of raw mappings.

use catalog_model::{Property, PropertyMapping, normalize_header};
use tracing::{debug, warn};

use crate::error::{MappingError, Result};
use crate::infer::infer_mapping;

/// A user-supplied association in either orientation, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMapping {
    entries: Vec<(String, String)>,
}

impl RawMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// How the raw entries are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Keys are properties, values are headers.
    PropertyToHeader,
    /// Keys are headers, values are properties.
    HeaderToProperty,
}

/// Turns raw mappings into a canonical [`PropertyMapping`].
#[derive(Debug, Clone, Default)]
pub struct MappingResolver {
    extras: Vec<String>,
}

impl MappingResolver {
    /// A resolver that also recognizes the given extra identifier names.
    pub fn new<I, S>(extras: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = Vec::new();
        for extra in extras {
            let name = extra.as_ref().trim();
            if !name.is_empty() && !names.iter().any(|existing| existing == name) {
                names.push(name.to_string());
            }
        }
        Self { extras: names }
    }

    pub fn extras(&self) -> &[String] {
        &self.extras
    }

    fn is_known(&self, label: &str) -> bool {
        Property::resolve(label, &self.extras).is_some()
    }

    /// Extra identifiers that are not already part of the standard vocabulary.
    fn extra_properties(&self) -> Vec<Property> {
        self.extras
            .iter()
            .filter_map(|name| Property::resolve(name, &self.extras))
            .filter(Property::is_custom)
            .collect()
    }

    /// Decide the orientation from per-entry votes.
    ///
    /// An entry votes forward when only its key is a known property and
    /// inverse when only its value is. Entries where both or neither side is
    /// known do not vote. Votes in both directions are an error.
    pub fn orientation(&self, raw: &RawMapping) -> Result<Orientation> {
        let mut forward = Vec::new();
        let mut inverse = Vec::new();
        for (key, value) in raw.entries() {
            match (self.is_known(key), self.is_known(value)) {
                (true, false) => forward.push(key.clone()),
                (false, true) => inverse.push(key.clone()),
                _ => {}
            }
        }

        match (forward.is_empty(), inverse.is_empty()) {
            (false, false) => Err(MappingError::AmbiguousOrientation { forward, inverse }),
            (true, false) => Ok(Orientation::HeaderToProperty),
            _ => Ok(Orientation::PropertyToHeader),
        }
    }

    /// Resolve an explicit mapping.
    pub fn resolve(&self, raw: &RawMapping) -> Result<PropertyMapping> {
        let orientation = self.orientation(raw)?;
        debug!(entries = raw.len(), ?orientation, "resolving mapping");

        let mut mapping = PropertyMapping::new().with_extra_identifiers(self.extra_properties());
        for (key, value) in raw.entries() {
            let (label, header) = match orientation {
                Orientation::PropertyToHeader => (key, value),
                Orientation::HeaderToProperty => (value, key),
            };
            let property = Property::resolve(label, &self.extras).ok_or_else(|| {
                MappingError::UnknownProperty {
                    name: label.trim().to_string(),
                }
            })?;
            let header = normalize_header(header);
            if header.is_empty() {
                return Err(MappingError::EmptyHeader {
                    property: property.label().to_string(),
                });
            }
            insert_entry(&mut mapping, property, header)?;
        }
        Ok(mapping)
    }

    /// Resolve a mapping against the dataset's headers.
    ///
    /// An empty raw mapping falls back to inference from the headers; any
    /// explicit entry disables inference entirely.
    pub fn resolve_for_headers<S: AsRef<str>>(
        &self,
        raw: &RawMapping,
        headers: &[S],
    ) -> Result<PropertyMapping> {
        if !raw.is_empty() {
            return self.resolve(raw);
        }
        let inferred = infer_mapping(headers, &self.extras)
            .with_extra_identifiers(self.extra_properties());
        warn!(
            mapped = inferred.len(),
            "no mapping supplied; inferred properties from headers"
        );
        Ok(inferred)
    }
}

/// Insert with drop-then-rename precedence: when a property is given twice,
/// a renamed header beats one that merely repeats the property label.
fn insert_entry(mapping: &mut PropertyMapping, property: Property, header: String) -> Result<()> {
    let Some(previous) = mapping.header(&property).map(str::to_string) else {
        mapping.insert(property, header);
        return Ok(());
    };
    if previous == header {
        return Ok(());
    }

    let label = property.label();
    match (previous == label, header == label) {
        (true, false) => {
            debug!(property = label, from = %previous, to = %header, "rename replaces literal header");
            mapping.insert(property, header);
            Ok(())
        }
        (false, true) => Ok(()),
        _ => Err(MappingError::DuplicateProperty {
            property: label.to_string(),
            first: previous,
            second: header,
        }),
    }
}
