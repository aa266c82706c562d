//! Canonical catalog property vocabulary.
//!
//! A property is a logical field ("Product ID", "EAN") independent of how the
//! source file names its column. The standard vocabulary is fixed; callers may
//! add extra identifier properties (custom secondary codes) per run.

use std::fmt;

use serde::{Serialize, Serializer};

/// A canonical catalog property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    Country,
    Brand,
    ProductId,
    ProductNameEnglish,
    ProductNameLocal,
    ProductDescriptionEnglish,
    ProductDescriptionLocal,
    Category,
    SubCategory,
    ProductImageUrl,
    ProductUrl,
    ProductVideoUrl,
    Map,
    Msrp,
    Sku,
    Ean,
    Upc,
    Gtin,
    Ctin,
    Asin,
    /// Caller-defined extra identifier (e.g. a retailer-specific code).
    Custom(String),
}

impl Property {
    /// The fixed vocabulary, in the order it is presented to users.
    pub const STANDARD: &'static [Property] = &[
        Property::Country,
        Property::Brand,
        Property::ProductId,
        Property::ProductNameLocal,
        Property::ProductNameEnglish,
        Property::ProductDescriptionLocal,
        Property::ProductDescriptionEnglish,
        Property::Category,
        Property::SubCategory,
        Property::ProductImageUrl,
        Property::ProductUrl,
        Property::Map,
        Property::Msrp,
        Property::ProductVideoUrl,
        Property::Sku,
        Property::Ean,
        Property::Upc,
        Property::Gtin,
        Property::Ctin,
        Property::Asin,
    ];

    /// Secondary product identifiers that may be added as extra codes.
    pub const SECONDARY_IDENTIFIERS: &'static [Property] = &[
        Property::Sku,
        Property::Ean,
        Property::Upc,
        Property::Gtin,
        Property::Ctin,
        Property::Asin,
    ];

    /// Exact label used in mappings and report check names.
    pub fn label(&self) -> &str {
        match self {
            Property::Country => "Country",
            Property::Brand => "Brand",
            Property::ProductId => "Product ID",
            Property::ProductNameEnglish => "Product Name (English)",
            Property::ProductNameLocal => "Product Name (Local Language)",
            Property::ProductDescriptionEnglish => "Product Description (English)",
            Property::ProductDescriptionLocal => "Product Description (Local Language)",
            Property::Category => "Category",
            Property::SubCategory => "Sub-Category",
            Property::ProductImageUrl => "Product Image URL",
            Property::ProductUrl => "Product URL",
            Property::ProductVideoUrl => "Product Video URL",
            Property::Map => "MAP",
            Property::Msrp => "MSRP",
            Property::Sku => "SKU",
            Property::Ean => "EAN",
            Property::Upc => "UPC",
            Property::Gtin => "GTIN",
            Property::Ctin => "CTIN",
            Property::Asin => "ASIN",
            Property::Custom(name) => name,
        }
    }

    /// Look up a standard property by its exact label.
    pub fn from_label(label: &str) -> Option<Property> {
        Self::STANDARD
            .iter()
            .find(|property| property.label() == label)
            .cloned()
    }

    /// Resolve a label against the standard vocabulary plus extra identifiers.
    ///
    /// Standard labels always resolve to their standard variant, even when a
    /// caller also lists them as extras.
    pub fn resolve(label: &str, extras: &[String]) -> Option<Property> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }
        Self::from_label(label).or_else(|| {
            extras
                .iter()
                .any(|extra| extra.trim() == label)
                .then(|| Property::Custom(label.to_string()))
        })
    }

    /// Build a property from a label, falling back to a custom property.
    pub fn from_label_or_custom(label: &str) -> Property {
        let label = label.trim();
        Self::from_label(label).unwrap_or_else(|| Property::Custom(label.to_string()))
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Property::Custom(_))
    }

    pub fn is_secondary_identifier(&self) -> bool {
        Self::SECONDARY_IDENTIFIERS.contains(self)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Property {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
