//! Which properties each rule group covers, and the limits it applies.

use catalog_model::{GroupKind, Property};

pub const MANDATORY_COMPLETENESS: &[Property] = &[
    Property::Country,
    Property::Brand,
    Property::ProductId,
    Property::ProductNameEnglish,
    Property::ProductImageUrl,
];

pub const MANDATORY_UNIQUENESS: &[Property] =
    &[Property::ProductId, Property::ProductNameEnglish];

pub const OPTIONAL_COMPLETENESS: &[Property] = &[
    Property::Sku,
    Property::Ean,
    Property::Upc,
    Property::Gtin,
    Property::Ctin,
    Property::Asin,
    Property::ProductNameLocal,
    Property::ProductDescriptionEnglish,
    Property::ProductDescriptionLocal,
    Property::Category,
    Property::SubCategory,
    Property::ProductUrl,
    Property::ProductVideoUrl,
    Property::Map,
    Property::Msrp,
];

pub const OPTIONAL_UNIQUENESS: &[Property] = &[
    Property::Sku,
    Property::Ean,
    Property::Upc,
    Property::Gtin,
    Property::Ctin,
    Property::Asin,
    Property::ProductNameLocal,
    Property::ProductDescriptionEnglish,
    Property::ProductDescriptionLocal,
    Property::Category,
    Property::SubCategory,
    Property::ProductUrl,
    Property::ProductVideoUrl,
    Property::Msrp,
    Property::Map,
    Property::ProductImageUrl,
];

/// Properties exempt from duplicate detection.
pub const DUPLICATES_ALLOWED: &[Property] = &[Property::Category, Property::SubCategory];

pub const MANDATORY_URLS: &[Property] = &[Property::ProductImageUrl];

pub const OPTIONAL_URLS: &[Property] = &[Property::ProductUrl, Property::ProductVideoUrl];

pub const NAME_MAX_CHARS: usize = 750;
pub const DESCRIPTION_MAX_CHARS: usize = 4000;
pub const CATEGORY_MAX_CHARS: usize = 75;
/// Characters kept when quoting an over-long value.
pub const SNIPPET_CHARS: usize = 25;

pub const DESCRIPTIONS: &[Property] = &[
    Property::ProductDescriptionEnglish,
    Property::ProductDescriptionLocal,
];

pub const CATEGORIES: &[Property] = &[Property::Category, Property::SubCategory];

/// Which groups would evaluate `property`.
///
/// Data-format and file-format groups scan columns regardless of mapping
/// semantics and are not listed. Custom properties cover the extra
/// identifier groups.
pub fn groups_for(property: &Property) -> Vec<GroupKind> {
    if property.is_custom() {
        return vec![
            GroupKind::OptionalCompleteness,
            GroupKind::OptionalUniqueness,
            GroupKind::SingleSecondaryId,
        ];
    }

    let memberships: [(GroupKind, bool); 13] = [
        (
            GroupKind::MandatoryCompleteness,
            MANDATORY_COMPLETENESS.contains(property),
        ),
        (
            GroupKind::MandatoryUniqueness,
            MANDATORY_UNIQUENESS.contains(property),
        ),
        (GroupKind::CountryUniqueness, *property == Property::Country),
        (GroupKind::MandatoryUrl, MANDATORY_URLS.contains(property)),
        (
            GroupKind::OptionalCompleteness,
            OPTIONAL_COMPLETENESS.contains(property),
        ),
        (
            GroupKind::OptionalUniqueness,
            OPTIONAL_UNIQUENESS.contains(property),
        ),
        (GroupKind::OptionalUrl, OPTIONAL_URLS.contains(property)),
        (
            GroupKind::EnglishNameLength,
            *property == Property::ProductNameEnglish,
        ),
        (
            GroupKind::LocalNameLength,
            *property == Property::ProductNameLocal,
        ),
        (GroupKind::DescriptionLength, DESCRIPTIONS.contains(property)),
        (GroupKind::SingleProductId, *property == Property::ProductId),
        (
            GroupKind::SingleSecondaryId,
            property.is_secondary_identifier(),
        ),
        (GroupKind::CategoryChecks, CATEGORIES.contains(property)),
    ];
    memberships
        .into_iter()
        .filter_map(|(kind, member)| member.then_some(kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_memberships() {
        assert_eq!(
            groups_for(&Property::ProductId),
            vec![
                GroupKind::MandatoryCompleteness,
                GroupKind::MandatoryUniqueness,
                GroupKind::SingleProductId,
            ]
        );
        assert!(groups_for(&Property::Brand).contains(&GroupKind::MandatoryCompleteness));
        assert_eq!(
            groups_for(&Property::Custom("Retailer Code".to_string())).len(),
            3
        );
    }
}
