//! Identity key normalization

use minidna_domain::{IdentityKey, ProductDetails};

/// Compute the identity key of an extracted product
///
/// Takes (brand, product line, core type, target user) in that order, drops
/// absent or empty entries, lower-cases and trims the rest, and joins them
/// with `|`. The emptiness check runs before trimming, so a whitespace-only
/// entry survives as an empty segment (`"   "` + `"Shoe"` gives `"|shoe"`).
/// An extraction with none of the four yields the empty key.
pub fn normalize(details: &ProductDetails) -> IdentityKey {
    let components = [
        details.brand.as_deref(),
        details.product_line.as_deref(),
        details.core_type.as_deref(),
        details.target_user.as_deref(),
    ];

    let normalized: Vec<String> = components
        .into_iter()
        .flatten()
        .filter(|value| !value.is_empty())
        .map(|value| value.to_lowercase().trim().to_string())
        .collect();

    let separator = IdentityKey::SEPARATOR.to_string();
    IdentityKey::new(normalized.join(separator.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn details(
        brand: Option<&str>,
        product_line: Option<&str>,
        core_type: Option<&str>,
        target_user: Option<&str>,
    ) -> ProductDetails {
        ProductDetails {
            brand: brand.map(str::to_string),
            product_line: product_line.map(str::to_string),
            core_type: core_type.map(str::to_string),
            target_user: target_user.map(str::to_string),
            ..ProductDetails::default()
        }
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let a = normalize(&details(
            Some("Nike"),
            Some("Air Zoom"),
            Some("Running Shoe"),
            Some("Men"),
        ));
        let b = normalize(&details(
            Some(" nike "),
            Some("AIR ZOOM"),
            Some("running shoe"),
            Some("men"),
        ));
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "nike|air zoom|running shoe|men");
    }

    #[test]
    fn test_missing_fields_dropped() {
        let key = normalize(&details(Some("Nike"), None, None, None));
        assert_eq!(key.as_str(), "nike");
    }

    #[test]
    fn test_empty_strings_dropped() {
        let key = normalize(&details(Some("Apple"), Some(""), Some("Laptop"), None));
        assert_eq!(key.as_str(), "apple|laptop");
    }

    #[test]
    fn test_whitespace_only_field_keeps_empty_segment() {
        let key = normalize(&details(Some("   "), None, Some("Shoe"), None));
        assert_eq!(key.as_str(), "|shoe");

        // distinct from an absent brand
        let absent = normalize(&details(None, None, Some("Shoe"), None));
        assert_eq!(absent.as_str(), "shoe");
        assert_ne!(key, absent);
    }

    #[test]
    fn test_field_order_preserved() {
        // core type comes before target user regardless of struct field order
        let key = normalize(&details(None, None, Some("Sofa"), Some("Unisex")));
        assert_eq!(key.as_str(), "sofa|unisex");
    }

    #[test]
    fn test_all_absent_yields_empty_key() {
        let key = normalize(&ProductDetails::default());
        assert!(key.is_empty());
        assert_eq!(key.as_str(), "");
    }

    #[test]
    fn test_non_identity_fields_ignored() {
        let mut a = details(Some("Nike"), Some("Pegasus"), None, None);
        let mut b = a.clone();
        a.variant_attributes.color = Some("Red".to_string());
        b.variant_attributes.color = Some("Blue".to_string());
        b.title = Some("Different title".to_string());
        assert_eq!(normalize(&a), normalize(&b));
    }

    proptest! {
        #[test]
        fn prop_deterministic(
            brand in proptest::option::of("[A-Za-z ]{0,12}"),
            line in proptest::option::of("[A-Za-z0-9 ]{0,12}"),
        ) {
            let d = details(brand.as_deref(), line.as_deref(), None, None);
            prop_assert_eq!(normalize(&d), normalize(&d.clone()));
        }

        #[test]
        fn prop_case_insensitive(brand in "[A-Za-z]{1,12}", core in "[A-Za-z]{1,12}") {
            let lower = details(Some(brand.to_lowercase().as_str()), None, Some(core.to_lowercase().as_str()), None);
            let upper = details(Some(brand.to_uppercase().as_str()), None, Some(core.to_uppercase().as_str()), None);
            prop_assert_eq!(normalize(&lower), normalize(&upper));
        }

        #[test]
        fn prop_padding_insensitive(brand in "[a-z]{1,12}", pad in " {0,4}") {
            let plain = details(Some(brand.as_str()), None, None, None);
            let padded_brand = format!("{}{}{}", pad, brand, pad);
            let padded = details(Some(padded_brand.as_str()), None, None, None);
            prop_assert_eq!(normalize(&plain), normalize(&padded));
        }
    }
}
