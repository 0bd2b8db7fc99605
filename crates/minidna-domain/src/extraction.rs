//! Extraction module - what the language model made of a product page

use serde::{Deserialize, Deserializer, Serialize};

/// Result of extracting a product page
///
/// The wire form discriminates on a boolean `supported` field; only one of the
/// two payloads is ever meaningful.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractedProduct {
    /// The page describes a physical product
    Supported(ProductDetails),

    /// The page is not a physical product (blog, home page, service...)
    Unsupported {
        /// User-facing explanation supplied by the model, if any
        message: Option<String>,
    },
}

impl ExtractedProduct {
    /// True when the page was recognized as a physical product
    pub fn is_supported(&self) -> bool {
        matches!(self, ExtractedProduct::Supported(_))
    }

    /// Product details, if supported
    pub fn details(&self) -> Option<&ProductDetails> {
        match self {
            ExtractedProduct::Supported(details) => Some(details),
            ExtractedProduct::Unsupported { .. } => None,
        }
    }
}

/// Structured product description returned for supported pages
///
/// Every scalar is nullable; the model uses `null` for anything it cannot
/// determine. Field names match the extraction prompt's JSON schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDetails {
    /// Manufacturer brand (Nike, Apple, IKEA)
    #[serde(default)]
    pub brand: Option<String>,

    /// Product line or model name (Air Zoom Pegasus 40)
    #[serde(default)]
    pub product_line: Option<String>,

    /// Intended wearer or user (Men, Women, Kids, Unisex)
    #[serde(default)]
    pub target_user: Option<String>,

    /// Kind of product (Running Shoe, Laptop, Sofa)
    #[serde(default)]
    pub core_type: Option<String>,

    /// Attributes that define product identity
    #[serde(default, deserialize_with = "null_as_default")]
    pub key_attributes: KeyAttributes,

    /// Attributes that vary between instances of the same product
    #[serde(default, deserialize_with = "null_as_default")]
    pub variant_attributes: VariantAttributes,

    /// Display title
    #[serde(default)]
    pub title: Option<String>,

    /// Short description
    #[serde(default)]
    pub description: Option<String>,
}

/// Treat an explicit `null` object the same as an absent one
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Identity-defining attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyAttributes {
    /// Primary material
    #[serde(default)]
    pub material: Option<String>,

    /// Closure type (laces, zipper, buttons)
    #[serde(default)]
    pub closure: Option<String>,

    /// Intended usage
    #[serde(default)]
    pub usage: Option<String>,
}

/// Attributes that differ between variants of one product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantAttributes {
    /// Colorway
    #[serde(default)]
    pub color: Option<String>,

    /// Size
    #[serde(default)]
    pub size: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_deserialize_with_nulls() {
        let json = r#"{
            "brand": "Nike",
            "product_line": null,
            "target_user": "Men",
            "core_type": "Running Shoe",
            "key_attributes": {"material": "Mesh", "closure": null, "usage": "Road running"},
            "variant_attributes": {"color": "Black", "size": null},
            "title": "Nike Running Shoe",
            "description": null
        }"#;

        let details: ProductDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.brand.as_deref(), Some("Nike"));
        assert_eq!(details.product_line, None);
        assert_eq!(details.key_attributes.material.as_deref(), Some("Mesh"));
        assert_eq!(details.variant_attributes.size, None);
    }

    #[test]
    fn test_details_missing_fields_default_to_none() {
        let details: ProductDetails = serde_json::from_str("{}").unwrap();
        assert_eq!(details, ProductDetails::default());
    }

    #[test]
    fn test_null_attribute_objects() {
        let json = r#"{"brand": "Lodge", "key_attributes": null, "variant_attributes": null}"#;
        let details: ProductDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.key_attributes, KeyAttributes::default());
        assert_eq!(details.variant_attributes, VariantAttributes::default());
    }

    #[test]
    fn test_supported_accessors() {
        let supported = ExtractedProduct::Supported(ProductDetails::default());
        assert!(supported.is_supported());
        assert!(supported.details().is_some());

        let unsupported = ExtractedProduct::Unsupported { message: None };
        assert!(!unsupported.is_supported());
        assert!(unsupported.details().is_none());
    }
}
