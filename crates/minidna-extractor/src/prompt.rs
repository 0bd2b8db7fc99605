//! LLM prompt engineering for product extraction

/// Message the model is told to return for non-product pages
pub const UNSUPPORTED_PROMPT_MESSAGE: &str =
    "🎯 We're focusing on physical products right now! Try a product link from Nike, Amazon, Zara, etc.";

/// Builds the extraction prompt for a product URL
pub struct PromptBuilder {
    url: String,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Task and scope
        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        // 2. The URL to analyze
        prompt.push_str("URL:\n");
        prompt.push_str(self.url.trim());
        prompt.push_str("\n\n");

        // 3. The two permitted shapes
        prompt.push_str(SUPPORTED_SHAPE);
        prompt.push_str("\n\n");
        prompt.push_str(&format!(
            "FOR UNSUPPORTED URLs (non-products):\n{{\n  \"supported\": false,\n  \"message\": \"{}\"\n}}\n\n",
            UNSUPPORTED_PROMPT_MESSAGE
        ));

        // 4. Field guidance and output rules
        prompt.push_str(FIELD_RULES);

        prompt
    }
}

const EXTRACTION_INSTRUCTIONS: &str = r#"You are extracting structured data for a marketplace item from a product URL.

IMPORTANT: Only process product pages for physical items such as shoes, clothing, electronics or furniture.
If the URL is NOT a physical product (blog post, home page, informational page, service page), return the unsupported response below."#;

const SUPPORTED_SHAPE: &str = r#"Return STRICT JSON in exactly one of these two shapes.

FOR VALID PRODUCTS:
{
  "supported": true,
  "brand": string | null,
  "product_line": string | null,
  "target_user": string | null,
  "core_type": string | null,
  "key_attributes": {
    "material": string | null,
    "closure": string | null,
    "usage": string | null
  },
  "variant_attributes": {
    "color": string | null,
    "size": string | null
  },
  "title": string | null,
  "description": string | null
}"#;

const FIELD_RULES: &str = r#"Rules:
- brand: Nike, Adidas, Apple, IKEA, etc.
- product_line: Air Zoom Pegasus 40, iPhone 15 Pro, etc.
- target_user: Men, Women, Kids, Unisex, etc.
- core_type: Running Shoe, Laptop, Sofa, T-Shirt, etc.
- key_attributes: properties that define the product identity, not its variants
- variant_attributes: properties that differ between copies of the same product (color, size)
- Use null if a value is unknown
- Do not add extra keys
- Do not include explanations

Remember: Return ONLY valid JSON, no markdown code blocks."#;
