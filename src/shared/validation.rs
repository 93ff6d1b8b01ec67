use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for a generated product SKU: three-letter category and product
    /// codes plus a numeric suffix of at least four digits
    /// - Valid: "SEP-NIK-1042", "RUN-ADI-0001"
    /// - Invalid: "SEP-NIK", "sep-nik-1042", "SEP-NIK-42"
    pub static ref PRODUCT_SKU_REGEX: Regex =
        Regex::new(r"^[A-Z0-9]{1,3}-[A-Z0-9]{1,3}-\d{4,}$").unwrap();

    /// Regex for a variant SKU: product SKU with a color code spliced in
    /// - Valid: "SEP-NIK-MER-1042"
    pub static ref VARIANT_SKU_REGEX: Regex =
        Regex::new(r"^[A-Z0-9]{1,3}-[A-Z0-9]{1,3}-[A-Z0-9]{1,3}-\d{4,}$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_sku_regex_valid() {
        assert!(PRODUCT_SKU_REGEX.is_match("SEP-NIK-1042"));
        assert!(PRODUCT_SKU_REGEX.is_match("RUN-ADI-0001"));
        assert!(PRODUCT_SKU_REGEX.is_match("A-B-123456"));
    }

    #[test]
    fn test_product_sku_regex_invalid() {
        assert!(!PRODUCT_SKU_REGEX.is_match("SEP-NIK")); // missing suffix
        assert!(!PRODUCT_SKU_REGEX.is_match("sep-nik-1042")); // lowercase
        assert!(!PRODUCT_SKU_REGEX.is_match("SEP-NIK-42")); // suffix too short
        assert!(!PRODUCT_SKU_REGEX.is_match("")); // empty
        assert!(!PRODUCT_SKU_REGEX.is_match("SEPA-NIK-1042")); // component too long
    }

    #[test]
    fn test_variant_sku_regex() {
        assert!(VARIANT_SKU_REGEX.is_match("SEP-NIK-MER-1042"));
        assert!(!VARIANT_SKU_REGEX.is_match("SEP-NIK-1042")); // no color code
        assert!(!VARIANT_SKU_REGEX.is_match("SEP-NIK-MER-HIT-1042")); // too many parts
    }
}
