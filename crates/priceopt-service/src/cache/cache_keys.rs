//! Cache key generators for consistent key naming.
//!
//! SKUs are restricted to `[A-Za-z0-9._-]`, so keys never contain glob
//! metacharacters and the invalidation patterns match exactly one SKU.

use priceopt_core::Sku;

/// Prefix for all cache keys to namespace them.
const CACHE_PREFIX: &str = "priceopt:cache";

/// Generate a cache key for a SKU baseline.
#[must_use]
pub fn baseline(sku: &Sku) -> String {
    format!("{}:baseline:{}", CACHE_PREFIX, sku)
}

/// Generate a cache key for a price quote.
///
/// The competitor price is part of the key in its shortest round-trip form,
/// so two requests share a key only when they carry the same `f64`. The
/// suffix is `none` when the caller did not supply one.
#[must_use]
pub fn price_quote(sku: &Sku, competitor_price: Option<f64>) -> String {
    match competitor_price {
        Some(price) => {
            // -0.0 and 0.0 quote identically
            let price = if price == 0.0 { 0.0 } else { price };
            format!("{}:price:{}:{}", CACHE_PREFIX, sku, price)
        }
        None => format!("{}:price:{}:none", CACHE_PREFIX, sku),
    }
}

/// Pattern matching every cached quote for a SKU.
#[must_use]
pub fn price_invalidation_pattern(sku: &Sku) -> String {
    format!("{}:price:{}:*", CACHE_PREFIX, sku)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sku(value: &str) -> Sku {
        Sku::parse(value).unwrap()
    }

    #[test]
    fn test_baseline_key() {
        assert_eq!(baseline(&sku("SKU123")), "priceopt:cache:baseline:SKU123");
    }

    #[test]
    fn test_price_quote_key() {
        assert_eq!(
            price_quote(&sku("SKU123"), Some(109.0)),
            "priceopt:cache:price:SKU123:109"
        );
        assert_eq!(
            price_quote(&sku("SKU123"), None),
            "priceopt:cache:price:SKU123:none"
        );
    }

    #[test]
    fn test_price_quote_key_keeps_full_precision() {
        assert_eq!(
            price_quote(&sku("SKU123"), Some(100.00001)),
            "priceopt:cache:price:SKU123:100.00001"
        );
        assert_ne!(
            price_quote(&sku("SKU123"), Some(100.00001)),
            price_quote(&sku("SKU123"), Some(100.00004))
        );
        assert_ne!(
            price_quote(&sku("SKU123"), Some(0.1 + 0.2)),
            price_quote(&sku("SKU123"), Some(0.3))
        );
    }

    #[test]
    fn test_negative_zero_normalized() {
        assert_eq!(
            price_quote(&sku("A"), Some(-0.0)),
            price_quote(&sku("A"), Some(0.0))
        );
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        assert_ne!(baseline(&sku("sku1")), baseline(&sku("SKU1")));
    }

    #[test]
    fn test_invalidation_pattern_covers_quotes() {
        let pattern = price_invalidation_pattern(&sku("SKU123"));
        assert_eq!(pattern, "priceopt:cache:price:SKU123:*");
        assert!(price_quote(&sku("SKU123"), Some(1.5)).starts_with(pattern.trim_end_matches('*')));
    }
}
