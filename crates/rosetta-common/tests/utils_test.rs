//! Property tests for the JavaScript-compatible coercions.
//!
//! These tests cover:
//! - Integer rendering without fractional parts
//! - Text/number round trips through `parse_number`
//! - `parseInt` prefix behaviour on trailing garbage

use proptest::prelude::*;
use rosetta_common::utils::*;

proptest! {
    #[test]
    fn integers_render_without_fraction(n in -1_000_000i64..1_000_000) {
        prop_assert_eq!(number_to_text(n as f64), n.to_string());
    }

    #[test]
    fn rendered_numbers_parse_back(n in -1.0e9f64..1.0e9) {
        let text = number_to_text(n);
        prop_assert_eq!(parse_number(&text), if n == 0.0 { 0.0 } else { n });
    }

    #[test]
    fn int_prefix_ignores_suffix(n in 0i64..100_000, suffix in "[a-z]{0,5}") {
        prop_assert_eq!(parse_int_prefix(&format!("{n}{suffix}")), Some(n));
    }

    #[test]
    fn alphabetic_text_is_nan(word in "[g-zG-Z]{1,8}") {
        prop_assume!(word != "Infinity");
        prop_assert!(parse_number(&word).is_nan());
    }
}

#[test]
fn test_whitespace_padded_numbers() {
    assert_eq!(parse_number("\t7\n"), 7.0);
    assert_eq!(parse_int_prefix("   9 lives"), Some(9));
}
