//! Parsing of the free-text size/color fields and construction of canonical
//! variant names. Products keep sizes and colors as comma-separated strings
//! ("S,M,L"); everything downstream works on the normalized token sets.

use std::collections::BTreeSet;

/// Split a comma-separated attribute string into canonical tokens: trimmed,
/// upper-cased, empties dropped, duplicates collapsed. Malformed input such as
/// trailing commas simply yields fewer tokens.
pub fn normalize_tokens(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(|token| token.trim().to_uppercase())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Cross product of sizes and colors as "SIZE - COLOR" names. Either side
/// being empty means no variants at all, not a partial set.
pub fn build_variant_names(
    sizes: &BTreeSet<String>,
    colors: &BTreeSet<String>,
) -> BTreeSet<String> {
    sizes
        .iter()
        .flat_map(|size| colors.iter().map(move |color| format!("{size} - {color}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn normalize_trims_uppercases_and_drops_empty_tokens() {
        assert_eq!(normalize_tokens(" s, m ,,L"), set(&["S", "M", "L"]));
    }

    #[test]
    fn normalize_collapses_duplicates() {
        assert_eq!(normalize_tokens("red,RED, Red "), set(&["RED"]));
    }

    #[test]
    fn normalize_of_blank_input_is_empty() {
        assert!(normalize_tokens("").is_empty());
        assert!(normalize_tokens(" , ,").is_empty());
    }

    #[test]
    fn cross_product_of_sizes_and_colors() {
        let names = build_variant_names(&set(&["S", "M"]), &set(&["RED", "BLUE"]));
        assert_eq!(
            names,
            set(&["S - RED", "S - BLUE", "M - RED", "M - BLUE"])
        );
    }

    #[test]
    fn empty_dimension_yields_no_names() {
        assert!(build_variant_names(&set(&[]), &set(&["RED"])).is_empty());
        assert!(build_variant_names(&set(&["S"]), &set(&[])).is_empty());
    }
}
