//! # Ingredient Alias Normalizer
//!
//! Maps raw ingredient/product name strings to canonical keys so that the
//! inventory and recipe sides of the application agree on what counts as the
//! same ingredient. Normalization is a total, pure function: trim, lowercase,
//! then substitute through a fixed alias table.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// Ordered alias pairs as observed in the shipped catalog, duplicates
/// included. The resolved map below applies last-write-wins, so a key that
/// appears twice keeps its later canonical form (e.g. "томат" -> "томаты").
const ALIAS_PAIRS: &[(&str, &str)] = &[
    ("помидоры", "томаты"),
    ("томат", "томаты"),
    ("перец болгарский", "перец"),
    ("сыр пармезан", "сыр"),
    ("сыр фета", "сыр фета"),
    ("моцарелла", "сыр моцарелла"),
    ("курица", "куриное филе"),
    ("куриное мясо", "куриное филе"),
    ("говядина фарш", "говядина"),
    ("рыбное филе", "рыба"),
    ("зелень", "зелень"),
    ("фарш говяжий", "говядина"),
    ("масло сливочное", "масло"),
    ("масло растительное", "масло"),
    ("рис арборио", "рис"),
    ("нори", "нори"),
    ("печенье савоярди", "савоярди"),
    ("зелёный лук", "зелень"),
    ("листы лазаньи", "листы лазаньи"),
    ("лаваш", "лаваш"),
    ("сливки", "сливки"),
    ("бульон", "куриный бульон"),
    ("помидоры", "томаты"),
    ("помидор", "томаты"),
    ("томат", "томаты"),
    ("томатная паста", "томаты"),
    ("моцарелла", "сыр моцарелла"),
    ("сыр пармезан", "сыр"),
    ("сыр фета", "сыр фета"),
    ("макароны", "паста"),
    ("спагетти", "паста"),
    ("рис арборио", "рис"),
    ("лук репчатый", "лук"),
    ("зеленый лук", "зелень"),
    ("зелёный лук", "зелень"),
    ("болгарский перец", "перец"),
    ("фарш", "говядина"),
    ("фарш говяжий", "говядина"),
    ("курица", "куриное филе"),
    ("куриное мясо", "куриное филе"),
    ("яйцо", "яйца"),
    ("яйца куриные", "яйца"),
    ("огурцы", "огурец"),
    ("масло сливочное", "масло"),
    ("растительное масло", "масло"),
    ("оливковое масло", "масло"),
    ("рисовая лапша", "лапша"),
    ("нори лист", "нори"),
    ("листы лазаньи", "листы лазаньи"),
    ("лаваш тонкий", "лаваш"),
];

lazy_static! {
    /// Alias lookup resolved from `ALIAS_PAIRS`, last entry wins.
    static ref ALIASES: HashMap<&'static str, &'static str> =
        ALIAS_PAIRS.iter().copied().collect();
}

/// Normalize a raw ingredient or product name into its canonical key.
///
/// Trims whitespace, lowercases, then looks the result up in the alias
/// table; names without an alias are already canonical. The empty string
/// normalizes to itself and matches nothing.
///
/// # Examples
///
/// ```rust
/// use fridgemate::alias::normalize;
///
/// assert_eq!(normalize("  Помидоры "), "томаты");
/// assert_eq!(normalize("чеснок"), "чеснок");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(raw: &str) -> String {
    let key = raw.trim().to_lowercase();
    match ALIASES.get(key.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize("  Чеснок  "), "чеснок");
        assert_eq!(normalize("ЛУК РЕПЧАТЫЙ"), "лук");
    }

    #[test]
    fn test_normalize_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for (raw, _) in ALIAS_PAIRS {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for '{}'", raw);
        }
        assert_eq!(normalize(&normalize("Сыр Пармезан")), "сыр");
    }

    #[test]
    fn test_tomato_variants_share_a_key() {
        let canonical = normalize("томаты");
        assert_eq!(normalize("Помидоры"), canonical);
        assert_eq!(normalize("томат"), canonical);
        assert_eq!(normalize("томатная паста"), canonical);
    }

    #[test]
    fn test_last_pair_wins_for_duplicate_keys() {
        // "бульон" appears once, mapped away from itself.
        assert_eq!(normalize("бульон"), "куриный бульон");
        // "сыр фета" is redefined to its own literal form; the observed
        // final behaviour is identity.
        assert_eq!(normalize("сыр фета"), "сыр фета");
        // Both spellings of the duplicated green-onion key collapse.
        assert_eq!(normalize("зелёный лук"), "зелень");
        assert_eq!(normalize("зеленый лук"), "зелень");
    }

    #[test]
    fn test_unknown_name_passes_through() {
        assert_eq!(normalize("драконий фрукт"), "драконий фрукт");
    }
}
