//! Ingredient name normalization
//!
//! Recipe lines are free text ("1.5 oz Lime Juice (fresh)"), stock entries are
//! bare names ("Lime Juice"). These helpers reduce a recipe line to the name
//! used for stock lookups.

/// Units that may follow a leading quantity
const UNITS: &[&str] = &["oz", "ml", "tsp"];

/// Garnish descriptors dropped from names ("Lime wedges" -> "Lime")
const DESCRIPTOR_WORDS: &[&str] = &["wedge", "wedges", "slice", "slices", "dashes"];

/// Reduce a recipe line to its base ingredient name
///
/// Example: "1.5 oz Lime Juice (fresh)" -> "Lime Juice"
pub fn extract_ingredient_name(raw: &str) -> String {
    let name = strip_quantity(raw);
    let name = strip_parentheticals(name);
    let name = strip_float_prefix(&name);
    strip_descriptors(name).trim().to_string()
}

/// Case-insensitive name comparison used for stock matching
pub fn ingredient_matches(stock_name: &str, base_name: &str) -> bool {
    stock_name.to_lowercase() == base_name.to_lowercase()
}

/// Strip a leading quantity with an optional unit: "2 oz ", "1.5ml", ".5 "
fn strip_quantity(s: &str) -> &str {
    let rest = s.trim_start();
    let int_len = digit_run(rest);
    let after_int = &rest[int_len..];

    let number_len = match after_int.strip_prefix('.') {
        Some(frac) if digit_run(frac) > 0 => int_len + 1 + digit_run(frac),
        _ if int_len > 0 => int_len,
        _ => return s,
    };

    let mut rest = rest[number_len..].trim_start();
    for unit in UNITS {
        if starts_with_ignore_case(rest, unit) {
            rest = &rest[unit.len()..];
            break;
        }
    }
    rest.trim_start()
}

/// Remove every "(...)" group along with the whitespace in front of it
fn strip_parentheticals(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(open) = rest.find('(') {
        let Some(close) = rest[open..].find([')', '\n']) else {
            break;
        };
        if rest[open + close..].starts_with('\n') {
            // Groups never span lines; keep this text as-is
            out.push_str(&rest[..open + close + 1]);
            rest = &rest[open + close + 1..];
            continue;
        }
        out.push_str(rest[..open].trim_end());
        rest = &rest[open + close + 1..];
    }

    out.push_str(rest);
    out
}

/// Strip a leading "Float " (layered top-ups: "Float Dark Rum")
fn strip_float_prefix(s: &str) -> String {
    const PREFIX: &str = "float";
    if starts_with_ignore_case(s, PREFIX) {
        let after = &s[PREFIX.len()..];
        if after.starts_with(char::is_whitespace) {
            return after.trim_start().to_string();
        }
    }
    s.to_string()
}

/// Drop descriptor words, matching whole words only
fn strip_descriptors(s: String) -> String {
    let mut out = String::with_capacity(s.len());
    let mut word = String::new();

    for c in s.chars() {
        if is_word_char(c) {
            word.push(c);
            continue;
        }
        push_word(&mut out, &word);
        word.clear();
        out.push(c);
    }
    push_word(&mut out, &word);
    out
}

fn push_word(out: &mut String, word: &str) {
    let lower = word.to_lowercase();
    if !DESCRIPTOR_WORDS.contains(&lower.as_str()) {
        out.push_str(word);
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn digit_run(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .map(|head| head.eq_ignore_ascii_case(prefix))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_quantity_and_unit() {
        assert_eq!(extract_ingredient_name("2 oz Gin"), "Gin");
        assert_eq!(extract_ingredient_name("1.5oz Lime Juice"), "Lime Juice");
        assert_eq!(extract_ingredient_name(".5 OZ Simple Syrup"), "Simple Syrup");
        assert_eq!(extract_ingredient_name("  30 ml Campari"), "Campari");
        assert_eq!(extract_ingredient_name("1 tsp Sugar"), "Sugar");
        assert_eq!(extract_ingredient_name("2 Mint Leaves"), "Mint Leaves");
    }

    #[test]
    fn test_keeps_names_without_quantity() {
        assert_eq!(extract_ingredient_name("Angostura Bitters"), "Angostura Bitters");
        assert_eq!(extract_ingredient_name("Soda Water"), "Soda Water");
    }

    #[test]
    fn test_removes_parentheticals() {
        assert_eq!(extract_ingredient_name("1 oz Lime Juice (fresh)"), "Lime Juice");
        assert_eq!(
            extract_ingredient_name("Orange Liqueur (Cointreau) (or Triple Sec)"),
            "Orange Liqueur"
        );
        assert_eq!(extract_ingredient_name("Cream (optional"), "Cream (optional");
    }

    #[test]
    fn test_strips_float_prefix() {
        assert_eq!(extract_ingredient_name("Float Dark Rum"), "Dark Rum");
        assert_eq!(extract_ingredient_name("float  Overproof Rum"), "Overproof Rum");
        // Quantity comes first, so "Float" is only stripped at the very start
        assert_eq!(
            extract_ingredient_name("Float 0.5 oz Overproof Rum"),
            "0.5 oz Overproof Rum"
        );
        assert_eq!(extract_ingredient_name("Floater Juice"), "Floater Juice");
    }

    #[test]
    fn test_drops_descriptor_words() {
        assert_eq!(extract_ingredient_name("Lime wedges"), "Lime");
        assert_eq!(extract_ingredient_name("1 Lime Wedge"), "Lime");
        assert_eq!(extract_ingredient_name("Orange slice"), "Orange");
        assert_eq!(extract_ingredient_name("2 dashes Angostura Bitters"), "Angostura Bitters");
        // Whole words only
        assert_eq!(extract_ingredient_name("Sliced Cucumber"), "Sliced Cucumber");
    }

    #[test]
    fn test_inner_spacing_is_kept() {
        assert_eq!(extract_ingredient_name("Lime  Juice"), "Lime  Juice");
        assert_eq!(extract_ingredient_name("1 oz Lime  Juice  "), "Lime  Juice");
        // Only the ends are trimmed after a descriptor goes
        assert_eq!(extract_ingredient_name("Orange slice twist"), "Orange  twist");
    }

    #[test]
    fn test_ingredient_matches_ignores_case() {
        assert!(ingredient_matches("Lime Juice", "lime juice"));
        assert!(!ingredient_matches("Lime", "Lime Juice"));
    }
}
