//! Production glyph names.
//!
//! makeotf only accepts glyph names that follow the AGL rules: no leading
//! digit, no leading period except `.notdef`, at most 31 characters from
//! `[A-Za-z0-9_.]`. Design names that break these rules are mapped to a
//! final name here.

use crate::identifiers::{is_valid_character, make_unique, MAX_NAME_LENGTH, MAX_UNIQUE_ATTEMPTS};
use crate::{Font, Ufo2FeaError};
use icu_normalizer::DecomposingNormalizerBorrowed;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

pub fn is_legal_glyph_name(name: &str) -> bool {
    let Some(first) = name.chars().next() else {
        return false;
    };
    if first.is_ascii_digit() {
        return false;
    }
    if first == '.' && name != ".notdef" {
        return false;
    }
    name.chars().count() <= MAX_NAME_LENGTH && name.chars().all(is_valid_character)
}

/// Turns `name` into a legal glyph name that is not in `existing`.
///
/// The name is decomposed (NFKD) and stripped of illegal characters. If
/// nothing survives, a `uniXXXX`/`uXXXXX` name is built from `unicode`.
/// Collisions get a `.1`, `.2`, ... suffix, and anything still unusable falls
/// back to `glyph1`, `glyph2`, ...
pub fn normalize_glyph_name(
    name: &str,
    unicode: Option<u32>,
    existing: &HashSet<String>,
) -> Result<String, Ufo2FeaError> {
    let nfkd = DecomposingNormalizerBorrowed::new_nfkd();
    let mut candidate: String = nfkd
        .normalize(name)
        .chars()
        .filter(|&c| is_valid_character(c))
        .take(MAX_NAME_LENGTH)
        .collect();
    if candidate.is_empty() {
        if let Some(cp) = unicode.filter(|&cp| cp > 0) {
            candidate = if cp < 0xFFFF {
                format!("uni{cp:04X}")
            } else {
                format!("u{cp:04X}")
            };
        }
    }
    if !candidate.is_empty() && existing.contains(&candidate) {
        candidate = make_unique(&candidate, MAX_NAME_LENGTH, ".", existing)?;
    }
    if is_legal_glyph_name(&candidate) {
        Ok(candidate)
    } else {
        log::debug!("No legal name derivable from {name:?}, using a numbered fallback");
        fallback_glyph_name(existing)
    }
}

fn fallback_glyph_name(existing: &HashSet<String>) -> Result<String, Ufo2FeaError> {
    (1..MAX_UNIQUE_ATTEMPTS)
        .map(|number| format!("glyph{number}"))
        .find(|name| !existing.contains(name))
        .ok_or_else(|| Ufo2FeaError::UniqueNameExhausted {
            name: "glyph".to_string(),
        })
}

/// Builds the design name → final name map for every glyph in `glyph_order`.
///
/// Entries in `provided` come first and keep their name when it is legal and
/// not yet taken. Of the remaining glyphs, those that are already legal and
/// unclaimed keep their name; the rest are normalized in glyph order against
/// every final name assigned so far. Final names are always distinct.
pub fn make_glyph_design_name_to_final_name_map(
    font: &Font,
    glyph_order: &[String],
    provided: Option<&HashMap<String, String>>,
) -> Result<IndexMap<String, String>, Ufo2FeaError> {
    let glyphs = font.glyphs_by_name();
    let unicode = |name: &str| glyphs.get(name).and_then(|g| g.unicode());
    let mut final_map: IndexMap<String, String> = IndexMap::new();
    let mut assigned: HashSet<String> = HashSet::new();
    if let Some(provided) = provided {
        let mut sorted: Vec<_> = provided.iter().collect();
        sorted.sort();
        for (design, production) in sorted {
            let final_name =
                if is_legal_glyph_name(production) && !assigned.contains(production) {
                    production.clone()
                } else {
                    let renamed =
                        normalize_glyph_name(production, unicode(design.as_str()), &assigned)?;
                    log::warn!(
                        "Production name {production} for {design} is illegal or taken, using {renamed}"
                    );
                    renamed
                };
            assigned.insert(final_name.clone());
            final_map.insert(design.clone(), final_name);
        }
    }
    let need_final_name: Vec<&String> = glyph_order
        .iter()
        .filter(|name| !final_map.contains_key(*name))
        .collect();
    for name in need_final_name.iter() {
        if is_legal_glyph_name(name) && assigned.insert(name.to_string()) {
            final_map.insert(name.to_string(), name.to_string());
        }
    }
    for name in need_final_name {
        if final_map.contains_key(name) {
            continue;
        }
        let final_name = normalize_glyph_name(name, unicode(name.as_str()), &assigned)?;
        log::debug!("Renaming glyph {name} to {final_name}");
        assigned.insert(final_name.clone());
        final_map.insert(name.clone(), final_name);
    }
    Ok(final_map)
}

/// Formats a codepoint the way makeotf's glyph order file expects.
fn codepoint_token(cp: u32) -> String {
    let hex = format!("{cp:04X}");
    if hex.len() <= 4 {
        format!("uni{hex}")
    } else {
        format!("u{hex}")
    }
}

/// The contents of a makeotf glyph order file: `final design [codes]` per line.
///
/// Glyphs missing from `final_names` keep their design name.
pub fn glyph_order_text(
    font: &Font,
    glyph_order: &[String],
    final_names: &IndexMap<String, String>,
) -> String {
    let glyphs = font.glyphs_by_name();
    let mut text = String::new();
    for design_name in glyph_order {
        let final_name = final_names.get(design_name).unwrap_or(design_name);
        let codes = glyphs
            .get(design_name.as_str())
            .map(|g| {
                g.codepoints
                    .iter()
                    .map(|&cp| codepoint_token(cp))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        if codes.is_empty() {
            text.push_str(&format!("{final_name} {design_name}\n"));
        } else {
            text.push_str(&format!("{final_name} {design_name} {}\n", codes.join(",")));
        }
    }
    text
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::Glyph;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    #[case("a", true)]
    #[case(".foo", false)]
    #[case(".notdef", true)]
    #[case("foo.bar", true)]
    #[case("1foo", false)]
    #[case("foo1", true)]
    #[case("f*o", false)]
    #[case("f$o", false)]
    #[case("abcdefghijklmnopqrstuvwxyz01234", true)]
    #[case("abcdefghijklmnopqrstuvwxyz012345", false)]
    #[case("", false)]
    fn test_is_legal(#[case] name: &str, #[case] legal: bool) {
        assert_eq!(is_legal_glyph_name(name), legal);
    }

    #[rstest]
    #[case("a-b-c", None, &[], "abc")]
    #[case("a*b*c", None, &[], "abc")]
    #[case("a$b$c", None, &[], "abc")]
    #[case("a-b-c", None, &["abc"], "abc.1")]
    #[case("a-b-c", None, &["abc", "abc.1"], "abc.2")]
    #[case("!", Some(0x21), &[], "uni0021")]
    #[case("!", Some(0x21), &["uni0021"], "uni0021.1")]
    #[case("?", Some(0x3F), &[], "uni003F")]
    #[case("?", Some(0x3F), &["uni003F"], "uni003F.1")]
    #[case("\u{1F600}", Some(0x1F600), &[], "u1F600")]
    #[case("\u{e9}", None, &[], "e")]
    #[case("\u{fb01}", None, &[], "fi")]
    #[case("abcdefghijklmnopqrstuvwxyz01234", None, &[], "abcdefghijklmnopqrstuvwxyz01234")]
    #[case("abcdefghijklmnopqrstuvwxyz012345", None, &[], "abcdefghijklmnopqrstuvwxyz01234")]
    #[case("1foo", None, &[], "glyph1")]
    #[case("\u{2022}", None, &["glyph1"], "glyph2")]
    fn test_normalize(
        #[case] name: &str,
        #[case] unicode: Option<u32>,
        #[case] existing: &[&str],
        #[case] expected: &str,
    ) {
        assert_eq!(
            normalize_glyph_name(name, unicode, &set(existing)).unwrap(),
            expected
        );
    }

    #[test]
    fn test_collision_on_long_name_stays_short() {
        let long = "abcdefghijklmnopqrstuvwxyz01234";
        let name = normalize_glyph_name(long, None, &set(&[long])).unwrap();
        assert_eq!(name, "abcdefghijklmnopqrstuvwxyz012.1");
        assert!(is_legal_glyph_name(&name));
    }

    fn font() -> Font {
        let mut font = Font::new();
        font.add_glyph(Glyph::new(".notdef"));
        font.add_glyph(Glyph::new("A").with_codepoints([0x41]));
        font.add_glyph(Glyph::new("a-b-c"));
        font.add_glyph(Glyph::new("abc"));
        font.add_glyph(Glyph::new("!").with_codepoints([0x21]));
        font.add_glyph(Glyph::new("smiley").with_codepoints([0x1F600]));
        font
    }

    #[test]
    fn test_final_name_map() {
        let font = font();
        let order = font.default_glyph_order();
        let map = make_glyph_design_name_to_final_name_map(&font, &order, None).unwrap();
        assert_eq!(map.len(), order.len());
        assert_eq!(map["A"], "A");
        assert_eq!(map[".notdef"], ".notdef");
        assert_eq!(map["abc"], "abc");
        assert_eq!(map["a-b-c"], "abc.1");
        assert_eq!(map["!"], "uni0021");
        let finals: HashSet<&String> = map.values().collect();
        assert_eq!(finals.len(), map.len());
        assert!(map.values().all(|n| is_legal_glyph_name(n)));
    }

    #[test]
    fn test_provided_names_win() {
        let font = font();
        let order = font.default_glyph_order();
        let provided: HashMap<String, String> = [("A".to_string(), "uni0041".to_string())].into();
        let map = make_glyph_design_name_to_final_name_map(&font, &order, Some(&provided)).unwrap();
        assert_eq!(map["A"], "uni0041");
    }

    #[test]
    fn test_provided_name_taken_by_design_name() {
        let mut font = Font::new();
        font.add_glyph(Glyph::new("A"));
        font.add_glyph(Glyph::new("B"));
        let order = font.default_glyph_order();
        let provided: HashMap<String, String> = [("A".to_string(), "B".to_string())].into();
        let map = make_glyph_design_name_to_final_name_map(&font, &order, Some(&provided)).unwrap();
        assert_eq!(map["A"], "B");
        assert_eq!(map["B"], "B.1");
        let finals: HashSet<&String> = map.values().collect();
        assert_eq!(finals.len(), map.len());
    }

    #[test]
    fn test_provided_names_are_legalized() {
        let font = font();
        let order = font.default_glyph_order();
        let provided: HashMap<String, String> = [
            ("!".to_string(), "1exclam".to_string()),
            ("a-b-c".to_string(), "A".to_string()),
            ("smiley".to_string(), "A".to_string()),
        ]
        .into();
        let map = make_glyph_design_name_to_final_name_map(&font, &order, Some(&provided)).unwrap();
        assert_eq!(map["!"], "glyph1");
        assert_eq!(map["a-b-c"], "A");
        assert_eq!(map["smiley"], "A.1");
        assert_eq!(map["A"], "A.2");
        assert_eq!(map.len(), order.len());
        let finals: HashSet<&String> = map.values().collect();
        assert_eq!(finals.len(), map.len());
        assert!(map.values().all(|n| is_legal_glyph_name(n)));
    }

    #[test]
    fn test_glyph_order_text() {
        let font = font();
        let order: Vec<String> = [".notdef", "A", "a-b-c", "smiley"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let map = make_glyph_design_name_to_final_name_map(&font, &order, None).unwrap();
        assert_eq!(
            glyph_order_text(&font, &order, &map),
            ".notdef .notdef\nA A uni0041\nabc a-b-c\nsmiley smiley u1F600\n"
        );
    }
}
