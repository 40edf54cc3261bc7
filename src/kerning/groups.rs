use crate::identifiers::{is_valid_character, legalize_identifier, MAX_NAME_LENGTH};
use crate::{Font, Ufo2FeaError};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Kerning groups keyed by name, members in source order.
pub type Groups = BTreeMap<String, Vec<String>>;

/// Which side of a kerning pair a group applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    First,
    Second,
}

impl Side {
    /// Prefix of UFO group names for this side.
    pub fn group_prefix(self) -> &'static str {
        match self {
            Side::First => "public.kern1.",
            Side::Second => "public.kern2.",
        }
    }

    /// Prefix of feature class names for this side.
    pub fn class_prefix(self) -> &'static str {
        match self {
            Side::First => "@kern1.",
            Side::Second => "@kern2.",
        }
    }

    pub fn of_group(name: &str) -> Option<Side> {
        [Side::First, Side::Second]
            .into_iter()
            .find(|side| name.starts_with(side.group_prefix()))
    }
}

/// Splits the font's kerning groups by side. Members missing from the font
/// are dropped, repeated members keep their first position, and groups left
/// without members are dropped.
pub(crate) fn collect_groups(font: &Font) -> (Groups, Groups) {
    let glyphs = font.glyph_name_set();
    let mut side1 = Groups::new();
    let mut side2 = Groups::new();
    for (name, members) in font.groups.iter() {
        let Some(side) = Side::of_group(name) else {
            continue;
        };
        let mut seen = HashSet::new();
        let present: Vec<String> = members
            .iter()
            .filter(|m| glyphs.contains(m.as_str()) && seen.insert(m.as_str()))
            .cloned()
            .collect();
        if present.is_empty() {
            log::debug!("Dropping group {name}: none of its glyphs are in the font");
            continue;
        }
        match side {
            Side::First => side1.insert(name.clone(), present),
            Side::Second => side2.insert(name.clone(), present),
        };
    }
    (side1, side2)
}

pub(crate) fn make_legal_class_name(
    side: Side,
    group_name: &str,
    existing: &HashSet<String>,
) -> Result<String, Ufo2FeaError> {
    let suffix = group_name
        .strip_prefix(side.group_prefix())
        .unwrap_or(group_name);
    legalize_identifier(
        suffix,
        side.class_prefix(),
        is_valid_character,
        MAX_NAME_LENGTH,
        existing,
    )
}

/// Maps every group name to a unique class name. Side 1 groups are named
/// first, each side in sorted order, so the result depends only on the names.
pub(crate) fn class_name_mapping(
    side1: &Groups,
    side2: &Groups,
) -> Result<BTreeMap<String, String>, Ufo2FeaError> {
    let mut mapping = BTreeMap::new();
    let mut assigned = HashSet::new();
    for (side, groups) in [(Side::First, side1), (Side::Second, side2)] {
        for group_name in groups.keys() {
            let class_name = make_legal_class_name(side, group_name, &assigned)?;
            log::trace!("Group {group_name} becomes class {class_name}");
            assigned.insert(class_name.clone());
            mapping.insert(group_name.clone(), class_name);
        }
    }
    Ok(mapping)
}

pub(crate) fn rename_groups(groups: &Groups, mapping: &BTreeMap<String, String>) -> Groups {
    groups
        .iter()
        .map(|(name, members)| {
            let renamed = mapping.get(name).unwrap_or(name);
            (renamed.clone(), members.clone())
        })
        .collect()
}

/// Glyph → class lookup, one class per glyph and side.
#[derive(Debug, Clone, Default)]
pub struct FlatGroups {
    side1: HashMap<String, String>,
    side2: HashMap<String, String>,
}

impl FlatGroups {
    /// A glyph should only be in one group per side. When it is in several,
    /// the class whose name sorts first claims it.
    pub(crate) fn new(side1: &Groups, side2: &Groups) -> Self {
        FlatGroups {
            side1: flatten(side1),
            side2: flatten(side2),
        }
    }

    pub fn class_of(&self, side: Side, glyph: &str) -> Option<&str> {
        match side {
            Side::First => self.side1.get(glyph),
            Side::Second => self.side2.get(glyph),
        }
        .map(|s| s.as_str())
    }
}

fn flatten(groups: &Groups) -> HashMap<String, String> {
    let mut flat: HashMap<String, String> = HashMap::new();
    for (class_name, members) in groups {
        for glyph in members {
            if let Some(owner) = flat.get(glyph) {
                log::warn!(
                    "Glyph {glyph} is in both {owner} and {class_name}; keeping {owner}"
                );
                continue;
            }
            flat.insert(glyph.clone(), class_name.clone());
        }
    }
    flat
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::Glyph;
    use pretty_assertions::assert_eq;

    fn groups(entries: &[(&str, &[&str])]) -> Groups {
        entries
            .iter()
            .map(|(name, members)| {
                (
                    name.to_string(),
                    members.iter().map(|m| m.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_collect_groups_filters_members() {
        let mut font = Font::new();
        for name in ["A", "Aacute", "B"] {
            font.add_glyph(Glyph::new(name));
        }
        font.groups.insert(
            "public.kern1.A".into(),
            vec!["Aacute".into(), "Missing".into(), "A".into()],
        );
        font.groups
            .insert("public.kern2.C".into(), vec!["C".into(), "Ccedilla".into()]);
        font.groups.insert("public.kern2.B".into(), vec!["B".into()]);
        font.groups.insert("smallcaps".into(), vec!["A".into()]);

        let (side1, side2) = collect_groups(&font);
        assert_eq!(side1, groups(&[("public.kern1.A", &["Aacute", "A"])]));
        assert_eq!(side2, groups(&[("public.kern2.B", &["B"])]));
    }

    #[test]
    fn test_collect_groups_drops_repeated_members() {
        let mut font = Font::new();
        for name in ["A", "B"] {
            font.add_glyph(Glyph::new(name));
        }
        font.groups.insert(
            "public.kern1.A".into(),
            vec!["B".into(), "A".into(), "B".into(), "A".into()],
        );
        let (side1, _) = collect_groups(&font);
        assert_eq!(side1, groups(&[("public.kern1.A", &["B", "A"])]));
    }

    #[test]
    fn test_class_names_are_unique() {
        let side1 = groups(&[
            ("public.kern1.O\u{2022}", &["O"]),
            ("public.kern1.O", &["Q"]),
            ("public.kern1.\u{2022}", &["x"]),
        ]);
        let side2 = groups(&[("public.kern2.O", &["O"])]);
        let mapping = class_name_mapping(&side1, &side2).unwrap();
        assert_eq!(mapping["public.kern1.O"], "@kern1.O");
        assert_eq!(mapping["public.kern1.O\u{2022}"], "@kern1.O1");
        assert_eq!(mapping["public.kern1.\u{2022}"], "@kern1.noTransPossible");
        assert_eq!(mapping["public.kern2.O"], "@kern2.O");
        let distinct: HashSet<&String> = mapping.values().collect();
        assert_eq!(distinct.len(), mapping.len());
        assert!(mapping.values().all(|n| n.len() <= MAX_NAME_LENGTH));
    }

    #[test]
    fn test_rename_groups() {
        let side1 = groups(&[("public.kern1.A", &["A"])]);
        let mapping = class_name_mapping(&side1, &Groups::new()).unwrap();
        assert_eq!(
            rename_groups(&side1, &mapping),
            groups(&[("@kern1.A", &["A"])])
        );
    }

    #[test]
    fn test_flat_groups_first_class_wins() {
        let side1 = groups(&[("@kern1.b", &["x", "y"]), ("@kern1.a", &["x"])]);
        let side2 = groups(&[("@kern2.a", &["y"])]);
        let flat = FlatGroups::new(&side1, &side2);
        assert_eq!(flat.class_of(Side::First, "x"), Some("@kern1.a"));
        assert_eq!(flat.class_of(Side::First, "y"), Some("@kern1.b"));
        assert_eq!(flat.class_of(Side::Second, "y"), Some("@kern2.a"));
        assert_eq!(flat.class_of(Side::Second, "x"), None);
    }
}
