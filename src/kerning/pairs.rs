use super::groups::{FlatGroups, Groups, Side};
use crate::Font;
use std::collections::{BTreeMap, HashSet};

/// One side of a kerning pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KernKey {
    Glyph(String),
    /// A kerning group: the UFO group name while collecting, the feature
    /// class name after renaming.
    Class(String),
}

impl KernKey {
    pub fn name(&self) -> &str {
        match self {
            KernKey::Glyph(name) | KernKey::Class(name) => name,
        }
    }

    pub fn is_class(&self) -> bool {
        matches!(self, KernKey::Class(_))
    }
}

pub type Pairs = BTreeMap<(KernKey, KernKey), i32>;

fn kern_key(
    raw: &str,
    side: Side,
    groups: &Groups,
    glyphs: &HashSet<&str>,
) -> Option<KernKey> {
    if groups.contains_key(raw) {
        Some(KernKey::Class(raw.to_string()))
    } else if raw.starts_with(side.group_prefix()) {
        log::debug!("Dropping kerning with {raw}: group is empty or missing");
        None
    } else if glyphs.contains(raw) {
        Some(KernKey::Glyph(raw.to_string()))
    } else {
        log::debug!("Dropping kerning with {raw}: no such glyph");
        None
    }
}

/// Keeps the kerning pairs whose sides are both present glyphs or retained
/// groups.
pub(crate) fn collect_pairs(font: &Font, side1: &Groups, side2: &Groups) -> Pairs {
    let glyphs = font.glyph_name_set();
    font.kerning
        .iter()
        .filter_map(|((first, second), value)| {
            let first = kern_key(first, Side::First, side1, &glyphs)?;
            let second = kern_key(second, Side::Second, side2, &glyphs)?;
            Some(((first, second), *value))
        })
        .collect()
}

pub(crate) fn rename_pairs(pairs: &Pairs, mapping: &BTreeMap<String, String>) -> Pairs {
    let rename = |key: &KernKey| match key {
        KernKey::Class(name) => KernKey::Class(mapping.get(name).unwrap_or(name).clone()),
        glyph => glyph.clone(),
    };
    pairs
        .iter()
        .map(|((first, second), value)| ((rename(first), rename(second)), *value))
        .collect()
}

/// Kerning pairs split into the six shapes written to the feature, in
/// writing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeparatedPairs {
    pub glyph_glyph: BTreeMap<(String, String), i32>,
    pub glyph_group_decomposed: BTreeMap<(String, Vec<String>), i32>,
    pub group_glyph_decomposed: BTreeMap<(Vec<String>, String), i32>,
    pub glyph_group: BTreeMap<(String, String), i32>,
    pub group_glyph: BTreeMap<(String, String), i32>,
    pub group_group: BTreeMap<(String, String), i32>,
}

/// Sorts renamed pairs into [`SeparatedPairs`], turning class/glyph pairs that
/// could clash with class/class kerning into enumerated glyph exceptions.
pub(crate) struct PairClassifier<'a> {
    pub pairs: &'a Pairs,
    pub side1_groups: &'a Groups,
    pub side2_groups: &'a Groups,
    pub flat: &'a FlatGroups,
}

impl PairClassifier<'_> {
    /// Whether a pair more general than `(first, second)` could also match
    /// the same glyphs. It does not say such a pair exists.
    pub fn is_higher_level_pair_possible(&self, first: &KernKey, second: &KernKey) -> bool {
        let exists = |a: KernKey, b: KernKey| self.pairs.contains_key(&(a, b));
        match (first, second) {
            (KernKey::Class(_), KernKey::Class(_)) => false,
            (KernKey::Class(_), KernKey::Glyph(glyph)) => {
                self.flat.class_of(Side::Second, glyph).is_some()
                    && exists(first.clone(), second.clone())
            }
            (KernKey::Glyph(glyph), KernKey::Class(_)) => {
                self.flat.class_of(Side::First, glyph).is_some()
                    && exists(first.clone(), second.clone())
            }
            (KernKey::Glyph(left), KernKey::Glyph(right)) => {
                let left_class = self.flat.class_of(Side::First, left);
                let right_class = self.flat.class_of(Side::Second, right);
                let glyph_pair = exists(first.clone(), second.clone());
                match (left_class, right_class) {
                    (Some(left_class), Some(right_class)) => {
                        glyph_pair
                            || exists(KernKey::Class(left_class.into()), second.clone())
                            || exists(first.clone(), KernKey::Class(right_class.into()))
                    }
                    (Some(_), None) | (None, Some(_)) => glyph_pair,
                    (None, None) => false,
                }
            }
        }
    }

    pub fn separate(&self) -> SeparatedPairs {
        let mut separated = SeparatedPairs::default();
        let mut glyph_group = BTreeMap::new();
        let mut group_glyph = BTreeMap::new();
        for ((first, second), &value) in self.pairs.iter() {
            let key = (first.name().to_string(), second.name().to_string());
            match (first.is_class(), second.is_class()) {
                (true, true) => separated.group_group.insert(key, value),
                (true, false) => group_glyph.insert(key, value),
                (false, true) => glyph_group.insert(key, value),
                (false, false) => separated.glyph_glyph.insert(key, value),
            };
        }

        // Glyph pairs always win, and each enumerated exception claims its
        // glyph pairs so later exceptions skip them.
        let mut covered: HashSet<(String, String)> =
            separated.glyph_glyph.keys().cloned().collect();

        for ((glyph, class), value) in glyph_group {
            let (first, second) = (KernKey::Glyph(glyph.clone()), KernKey::Class(class.clone()));
            if !self.is_higher_level_pair_possible(&first, &second) {
                separated.glyph_group.insert((glyph, class), value);
                continue;
            }
            let members = uncovered_members(self.side2_groups.get(&class), |member| {
                !covered.contains(&(glyph.clone(), member.to_string()))
            });
            covered.extend(members.iter().map(|m| (glyph.clone(), m.clone())));
            log::debug!("Decomposing {glyph} {class} into {} exceptions", members.len());
            if !members.is_empty() {
                separated
                    .glyph_group_decomposed
                    .insert((glyph, members), value);
            }
        }

        for ((class, glyph), value) in group_glyph {
            let (first, second) = (KernKey::Class(class.clone()), KernKey::Glyph(glyph.clone()));
            if !self.is_higher_level_pair_possible(&first, &second) {
                separated.group_glyph.insert((class, glyph), value);
                continue;
            }
            let members = uncovered_members(self.side1_groups.get(&class), |member| {
                !covered.contains(&(member.to_string(), glyph.clone()))
            });
            covered.extend(members.iter().map(|m| (m.clone(), glyph.clone())));
            log::debug!("Decomposing {class} {glyph} into {} exceptions", members.len());
            if !members.is_empty() {
                separated
                    .group_glyph_decomposed
                    .insert((members, glyph), value);
            }
        }
        separated
    }
}

fn uncovered_members(
    members: Option<&Vec<String>>,
    keep: impl Fn(&str) -> bool,
) -> Vec<String> {
    let mut members: Vec<String> = members
        .map(|m| m.iter().filter(|m| keep(m.as_str())).cloned().collect())
        .unwrap_or_default();
    members.sort();
    members.dedup();
    members
}
