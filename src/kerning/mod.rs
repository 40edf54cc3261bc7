//! Kern feature generation.
//!
//! Turns a font's kerning and kerning groups into a `feature kern` block in
//! makeotf syntax. Groups become `@kern1.`/`@kern2.` classes, pairs are
//! written glyph pairs first and class pairs last, and class/glyph pairs
//! that could clash with class kerning are expanded into enumerated
//! exceptions.

mod emit;
mod groups;
mod pairs;

pub use groups::{FlatGroups, Groups, Side};
pub use pairs::{KernKey, Pairs, SeparatedPairs};

use crate::{Font, Ufo2FeaError};
use std::collections::BTreeMap;

pub struct KernFeatureWriter {
    side1_groups: Groups,
    side2_groups: Groups,
    pairs: Pairs,
    class_names: BTreeMap<String, String>,
    flat_groups: FlatGroups,
}

impl KernFeatureWriter {
    /// Collects the font's kerning groups and pairs and assigns class names.
    pub fn new(font: &Font) -> Result<Self, Ufo2FeaError> {
        log::info!("Collecting kerning groups and pairs");
        let (raw_side1, raw_side2) = groups::collect_groups(font);
        let raw_pairs = pairs::collect_pairs(font, &raw_side1, &raw_side2);
        log::debug!(
            "Kept {} of {} pairs, {} first and {} second groups",
            raw_pairs.len(),
            font.kerning.len(),
            raw_side1.len(),
            raw_side2.len()
        );
        let class_names = groups::class_name_mapping(&raw_side1, &raw_side2)?;
        let side1_groups = groups::rename_groups(&raw_side1, &class_names);
        let side2_groups = groups::rename_groups(&raw_side2, &class_names);
        let pairs = pairs::rename_pairs(&raw_pairs, &class_names);
        let flat_groups = FlatGroups::new(&side1_groups, &side2_groups);
        Ok(KernFeatureWriter {
            side1_groups,
            side2_groups,
            pairs,
            class_names,
            flat_groups,
        })
    }

    /// First-side groups, keyed by class name.
    pub fn side1_groups(&self) -> &Groups {
        &self.side1_groups
    }

    /// Second-side groups, keyed by class name.
    pub fn side2_groups(&self) -> &Groups {
        &self.side2_groups
    }

    /// Kept pairs, with groups referred to by class name.
    pub fn pairs(&self) -> &Pairs {
        &self.pairs
    }

    /// UFO group name → class name.
    pub fn class_names(&self) -> &BTreeMap<String, String> {
        &self.class_names
    }

    pub fn flat_groups(&self) -> &FlatGroups {
        &self.flat_groups
    }

    pub fn separated_pairs(&self) -> SeparatedPairs {
        pairs::PairClassifier {
            pairs: &self.pairs,
            side1_groups: &self.side1_groups,
            side2_groups: &self.side2_groups,
            flat: &self.flat_groups,
        }
        .separate()
    }

    /// Writes the feature text. `header` lines are placed, as comments,
    /// right after `feature kern {`. Returns an empty string when there is no
    /// kerning to write.
    pub fn write(&self, header: Option<&str>) -> String {
        if self.pairs.is_empty() {
            log::info!("No kerning pairs survived filtering; not writing a kern feature");
            return String::new();
        }
        let separated = self.separated_pairs();
        let mut body = emit::class_definitions(&self.side1_groups, &self.side2_groups);
        body.extend(emit::rule_sections(&separated));
        emit::kern_feature_block(header, &body)
    }
}

/// Builds the kern feature for `font` in one go.
pub fn write_kern_feature(font: &Font, header: Option<&str>) -> Result<String, Ufo2FeaError> {
    Ok(KernFeatureWriter::new(font)?.write(header))
}
