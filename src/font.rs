use crate::glyph::{Glyph, GlyphList};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// A read-only snapshot of the parts of a font that feature generation needs.
///
/// Group names are kept raw (`public.kern1.O`), and kerning keys are either
/// glyph names or raw group names, as they appear in a UFO.
#[derive(Debug, Clone, Default)]
pub struct Font {
    pub glyphs: GlyphList,
    pub groups: IndexMap<String, Vec<String>>,
    pub kerning: HashMap<(String, String), i32>,
    pub source: Option<PathBuf>,
}

impl Font {
    pub fn new() -> Self {
        Font::default()
    }

    pub fn add_glyph(&mut self, glyph: Glyph) {
        self.glyphs.push(glyph);
    }

    pub fn contains_glyph(&self, name: &str) -> bool {
        self.glyphs.get(name).is_some()
    }

    /// Glyph names in font order.
    pub fn glyph_names(&self) -> impl Iterator<Item = &str> {
        self.glyphs.iter().map(|g| g.name.as_str())
    }

    pub(crate) fn glyph_name_set(&self) -> HashSet<&str> {
        self.glyph_names().collect()
    }

    pub(crate) fn glyphs_by_name(&self) -> HashMap<&str, &Glyph> {
        self.glyphs.iter().map(|g| (g.name.as_str(), g)).collect()
    }

    /// The font's own glyph order. For a UFO this is `.notdef`, then
    /// `public.glyphOrder`, then the remaining glyphs sorted.
    pub fn glyph_order(&self) -> Vec<String> {
        self.glyph_names().map(|n| n.to_string()).collect()
    }

    /// The order used when the caller does not supply one: glyph names, sorted.
    pub fn default_glyph_order(&self) -> Vec<String> {
        let mut order = self.glyph_order();
        order.sort();
        order
    }

    pub fn unicode(&self, name: &str) -> Option<u32> {
        self.glyphs.get(name).and_then(|g| g.unicode())
    }

    /// Production names declared by the source itself, suitable as the
    /// partial map for [`crate::make_glyph_design_name_to_final_name_map`].
    pub fn declared_production_names(&self) -> HashMap<String, String> {
        self.glyphs
            .iter()
            .filter_map(|g| {
                g.production_name
                    .as_ref()
                    .map(|p| (g.name.clone(), p.clone()))
            })
            .collect()
    }
}
