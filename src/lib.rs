#![deny(clippy::unwrap_used, clippy::expect_used)]
//! Generates makeotf-ready kerning features and production glyph names from
//! UFO sources.

pub mod convertors;
mod error;
mod font;
mod glyph;
pub mod glyphnames;
pub mod identifiers;
pub mod kerning;

pub use crate::{
    error::Ufo2FeaError,
    font::Font,
    glyph::{Glyph, GlyphList},
    glyphnames::{
        glyph_order_text, is_legal_glyph_name, make_glyph_design_name_to_final_name_map,
        normalize_glyph_name,
    },
    kerning::{write_kern_feature, KernFeatureWriter},
};
use std::path::PathBuf;

pub fn load(filename: impl Into<PathBuf>) -> Result<Font, Ufo2FeaError> {
    let pb = filename.into();
    let pb_clone = pb.clone();

    let mut font: Font = match pb.extension() {
        #[cfg(feature = "ufo")]
        Some(ext) if ext == "ufo" => crate::convertors::ufo::load(pb),
        _ => Err(Ufo2FeaError::UnknownFileType { path: pb }),
    }?;
    font.source = Some(pb_clone);
    Ok(font)
}
