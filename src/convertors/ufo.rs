use crate::{Font, Glyph, Ufo2FeaError};
use std::collections::HashMap;

pub fn load<T: AsRef<std::path::Path>>(path: T) -> Result<Font, Ufo2FeaError> {
    log::info!("Loading UFO {}", path.as_ref().display());
    let ufo = norad::Font::load(&path)?;
    let mut font = Font::new();
    load_glyphs(&mut font, &ufo);
    font.groups = ufo
        .groups
        .iter()
        .map(|(name, members)| {
            (
                name.to_string(),
                members.iter().map(|m| m.to_string()).collect(),
            )
        })
        .collect();
    font.kerning = load_kerning(&ufo.kerning);
    Ok(font)
}

/// Flattens UFO kerning into pairs. Values are truncated toward zero.
pub(crate) fn load_kerning(kerning: &norad::Kerning) -> HashMap<(String, String), i32> {
    let mut pairs = HashMap::new();
    for (left, right_dict) in kerning.iter() {
        for (right, value) in right_dict.iter() {
            if value.fract() != 0.0 {
                log::debug!("Truncating non-integer kerning {left} {right} {value}");
            }
            pairs.insert((left.to_string(), right.to_string()), *value as i32);
        }
    }
    pairs
}

/// Loads default-layer glyphs: `.notdef` first, then `public.glyphOrder`,
/// then everything else.
pub(crate) fn load_glyphs(font: &mut Font, ufo: &norad::Font) {
    let psnames = ufo
        .lib
        .get("public.postscriptNames")
        .and_then(|x| x.as_dictionary());
    let glyphorder: Vec<String> = ufo
        .lib
        .get("public.glyphOrder")
        .and_then(|x| x.as_array())
        .map(|names| {
            names
                .iter()
                .flat_map(|x| x.as_string())
                .map(|x| x.to_string())
                .collect()
        })
        .unwrap_or_default();
    let mut order: Vec<String> = vec![];
    let mut ufo_names: Vec<String> = ufo.iter_names().map(|x| x.to_string()).collect();
    ufo_names.sort();
    if ufo_names.contains(&".notdef".to_string()) {
        order.push(".notdef".to_string());
        ufo_names.retain(|x| x != ".notdef");
    }
    for name in glyphorder {
        if !ufo_names.contains(&name) {
            continue;
        }
        ufo_names.retain(|x| x != &name);
        order.push(name);
    }
    order.append(&mut ufo_names);

    for glyphname in order {
        if let Some(glyph) = ufo.get_glyph(glyphname.as_str()) {
            let production_name = psnames
                .and_then(|x| x.get(&glyphname))
                .and_then(|x| x.as_string())
                .map(|x| x.to_string());
            font.glyphs.push(Glyph {
                name: glyphname,
                production_name,
                codepoints: glyph.codepoints.iter().map(|x| x as u32).collect(),
            })
        }
    }
}
