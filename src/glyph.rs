use std::ops::{Deref, DerefMut};

#[derive(Debug, Clone, Default)]
pub struct GlyphList(pub Vec<Glyph>);
impl GlyphList {
    pub fn get(&self, g: &str) -> Option<&Glyph> {
        self.0.iter().find(|&glyph| glyph.name == g)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Glyph> {
        self.0.iter()
    }
}

impl Deref for GlyphList {
    type Target = Vec<Glyph>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl DerefMut for GlyphList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    pub name: String,
    /// Name from `public.postscriptNames`, if the source supplied one
    pub production_name: Option<String>,
    pub codepoints: Vec<u32>,
}

impl Glyph {
    pub fn new(name: impl Into<String>) -> Self {
        Glyph {
            name: name.into(),
            production_name: None,
            codepoints: vec![],
        }
    }

    pub fn with_codepoints(mut self, codepoints: impl IntoIterator<Item = u32>) -> Self {
        self.codepoints = codepoints.into_iter().collect();
        self
    }

    /// The primary codepoint, i.e. the first one listed.
    pub fn unicode(&self) -> Option<u32> {
        self.codepoints.first().copied()
    }
}
