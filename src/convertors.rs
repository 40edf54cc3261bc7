#[cfg(feature = "ufo")]
pub mod ufo;
