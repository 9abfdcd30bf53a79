use crate::prelude::*;

pub const EFFECT_BLUR_CSS: &str = include_str!("../../assets/effects/blur.css");
pub const EFFECT_BLACK_AND_WHITE_CSS: &str =
    include_str!("../../assets/effects/black-and-white.css");
pub const EFFECT_OPACITY_CSS: &str = include_str!("../../assets/effects/opacity.css");

/// Effects with a bundled stylesheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageEffect {
    Blur,
    BlackAndWhite,
    Opacity,
}
impl ImageEffect {
    pub const ALL: [ImageEffect; 3] = [
        ImageEffect::Blur,
        ImageEffect::BlackAndWhite,
        ImageEffect::Opacity,
    ];

    /// Class name to pass as `effect`
    pub fn class(self) -> &'static str {
        match self {
            ImageEffect::Blur => "blur",
            ImageEffect::BlackAndWhite => "black-and-white",
            ImageEffect::Opacity => "opacity",
        }
    }

    pub fn stylesheet(self) -> &'static str {
        match self {
            ImageEffect::Blur => EFFECT_BLUR_CSS,
            ImageEffect::BlackAndWhite => EFFECT_BLACK_AND_WHITE_CSS,
            ImageEffect::Opacity => EFFECT_OPACITY_CSS,
        }
    }
}
impl core::fmt::Display for ImageEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.class())
    }
}

/// Injects the stylesheets of the bundled effects in the document head
#[component]
pub fn EffectStylesheets() -> Element {
    rsx! {
        for effect in ImageEffect::ALL {
            document::Style { {effect.stylesheet()} }
        }
    }
}
