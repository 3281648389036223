use derive_more::{AsRef, Deref, Display, From, Into};
use image::{Rgba, RgbaImage};
use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::path::{Path, PathBuf};
use strum::{Display as StrumDisplay, EnumIter, EnumString};

use super::CardId;

/// The three renderings of every card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Variant {
    Normal,
    Hover,
    Pressed,
}

impl Variant {
    pub fn factor(&self) -> f32 {
        match self {
            Self::Normal => 1.0,
            Self::Hover => 0.8,
            Self::Pressed => 0.5,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::Hover => "_hover",
            Self::Pressed => "_greyed",
        }
    }

    pub fn render(&self, normal: &RgbaImage, alpha: AlphaMode) -> RgbaImage {
        match self {
            Self::Normal => normal.clone(),
            _ => darken(normal, self.factor(), alpha),
        }
    }
}

/// What darkening does to the alpha channel.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum AlphaMode {
    #[default]
    #[strum(serialize = "preserve", serialize = "keep")]
    Preserve,
    #[strum(serialize = "scale", serialize = "dim")]
    Scale,
}

fn scale_channel(value: u8, factor: f32) -> u8 {
    (value as f32 * factor).round().clamp(0.0, 255.0) as u8
}

/// Multiplies every colour channel by `factor`, rounding and clamping to the
/// channel range.
pub fn darken(image: &RgbaImage, factor: f32, alpha: AlphaMode) -> RgbaImage {
    let mut out = image.clone();
    for Rgba([r, g, b, a]) in out.pixels_mut() {
        *r = scale_channel(*r, factor);
        *g = scale_channel(*g, factor);
        *b = scale_channel(*b, factor);
        if alpha == AlphaMode::Scale {
            *a = scale_channel(*a, factor);
        }
    }
    out
}

/// Path of a card's normal image. The hover and pressed files live next to
/// it and are always derived from it, never stored separately.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
#[display("{}", _0.display())]
pub struct CardPath(PathBuf);

impl CardPath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn for_card(dir: &Path, id: CardId) -> Self {
        Self(dir.join(format!("{}_{:02}.png", id.row, id.col)))
    }

    pub fn variant(&self, variant: Variant) -> PathBuf {
        let suffix = variant.suffix();
        if suffix.is_empty() {
            return self.0.clone();
        }
        let stem = self
            .0
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_name = match self.0.extension() {
            Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
            None => format!("{stem}{suffix}"),
        };
        self.0.with_file_name(file_name)
    }
}
