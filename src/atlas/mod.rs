pub mod geometry;
pub mod slicer;
pub mod variant;

pub use geometry::{CardId, CellRect, DeckGeometry};
pub use slicer::{CardTable, Slicer};
pub use variant::{AlphaMode, CardPath, Variant, darken};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SliceError {
    #[error(
        "Atlas is {width}x{height} but the deck needs at least {required_width}x{required_height}"
    )]
    OutOfBounds {
        width: u32,
        height: u32,
        required_width: u32,
        required_height: u32,
    },
    #[error("Failed to load atlas {}: {source}", path.display())]
    AtlasLoad {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Failed to create output directory: {0}")]
    CreateDir(#[from] std::io::Error),
    #[error("Failed to write {}: {source}", path.display())]
    ResourceWrite {
        path: PathBuf,
        source: image::ImageError,
    },
}
