use super::{AlphaMode, CardId, CardPath, DeckGeometry, SliceError, Variant};
use fs_err as fs;
use image::{DynamicImage, GenericImageView, ImageFormat, RgbaImage};
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;

/// Row-major table of the normal-image path of every card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardTable {
    rows: u32,
    cols: u32,
    paths: Vec<CardPath>,
}

impl CardTable {
    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn get(&self, id: CardId) -> Option<&CardPath> {
        if id.row >= self.rows || id.col >= self.cols {
            return None;
        }
        self.paths.get((id.row * self.cols + id.col) as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CardId, &CardPath)> {
        let cols = self.cols.max(1);
        self.paths
            .iter()
            .enumerate()
            .map(move |(i, path)| (CardId::new(i as u32 / cols, i as u32 % cols), path))
    }
}

pub struct Slicer {
    geometry: DeckGeometry,
    output_dir: PathBuf,
    alpha: AlphaMode,
    reuse_existing: bool,
}

impl Slicer {
    pub fn new(geometry: DeckGeometry, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            geometry,
            output_dir: output_dir.into(),
            alpha: AlphaMode::default(),
            reuse_existing: false,
        }
    }

    pub fn alpha(mut self, alpha: AlphaMode) -> Self {
        self.alpha = alpha;
        self
    }

    /// Skip cells whose three files are already on disk. Only presence is
    /// checked: files written from another atlas or with another
    /// `AlphaMode` are kept as they are.
    pub fn reuse_existing(mut self, reuse: bool) -> Self {
        self.reuse_existing = reuse;
        self
    }

    pub fn slice_file(&self, atlas_path: &Path) -> Result<CardTable, SliceError> {
        let atlas = image::open(atlas_path).map_err(|source| SliceError::AtlasLoad {
            path: atlas_path.to_path_buf(),
            source,
        })?;
        self.slice(&atlas)
    }

    /// Crops every cell of `atlas` and writes its three variants. The whole
    /// grid is validated before the first file is written.
    pub fn slice(&self, atlas: &DynamicImage) -> Result<CardTable, SliceError> {
        let (width, height) = atlas.dimensions();
        self.geometry.check_fits(width, height)?;

        fs::create_dir_all(&self.output_dir)?;

        let mut paths = Vec::with_capacity(self.geometry.card_count());
        let mut reused = 0;
        for id in self.geometry.cells() {
            let path = CardPath::for_card(&self.output_dir, id);
            if self.reuse_existing && Variant::iter().all(|v| path.variant(v).is_file()) {
                reused += 1;
            } else {
                self.write_card(atlas, id, &path)?;
            }
            paths.push(path);
        }

        log::info!(
            "Sliced {}x{} atlas into {} cards in {} ({} reused)",
            width,
            height,
            paths.len(),
            self.output_dir.display(),
            reused
        );

        Ok(CardTable {
            rows: self.geometry.rows,
            cols: self.geometry.cols,
            paths,
        })
    }

    fn write_card(
        &self,
        atlas: &DynamicImage,
        id: CardId,
        path: &CardPath,
    ) -> Result<(), SliceError> {
        let rect = self.geometry.cell_rect(id);
        let normal: RgbaImage = atlas
            .view(rect.x, rect.y, rect.width, rect.height)
            .to_image();

        for variant in Variant::iter() {
            let target = path.variant(variant);
            variant
                .render(&normal, self.alpha)
                .save_with_format(&target, ImageFormat::Png)
                .map_err(|source| SliceError::ResourceWrite {
                    path: target.clone(),
                    source,
                })?;
            log::debug!("Wrote {}", target.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::TempDir;

    fn small_geometry() -> DeckGeometry {
        DeckGeometry {
            card_width: 4,
            card_height: 6,
            rows: 2,
            cols: 3,
            border: 1,
        }
    }

    /// Every pixel encodes its own coordinates so crops can be traced back.
    fn atlas_for(geometry: &DeckGeometry) -> DynamicImage {
        let (width, height) = geometry.required_size();
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([x as u8 * 5, y as u8 * 5, 200, 255])
        }))
    }

    #[test]
    fn test_slice_exact_size_atlas() {
        let dir = TempDir::new().unwrap();
        let geometry = small_geometry();
        let table = Slicer::new(geometry, dir.path())
            .slice(&atlas_for(&geometry))
            .unwrap();

        assert_eq!(table.len(), 6);
        assert_eq!((table.rows(), table.cols()), (2, 3));

        for (id, path) in table.iter() {
            assert_eq!(path, &CardPath::for_card(dir.path(), id));
            let normal = image::open(path.variant(Variant::Normal)).unwrap().to_rgba8();
            assert_eq!(normal.dimensions(), (4, 6));

            let rect = geometry.cell_rect(id);
            assert_eq!(
                normal.get_pixel(0, 0),
                &Rgba([rect.x as u8 * 5, rect.y as u8 * 5, 200, 255])
            );

            let hover = image::open(path.variant(Variant::Hover)).unwrap().to_rgba8();
            let pressed = image::open(path.variant(Variant::Pressed)).unwrap().to_rgba8();
            for ((n, h), p) in normal.pixels().zip(hover.pixels()).zip(pressed.pixels()) {
                for c in 0..3 {
                    assert_eq!(h[c], (n[c] as f32 * 0.8).round() as u8);
                    assert_eq!(p[c], (n[c] as f32 * 0.5).round() as u8);
                }
                assert_eq!(h[3], n[3]);
                assert_eq!(p[3], n[3]);
            }
        }
    }

    #[test]
    fn test_table_lookup() {
        let dir = TempDir::new().unwrap();
        let geometry = small_geometry();
        let table = Slicer::new(geometry, dir.path())
            .slice(&atlas_for(&geometry))
            .unwrap();

        assert_eq!(
            table.get(CardId::new(1, 2)).map(|p| p.variant(Variant::Normal)),
            Some(dir.path().join("1_02.png"))
        );
        assert!(table.get(CardId::new(2, 0)).is_none());
        assert!(table.get(CardId::new(0, 3)).is_none());
    }

    #[test]
    fn test_missing_row_is_out_of_bounds() {
        let dir = TempDir::new().unwrap();
        let geometry = small_geometry();
        let short = DeckGeometry {
            rows: 1,
            ..geometry
        };
        let atlas = atlas_for(&short);

        let result = Slicer::new(geometry, dir.path()).slice(&atlas);
        assert!(matches!(result, Err(SliceError::OutOfBounds { .. })));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_slicing_is_idempotent() {
        let geometry = small_geometry();
        let atlas = atlas_for(&geometry);
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();

        let a = Slicer::new(geometry, first.path()).slice(&atlas).unwrap();
        let b = Slicer::new(geometry, second.path()).slice(&atlas).unwrap();

        for ((_, pa), (_, pb)) in a.iter().zip(b.iter()) {
            for variant in Variant::iter() {
                assert_eq!(
                    fs::read(pa.variant(variant)).unwrap(),
                    fs::read(pb.variant(variant)).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_write_failure() {
        let dir = TempDir::new().unwrap();
        let geometry = small_geometry();
        // a directory squatting on the target file name makes the write fail
        fs::create_dir_all(dir.path().join("0_01_hover.png")).unwrap();

        let result = Slicer::new(geometry, dir.path()).slice(&atlas_for(&geometry));
        match result {
            Err(SliceError::ResourceWrite { path, .. }) => {
                assert_eq!(path, dir.path().join("0_01_hover.png"));
            }
            other => panic!("expected ResourceWrite, got {other:?}"),
        }
    }

    #[test]
    fn test_reuse_existing_skips_present_cards() {
        let dir = TempDir::new().unwrap();
        let geometry = small_geometry();
        let slicer = Slicer::new(geometry, dir.path()).reuse_existing(true);
        let table = slicer.slice(&atlas_for(&geometry)).unwrap();

        let marker = b"not a png".to_vec();
        let normal = table.get(CardId::new(0, 0)).unwrap().variant(Variant::Normal);
        fs::write(&normal, &marker).unwrap();

        slicer.slice(&atlas_for(&geometry)).unwrap();
        assert_eq!(fs::read(&normal).unwrap(), marker);

        Slicer::new(geometry, dir.path())
            .slice(&atlas_for(&geometry))
            .unwrap();
        assert_ne!(fs::read(&normal).unwrap(), marker);
    }

    #[test]
    fn test_missing_atlas_file() {
        let dir = TempDir::new().unwrap();
        let result =
            Slicer::new(small_geometry(), dir.path()).slice_file(&dir.path().join("missing.png"));
        assert!(matches!(result, Err(SliceError::AtlasLoad { .. })));
    }

    #[test]
    fn test_reuse_keeps_files_from_other_alpha_mode() {
        let dir = TempDir::new().unwrap();
        let geometry = small_geometry();
        let atlas = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            geometry.required_size().0,
            geometry.required_size().1,
            Rgba([100, 100, 100, 100]),
        ));

        Slicer::new(geometry, dir.path())
            .alpha(AlphaMode::Preserve)
            .slice(&atlas)
            .unwrap();
        let table = Slicer::new(geometry, dir.path())
            .alpha(AlphaMode::Scale)
            .reuse_existing(true)
            .slice(&atlas)
            .unwrap();

        let pressed = table.get(CardId::new(0, 0)).unwrap().variant(Variant::Pressed);
        let pressed = image::open(pressed).unwrap().to_rgba8();
        assert_eq!(pressed.get_pixel(0, 0), &Rgba([50, 50, 50, 100]));
    }

    #[test]
    fn test_oversized_geometry_does_not_panic() {
        let dir = TempDir::new().unwrap();
        let geometry = DeckGeometry {
            card_width: u32::MAX / 2,
            ..small_geometry()
        };
        let atlas = atlas_for(&small_geometry());

        let result = Slicer::new(geometry, dir.path()).slice(&atlas);
        assert!(matches!(result, Err(SliceError::OutOfBounds { .. })));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
