use super::SliceError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CardId {
    pub row: u32,
    pub col: u32,
}

impl CardId {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CellRect {
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn overlaps(&self, other: &CellRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Layout of the cards inside the atlas. Every card is `card_width` by
/// `card_height` pixels and surrounded by `border` pixels on each side, so
/// neighbouring cards are `2 * border` apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DeckGeometry {
    pub card_width: u32,
    pub card_height: u32,
    pub rows: u32,
    pub cols: u32,
    pub border: u32,
}

impl Default for DeckGeometry {
    fn default() -> Self {
        Self {
            card_width: 40,
            card_height: 75,
            rows: 6,
            cols: 14,
            border: 1,
        }
    }
}

/// Far edge of the last of `count` cells along one axis, `None` when it
/// does not fit in `u32`.
fn extent(count: u32, len: u32, border: u32) -> Option<u32> {
    if count == 0 {
        return Some(0);
    }
    border
        .checked_mul(2)?
        .checked_add(len)?
        .checked_mul(count - 1)?
        .checked_add(border)?
        .checked_add(len)
}

impl DeckGeometry {
    pub fn card_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    fn stride_x(&self) -> u32 {
        self.card_width.saturating_add(self.border.saturating_mul(2))
    }

    fn stride_y(&self) -> u32 {
        self.card_height.saturating_add(self.border.saturating_mul(2))
    }

    /// Exact for any geometry accepted by `check_fits`.
    pub fn cell_rect(&self, id: CardId) -> CellRect {
        CellRect {
            x: self.border.saturating_add(id.col.saturating_mul(self.stride_x())),
            y: self.border.saturating_add(id.row.saturating_mul(self.stride_y())),
            width: self.card_width,
            height: self.card_height,
        }
    }

    /// Atlas size including the trailing border, saturating at `u32::MAX`.
    pub fn required_size(&self) -> (u32, u32) {
        (
            self.border.saturating_add(self.cols.saturating_mul(self.stride_x())),
            self.border.saturating_add(self.rows.saturating_mul(self.stride_y())),
        )
    }

    /// Row-major walk over every cell of the grid.
    pub fn cells(&self) -> impl Iterator<Item = CardId> + use<> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| CardId::new(row, col)))
    }

    /// Checks that every cell lies inside an atlas of the given size. Only
    /// the last row and column need testing since cells grow monotonically.
    /// Geometry whose extent overflows `u32` never fits.
    pub fn check_fits(&self, width: u32, height: u32) -> Result<(), SliceError> {
        let fits = |count, len, limit| {
            extent(count, len, self.border).is_some_and(|edge| edge <= limit)
        };
        if fits(self.cols, self.card_width, width) && fits(self.rows, self.card_height, height) {
            return Ok(());
        }
        let (required_width, required_height) = self.required_size();
        Err(SliceError::OutOfBounds {
            width,
            height,
            required_width,
            required_height,
        })
    }
}
