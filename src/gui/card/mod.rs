pub mod model;
pub mod view;
pub mod widget;

pub use model::{CardButton, CardImages, CardState, CardWidget, select_visual};
pub use widget::card_area;

use crate::atlas::{CardId, CardTable};
use gdk_pixbuf::Pixbuf;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardError {
    #[error("Failed to load card image {}: {source}", path.display())]
    ResourceLoad {
        path: PathBuf,
        source: glib::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardEvent {
    Enter,
    Leave,
    Press,
    Release { inside: bool },
}

impl CardEvent {
    /// Applies the event to a card, returning whether it needs a redraw.
    pub fn apply<C: CardWidget>(self, card: &mut C) -> bool {
        match self {
            Self::Enter => card.on_pointer_enter(),
            Self::Leave => card.on_pointer_leave(),
            Self::Press => card.on_press(),
            Self::Release { inside } => card.on_release(inside),
        }
    }
}

/// Every card button of the deck, row-major.
pub struct Deck {
    pub cards: Vec<(CardId, CardButton<Pixbuf>)>,
}

impl Deck {
    pub fn load(table: &CardTable) -> Result<Self, CardError> {
        let cards = table
            .iter()
            .map(|(id, path)| CardButton::load(path).map(|card| (id, card)))
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("Loaded {} card buttons", cards.len());
        Ok(Self { cards })
    }
}
