use super::CardError;
use super::model::{CardButton, CardImages, CardWidget};
use crate::atlas::{CardPath, Variant};
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use std::path::Path;

fn load_image(path: &Path) -> Result<Pixbuf, CardError> {
    Pixbuf::from_file(path).map_err(|source| CardError::ResourceLoad {
        path: path.to_path_buf(),
        source,
    })
}

impl CardButton<Pixbuf> {
    pub fn load(path: &CardPath) -> Result<Self, CardError> {
        Ok(Self::new(CardImages {
            normal: load_image(&path.variant(Variant::Normal))?,
            hover: load_image(&path.variant(Variant::Hover))?,
            pressed: load_image(&path.variant(Variant::Pressed))?,
        }))
    }

    /// Native size of the normal image, requested as the widget's content size.
    pub fn preferred_size(&self) -> (i32, i32) {
        let normal = &self.images().normal;
        (normal.width(), normal.height())
    }

    /// Paints the current visual stretched over the whole allocation.
    pub fn render(&self, cr: &Context, width: f64, height: f64) -> Result<(), cairo::Error> {
        let pixbuf = self.current_visual();
        let (pw, ph) = (pixbuf.width() as f64, pixbuf.height() as f64);
        if pw <= 0.0 || ph <= 0.0 {
            return Ok(());
        }

        cr.save()?;
        cr.scale(width / pw, height / ph);
        cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        cr.paint()?;
        cr.restore()
    }
}
