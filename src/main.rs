use anyhow::Context;
use relm4::prelude::*;
use tarot_counter::atlas::Slicer;
use tarot_counter::config;
use tarot_counter::gui::app::AppModel;
use tarot_counter::gui::card::Deck;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = config::load_or_default().context("Failed to load configuration")?;

    let table = Slicer::new(config.deck, &config.output_dir)
        .alpha(config.alpha)
        .reuse_existing(config.reuse_existing)
        .slice_file(&config.atlas)
        .with_context(|| format!("Failed to slice atlas {}", config.atlas.display()))?;

    let deck = Deck::load(&table).context("Failed to load card images")?;

    let app = RelmApp::new("org.tarot.counter");
    // relm4 does not hand back the GTK exit status
    app.run::<AppModel>((config.window, deck));

    Ok(())
}
