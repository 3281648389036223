use crate::config::WindowConfig;
use crate::gui::card::{self, CardButton, CardEvent, Deck};
use crate::gui::theme;
use gdk_pixbuf::Pixbuf;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::RelmWidgetExt;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

struct CardSlot {
    button: Rc<RefCell<CardButton<Pixbuf>>>,
    area: gtk::DrawingArea,
}

pub struct AppModel {
    window: WindowConfig,
    cards: Vec<CardSlot>,
    root: gtk::ApplicationWindow,
}

#[derive(Debug)]
pub enum AppMsg {
    Card(usize, CardEvent),
    Close,
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (WindowConfig, Deck);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some(model.window.title.as_str()),
            set_default_size: (model.window.width, model.window.height),
            set_resizable: true,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Close);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::Frame {
                add_css_class: "tarot-deck",
                set_margin_all: 6,

                #[name = "grid"]
                gtk::Grid {
                    set_row_spacing: 2,
                    set_column_spacing: 2,
                    set_halign: gtk::Align::Center,
                    set_valign: gtk::Align::Center,
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (window, deck) = init;

        theme::load_css();

        let model = AppModel {
            window,
            cards: Vec::new(),
            root: root.clone(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.cards = deck
            .cards
            .into_iter()
            .enumerate()
            .map(|(index, (id, button))| {
                let button = Rc::new(RefCell::new(button));
                let input = sender.input_sender().clone();
                let area = card::card_area(button.clone(), move |event| {
                    input.emit(AppMsg::Card(index, event));
                });
                widgets
                    .grid
                    .attach(&area, id.col as i32, id.row as i32, 1, 1);
                CardSlot { button, area }
            })
            .collect();

        log::info!("Showing {} cards", model.cards.len());

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Card(index, event) => {
                let Some(slot) = self.cards.get(index) else {
                    log::warn!("Event for unknown card {}", index);
                    return;
                };
                if event.apply(&mut *slot.button.borrow_mut()) {
                    slot.area.queue_draw();
                }
            }
            AppMsg::Close => self.root.close(),
        }
    }
}
