use super::CardEvent;
use super::model::CardButton;
use gdk_pixbuf::Pixbuf;
use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::rc::Rc;

fn contains(widget: &gtk::Widget, x: f64, y: f64) -> bool {
    (0.0..widget.width() as f64).contains(&x) && (0.0..widget.height() as f64).contains(&y)
}

/// Builds the drawing area for one card. Pointer events are forwarded through
/// `emit`; the caller applies them to the shared button and queues redraws.
pub fn card_area<F>(card: Rc<RefCell<CardButton<Pixbuf>>>, emit: F) -> gtk::DrawingArea
where
    F: Fn(CardEvent) + Clone + 'static,
{
    let (width, height) = card.borrow().preferred_size();
    let area = gtk::DrawingArea::builder()
        .content_width(width)
        .content_height(height)
        .build();
    area.add_css_class("tarot-card");

    area.set_draw_func(move |_, cr, w, h| {
        if let Err(e) = card.borrow().render(cr, w as f64, h as f64) {
            log::error!("Drawing error: {}", e);
        }
    });

    let motion = gtk::EventControllerMotion::new();
    {
        let emit = emit.clone();
        motion.connect_enter(move |_, _, _| emit(CardEvent::Enter));
    }
    {
        let emit = emit.clone();
        motion.connect_leave(move |_| emit(CardEvent::Leave));
    }
    area.add_controller(motion);

    let click = gtk::GestureClick::new();
    {
        let emit = emit.clone();
        click.connect_pressed(move |_, _, _, _| emit(CardEvent::Press));
    }
    click.connect_released(move |gesture, _, x, y| {
        let inside = gesture.widget().is_some_and(|w| contains(&w, x, y));
        emit(CardEvent::Release { inside });
    });
    area.add_controller(click);

    area
}
