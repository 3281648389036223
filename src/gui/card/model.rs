use crate::atlas::Variant;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardState {
    pub hovered: bool,
    /// Sticky toggle: the card has been played.
    pub pressed: bool,
    armed: bool,
}

impl CardState {
    pub fn new(hovered: bool, pressed: bool) -> Self {
        Self {
            hovered,
            pressed,
            armed: false,
        }
    }
}

/// Picks the visual for a state. Priority: pressed, then hovered, then normal.
pub fn select_visual(state: &CardState) -> Variant {
    if state.pressed {
        Variant::Pressed
    } else if state.hovered {
        Variant::Hover
    } else {
        Variant::Normal
    }
}

#[derive(Debug, Clone)]
pub struct CardImages<I> {
    pub normal: I,
    pub hover: I,
    pub pressed: I,
}

impl<I> CardImages<I> {
    pub fn get(&self, variant: Variant) -> &I {
        match variant {
            Variant::Normal => &self.normal,
            Variant::Hover => &self.hover,
            Variant::Pressed => &self.pressed,
        }
    }
}

/// Pointer handling shared by every card widget. Event methods return
/// whether the visual changed and the widget needs a redraw.
pub trait CardWidget {
    type Image;

    fn state(&self) -> &CardState;
    fn state_mut(&mut self) -> &mut CardState;
    fn image(&self, variant: Variant) -> &Self::Image;

    fn current_visual(&self) -> &Self::Image {
        self.image(select_visual(self.state()))
    }

    fn on_pointer_enter(&mut self) -> bool {
        self.update(|s| s.hovered = true)
    }

    fn on_pointer_leave(&mut self) -> bool {
        self.update(|s| s.hovered = false)
    }

    fn on_press(&mut self) -> bool {
        self.state_mut().armed = true;
        false
    }

    /// Completes a click started by `on_press`. Only a release inside the
    /// widget toggles the card.
    fn on_release(&mut self, inside: bool) -> bool {
        let state = self.state_mut();
        let armed = std::mem::take(&mut state.armed);
        armed && inside && self.on_press_release()
    }

    fn on_press_release(&mut self) -> bool {
        self.update(|s| s.pressed = !s.pressed)
    }

    fn update(&mut self, f: fn(&mut CardState)) -> bool {
        let before = select_visual(self.state());
        f(self.state_mut());
        select_visual(self.state()) != before
    }
}

#[derive(Debug, Clone)]
pub struct CardButton<I> {
    images: CardImages<I>,
    state: CardState,
}

impl<I> CardButton<I> {
    pub fn new(images: CardImages<I>) -> Self {
        Self {
            images,
            state: CardState::default(),
        }
    }

    pub fn images(&self) -> &CardImages<I> {
        &self.images
    }
}

impl<I> CardWidget for CardButton<I> {
    type Image = I;

    fn state(&self) -> &CardState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CardState {
        &mut self.state
    }

    fn image(&self, variant: Variant) -> &I {
        self.images.get(variant)
    }
}
