//! Capability for toggling world input while a puzzle is open.

use std::cell::RefCell;
use std::rc::Rc;

/// Something that can stop and resume player/world input.
///
/// The host disables input when a puzzle opens and re-enables it when the
/// session closes. The embedding application hands the host an
/// implementation at construction time.
pub trait InputController {
    fn set_input_enabled(&mut self, enabled: bool);
}

/// Shared controllers: the world keeps one handle, the host another.
impl<T: InputController + ?Sized> InputController for Rc<RefCell<T>> {
    fn set_input_enabled(&mut self, enabled: bool) {
        self.borrow_mut().set_input_enabled(enabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Player {
        enabled: bool,
    }

    impl InputController for Player {
        fn set_input_enabled(&mut self, enabled: bool) {
            self.enabled = enabled;
        }
    }

    #[test]
    fn test_shared_controller() {
        let player = Rc::new(RefCell::new(Player::default()));
        let mut handle = Rc::clone(&player);

        handle.set_input_enabled(true);
        assert!(player.borrow().enabled);

        handle.set_input_enabled(false);
        assert!(!player.borrow().enabled);
    }
}
