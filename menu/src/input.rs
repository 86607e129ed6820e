use engine::app::InputFrame;
use winit::event::VirtualKeyCode;

/// Per-frame snapshot of the menu's logical buttons.
///
/// Each flag means "pressed this frame" (edge-triggered), never "is held".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuInput {
    pub cancel: bool,
    pub left: bool,
    pub right: bool,
}

impl MenuInput {
    pub const NONE: MenuInput = MenuInput {
        cancel: false,
        left: false,
        right: false,
    };

    pub fn cancel() -> Self {
        Self {
            cancel: true,
            ..Self::NONE
        }
    }

    pub fn left() -> Self {
        Self {
            left: true,
            ..Self::NONE
        }
    }

    pub fn right() -> Self {
        Self {
            right: true,
            ..Self::NONE
        }
    }

    pub fn from_frame(frame: &InputFrame) -> Self {
        Self {
            cancel: frame.pressed(VirtualKeyCode::Escape) || frame.pressed(VirtualKeyCode::Back),
            left: frame.pressed(VirtualKeyCode::Left) || frame.pressed(VirtualKeyCode::A),
            right: frame.pressed(VirtualKeyCode::Right) || frame.pressed(VirtualKeyCode::D),
        }
    }
}

/// Party slot (0-based) selected by the number row this frame, if any.
pub fn party_slot_pressed(frame: &InputFrame) -> Option<usize> {
    const SLOTS: [VirtualKeyCode; 9] = [
        VirtualKeyCode::Key1,
        VirtualKeyCode::Key2,
        VirtualKeyCode::Key3,
        VirtualKeyCode::Key4,
        VirtualKeyCode::Key5,
        VirtualKeyCode::Key6,
        VirtualKeyCode::Key7,
        VirtualKeyCode::Key8,
        VirtualKeyCode::Key9,
    ];
    SLOTS.iter().position(|&key| frame.pressed(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with_pressed(keys: &[VirtualKeyCode]) -> InputFrame {
        let mut frame = InputFrame::default();
        for &key in keys {
            frame.keys_down.insert(key);
            frame.keys_pressed.insert(key);
        }
        frame
    }

    #[test]
    fn maps_arrow_and_letter_keys() {
        assert_eq!(
            MenuInput::from_frame(&frame_with_pressed(&[VirtualKeyCode::A])),
            MenuInput::left()
        );
        assert_eq!(
            MenuInput::from_frame(&frame_with_pressed(&[VirtualKeyCode::Right])),
            MenuInput::right()
        );
        assert_eq!(
            MenuInput::from_frame(&frame_with_pressed(&[VirtualKeyCode::Back])),
            MenuInput::cancel()
        );
    }

    #[test]
    fn held_keys_without_a_press_edge_are_ignored() {
        let mut frame = InputFrame::default();
        frame.keys_down.insert(VirtualKeyCode::Left);
        assert_eq!(MenuInput::from_frame(&frame), MenuInput::NONE);
    }

    #[test]
    fn simultaneous_presses_are_all_reported() {
        let input = MenuInput::from_frame(&frame_with_pressed(&[
            VirtualKeyCode::Escape,
            VirtualKeyCode::Left,
            VirtualKeyCode::Right,
        ]));
        assert!(input.cancel && input.left && input.right);
    }

    #[test]
    fn number_row_selects_party_slot() {
        assert_eq!(
            party_slot_pressed(&frame_with_pressed(&[VirtualKeyCode::Key3])),
            Some(2)
        );
        assert_eq!(party_slot_pressed(&InputFrame::default()), None);
    }
}
