//! The skill tree screen as hosted by the binary: the window, its detail panel and the party.

use engine::{
    app::InputFrame,
    graphics::{Color, Renderer2d},
    ui::Rect,
};
use winit::event::VirtualKeyCode;

use crate::{
    character::Character,
    input::{MenuInput, party_slot_pressed},
    menu_window::MenuWindow,
    skilltree_window::SkillTreeWindow,
};

const COLOR_BG: Color = [8, 8, 12, 255];
const COLOR_HINT: Color = [150, 150, 170, 255];
const COLOR_CHARACTER: Color = [220, 220, 230, 255];

/// Chrome behind the detail panel, below the graph viewport.
pub const DETAIL_PANEL_RECT: Rect = Rect {
    x: 100,
    y: 565,
    w: 824,
    h: 90,
};

pub struct SkillTreeScene {
    window: SkillTreeWindow,
    party: Vec<Character>,
    bound_slot: Option<usize>,
    detail_panel: MenuWindow,
}

impl SkillTreeScene {
    /// Binds the first party member (if any) and opens the window.
    pub fn new(window: SkillTreeWindow, party: Vec<Character>) -> Self {
        let mut scene = Self {
            window,
            party,
            bound_slot: None,
            detail_panel: MenuWindow::new(DETAIL_PANEL_RECT),
        };
        scene.bind_slot(0);
        scene.window.set_active(true);
        scene
    }

    pub fn handle_frame(&mut self, frame: &InputFrame) {
        if let Some(slot) = party_slot_pressed(frame) {
            self.bind_slot(slot);
        }

        if !self.window.is_active() {
            if frame.pressed(VirtualKeyCode::Return) {
                self.window.set_active(true);
            }
            return;
        }

        self.window.update(&MenuInput::from_frame(frame));
    }

    pub fn render(&self, gfx: &mut dyn Renderer2d) {
        gfx.clear(COLOR_BG);
        self.window.draw(gfx);
        self.detail_panel.draw(gfx);
        self.window.draw_bottom_window(gfx);

        if let Some(character) = self.bound_character() {
            gfx.draw_text(44, 14, character.name(), COLOR_CHARACTER);
            if let Some(icon) = self.window.character_icon() {
                let x = DETAIL_PANEL_RECT.x + DETAIL_PANEL_RECT.w;
                gfx.draw_image(x as i32 + 8, DETAIL_PANEL_RECT.y as i32, icon);
            }
        }

        let hint = if self.window.is_active() {
            "LEFT/RIGHT SELECT  1-9 CHARACTER  ESC CLOSE"
        } else {
            "ENTER OPEN  1-9 CHARACTER"
        };
        gfx.draw_text(44, 740, hint, COLOR_HINT);
    }

    pub fn window(&self) -> &SkillTreeWindow {
        &self.window
    }

    pub fn bound_character(&self) -> Option<&Character> {
        self.bound_slot.and_then(|slot| self.party.get(slot))
    }

    fn bind_slot(&mut self, slot: usize) {
        let Some(character) = self.party.get(slot) else {
            return;
        };
        self.window.set_character(character);
        self.bound_slot = Some(slot);
    }
}
