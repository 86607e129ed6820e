use engine::{
    graphics::{Color, Renderer2d},
    ui::{Insets, Rect, Vec2f},
};

const COLOR_PANEL_BG: Color = [16, 16, 22, 255];
const COLOR_PANEL_BORDER: Color = [40, 40, 55, 255];
const COLOR_PANEL_INNER_BORDER: Color = [28, 28, 38, 255];
const INNER_BORDER_INSET: u32 = 3;

/// Background and border shared by the menu panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuWindow {
    rect: Rect,
}

impl MenuWindow {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }

    /// Top-left corner in screen space.
    pub fn position(&self) -> Vec2f {
        self.rect.origin()
    }

    pub fn draw(&self, gfx: &mut dyn Renderer2d) {
        if self.rect.w == 0 || self.rect.h == 0 {
            return;
        }
        gfx.fill_rect(self.rect, COLOR_PANEL_BG);
        gfx.rect_outline(self.rect, COLOR_PANEL_BORDER);
        gfx.rect_outline(
            self.rect.inset(Insets::all(INNER_BORDER_INSET)),
            COLOR_PANEL_INNER_BORDER,
        );
    }
}
