use crate::{
    image::Image,
    surface::SurfaceSize,
    ui::{Rect, Vec2f},
};

pub type Color = [u8; 4];

// A tiny block font (no external deps). Kept deliberately simple.
pub const DEFAULT_TEXT_SCALE: u32 = 2;
const GLYPH_W: u32 = 3;
const GLYPH_H: u32 = 5;

fn glyph_advance_x(scale: u32) -> u32 {
    (GLYPH_W + 1) * scale.max(1)
}

fn line_advance_y(scale: u32) -> u32 {
    (GLYPH_H + 1) * scale.max(1)
}

/// Width in pixels of the widest line of `text` at `scale`.
pub fn text_width(text: &str, scale: u32) -> u32 {
    text.lines()
        .map(|line| (line.chars().count() as u32).saturating_mul(glyph_advance_x(scale)))
        .max()
        .unwrap_or(0)
}

/// Unified 2D rendering interface.
///
/// Menu code only talks to this trait. Coordinates for lines and images are signed/fractional
/// because graph nodes routinely land partly off-screen; everything is clipped to the surface.
pub trait Renderer2d {
    fn begin_frame(&mut self, size: SurfaceSize);
    fn size(&self) -> SurfaceSize;

    /// Opaque fill.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Alpha-blended rect over existing content (alpha is applied to `color`'s RGB).
    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8);

    fn rect_outline(&mut self, rect: Rect, color: Color);
    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32);

    /// Blended line segment of the given stroke `width`.
    fn draw_line(&mut self, from: Vec2f, to: Vec2f, width: f32, color: Color, alpha: u8);

    /// Draws `image` with its top-left corner at `(x, y)`, honouring per-pixel alpha.
    fn draw_image(&mut self, x: i32, y: i32, image: &Image);

    fn draw_text(&mut self, x: u32, y: u32, text: &str, color: Color) {
        self.draw_text_scaled(x, y, text, color, DEFAULT_TEXT_SCALE);
    }

    fn clear(&mut self, color: Color) {
        let s = self.size();
        self.fill_rect(Rect::from_size(s.width, s.height), color);
    }
}

/// CPU renderer that draws into an RGBA frame buffer.
pub struct CpuRenderer<'a> {
    frame: &'a mut [u8],
    size: SurfaceSize,
}

impl<'a> CpuRenderer<'a> {
    pub fn new(frame: &'a mut [u8], size: SurfaceSize) -> Self {
        Self { frame, size }
    }

    fn pixel_index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let idx = (y as usize * self.size.width as usize + x as usize) * 4;
        (idx + 4 <= self.frame.len()).then_some(idx)
    }

    /// Byte span of `rect` clipped to the surface, or `None` if nothing is visible.
    fn clip_span(&self, rect: Rect) -> Option<RowSpan> {
        let width = self.size.width;
        let height = self.size.height;

        let max_x = rect.x.saturating_add(rect.w).min(width);
        let max_y = rect.y.saturating_add(rect.h).min(height);
        if rect.x >= max_x || rect.y >= max_y {
            return None;
        }

        let expected_len = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        if expected_len == 0 || self.frame.len() < expected_len {
            return None;
        }

        let stride = (width as usize).checked_mul(4)?;
        let start = (rect.y as usize)
            .checked_mul(stride)?
            .checked_add((rect.x as usize).checked_mul(4)?)?;
        Some(RowSpan {
            start,
            row_bytes: (max_x - rect.x) as usize * 4,
            stride,
            rows: max_y - rect.y,
        })
    }
}

struct RowSpan {
    start: usize,
    row_bytes: usize,
    stride: usize,
    rows: u32,
}

impl Renderer2d for CpuRenderer<'_> {
    fn begin_frame(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(span) = self.clip_span(rect) else {
            return;
        };
        let mut row_start = span.start;
        for _ in 0..span.rows {
            let row = &mut self.frame[row_start..row_start + span.row_bytes];
            for px in row.chunks_exact_mut(4) {
                px.copy_from_slice(&color);
            }
            row_start += span.stride;
        }
    }

    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8) {
        if alpha == 0 {
            return;
        }
        if alpha == 255 {
            self.fill_rect(rect, color);
            return;
        }

        let Some(span) = self.clip_span(rect) else {
            return;
        };
        let mut row_start = span.start;
        for _ in 0..span.rows {
            let row = &mut self.frame[row_start..row_start + span.row_bytes];
            for px in row.chunks_exact_mut(4) {
                blend_pixel(px, color, alpha);
            }
            row_start += span.stride;
        }
    }

    fn rect_outline(&mut self, rect: Rect, color: Color) {
        if rect.w == 0 || rect.h == 0 {
            return;
        }

        let width = self.size.width;
        let height = self.size.height;

        let x1 = rect.x.saturating_add(rect.w).min(width);
        let y1 = rect.y.saturating_add(rect.h).min(height);
        if rect.x >= x1 || rect.y >= y1 {
            return;
        }

        let w = x1 - rect.x;
        let h = y1 - rect.y;

        // Top / bottom.
        self.fill_rect(Rect::new(rect.x, rect.y, w, 1), color);
        if h > 1 {
            self.fill_rect(Rect::new(rect.x, y1.saturating_sub(1), w, 1), color);
        }

        // Left / right.
        self.fill_rect(Rect::new(rect.x, rect.y, 1, h), color);
        if w > 1 {
            self.fill_rect(Rect::new(x1.saturating_sub(1), rect.y, 1, h), color);
        }
    }

    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32) {
        let width = self.size.width;
        let height = self.size.height;
        let scale = scale.max(1);
        let adv_x = glyph_advance_x(scale);
        let adv_y = line_advance_y(scale);

        let mut cursor_x = x;
        let mut cursor_y = y;

        for ch in text.chars() {
            match ch {
                '\n' => {
                    cursor_x = x;
                    cursor_y = cursor_y.saturating_add(adv_y);
                    if cursor_y >= height {
                        break;
                    }
                    continue;
                }
                ' ' => {
                    cursor_x = cursor_x.saturating_add(adv_x);
                    if cursor_x >= width {
                        break;
                    }
                    continue;
                }
                _ => {}
            }

            draw_char_cpu(self.frame, width, height, cursor_x, cursor_y, ch, color, scale);
            cursor_x = cursor_x.saturating_add(adv_x);
            if cursor_x >= width {
                break;
            }
        }
    }

    fn draw_line(&mut self, from: Vec2f, to: Vec2f, width: f32, color: Color, alpha: u8) {
        if alpha == 0 || self.size.is_empty() {
            return;
        }
        let half = (width.max(1.0)) / 2.0;

        // Clip the stroke's bounding box to the surface before scanning it.
        let min_x = (from.x.min(to.x) - half).floor().max(0.0);
        let min_y = (from.y.min(to.y) - half).floor().max(0.0);
        let max_x = (from.x.max(to.x) + half).ceil().min(self.size.width as f32);
        let max_y = (from.y.max(to.y) + half).ceil().min(self.size.height as f32);
        if min_x >= max_x || min_y >= max_y {
            return;
        }

        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let len_sq = dx * dx + dy * dy;

        for py in (min_y as u32)..(max_y as u32) {
            for px in (min_x as u32)..(max_x as u32) {
                let cx = px as f32 + 0.5;
                let cy = py as f32 + 0.5;
                let t = if len_sq > 0.0 {
                    (((cx - from.x) * dx + (cy - from.y) * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let nx = from.x + dx * t - cx;
                let ny = from.y + dy * t - cy;
                if nx * nx + ny * ny > half * half {
                    continue;
                }
                if let Some(idx) = self.pixel_index(px, py) {
                    blend_pixel(&mut self.frame[idx..idx + 4], color, alpha);
                }
            }
        }
    }

    fn draw_image(&mut self, x: i32, y: i32, image: &Image) {
        if image.is_empty() {
            return;
        }
        for iy in 0..image.height() {
            let ty = y as i64 + iy as i64;
            if ty < 0 || ty >= self.size.height as i64 {
                continue;
            }
            for ix in 0..image.width() {
                let tx = x as i64 + ix as i64;
                if tx < 0 || tx >= self.size.width as i64 {
                    continue;
                }
                let Some(src) = image.pixel(ix, iy) else {
                    continue;
                };
                let Some(idx) = self.pixel_index(tx as u32, ty as u32) else {
                    continue;
                };
                let dst = &mut self.frame[idx..idx + 4];
                match src[3] {
                    0 => {}
                    255 => dst.copy_from_slice(&src),
                    a => blend_pixel(dst, src, a),
                }
            }
        }
    }
}

fn blend_pixel(px: &mut [u8], color: Color, alpha: u8) {
    let a = alpha as u32;
    let inv = 255u32 - a;
    px[0] = ((px[0] as u32 * inv + (color[0] as u32) * a + 127) / 255) as u8;
    px[1] = ((px[1] as u32 * inv + (color[1] as u32) * a + 127) / 255) as u8;
    px[2] = ((px[2] as u32 * inv + (color[2] as u32) * a + 127) / 255) as u8;
    px[3] = 255;
}

fn draw_char_cpu(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: u32,
    y: u32,
    ch: char,
    color: Color,
    scale: u32,
) {
    let rows = glyph_rows(ch);
    for (row, bits) in rows.into_iter().enumerate() {
        let py0 = y.saturating_add((row as u32).saturating_mul(scale));
        for col in 0..GLYPH_W {
            let mask = 1u8 << (GLYPH_W - 1 - col);
            if (bits & mask) == 0 {
                continue;
            }
            let px0 = x.saturating_add(col.saturating_mul(scale));
            for dy in 0..scale {
                for dx in 0..scale {
                    set_pixel_cpu(frame, width, height, px0 + dx, py0 + dy, color);
                }
            }
        }
    }
}

fn set_pixel_cpu(frame: &mut [u8], width: u32, height: u32, x: u32, y: u32, color: Color) {
    if x >= width || y >= height {
        return;
    }
    let idx = ((y * width + x) * 4) as usize;
    if idx + 4 <= frame.len() {
        let [r, g, b, a] = color;
        frame[idx] = r;
        frame[idx + 1] = g;
        frame[idx + 2] = b;
        frame[idx + 3] = a;
    }
}

fn glyph_rows(ch: char) -> [u8; GLYPH_H as usize] {
    let c = ch.to_ascii_uppercase();
    match c {
        // Digits
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],

        // Letters
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b111, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b110, 0b100, 0b110, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b101, 0b111, 0b111, 0b111, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b111, 0b101, 0b111, 0b110, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],

        // Punctuation
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '?' => [0b111, 0b001, 0b010, 0b000, 0b010],

        // Extras used in formatting.
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '\'' => [0b010, 0b010, 0b000, 0b000, 0b000],

        _ => [0b111, 0b001, 0b010, 0b000, 0b010], // '?'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(frame: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * width + x) * 4) as usize;
        [frame[idx], frame[idx + 1], frame[idx + 2], frame[idx + 3]]
    }

    #[test]
    fn text_width_uses_longest_line() {
        assert_eq!(text_width("AB", 2), 16);
        assert_eq!(text_width("A\nABC", 1), 12);
        assert_eq!(text_width("", 2), 0);
    }

    #[test]
    fn draw_line_blends_along_the_segment_only() {
        let (w, h) = (20u32, 10u32);
        let mut frame = vec![0u8; (w * h * 4) as usize];
        let mut gfx = CpuRenderer::new(&mut frame, SurfaceSize::new(w, h));
        gfx.clear([0, 0, 0, 255]);
        gfx.draw_line(
            Vec2f::new(2.0, 5.0),
            Vec2f::new(17.0, 5.0),
            3.0,
            [200, 200, 200, 255],
            255,
        );

        assert_eq!(pixel(&frame, w, 10, 5), [200, 200, 200, 255]);
        assert_eq!(pixel(&frame, w, 10, 4), [200, 200, 200, 255]);
        assert_eq!(pixel(&frame, w, 10, 1), [0, 0, 0, 255]);
        assert_eq!(pixel(&frame, w, 19, 5), [0, 0, 0, 255]);
    }

    #[test]
    fn draw_line_with_partial_alpha_mixes_with_background() {
        let (w, h) = (8u32, 8u32);
        let mut frame = vec![0u8; (w * h * 4) as usize];
        let mut gfx = CpuRenderer::new(&mut frame, SurfaceSize::new(w, h));
        gfx.clear([0, 0, 0, 255]);
        gfx.draw_line(
            Vec2f::new(0.0, 4.0),
            Vec2f::new(8.0, 4.0),
            1.0,
            [255, 255, 255, 255],
            51,
        );

        let px = pixel(&frame, w, 3, 4);
        assert_eq!(px[0], 51);
        assert_eq!(px[3], 255);
    }

    #[test]
    fn draw_line_fully_off_surface_is_ignored() {
        let (w, h) = (8u32, 8u32);
        let mut frame = vec![7u8; (w * h * 4) as usize];
        let before = frame.clone();
        let mut gfx = CpuRenderer::new(&mut frame, SurfaceSize::new(w, h));
        gfx.draw_line(
            Vec2f::new(-50.0, -50.0),
            Vec2f::new(-10.0, -20.0),
            5.0,
            [255, 0, 0, 255],
            255,
        );
        assert_eq!(frame, before);
    }

    #[test]
    fn draw_image_clips_negative_origin_and_skips_transparent_pixels() {
        let (w, h) = (4u32, 4u32);
        let mut frame = vec![0u8; (w * h * 4) as usize];
        let mut gfx = CpuRenderer::new(&mut frame, SurfaceSize::new(w, h));
        gfx.clear([9, 9, 9, 255]);

        let mut pixels = Image::solid(3, 3, [255, 0, 0, 255]).pixels().to_vec();
        // Make the bottom-right pixel transparent.
        pixels[(2 * 3 + 2) * 4 + 3] = 0;
        let image = Image::from_rgba(3, 3, pixels).unwrap();
        gfx.draw_image(-1, -1, &image);

        assert_eq!(pixel(&frame, w, 0, 0), [255, 0, 0, 255]);
        assert_eq!(pixel(&frame, w, 1, 0), [255, 0, 0, 255]);
        assert_eq!(pixel(&frame, w, 1, 1), [9, 9, 9, 255]);
        assert_eq!(pixel(&frame, w, 2, 0), [9, 9, 9, 255]);
    }

    #[test]
    fn blend_rect_matches_fill_at_full_alpha() {
        let (w, h) = (4u32, 4u32);
        let mut a = vec![0u8; (w * h * 4) as usize];
        let mut b = vec![0u8; (w * h * 4) as usize];
        CpuRenderer::new(&mut a, SurfaceSize::new(w, h))
            .fill_rect(Rect::new(1, 1, 2, 2), [5, 6, 7, 255]);
        CpuRenderer::new(&mut b, SurfaceSize::new(w, h))
            .blend_rect(Rect::new(1, 1, 2, 2), [5, 6, 7, 255], 255);
        assert_eq!(a, b);
        assert_eq!(pixel(&a, w, 3, 3), [0, 0, 0, 0]);
    }
}
