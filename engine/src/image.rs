//! RGBA images for icons and markers.

use std::{
    fs,
    io::Cursor,
    path::{Path, PathBuf},
};

use crate::graphics::Color;

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PNG decode error: {0}")]
    Decode(#[from] png::DecodingError),

    #[error("unsupported PNG color type {0:?}")]
    UnsupportedColor(png::ColorType),

    #[error("pixel buffer holds {actual} bytes, expected {expected} for {width}x{height}")]
    BadDimensions {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// A decoded, straight-alpha RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Image {
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, ImageError> {
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if pixels.len() != expected {
            return Err(ImageError::BadDimensions {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A filled rectangle; used as a stand-in when an asset cannot be loaded.
    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        let len = (width as usize) * (height as usize);
        let mut pixels = Vec::with_capacity(len * 4);
        for _ in 0..len {
            pixels.extend_from_slice(&color);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn load_png(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ImageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_png_bytes(&bytes)
    }

    pub fn from_png_bytes(bytes: &[u8]) -> Result<Self, ImageError> {
        let mut decoder = png::Decoder::new(Cursor::new(bytes));
        decoder.set_transformations(png::Transformations::normalize_to_color8());
        let mut reader = decoder.read_info()?;

        let (color_type, _) = reader.output_color_type();
        let (width, height) = {
            let info = reader.info();
            (info.width, info.height)
        };
        let samples = color_type.samples();
        let mut buf = vec![0u8; (width as usize) * (height as usize) * samples];
        reader.next_frame(&mut buf)?;

        let pixels = match color_type {
            png::ColorType::Rgba => buf,
            png::ColorType::Rgb => buf
                .chunks_exact(3)
                .flat_map(|px| [px[0], px[1], px[2], 255])
                .collect(),
            png::ColorType::GrayscaleAlpha => buf
                .chunks_exact(2)
                .flat_map(|px| [px[0], px[0], px[0], px[1]])
                .collect(),
            png::ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v, 255]).collect(),
            other => return Err(ImageError::UnsupportedColor(other)),
        };

        Self::from_rgba(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.pixels.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Nearest-neighbour resample to `width` pixels wide, keeping the aspect ratio.
    pub fn scaled_to_width(&self, width: f32) -> Image {
        if self.is_empty() || width.is_nan() || width <= 0.0 {
            return self.clone();
        }

        let new_w = width.round().max(1.0) as u32;
        let ratio = new_w as f32 / self.width as f32;
        let new_h = (self.height as f32 * ratio).round().max(1.0) as u32;
        if new_w == self.width && new_h == self.height {
            return self.clone();
        }

        let mut pixels = Vec::with_capacity((new_w as usize) * (new_h as usize) * 4);
        for y in 0..new_h {
            let sy = ((y as u64 * self.height as u64) / new_h as u64) as u32;
            for x in 0..new_w {
                let sx = ((x as u64 * self.width as u64) / new_w as u64) as u32;
                let idx = (sy as usize * self.width as usize + sx as usize) * 4;
                pixels.extend_from_slice(&self.pixels[idx..idx + 4]);
            }
        }

        Image {
            width: new_w,
            height: new_h,
            pixels,
        }
    }
}
