//! Game-agnostic plumbing for the menu screens: RGBA surfaces, a software 2D renderer,
//! image loading, keyboard input frames, and the `pixels`/`winit` headful loop.

pub mod app;
pub mod graphics;
pub mod image;
pub mod pixels_renderer;
pub mod surface;
pub mod ui;
