use std::path::{Path, PathBuf};

use engine::{
    graphics::Color,
    ui::{Rect, Vec2f},
};
use serde::{Deserialize, Serialize};

use crate::error::{Result, read_json};

pub const DEFAULT_VIEW_WIDTH: f32 = 950.0;
pub const DEFAULT_VIEW_HEIGHT: f32 = 550.0;
/// Placeholder navigation bound: only nodes `0..=3` are reachable with left/right.
pub const DEFAULT_MAX_NODE_INDEX: u32 = 3;
pub const DEFAULT_LINK_WIDTH: f32 = 5.0;
pub const DEFAULT_SKILL_ICON_WIDTH: f32 = 50.0;
pub const DEFAULT_POINTER_IMAGE: &str = "gui/menus/hand_down.png";

/// Tunables for the skill tree window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillTreeWindowSettings {
    /// Size of the graph viewport; also the culling rectangle around the view center.
    pub view_width: f32,
    pub view_height: f32,

    /// Highest node index reachable with "right".
    pub max_node_index: u32,

    /// Link stroke as straight-alpha RGBA in `0.0..=1.0`.
    pub link_color: [f32; 4],
    pub link_width: f32,

    /// Skill icons in the detail panel are scaled to this width, keeping their ratio.
    pub skill_icon_width: f32,

    /// Asset-relative path of the selection marker.
    pub pointer_image: String,

    /// Top-left of the detail panel's content area.
    pub detail_origin: Vec2f,

    /// On-screen rectangle of the window chrome.
    pub window: Rect,
}

impl Default for SkillTreeWindowSettings {
    fn default() -> Self {
        Self {
            view_width: DEFAULT_VIEW_WIDTH,
            view_height: DEFAULT_VIEW_HEIGHT,
            max_node_index: DEFAULT_MAX_NODE_INDEX,
            link_color: [0.5, 0.5, 0.5, 0.2],
            link_width: DEFAULT_LINK_WIDTH,
            skill_icon_width: DEFAULT_SKILL_ICON_WIDTH,
            pointer_image: DEFAULT_POINTER_IMAGE.to_string(),
            detail_origin: Vec2f::new(110.0, 565.0),
            window: Rect::new(37, 8, 950, 550),
        }
    }
}

impl SkillTreeWindowSettings {
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !positive(self.view_width) {
            self.view_width = defaults.view_width;
        }
        if !positive(self.view_height) {
            self.view_height = defaults.view_height;
        }
        if !positive(self.link_width) {
            self.link_width = defaults.link_width;
        }
        if !positive(self.skill_icon_width) {
            self.skill_icon_width = defaults.skill_icon_width;
        }
        for c in &mut self.link_color {
            *c = if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) };
        }
        self
    }

    /// Link color as an 8-bit RGB color plus a separate 8-bit alpha.
    pub fn link_rgba(&self) -> (Color, u8) {
        let [r, g, b, a] = self.link_color.map(unit_to_u8);
        ([r, g, b, 255], a)
    }
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

fn unit_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os("SKILLTREE_SETTINGS_PATH") {
            return Self::new(explicit);
        }

        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|home| {
                    let mut p = PathBuf::from(home);
                    p.push(".config");
                    p
                })
            })
            .unwrap_or_else(|| PathBuf::from("."));

        let mut path = base;
        path.push("skilltree-menu");
        path.push("settings.json");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Strict load: I/O and parse failures are returned.
    pub fn try_load(&self) -> Result<SkillTreeWindowSettings> {
        read_json::<SkillTreeWindowSettings>(&self.path).map(SkillTreeWindowSettings::sanitized)
    }

    /// Lenient load: a missing file is silent, a broken one is logged; both yield defaults.
    pub fn load(&self) -> SkillTreeWindowSettings {
        if !self.path.exists() {
            return SkillTreeWindowSettings::default();
        }
        self.try_load().unwrap_or_else(|err| {
            log::warn!("ignoring settings: {err}");
            SkillTreeWindowSettings::default()
        })
    }
}
