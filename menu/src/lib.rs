//! Skill tree browser screen: graph data, the browsing window, and the pieces it is built from.

pub mod assets;
pub mod character;
pub mod error;
pub mod input;
pub mod menu_window;
pub mod scene;
pub mod settings;
pub mod skill_catalog;
pub mod skill_tree;
pub mod skilltree_window;

pub use error::{Error, Result};
pub use skilltree_window::SkillTreeWindow;
