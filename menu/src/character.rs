use std::{path::Path, rc::Rc};

use engine::image::Image;
use serde::{Deserialize, Serialize};

use crate::{
    assets::{ImageSource, load_image_or_placeholder},
    error::{Result, read_json},
};

pub type CharacterId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterDef {
    pub id: CharacterId,
    pub name: String,
    pub status_icon: String,
}

#[derive(Debug, Clone, Deserialize)]
struct PartyFile {
    characters: Vec<CharacterDef>,
}

/// A party member as seen by the menus.
#[derive(Debug, Clone)]
pub struct Character {
    id: CharacterId,
    name: String,
    status_icon: Rc<Image>,
}

impl Character {
    pub fn new(id: CharacterId, name: impl Into<String>, status_icon: Image) -> Self {
        Self {
            id,
            name: name.into(),
            status_icon: Rc::new(status_icon),
        }
    }

    pub fn from_def(def: CharacterDef, images: &dyn ImageSource) -> Self {
        let icon = load_image_or_placeholder(images, &def.status_icon);
        Self::new(def.id, def.name, icon)
    }

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status_icon(&self) -> &Rc<Image> {
        &self.status_icon
    }
}

pub fn load_party(path: impl AsRef<Path>, images: &dyn ImageSource) -> Result<Vec<Character>> {
    let file: PartyFile = read_json(path.as_ref())?;
    Ok(file
        .characters
        .into_iter()
        .map(|def| Character::from_def(def, images))
        .collect())
}
