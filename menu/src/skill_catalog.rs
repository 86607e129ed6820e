use std::{collections::HashMap, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result, read_json},
    skill_tree::SkillId,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillInfo {
    pub id: SkillId,
    pub name: String,
    /// Asset-relative icon path.
    pub icon: String,
}

/// Skill metadata lookup. `None` means the id does not name a usable skill.
pub trait SkillCatalog {
    fn skill(&self, id: SkillId) -> Option<&SkillInfo>;
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogFile {
    skills: Vec<SkillInfo>,
}

/// Skill catalog backed by a JSON document (`{"skills": [{"id", "name", "icon"}, ...]}`).
#[derive(Debug, Clone, Default)]
pub struct JsonSkillCatalog {
    skills: HashMap<SkillId, SkillInfo>,
}

impl JsonSkillCatalog {
    pub fn from_skills(skills: impl IntoIterator<Item = SkillInfo>) -> Result<Self> {
        let mut map = HashMap::new();
        for skill in skills {
            let id = skill.id;
            if map.insert(id, skill).is_some() {
                return Err(Error::DuplicateSkill(id));
            }
        }
        Ok(Self { skills: map })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file: CatalogFile = read_json(path)?;
        Self::from_skills(file.skills)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl SkillCatalog for JsonSkillCatalog {
    fn skill(&self, id: SkillId) -> Option<&SkillInfo> {
        // Entries without a display name are treated as not usable.
        self.skills.get(&id).filter(|s| !s.name.trim().is_empty())
    }
}
