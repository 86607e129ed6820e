//! Skill graph data: designer-authored nodes, their links, and the skills they grant.

use std::{collections::HashMap, path::Path};

use engine::{image::Image, ui::Vec2f};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    assets::{ImageSource, load_image_or_placeholder},
    error::{Error, Result, read_json},
};

pub type NodeId = u32;
pub type SkillId = u32;

/// Read-only view of a skill graph, as consumed by the skill tree window.
pub trait SkillGraph {
    fn node(&self, id: NodeId) -> Option<&SkillNode>;
    fn nodes(&self) -> &[SkillNode];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Hp,
    Sp,
    PhysAtk,
    MagAtk,
    PhysDef,
    MagDef,
    Stamina,
    Evade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatUpgrade {
    pub stat: Stat,
    pub value: u32,
}

/// Static, designer-authored skill tree definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillTreeDef {
    #[serde(default = "default_version")]
    pub version: u32,
    pub nodes: Vec<SkillNodeDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillNodeDef {
    pub id: NodeId,
    pub x: f32,
    pub y: f32,

    /// Asset-relative icon path.
    pub icon: String,

    /// Outgoing links; ids that do not resolve are tolerated.
    #[serde(default)]
    pub links: Vec<NodeId>,

    /// `-1` or absent for a node that teaches no skill.
    #[serde(default, deserialize_with = "deserialize_learned_skill")]
    pub learned_skill: Option<SkillId>,

    #[serde(default)]
    pub stats: Vec<StatUpgrade>,
}

fn default_version() -> u32 {
    1
}

fn deserialize_learned_skill<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<SkillId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(v) if v < 0 => Ok(None),
        Some(v) => SkillId::try_from(v)
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("skill id {v} out of range"))),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillNode {
    id: NodeId,
    position: Vec2f,
    links: Vec<NodeId>,
    learned_skill: Option<SkillId>,
    stats_upgrades: Vec<StatUpgrade>,
    icon: Image,
}

impl SkillNode {
    pub fn new(id: NodeId, position: Vec2f, icon: Image) -> Self {
        Self {
            id,
            position,
            links: Vec::new(),
            learned_skill: None,
            stats_upgrades: Vec::new(),
            icon,
        }
    }

    pub fn with_links(mut self, links: impl IntoIterator<Item = NodeId>) -> Self {
        self.links = links.into_iter().collect();
        self
    }

    pub fn with_learned_skill(mut self, skill: SkillId) -> Self {
        self.learned_skill = Some(skill);
        self
    }

    pub fn with_stats(mut self, stats: impl IntoIterator<Item = StatUpgrade>) -> Self {
        self.stats_upgrades = stats.into_iter().collect();
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn position(&self) -> Vec2f {
        self.position
    }

    pub fn links(&self) -> &[NodeId] {
        &self.links
    }

    pub fn learned_skill(&self) -> Option<SkillId> {
        self.learned_skill
    }

    pub fn stats_upgrades(&self) -> &[StatUpgrade] {
        &self.stats_upgrades
    }

    pub fn icon(&self) -> &Image {
        &self.icon
    }
}

/// Runtime skill graph: nodes plus an id index for lookups.
#[derive(Debug, Clone, Default)]
pub struct SkillTree {
    nodes: Vec<SkillNode>,
    id_to_index: HashMap<NodeId, usize>,
}

impl SkillTree {
    pub fn from_nodes(nodes: Vec<SkillNode>) -> Result<Self> {
        let mut id_to_index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if id_to_index.insert(node.id, i).is_some() {
                return Err(Error::DuplicateNode(node.id));
            }
        }
        Ok(Self { nodes, id_to_index })
    }

    /// Builds the runtime graph, resolving each node's icon through `images`.
    ///
    /// Missing icons are replaced with a placeholder (and logged) rather than failing the load.
    pub fn from_def(def: SkillTreeDef, images: &dyn ImageSource) -> Result<Self> {
        let nodes = def
            .nodes
            .into_iter()
            .map(|n| SkillNode {
                id: n.id,
                position: Vec2f::new(n.x, n.y),
                icon: load_image_or_placeholder(images, &n.icon),
                links: n.links,
                learned_skill: n.learned_skill,
                stats_upgrades: n.stats,
            })
            .collect();
        Self::from_nodes(nodes)
    }

    pub fn load(path: impl AsRef<Path>, images: &dyn ImageSource) -> Result<Self> {
        let path = path.as_ref();
        let def: SkillTreeDef = read_json(path)?;
        let tree = Self::from_def(def, images)?;
        log::debug!("loaded {} skill nodes from {}", tree.len(), path.display());
        Ok(tree)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl SkillGraph for SkillTree {
    fn node(&self, id: NodeId) -> Option<&SkillNode> {
        self.id_to_index.get(&id).and_then(|&i| self.nodes.get(i))
    }

    fn nodes(&self) -> &[SkillNode] {
        &self.nodes
    }
}
