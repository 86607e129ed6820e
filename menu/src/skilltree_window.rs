//! The skill tree browser window.
//!
//! The window owns only view state. The graph and the skill catalog are shared, read-only
//! handles injected at construction; nothing here mutates them.
//!
//! Frame protocol: `update` once, then `draw` and `draw_bottom_window`.

use std::rc::Rc;

use engine::{
    graphics::{Color, Renderer2d},
    image::Image,
    ui::Vec2f,
};

use crate::{
    assets::ImageSource,
    character::{Character, CharacterId},
    input::MenuInput,
    menu_window::MenuWindow,
    settings::SkillTreeWindowSettings,
    skill_catalog::SkillCatalog,
    skill_tree::{NodeId, SkillGraph, SkillId},
};

const COLOR_SKILL_NAME: Color = [235, 235, 245, 255];
/// Offset of the detail panel's first item from `detail_origin`.
const DETAIL_CONTENT_OFFSET: Vec2f = Vec2f::new(5.0, 30.0);
const DETAIL_ICON_GAP: f32 = 5.0;

/// A link segment, with both ends relative to the view offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeLine {
    pub from: Vec2f,
    pub to: Vec2f,
}

/// Axis-aligned culling rectangle; containment excludes the boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRect {
    pub min: Vec2f,
    pub max: Vec2f,
}

impl ViewRect {
    pub fn centered(center: Vec2f, width: f32, height: f32) -> Self {
        Self {
            min: center.offset(-width / 2.0, -height / 2.0),
            max: center.offset(width / 2.0, height / 2.0),
        }
    }

    pub fn contains(&self, p: Vec2f) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }
}

#[derive(Debug, Clone)]
struct SkillDetail {
    name: String,
    icon: Option<Image>,
}

pub struct SkillTreeWindow {
    graph: Rc<dyn SkillGraph>,
    catalog: Rc<dyn SkillCatalog>,
    images: Rc<dyn ImageSource>,
    settings: SkillTreeWindowSettings,
    chrome: MenuWindow,
    location_pointer: Option<Image>,

    active: bool,
    selected_character: Option<CharacterId>,
    character_icon: Option<Rc<Image>>,
    selected_node: Option<NodeId>,

    /// Graph-space point shown at the viewport center; `None` until a node exists.
    view_offset: Option<Vec2f>,
    /// Screen-space center of the viewport.
    view_anchor: Vec2f,

    displayed_nodes: Vec<NodeId>,
    displayed_links: Vec<NodeLine>,

    current_skill: Option<SkillId>,
    skill_detail: Option<SkillDetail>,
}

impl SkillTreeWindow {
    pub fn new(
        graph: Rc<dyn SkillGraph>,
        catalog: Rc<dyn SkillCatalog>,
        images: Rc<dyn ImageSource>,
        settings: SkillTreeWindowSettings,
    ) -> Self {
        let location_pointer = match images.load_image(&settings.pointer_image) {
            Ok(image) => Some(image),
            Err(err) => {
                log::error!("could not load pointer image: {err}");
                None
            }
        };

        Self {
            graph,
            catalog,
            images,
            chrome: MenuWindow::new(settings.window),
            settings,
            location_pointer,
            active: false,
            selected_character: None,
            character_icon: None,
            selected_node: None,
            view_offset: None,
            view_anchor: Vec2f::ZERO,
            displayed_nodes: Vec::new(),
            displayed_links: Vec::new(),
            current_skill: None,
            skill_detail: None,
        }
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;

        // TODO: select the node the bound character was last located on.
        if self.selected_character.is_none() {
            self.selected_node = Some(0);
        }

        self.reset_skill_tree_view();
    }

    pub fn update(&mut self, input: &MenuInput) {
        if !self.active {
            return;
        }

        self.view_anchor = self.chrome.position().offset(
            self.settings.view_width / 2.0,
            self.settings.view_height / 2.0,
        );

        // Selection moves do not re-center the view; only resets do.
        let max_index = self.settings.max_node_index;
        if input.cancel {
            self.set_active(false);
        } else if input.left {
            if let Some(index) = self.selected_node.filter(|&i| i > 0) {
                self.selected_node = Some(index - 1);
            }
        } else if input.right {
            if let Some(index) = self.selected_node.filter(|&i| i < max_index) {
                self.selected_node = Some(index + 1);
            }
        }

        self.refresh_skill_detail();
    }

    pub fn draw(&self, gfx: &mut dyn Renderer2d) {
        self.chrome.draw(gfx);

        let Some(offset) = self.view_offset else {
            return;
        };

        let (link_color, link_alpha) = self.settings.link_rgba();
        for line in &self.displayed_links {
            gfx.draw_line(
                self.view_anchor + line.from,
                self.view_anchor + line.to,
                self.settings.link_width,
                link_color,
                link_alpha,
            );
        }

        for &id in &self.displayed_nodes {
            let Some(node) = self.graph.node(id) else {
                continue;
            };
            let center = self.view_anchor + node.position() - offset;
            let icon = node.icon();
            let icon_w = icon.width() as f32;
            let icon_h = icon.height() as f32;
            gfx.draw_image(
                to_px(center.x - icon_w / 2.0),
                to_px(center.y - icon_h / 2.0),
                icon,
            );

            if self.selected_node != Some(id) {
                continue;
            }
            if let Some(pointer) = &self.location_pointer {
                let pointer_w = pointer.width() as f32;
                let pointer_h = pointer.height() as f32;
                gfx.draw_image(
                    to_px(center.x - pointer_w / 3.0),
                    to_px(center.y - icon_h - pointer_h),
                    pointer,
                );
            }
        }
    }

    pub fn draw_bottom_window(&self, gfx: &mut dyn Renderer2d) {
        if self.current_skill.is_none() {
            return;
        }
        let Some(detail) = &self.skill_detail else {
            return;
        };

        let origin = self.settings.detail_origin + DETAIL_CONTENT_OFFSET;
        let mut x = origin.x;
        if let Some(icon) = &detail.icon {
            gfx.draw_image(to_px(origin.x), to_px(origin.y), icon);
            x += icon.width() as f32;
        }
        x += DETAIL_ICON_GAP;
        gfx.draw_text(
            x.max(0.0) as u32,
            origin.y.max(0.0) as u32,
            &detail.name,
            COLOR_SKILL_NAME,
        );
    }

    pub fn set_character(&mut self, character: &Character) {
        self.selected_character = Some(character.id());
        self.character_icon = Some(Rc::clone(character.status_icon()));

        // Characters do not record a last-visited node yet; always start from the root.
        self.selected_node = Some(0);
        log::debug!(
            "skill tree bound to character {} ({})",
            character.id(),
            character.name()
        );

        self.reset_skill_tree_view();
    }

    /// Centers the view on the selected node, falling back to node 0.
    ///
    /// With no node 0 the view becomes uninitialized: no selection, no offset, empty caches.
    pub fn reset_skill_tree_view(&mut self) {
        let graph = Rc::clone(&self.graph);
        let node = match self.selected_node.and_then(|id| graph.node(id)) {
            Some(node) => Some(node),
            None => {
                self.selected_node = Some(0);
                graph.node(0)
            }
        };

        let Some(node) = node else {
            self.view_offset = None;
            self.selected_node = None;
            self.displayed_nodes.clear();
            self.displayed_links.clear();
            log::warn!("empty skill graph view");
            return;
        };

        log::debug!("skill tree view centered on node {}", node.id());
        self.view_offset = Some(node.position());
        self.update_skill_tree_view();
    }

    /// Rebuilds the visible node and link caches from scratch for the current offset.
    pub fn update_skill_tree_view(&mut self) {
        if self.selected_node.is_none() {
            return;
        }
        let Some(offset) = self.view_offset else {
            return;
        };

        let view = ViewRect::centered(offset, self.settings.view_width, self.settings.view_height);
        let graph = Rc::clone(&self.graph);

        self.displayed_nodes.clear();
        self.displayed_nodes.extend(
            graph
                .nodes()
                .iter()
                .filter(|node| view.contains(node.position()))
                .map(|node| node.id()),
        );

        self.displayed_links.clear();
        for &id in &self.displayed_nodes {
            let Some(node) = graph.node(id) else {
                continue;
            };
            let from = node.position() - offset;
            for &target in node.links() {
                let Some(linked) = graph.node(target) else {
                    continue;
                };
                self.displayed_links.push(NodeLine {
                    from,
                    to: linked.position() - offset,
                });
            }
        }
    }

    fn refresh_skill_detail(&mut self) {
        let learned = self
            .selected_node
            .and_then(|id| self.graph.node(id))
            .map(|node| node.learned_skill());

        let skill_id = match learned {
            None | Some(None) => {
                self.clear_skill_detail();
                return;
            }
            Some(Some(skill_id)) => skill_id,
        };

        if self.current_skill == Some(skill_id) {
            return;
        }

        self.current_skill = Some(skill_id);
        let detail = match self.catalog.skill(skill_id) {
            Some(info) => Some(SkillDetail {
                name: info.name.clone(),
                icon: self.load_skill_icon(&info.icon),
            }),
            None => {
                log::debug!("skill {skill_id} is not in the catalog");
                None
            }
        };
        self.skill_detail = detail;
    }

    fn load_skill_icon(&self, path: &str) -> Option<Image> {
        match self.images.load_image(path) {
            Ok(image) => Some(image.scaled_to_width(self.settings.skill_icon_width)),
            Err(err) => {
                log::warn!("could not load skill icon: {err}");
                None
            }
        }
    }

    fn clear_skill_detail(&mut self) {
        self.current_skill = None;
        self.skill_detail = None;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn selected_character(&self) -> Option<CharacterId> {
        self.selected_character
    }

    pub fn character_icon(&self) -> Option<&Image> {
        self.character_icon.as_deref()
    }

    pub fn selected_node(&self) -> Option<NodeId> {
        self.selected_node
    }

    pub fn view_offset(&self) -> Option<Vec2f> {
        self.view_offset
    }

    pub fn view_anchor(&self) -> Vec2f {
        self.view_anchor
    }

    pub fn displayed_nodes(&self) -> &[NodeId] {
        &self.displayed_nodes
    }

    pub fn displayed_links(&self) -> &[NodeLine] {
        &self.displayed_links
    }

    pub fn current_skill(&self) -> Option<SkillId> {
        self.current_skill
    }

    /// Name shown in the detail panel; `None` when the panel is empty.
    pub fn skill_name(&self) -> Option<&str> {
        self.skill_detail.as_ref().map(|d| d.name.as_str())
    }

    pub fn skill_icon(&self) -> Option<&Image> {
        self.skill_detail.as_ref().and_then(|d| d.icon.as_ref())
    }

    pub fn has_location_pointer(&self) -> bool {
        self.location_pointer.is_some()
    }
}

fn to_px(v: f32) -> i32 {
    v.round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        assets::MemoryImages,
        settings::DEFAULT_POINTER_IMAGE,
        skill_catalog::{JsonSkillCatalog, SkillInfo},
        skill_tree::{SkillNode, SkillTree},
    };
    use engine::{surface::SurfaceSize, ui::Rect};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Line {
            from: Vec2f,
            to: Vec2f,
            width: f32,
            color: Color,
            alpha: u8,
        },
        Image {
            x: i32,
            y: i32,
            w: u32,
            h: u32,
        },
        Text {
            x: u32,
            y: u32,
            text: String,
        },
    }

    /// Captures the calls the window makes; panel chrome fills are ignored.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Renderer2d for Recorder {
        fn begin_frame(&mut self, _size: SurfaceSize) {}

        fn size(&self) -> SurfaceSize {
            SurfaceSize::new(1024, 768)
        }

        fn fill_rect(&mut self, _rect: Rect, _color: Color) {}

        fn blend_rect(&mut self, _rect: Rect, _color: Color, _alpha: u8) {}

        fn rect_outline(&mut self, _rect: Rect, _color: Color) {}

        fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, _color: Color, _scale: u32) {
            self.calls.push(Call::Text {
                x,
                y,
                text: text.to_string(),
            });
        }

        fn draw_line(&mut self, from: Vec2f, to: Vec2f, width: f32, color: Color, alpha: u8) {
            self.calls.push(Call::Line {
                from,
                to,
                width,
                color,
                alpha,
            });
        }

        fn draw_image(&mut self, x: i32, y: i32, image: &Image) {
            self.calls.push(Call::Image {
                x,
                y,
                w: image.width(),
                h: image.height(),
            });
        }
    }

    const FIRE: SkillId = 1;
    const HEAL: SkillId = 2;

    fn node(id: NodeId, x: f32, y: f32) -> SkillNode {
        SkillNode::new(id, Vec2f::new(x, y), Image::solid(10, 10, [200, 200, 200, 255]))
    }

    fn catalog() -> JsonSkillCatalog {
        JsonSkillCatalog::from_skills([
            SkillInfo {
                id: FIRE,
                name: "Fire".to_string(),
                icon: "skills/fire.png".to_string(),
            },
            SkillInfo {
                id: HEAL,
                name: "Heal".to_string(),
                icon: "skills/missing.png".to_string(),
            },
        ])
        .unwrap()
    }

    fn images() -> MemoryImages {
        MemoryImages::new()
            .with(DEFAULT_POINTER_IMAGE, Image::solid(9, 6, [255, 255, 0, 255]))
            .with("skills/fire.png", Image::solid(100, 40, [255, 80, 0, 255]))
    }

    fn window_with(nodes: Vec<SkillNode>, images: MemoryImages) -> SkillTreeWindow {
        SkillTreeWindow::new(
            Rc::new(SkillTree::from_nodes(nodes).unwrap()),
            Rc::new(catalog()),
            Rc::new(images),
            SkillTreeWindowSettings::default(),
        )
    }

    fn window(nodes: Vec<SkillNode>) -> SkillTreeWindow {
        window_with(nodes, images())
    }

    /// Three nodes: the root, a neighbour linking back to it, and a far-away node.
    fn scenario_nodes() -> Vec<SkillNode> {
        vec![
            node(0, 0.0, 0.0),
            node(1, 100.0, 0.0).with_links([0]),
            node(2, 2000.0, 2000.0),
        ]
    }

    fn row_of(count: u32) -> Vec<SkillNode> {
        (0..count).map(|i| node(i, i as f32 * 60.0, 0.0)).collect()
    }

    #[test]
    fn reset_centers_on_root_and_culls_far_nodes() {
        let mut w = window(scenario_nodes());
        w.set_active(true);

        assert!(w.is_active());
        assert_eq!(w.selected_node(), Some(0));
        assert_eq!(w.view_offset(), Some(Vec2f::ZERO));
        assert_eq!(w.displayed_nodes(), &[0, 1]);
        assert_eq!(
            w.displayed_links(),
            &[NodeLine {
                from: Vec2f::new(100.0, 0.0),
                to: Vec2f::ZERO,
            }]
        );
    }

    #[test]
    fn edges_need_a_visible_source_and_a_resolved_target() {
        let mut w = window(vec![
            node(0, 0.0, 0.0).with_links([2, 42]),
            node(1, 100.0, 0.0).with_links([0]),
            node(2, 2000.0, 2000.0).with_links([0]),
        ]);
        w.set_active(true);

        // 0 -> 2 is kept although 2 is off screen; 0 -> 42 does not resolve; 2 is not visible.
        assert_eq!(
            w.displayed_links(),
            &[
                NodeLine {
                    from: Vec2f::ZERO,
                    to: Vec2f::new(2000.0, 2000.0),
                },
                NodeLine {
                    from: Vec2f::new(100.0, 0.0),
                    to: Vec2f::ZERO,
                },
            ]
        );
    }

    #[test]
    fn nodes_on_the_view_boundary_are_culled() {
        let mut w = window(vec![
            node(0, 0.0, 0.0),
            node(1, 474.0, 0.0),
            node(2, 475.0, 0.0),
            node(3, 0.0, -275.0),
            node(4, 0.0, 274.5),
        ]);
        w.set_active(true);
        assert_eq!(w.displayed_nodes(), &[0, 1, 4]);
    }

    #[test]
    fn view_rect_containment_is_strict() {
        let view = ViewRect::centered(Vec2f::new(10.0, 10.0), 4.0, 2.0);
        assert!(view.contains(Vec2f::new(11.9, 10.9)));
        assert!(!view.contains(Vec2f::new(12.0, 10.0)));
        assert!(!view.contains(Vec2f::new(10.0, 9.0)));
    }

    #[test]
    fn navigation_stays_within_bounds() {
        let mut w = window(row_of(6));
        w.set_active(true);

        w.update(&MenuInput::left());
        assert_eq!(w.selected_node(), Some(0));

        for _ in 0..5 {
            w.update(&MenuInput::right());
        }
        assert_eq!(w.selected_node(), Some(3));

        w.update(&MenuInput::left());
        assert_eq!(w.selected_node(), Some(2));
    }

    #[test]
    fn navigation_does_not_recenter_the_view() {
        let mut w = window(row_of(4));
        w.set_active(true);
        let nodes_before = w.displayed_nodes().to_vec();

        w.update(&MenuInput::right());
        w.update(&MenuInput::right());

        assert_eq!(w.selected_node(), Some(2));
        assert_eq!(w.view_offset(), Some(Vec2f::ZERO));
        assert_eq!(w.displayed_nodes(), nodes_before.as_slice());
    }

    #[test]
    fn cancel_wins_over_directions_and_left_over_right() {
        let mut w = window(row_of(4));
        w.set_active(true);
        w.update(&MenuInput::right());
        w.update(&MenuInput::right());

        w.update(&MenuInput {
            left: true,
            right: true,
            ..MenuInput::NONE
        });
        assert_eq!(w.selected_node(), Some(1));

        w.update(&MenuInput {
            cancel: true,
            left: true,
            right: true,
        });
        assert!(!w.is_active());
        // Deactivation resets the view back onto the root.
        assert_eq!(w.selected_node(), Some(0));
        assert_eq!(w.view_offset(), Some(Vec2f::ZERO));
    }

    #[test]
    fn inactive_window_ignores_input() {
        let mut w = window(row_of(4));
        w.update(&MenuInput::right());
        assert_eq!(w.selected_node(), None);
        assert_eq!(w.view_anchor(), Vec2f::ZERO);

        w.set_active(true);
        w.set_active(false);
        w.update(&MenuInput::right());
        assert_eq!(w.selected_node(), Some(0));
    }

    #[test]
    fn update_places_anchor_at_viewport_center() {
        let mut w = window(row_of(1));
        w.set_active(true);
        w.update(&MenuInput::NONE);
        // Default window origin (37, 8) plus half of 950x550.
        assert_eq!(w.view_anchor(), Vec2f::new(512.0, 283.0));
    }

    #[test]
    fn detail_follows_the_selected_node() {
        let mut w = window(vec![
            node(0, 0.0, 0.0).with_learned_skill(FIRE),
            node(1, 60.0, 0.0),
        ]);
        w.set_active(true);
        w.update(&MenuInput::NONE);

        assert_eq!(w.current_skill(), Some(FIRE));
        assert_eq!(w.skill_name(), Some("Fire"));
        let icon = w.skill_icon().unwrap();
        assert_eq!((icon.width(), icon.height()), (50, 20));

        w.update(&MenuInput::right());
        assert_eq!(w.current_skill(), None);
        assert_eq!(w.skill_name(), None);
        assert!(w.skill_icon().is_none());

        let mut gfx = Recorder::default();
        w.draw_bottom_window(&mut gfx);
        assert!(gfx.calls.is_empty());
    }

    #[test]
    fn unknown_skill_keeps_the_id_but_clears_the_detail() {
        let mut w = window(vec![node(0, 0.0, 0.0).with_learned_skill(77)]);
        w.set_active(true);
        w.update(&MenuInput::NONE);

        assert_eq!(w.current_skill(), Some(77));
        assert_eq!(w.skill_name(), None);

        let mut gfx = Recorder::default();
        w.draw_bottom_window(&mut gfx);
        assert!(gfx.calls.is_empty());
    }

    #[test]
    fn missing_node_under_selection_clears_the_detail() {
        let mut w = window(vec![
            node(0, 0.0, 0.0).with_learned_skill(FIRE),
            node(1, 60.0, 0.0),
        ]);
        w.set_active(true);
        w.update(&MenuInput::NONE);
        assert_eq!(w.current_skill(), Some(FIRE));

        w.update(&MenuInput::right());
        w.update(&MenuInput::right());
        assert_eq!(w.selected_node(), Some(2));
        assert_eq!(w.current_skill(), None);
    }

    #[test]
    fn bottom_window_draws_icon_then_name() {
        let mut w = window(vec![node(0, 0.0, 0.0).with_learned_skill(FIRE)]);
        w.set_active(true);
        w.update(&MenuInput::NONE);

        let mut gfx = Recorder::default();
        w.draw_bottom_window(&mut gfx);
        assert_eq!(
            gfx.calls,
            vec![
                Call::Image {
                    x: 115,
                    y: 595,
                    w: 50,
                    h: 20
                },
                Call::Text {
                    x: 170,
                    y: 595,
                    text: "Fire".to_string()
                },
            ]
        );
    }

    #[test]
    fn bottom_window_without_icon_still_draws_the_name() {
        let mut w = window(vec![node(0, 0.0, 0.0).with_learned_skill(HEAL)]);
        w.set_active(true);
        w.update(&MenuInput::NONE);

        assert_eq!(w.skill_name(), Some("Heal"));
        assert!(w.skill_icon().is_none());

        let mut gfx = Recorder::default();
        w.draw_bottom_window(&mut gfx);
        assert_eq!(
            gfx.calls,
            vec![Call::Text {
                x: 120,
                y: 595,
                text: "Heal".to_string()
            }]
        );
    }

    #[test]
    fn draw_places_links_icons_and_marker() {
        let mut w = window(scenario_nodes());
        w.set_active(true);
        w.update(&MenuInput::NONE);

        let mut gfx = Recorder::default();
        w.draw(&mut gfx);
        assert_eq!(
            gfx.calls,
            vec![
                Call::Line {
                    from: Vec2f::new(612.0, 283.0),
                    to: Vec2f::new(512.0, 283.0),
                    width: 5.0,
                    color: [128, 128, 128, 255],
                    alpha: 51,
                },
                Call::Image {
                    x: 507,
                    y: 278,
                    w: 10,
                    h: 10
                },
                // Marker: (-9/3, -10 - 6) from the selected node's center.
                Call::Image {
                    x: 509,
                    y: 267,
                    w: 9,
                    h: 6
                },
                Call::Image {
                    x: 607,
                    y: 278,
                    w: 10,
                    h: 10
                },
            ]
        );
    }

    #[test]
    fn missing_pointer_is_tolerated() {
        let mut w = window_with(vec![node(0, 0.0, 0.0)], MemoryImages::new());
        assert!(!w.has_location_pointer());

        w.set_active(true);
        w.update(&MenuInput::NONE);
        let mut gfx = Recorder::default();
        w.draw(&mut gfx);
        assert_eq!(
            gfx.calls,
            vec![Call::Image {
                x: 507,
                y: 278,
                w: 10,
                h: 10
            }]
        );
    }

    #[test]
    fn empty_graph_leaves_the_view_uninitialized() {
        let mut w = window(Vec::new());
        w.set_active(true);

        assert_eq!(w.selected_node(), None);
        assert_eq!(w.view_offset(), None);
        assert!(w.displayed_nodes().is_empty());
        assert!(w.displayed_links().is_empty());

        w.update_skill_tree_view();
        w.update(&MenuInput::right());
        assert_eq!(w.selected_node(), None);
        assert!(w.displayed_nodes().is_empty());

        let mut gfx = Recorder::default();
        w.draw(&mut gfx);
        w.draw_bottom_window(&mut gfx);
        assert!(gfx.calls.is_empty());
    }

    #[test]
    fn graph_without_root_is_treated_as_empty() {
        let mut w = window(vec![node(5, 0.0, 0.0)]);
        w.set_active(true);
        assert_eq!(w.selected_node(), None);
        assert_eq!(w.view_offset(), None);
    }

    #[test]
    fn losing_the_root_empties_previous_caches() {
        let mut w = window(scenario_nodes());
        w.set_active(true);
        assert!(!w.displayed_nodes().is_empty());

        let empty: Rc<dyn SkillGraph> = Rc::new(SkillTree::default());
        w.graph = empty;
        w.reset_skill_tree_view();
        assert_eq!(w.view_offset(), None);
        assert!(w.displayed_nodes().is_empty());
        assert!(w.displayed_links().is_empty());
    }

    #[test]
    fn set_character_rebinds_and_recenters_on_root() {
        let mut w = window(row_of(4));
        w.set_active(true);
        w.update(&MenuInput::right());
        w.update(&MenuInput::right());

        let ayla = Character::new(7, "Ayla", Image::solid(2, 3, [0, 0, 255, 255]));
        w.set_character(&ayla);

        assert_eq!(w.selected_character(), Some(7));
        assert_eq!(w.character_icon().map(|i| (i.width(), i.height())), Some((2, 3)));
        assert_eq!(w.selected_node(), Some(0));
        assert_eq!(w.view_offset(), Some(Vec2f::ZERO));
    }

    #[test]
    fn reset_falls_back_to_root_for_a_dangling_selection() {
        let mut w = window(vec![node(0, 0.0, 0.0), node(1, 60.0, 0.0)]);
        w.set_character(&Character::new(1, "Bren", Image::solid(1, 1, [0, 0, 0, 255])));
        w.set_active(true);
        w.update(&MenuInput::right());
        w.update(&MenuInput::right());
        assert_eq!(w.selected_node(), Some(2));

        // With a bound character activation keeps the selection; node 2 does not exist.
        w.set_active(true);
        assert_eq!(w.selected_node(), Some(0));
        assert_eq!(w.view_offset(), Some(Vec2f::ZERO));
    }
}
