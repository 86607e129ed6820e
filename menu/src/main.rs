use std::{error::Error, rc::Rc, time::Duration};

use engine::{
    app::{AppConfig, AppContext, GameApp, InputFrame, run_game},
    graphics::Renderer2d,
};
use winit::dpi::PhysicalSize;

use skilltree_menu::{
    SkillTreeWindow,
    assets::AssetDir,
    character::load_party,
    scene::SkillTreeScene,
    settings::SettingsStore,
    skill_catalog::JsonSkillCatalog,
    skill_tree::SkillTree,
};

const WINDOW_WIDTH: u32 = 1024;
const WINDOW_HEIGHT: u32 = 768;

/// The scene is built before the event loop so load errors surface from `main`; the loop's
/// per-run state is therefore empty.
struct SkillTreeApp {
    scene: SkillTreeScene,
}

impl GameApp for SkillTreeApp {
    type State = ();

    fn init_state(&mut self, ctx: &mut AppContext) -> Self::State {
        log::debug!(
            "surface {}x{}",
            ctx.surface_size.width,
            ctx.surface_size.height
        );
    }

    fn update_state(
        &mut self,
        _state: &mut Self::State,
        input: &InputFrame,
        _dt: Duration,
        _ctx: &mut AppContext,
    ) {
        self.scene.handle_frame(input);
    }

    fn render(&mut self, _state: &Self::State, renderer: &mut dyn Renderer2d) {
        self.scene.render(renderer);
    }
}

fn build_scene() -> Result<SkillTreeScene, Box<dyn Error>> {
    let store = SettingsStore::from_env();
    let settings = store.load();
    log::info!("settings: {}", store.path().display());

    let assets = AssetDir::from_env();
    log::info!("assets: {}", assets.root().display());

    let graph = SkillTree::load(assets.path("skill_tree.json"), &assets)?;
    let catalog = JsonSkillCatalog::load(assets.path("skills.json"))?;
    let party = load_party(assets.path("party.json"), &assets)?;

    let window = SkillTreeWindow::new(
        Rc::new(graph),
        Rc::new(catalog),
        Rc::new(assets),
        settings,
    );
    Ok(SkillTreeScene::new(window, party))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let scene = build_scene()?;
    let config = AppConfig {
        title: "Skill Tree".to_string(),
        desired_size: PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT),
        clamp_to_monitor: true,
    };
    run_game(config, SkillTreeApp { scene })
}
