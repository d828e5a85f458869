pub mod scene;
pub mod session;

pub use scene::{
    InitialPlacement, PlayArea, SceneAssets, relayout_on_resize, run_initial_placement,
    setup_scene,
};
pub use session::setup_session;
