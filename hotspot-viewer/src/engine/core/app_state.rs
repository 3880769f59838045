use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;
use crate::rpc::web_rpc::WebRpcInterface;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States, Resource)]
pub enum AppState {
    /// Waiting for `viewer.json` (or its absence) before building the scene.
    #[default]
    Configuring,
    /// Camera, light and skybox exist; the floor mesh is loading.
    Loading,
    /// Floor settled (loaded, failed or timed out); interaction is live.
    Running,
    /// Torn down; nothing renders or reacts any more.
    Disposed,
}

impl AppState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppState::Configuring => "configuring",
            AppState::Loading => "loading",
            AppState::Running => "running",
            AppState::Disposed => "disposed",
        }
    }
}

#[derive(Component)]
pub struct FpsText;

/// Run condition: the scene exists and has not been torn down.
pub fn viewer_active(state: Res<State<AppState>>) -> bool {
    matches!(state.get(), AppState::Loading | AppState::Running)
}

/// Leave `Loading` once the floor is either prepared or given up on.
pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.is_settled() {
        match &loading_progress.error {
            Some(err) => warn!("→ Running without floor: {err}"),
            None => info!("→ Floor ready, transitioning to Running state"),
        }
        next_state.set(AppState::Running);
    }
}

/// Tell the host page which lifecycle state the viewer is in.
pub fn update_loading_frontend(
    state: Res<State<AppState>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if state.is_changed() {
        rpc_interface.send_notification(
            "loading_state",
            serde_json::json!({ "state": state.get().as_str() }),
        );
    }
}
