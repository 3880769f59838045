use bevy::prelude::*;

use crate::constants::scene_graph::GROUND_NAME_FRAGMENT;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::viewer_scene::ViewerScene;

pub fn is_ground_name(name: &str) -> bool {
    name.to_lowercase().contains(GROUND_NAME_FRAGMENT)
}

/// Hide the floor asset's ground plane once the scene has spawned.
pub fn prepare_floor(
    mut loading_progress: ResMut<LoadingProgress>,
    viewer_scene: Res<ViewerScene>,
    children: Query<&Children>,
    names: Query<&Name>,
    mut commands: Commands,
) {
    if !loading_progress.floor_spawned || loading_progress.floor_prepared {
        return;
    }
    let Some(root) = viewer_scene.floor_root else {
        return;
    };

    let mut hidden = 0;
    for entity in children.iter_descendants(root) {
        if names.get(entity).is_ok_and(|name| is_ground_name(name.as_str())) {
            commands.entity(entity).insert(Visibility::Hidden);
            hidden += 1;
        }
    }

    if hidden == 0 {
        debug!("Floor has no ground node to hide");
    } else {
        info!("Hid {} ground node(s) on the floor", hidden);
    }
    loading_progress.floor_prepared = true;
}
