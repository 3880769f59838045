use bevy::prelude::*;

use crate::constants::scene_graph::HOTSPOT_GROUP_NAME;
use crate::engine::config::viewer_config::ViewerConfig;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::viewer_scene::ViewerScene;
use crate::tools::hotspots::state::{Hotspot, HotspotPart, HotspotRegistry, HotspotsReady};

/// Find the floor's `Hotspots` group node, searching breadth first.
pub fn find_hotspot_group(root: Entity, children: &Query<&Children>, names: &Query<&Name>) -> Option<Entity> {
    std::iter::once(root)
        .chain(children.iter_descendants(root))
        .find(|entity| names.get(*entity).is_ok_and(|name| name.as_str() == HOTSPOT_GROUP_NAME))
}

/// Tag the children of the `Hotspots` group as hotspots and their meshes as pickable parts.
///
/// Runs once per floor load. A floor without the group, or with an empty one,
/// finishes discovery with no hotspots and leaves interaction inert.
pub fn discover_hotspots(
    mut loading_progress: ResMut<LoadingProgress>,
    mut registry: ResMut<HotspotRegistry>,
    config: Res<ViewerConfig>,
    viewer_scene: Res<ViewerScene>,
    children: Query<&Children>,
    parents: Query<&ChildOf>,
    names: Query<&Name>,
    meshes: Query<(), With<Mesh3d>>,
    mut commands: Commands,
    mut ready: EventWriter<HotspotsReady>,
) {
    if !loading_progress.floor_prepared || loading_progress.is_settled() {
        return;
    }
    loading_progress.hotspots_discovered = true;
    registry.clear();

    let group = match viewer_scene.floor_root {
        Some(root) if config.hotspots => find_hotspot_group(root, &children, &names),
        Some(_) => {
            info!("Hotspots disabled by config");
            None
        }
        None => None,
    };
    let Some(group) = group else {
        if config.hotspots {
            info!("Floor has no '{}' node; hotspots are inert", HOTSPOT_GROUP_NAME);
        }
        ready.write(HotspotsReady { names: Vec::new() });
        return;
    };

    let nodes: Vec<Entity> = children
        .iter_descendants(group)
        .filter(|entity| parents.get(*entity).is_ok_and(|p| p.parent() == group))
        .collect();

    for node in nodes {
        let Ok(name) = names.get(node) else {
            debug!("Skipping unnamed hotspot node {node}");
            continue;
        };

        let parts: Vec<Entity> = std::iter::once(node)
            .chain(children.iter_descendants(node))
            .filter(|entity| meshes.contains(*entity))
            .collect();
        if parts.is_empty() {
            debug!("Hotspot '{}' has no mesh to pick", name);
            continue;
        }

        commands.entity(node).insert(Hotspot {
            name: name.to_string(),
        });
        for part in parts {
            commands.entity(part).insert(HotspotPart { hotspot: node });
        }
        registry.register(name.as_str(), node);
    }

    info!("✓ Discovered {} hotspot(s): {:?}", registry.len(), registry.names());
    ready.write(HotspotsReady {
        names: registry.names(),
    });
}
