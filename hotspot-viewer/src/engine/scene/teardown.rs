use bevy::prelude::*;

use crate::engine::camera::camera_motion::CameraMotion;
use crate::engine::core::app_state::AppState;
use crate::engine::loading::floor_loader::FloorLoad;
use crate::engine::scene::skybox::SkyboxState;
use crate::engine::scene::viewer_scene::ViewerScene;
use crate::tools::hotspots::state::{HighlightLayer, HotspotRegistry, HoverState};

/// Request disposal of everything the viewer created.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ViewerTeardown;

/// Despawn the viewer's entities, release its material and reset interaction state.
///
/// Safe in any state: a floor still loading is despawned with its pending
/// scene, so the late spawn never attaches to a disposed viewer.
pub fn teardown_viewer(
    mut teardowns: EventReader<ViewerTeardown>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
    mut commands: Commands,
    mut viewer_scene: ResMut<ViewerScene>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut skybox_state: ResMut<SkyboxState>,
    mut motion: ResMut<CameraMotion>,
    mut registry: ResMut<HotspotRegistry>,
    mut highlight: ResMut<HighlightLayer>,
    mut hover: ResMut<HoverState>,
) {
    if teardowns.read().count() == 0 {
        return;
    }
    if *state.get() == AppState::Disposed {
        debug!("Viewer already disposed");
        return;
    }

    let entities = viewer_scene.take_all();
    info!("Tearing down viewer: {} root entities", entities.len());
    for entity in entities {
        commands.entity(entity).despawn();
    }
    commands.remove_resource::<FloorLoad>();

    skybox_state.dispose(&mut materials);
    motion.reset();
    registry.clear();
    highlight.clear();
    hover.clear();

    next_state.set(AppState::Disposed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::skybox::skybox_material;
    use bevy::state::app::StatesPlugin;

    #[test]
    fn teardown_disposes_everything_and_enters_disposed() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_state::<AppState>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<SkyboxState>()
            .init_resource::<CameraMotion>()
            .init_resource::<HotspotRegistry>()
            .init_resource::<HighlightLayer>()
            .init_resource::<HoverState>()
            .add_event::<ViewerTeardown>()
            .add_systems(Update, teardown_viewer);

        let world = app.world_mut();
        let camera = world.spawn(Name::new("Camera")).id();
        let skybox = world.spawn(Name::new("skyBox")).id();
        let floor = world.spawn(Name::new("Floor")).id();
        let floor_child = world.spawn((Name::new("Deck"), ChildOf(floor))).id();
        let engine = world.spawn(Name::new("Engine")).id();
        world.insert_resource(ViewerScene {
            camera: Some(camera),
            skybox: Some(skybox),
            floor_root: Some(floor),
        });

        let material = world
            .resource_mut::<Assets<StandardMaterial>>()
            .add(skybox_material(Handle::default()));
        world.resource_mut::<SkyboxState>().material = Some(material);
        world.resource_mut::<CameraMotion>().seek(Vec3::ONE);
        world.resource_mut::<HotspotRegistry>().register("Engine", engine);
        world.resource_mut::<HighlightLayer>().add(engine);

        world.send_event(ViewerTeardown);
        app.update();
        app.update();

        let world = app.world();
        for entity in [camera, skybox, floor, floor_child] {
            assert!(world.get_entity(entity).is_err(), "{entity} survived teardown");
        }
        assert!(world.get_entity(engine).is_ok());
        assert_eq!(world.resource::<Assets<StandardMaterial>>().len(), 0);
        assert!(world.resource::<SkyboxState>().material.is_none());
        assert!(!world.resource::<CameraMotion>().is_seeking());
        assert!(world.resource::<HotspotRegistry>().is_empty());
        assert!(world.resource::<HighlightLayer>().is_empty());
        assert_eq!(*world.resource::<State<AppState>>().get(), AppState::Disposed);
    }

    #[test]
    fn teardown_while_loading_cancels_the_floor() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .insert_state(AppState::Loading)
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<SkyboxState>()
            .init_resource::<CameraMotion>()
            .init_resource::<HotspotRegistry>()
            .init_resource::<HighlightLayer>()
            .init_resource::<HoverState>()
            .add_event::<ViewerTeardown>()
            .add_systems(Update, teardown_viewer);

        let world = app.world_mut();
        let floor = world.spawn(Name::new("Floor")).id();
        world.insert_resource(ViewerScene {
            floor_root: Some(floor),
            ..default()
        });
        world.insert_resource(FloorLoad {
            handle: Handle::default(),
            path: "meshes/Floor.glb".into(),
            started_at: 0.0,
        });

        world.send_event(ViewerTeardown);
        app.update();
        app.update();

        let world = app.world();
        assert!(world.get_entity(floor).is_err());
        assert!(!world.contains_resource::<FloorLoad>());
        assert!(world.resource::<ViewerScene>().floor_root.is_none());
        assert_eq!(*world.resource::<State<AppState>>().get(), AppState::Disposed);
    }
}
