use bevy::prelude::*;

use crate::constants::render_settings::{SKYBOX_SECTORS, SKYBOX_STACKS};
use crate::engine::config::viewer_config::ViewerConfig;
use crate::engine::scene::viewer_scene::ViewerScene;

#[derive(Component)]
pub struct SkyboxSphere;

/// Ask for a new skybox panorama. `None` restores the default texture.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SkyboxTextureRequest {
    pub texture: Option<String>,
}

/// The skybox's current material and disposal bookkeeping.
#[derive(Resource, Default, Debug)]
pub struct SkyboxState {
    pub material: Option<Handle<StandardMaterial>>,
    pub texture_path: Option<String>,
    pub swaps: u32,
    pub disposed: u32,
}

impl SkyboxState {
    /// Build a material for `texture`, disposing the one it replaces.
    pub fn swap_material(
        &mut self,
        materials: &mut Assets<StandardMaterial>,
        texture: Handle<Image>,
        texture_path: String,
    ) -> Handle<StandardMaterial> {
        self.dispose(materials);
        let material = materials.add(skybox_material(texture));
        self.material = Some(material.clone());
        self.texture_path = Some(texture_path);
        self.swaps += 1;
        material
    }

    /// Remove the current material from the store, if any.
    pub fn dispose(&mut self, materials: &mut Assets<StandardMaterial>) {
        if let Some(previous) = self.material.take() {
            if materials.remove(&previous).is_some() {
                self.disposed += 1;
            }
        }
    }
}

/// Unlit and double-sided, so the panorama is visible from inside the sphere.
///
/// U is mirrored: seen from inside, the sphere's UVs would otherwise show the
/// panorama flipped left to right.
pub fn skybox_material(texture: Handle<Image>) -> StandardMaterial {
    StandardMaterial {
        base_color_texture: Some(texture),
        unlit: true,
        cull_mode: None,
        uv_transform: StandardMaterial::FLIP_HORIZONTAL,
        ..default()
    }
}

pub fn spawn_skybox(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<ViewerConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut skybox_state: ResMut<SkyboxState>,
    mut viewer_scene: ResMut<ViewerScene>,
) {
    let texture_path = config.assets.skybox_texture_path(None);
    info!("Skybox texture: {}", texture_path);

    let texture = asset_server.load(texture_path.clone());
    let material = skybox_state.swap_material(&mut materials, texture, texture_path);
    let mesh = Sphere::new(config.skybox_diameter / 2.0)
        .mesh()
        .uv(SKYBOX_SECTORS, SKYBOX_STACKS);

    let skybox = commands
        .spawn((
            Name::new("skyBox"),
            SkyboxSphere,
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(material),
            Transform::default(),
        ))
        .id();
    viewer_scene.skybox = Some(skybox);
}

/// Apply the latest texture request of the frame. Earlier ones are superseded.
pub fn apply_skybox_requests(
    mut requests: EventReader<SkyboxTextureRequest>,
    asset_server: Res<AssetServer>,
    config: Res<ViewerConfig>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut skybox_state: ResMut<SkyboxState>,
    mut skyboxes: Query<&mut MeshMaterial3d<StandardMaterial>, With<SkyboxSphere>>,
) {
    let Some(request) = requests.read().last() else {
        return;
    };
    let Ok(mut skybox_material) = skyboxes.single_mut() else {
        warn!("Skybox texture requested but no skybox exists");
        return;
    };

    let texture_path = config.assets.skybox_texture_path(request.texture.as_deref());
    info!("Swapping skybox texture to {}", texture_path);

    let texture = asset_server.load(texture_path.clone());
    skybox_material.0 = skybox_state.swap_material(&mut materials, texture, texture_path);
}
