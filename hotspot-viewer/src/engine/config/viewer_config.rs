use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::path::{
    DEFAULT_SKYBOX_TEXTURE, FLOOR_MESH_PATH, SKYBOX_TEXTURE_BASE, SKYBOX_TEXTURE_EXTENSION,
};
use crate::constants::viewer_defaults::*;
use crate::engine::error::{ViewerError, ViewerResult};

/// Which camera the viewer spawns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    /// Mouse-look camera whose position is animated towards picked hotspots.
    #[default]
    Free,
    /// Orbit camera whose focus point is animated towards picked hotspots.
    ArcRotate,
}

/// Asset locations, relative to the asset root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub floor_mesh: String,
    pub texture_base: String,
    pub texture_extension: String,
    pub default_texture: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            floor_mesh: FLOOR_MESH_PATH.to_string(),
            texture_base: SKYBOX_TEXTURE_BASE.to_string(),
            texture_extension: SKYBOX_TEXTURE_EXTENSION.to_string(),
            default_texture: DEFAULT_SKYBOX_TEXTURE.to_string(),
        }
    }
}

impl AssetPaths {
    /// Panorama path for a hotspot texture name, or the default panorama when `None`.
    ///
    /// `Some("Engine")` resolves to `<texture_base>/Engine.<texture_extension>`.
    pub fn skybox_texture_path(&self, texture: Option<&str>) -> String {
        let name = texture.unwrap_or(&self.default_texture);
        format!(
            "{}/{}.{}",
            self.texture_base.trim_end_matches('/'),
            name,
            self.texture_extension
        )
    }
}

/// Placement applied to the floor scene root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorPlacement {
    pub offset: [f32; 3],
    pub scale: [f32; 3],
}

impl Default for FloorPlacement {
    fn default() -> Self {
        Self {
            offset: FLOOR_OFFSET,
            scale: FLOOR_SCALE,
        }
    }
}

impl FloorPlacement {
    pub fn transform(&self) -> Transform {
        Transform::from_translation(Vec3::from_array(self.offset))
            .with_scale(Vec3::from_array(self.scale))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreeCameraSettings {
    pub look_sensitivity: f32,
    pub dolly_speed: f32,
}

impl Default for FreeCameraSettings {
    fn default() -> Self {
        Self {
            look_sensitivity: FREE_CAMERA_LOOK_SENSITIVITY,
            dolly_speed: FREE_CAMERA_DOLLY_SPEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcRotateSettings {
    pub alpha: f32,
    pub beta: f32,
    pub radius: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub orbit_sensitivity: f32,
    pub zoom_speed: f32,
}

impl Default for ArcRotateSettings {
    fn default() -> Self {
        Self {
            alpha: ARC_ROTATE_ALPHA,
            beta: ARC_ROTATE_BETA,
            radius: ARC_ROTATE_RADIUS,
            min_radius: ARC_ROTATE_MIN_RADIUS,
            max_radius: ARC_ROTATE_MAX_RADIUS,
            orbit_sensitivity: ARC_ROTATE_ORBIT_SENSITIVITY,
            zoom_speed: ARC_ROTATE_ZOOM_SPEED,
        }
    }
}

/// Complete viewer configuration as a Bevy asset. Mirrors `viewer.json`.
#[derive(Asset, TypePath, Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub camera: CameraMode,
    pub hotspots: bool,
    pub blend_factor: f32,
    pub arrival_epsilon: f32,
    pub hotspot_height_offset: f32,
    pub load_timeout_secs: f32,
    pub camera_start: [f32; 3],
    pub light_intensity: f32,
    pub skybox_diameter: f32,
    pub assets: AssetPaths,
    pub floor: FloorPlacement,
    pub free_camera: FreeCameraSettings,
    pub arc_rotate: ArcRotateSettings,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            camera: CameraMode::Free,
            hotspots: true,
            blend_factor: CAMERA_BLEND_FACTOR,
            arrival_epsilon: CAMERA_ARRIVAL_EPSILON,
            hotspot_height_offset: HOTSPOT_HEIGHT_OFFSET,
            load_timeout_secs: FLOOR_LOAD_TIMEOUT_SECS,
            camera_start: CAMERA_START,
            light_intensity: LIGHT_INTENSITY,
            skybox_diameter: SKYBOX_DIAMETER,
            assets: AssetPaths::default(),
            floor: FloorPlacement::default(),
            free_camera: FreeCameraSettings::default(),
            arc_rotate: ArcRotateSettings::default(),
        }
    }
}

impl ViewerConfig {
    /// Reject values that would stall or destabilise the camera motion.
    pub fn validate(&self) -> ViewerResult<()> {
        if !(self.blend_factor > 0.0 && self.blend_factor <= 1.0) {
            return Err(ViewerError::InvalidConfig(format!(
                "blend_factor must be in (0, 1], got {}",
                self.blend_factor
            )));
        }
        if !(self.arrival_epsilon > 0.0) {
            return Err(ViewerError::InvalidConfig(format!(
                "arrival_epsilon must be positive, got {}",
                self.arrival_epsilon
            )));
        }
        if !(self.load_timeout_secs > 0.0) {
            return Err(ViewerError::InvalidConfig(format!(
                "load_timeout_secs must be positive, got {}",
                self.load_timeout_secs
            )));
        }
        if !(self.skybox_diameter > 0.0) {
            return Err(ViewerError::InvalidConfig(format!(
                "skybox_diameter must be positive, got {}",
                self.skybox_diameter
            )));
        }
        let arc = &self.arc_rotate;
        if !(arc.min_radius > 0.0 && arc.min_radius <= arc.max_radius) {
            return Err(ViewerError::InvalidConfig(format!(
                "arc_rotate radius bounds [{}, {}] are not ordered and positive",
                arc.min_radius, arc.max_radius
            )));
        }
        Ok(())
    }

    pub fn camera_start(&self) -> Vec3 {
        Vec3::from_array(self.camera_start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let config: ViewerConfig = serde_json::from_str(
            r#"{ "camera": "arc_rotate", "hotspots": false, "assets": { "texture_base": "panoramas" } }"#,
        )
        .unwrap();

        assert_eq!(config.camera, CameraMode::ArcRotate);
        assert!(!config.hotspots);
        assert_eq!(config.blend_factor, CAMERA_BLEND_FACTOR);
        assert_eq!(config.assets.texture_base, "panoramas");
        assert_eq!(config.assets.default_texture, DEFAULT_SKYBOX_TEXTURE);
        assert_eq!(config.floor, FloorPlacement::default());
    }

    #[test]
    fn hotspot_name_maps_to_texture_path() {
        let paths = AssetPaths::default();
        assert_eq!(paths.skybox_texture_path(Some("Engine")), "textures/Engine.jpg");
        assert_eq!(paths.skybox_texture_path(None), "textures/Circle.jpg");
    }

    #[test]
    fn trailing_slash_in_base_is_not_doubled() {
        let paths = AssetPaths {
            texture_base: "textures/".into(),
            ..default()
        };
        assert_eq!(paths.skybox_texture_path(Some("Bridge")), "textures/Bridge.jpg");
    }

    #[test]
    fn defaults_are_valid() {
        assert_eq!(ViewerConfig::default().validate(), Ok(()));
    }

    #[test]
    fn blend_factor_outside_unit_interval_is_rejected() {
        for blend_factor in [0.0, -0.5, 1.5, f32::NAN] {
            let config = ViewerConfig {
                blend_factor,
                ..default()
            };
            assert!(matches!(
                config.validate(),
                Err(ViewerError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn inverted_orbit_radius_bounds_are_rejected() {
        let config = ViewerConfig {
            arc_rotate: ArcRotateSettings {
                min_radius: 50.0,
                max_radius: 10.0,
                ..default()
            },
            ..default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn floor_placement_builds_offset_and_scale() {
        let transform = FloorPlacement::default().transform();
        assert_eq!(transform.translation, Vec3::new(0.0, -40.0, 0.0));
        assert_eq!(transform.scale, Vec3::new(50.0, 1.0, 50.0));
    }
}
