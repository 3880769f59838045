pub const VIEWER_CONFIG_PATH: &str = "viewer.json";

pub const FLOOR_MESH_PATH: &str = "meshes/Floor.glb";

/// Directory holding the per-hotspot panorama textures.
pub const SKYBOX_TEXTURE_BASE: &str = "textures";
pub const SKYBOX_TEXTURE_EXTENSION: &str = "jpg";
pub const DEFAULT_SKYBOX_TEXTURE: &str = "Circle";
