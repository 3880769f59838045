/// Default tuning values for camera motion, floor placement and skybox geometry.
pub mod viewer_defaults;

/// Node names the floor asset is expected to contain.
pub mod scene_graph;

/// Asset locations relative to the asset root.
pub mod path;

/// Highlight and picking presentation values.
pub mod render_settings;
