/// Fraction of the remaining distance the camera closes every frame while seeking a hotspot.
pub const CAMERA_BLEND_FACTOR: f32 = 0.04;

/// Distance below which a seeking camera snaps onto its target and becomes idle.
pub const CAMERA_ARRIVAL_EPSILON: f32 = 0.01;

/// Height added above a hotspot's world position when it becomes the camera target.
pub const HOTSPOT_HEIGHT_OFFSET: f32 = 50.0;

/// Initial camera position, matching the free camera's mount position.
pub const CAMERA_START: [f32; 3] = [0.0, 10.0, 0.0];

/// Floor root placement applied once the floor scene is spawned.
pub const FLOOR_OFFSET: [f32; 3] = [0.0, -40.0, 0.0];
pub const FLOOR_SCALE: [f32; 3] = [50.0, 1.0, 50.0];

pub const SKYBOX_DIAMETER: f32 = 500.0;

/// Ambient light intensity in the 0..1 range used by the viewer config.
pub const LIGHT_INTENSITY: f32 = 0.4;

/// Scales the 0..1 ambient intensity to Bevy's ambient brightness units.
pub const AMBIENT_BRIGHTNESS_SCALE: f32 = 1000.0;

/// Seconds to wait for the floor mesh before giving up on it.
pub const FLOOR_LOAD_TIMEOUT_SECS: f32 = 30.0;

/// Pointer travel in pixels after which a press counts as a drag rather than a pick.
pub const PICK_DRAG_THRESHOLD: f32 = 5.0;

pub const FREE_CAMERA_LOOK_SENSITIVITY: f32 = 0.0035;
pub const FREE_CAMERA_DOLLY_SPEED: f32 = 2.0;

// Arc-rotate defaults: alpha is the azimuth, beta the polar angle from +Y.
pub const ARC_ROTATE_ALPHA: f32 = -std::f32::consts::FRAC_PI_2;
pub const ARC_ROTATE_BETA: f32 = std::f32::consts::PI / 2.5;
pub const ARC_ROTATE_RADIUS: f32 = 120.0;
pub const ARC_ROTATE_MIN_RADIUS: f32 = 5.0;
pub const ARC_ROTATE_MAX_RADIUS: f32 = 240.0;
pub const ARC_ROTATE_ORBIT_SENSITIVITY: f32 = 0.005;
pub const ARC_ROTATE_ZOOM_SPEED: f32 = 4.0;
