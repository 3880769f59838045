/// Exact name of the floor node whose children are the clickable hotspots.
pub const HOTSPOT_GROUP_NAME: &str = "Hotspots";

/// Case-insensitive fragment identifying floor nodes hidden after load.
pub const GROUND_NAME_FRAGMENT: &str = "ground";
