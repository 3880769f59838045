use bevy::prelude::*;

use crate::engine::camera::camera_motion::CameraMotion;
use crate::engine::config::viewer_config::ViewerConfig;
use crate::engine::scene::skybox::SkyboxTextureRequest;
use crate::tools::hotspots::state::{
    HighlightLayer, Hotspot, HotspotPicked, HotspotPointerEvent, HotspotSelected,
};

/// Camera target for a hotspot: its world position raised by `height_offset`.
pub fn hotspot_camera_target(world_position: Vec3, height_offset: f32) -> Vec3 {
    world_position + Vec3::Y * height_offset
}

/// Point the camera at each picked hotspot and swap the skybox to its panorama.
pub fn handle_hotspot_picks(
    mut picks: EventReader<HotspotPicked>,
    hotspots: Query<(&Hotspot, &GlobalTransform)>,
    config: Res<ViewerConfig>,
    mut motion: ResMut<CameraMotion>,
    mut skybox_requests: EventWriter<SkyboxTextureRequest>,
    mut selected: EventWriter<HotspotSelected>,
) {
    for pick in picks.read() {
        let Ok((hotspot, xf)) = hotspots.get(pick.hotspot) else {
            warn!("Picked entity {} is not a hotspot", pick.hotspot);
            continue;
        };

        let target = hotspot_camera_target(xf.translation(), config.hotspot_height_offset);
        info!("Hotspot '{}' picked, camera target {}", hotspot.name, target);

        motion.seek(target);
        skybox_requests.write(SkyboxTextureRequest {
            texture: Some(hotspot.texture_name().to_string()),
        });
        selected.write(HotspotSelected {
            name: hotspot.name.clone(),
            target,
        });
    }
}

pub fn handle_hotspot_hover(
    mut pointer_events: EventReader<HotspotPointerEvent>,
    mut highlight: ResMut<HighlightLayer>,
) {
    for event in pointer_events.read() {
        match *event {
            HotspotPointerEvent::Enter(hotspot) => {
                if highlight.add(hotspot) {
                    debug!("Highlight on {}", hotspot);
                }
            }
            HotspotPointerEvent::Exit(hotspot) => {
                if highlight.remove(hotspot) {
                    debug!("Highlight off {}", hotspot);
                }
            }
        }
    }
}
