use bevy::pbr::wireframe::{Wireframe, WireframeColor};
use bevy::prelude::*;

use crate::constants::render_settings::HIGHLIGHT_COLOUR;
use crate::tools::hotspots::state::{HighlightLayer, HotspotPart};

/// Outline the parts of highlighted hotspots with a wireframe.
pub fn sync_highlight_wireframes(
    highlight: Res<HighlightLayer>,
    parts: Query<(Entity, &HotspotPart, Has<Wireframe>)>,
    mut commands: Commands,
) {
    if !highlight.is_changed() {
        return;
    }

    for (entity, part, outlined) in &parts {
        let wanted = highlight.contains(part.hotspot);
        if wanted && !outlined {
            commands.entity(entity).insert((
                Wireframe,
                WireframeColor {
                    color: HIGHLIGHT_COLOUR,
                },
            ));
        } else if !wanted && outlined {
            commands.entity(entity).remove::<(Wireframe, WireframeColor)>();
        }
    }
}
