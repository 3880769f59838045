use std::collections::HashSet;

use bevy::prelude::*;

use crate::constants::viewer_defaults::PICK_DRAG_THRESHOLD;

/// A clickable child of the floor's `Hotspots` node.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Hotspot {
    pub name: String,
}

impl Hotspot {
    /// Panorama shown when this hotspot is picked; the node name is the texture name.
    pub fn texture_name(&self) -> &str {
        &self.name
    }
}

/// Mesh entity belonging to a hotspot. Picking and highlighting work on parts.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct HotspotPart {
    pub hotspot: Entity,
}

/// Hotspots in scene order, discovered once per floor load.
#[derive(Resource, Default, Debug)]
pub struct HotspotRegistry {
    entries: Vec<(String, Entity)>,
}

impl HotspotRegistry {
    pub fn register(&mut self, name: impl Into<String>, hotspot: Entity) {
        self.entries.push((name.into(), hotspot));
    }

    /// First hotspot with this name.
    pub fn get(&self, name: &str) -> Option<Entity> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, hotspot)| *hotspot)
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Set of hotspots currently outlined. A hotspot appears at most once.
#[derive(Resource, Default, Debug)]
pub struct HighlightLayer {
    nodes: HashSet<Entity>,
}

impl HighlightLayer {
    /// Returns false if the hotspot was already highlighted.
    pub fn add(&mut self, hotspot: Entity) -> bool {
        self.nodes.insert(hotspot)
    }

    pub fn remove(&mut self, hotspot: Entity) -> bool {
        self.nodes.remove(&hotspot)
    }

    pub fn contains(&self, hotspot: Entity) -> bool {
        self.nodes.contains(&hotspot)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

/// Pointer tracking between frames.
#[derive(Resource, Default, Debug)]
pub struct HoverState {
    pub current: Option<Entity>,
    pub pressed_on: Option<Entity>,
    pub dragged: f32,
}

impl HoverState {
    /// Move the hover to `hovered`, returning the exit then enter events it causes.
    pub fn update(&mut self, hovered: Option<Entity>) -> [Option<HotspotPointerEvent>; 2] {
        if self.current == hovered {
            return [None, None];
        }
        let exit = self.current.map(HotspotPointerEvent::Exit);
        let enter = hovered.map(HotspotPointerEvent::Enter);
        self.current = hovered;
        [exit, enter]
    }

    pub fn press(&mut self, hovered: Option<Entity>) {
        self.pressed_on = hovered;
        self.dragged = 0.0;
    }

    /// Record pointer travel while the button is held.
    pub fn drag(&mut self, distance: f32) {
        if self.pressed_on.is_some() {
            self.dragged += distance;
        }
    }

    /// A pick is a press and release over the same hotspot without dragging in between.
    pub fn release(&mut self, hovered: Option<Entity>) -> Option<Entity> {
        let pressed_on = self.pressed_on.take();
        let dragged = std::mem::take(&mut self.dragged);
        if dragged > PICK_DRAG_THRESHOLD {
            return None;
        }
        hovered.filter(|hotspot| pressed_on == Some(*hotspot))
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.pressed_on = None;
        self.dragged = 0.0;
    }
}

/// Left-click on a hotspot, from the pointer or the host page.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HotspotPicked {
    pub hotspot: Entity,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotspotPointerEvent {
    Enter(Entity),
    Exit(Entity),
}

/// Discovery finished; empty when the floor has no usable hotspots.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct HotspotsReady {
    pub names: Vec<String>,
}

/// A pick was applied: the camera is seeking `target`.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct HotspotSelected {
    pub name: String,
    pub target: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(count: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..count).map(|_| world.spawn_empty().id()).collect()
    }

    #[test]
    fn repeated_enter_keeps_one_highlight_entry() {
        let hotspot = entities(1)[0];
        let mut layer = HighlightLayer::default();

        assert!(layer.add(hotspot));
        assert!(!layer.add(hotspot));
        assert!(!layer.add(hotspot));
        assert_eq!(layer.len(), 1);

        assert!(layer.remove(hotspot));
        assert!(layer.is_empty());
    }

    #[test]
    fn exit_removes_only_that_hotspot() {
        let ids = entities(2);
        let mut layer = HighlightLayer::default();
        layer.add(ids[0]);
        layer.add(ids[1]);

        layer.remove(ids[0]);

        assert!(!layer.contains(ids[0]));
        assert!(layer.contains(ids[1]));
    }

    #[test]
    fn hover_moves_emit_exit_before_enter() {
        let ids = entities(2);
        let mut hover = HoverState::default();

        assert_eq!(hover.update(Some(ids[0])), [None, Some(HotspotPointerEvent::Enter(ids[0]))]);
        assert_eq!(hover.update(Some(ids[0])), [None, None]);
        assert_eq!(
            hover.update(Some(ids[1])),
            [
                Some(HotspotPointerEvent::Exit(ids[0])),
                Some(HotspotPointerEvent::Enter(ids[1]))
            ]
        );
        assert_eq!(hover.update(None), [Some(HotspotPointerEvent::Exit(ids[1])), None]);
    }

    #[test]
    fn pick_requires_release_over_the_pressed_hotspot() {
        let ids = entities(2);
        let mut hover = HoverState::default();

        hover.press(Some(ids[0]));
        assert_eq!(hover.release(Some(ids[0])), Some(ids[0]));

        hover.press(Some(ids[0]));
        assert_eq!(hover.release(Some(ids[1])), None);

        hover.press(None);
        assert_eq!(hover.release(Some(ids[1])), None);
    }

    #[test]
    fn drag_over_a_hotspot_is_not_a_pick() {
        let ids = entities(1);
        let mut hover = HoverState::default();

        hover.press(Some(ids[0]));
        hover.drag(3.0);
        hover.drag(4.0);
        assert_eq!(hover.release(Some(ids[0])), None);

        // A small wobble while clicking still picks.
        hover.press(Some(ids[0]));
        hover.drag(2.0);
        assert_eq!(hover.release(Some(ids[0])), Some(ids[0]));

        // Motion without a press never accumulates.
        hover.drag(50.0);
        hover.press(Some(ids[0]));
        assert_eq!(hover.release(Some(ids[0])), Some(ids[0]));
    }

    #[test]
    fn registry_keeps_scene_order() {
        let ids = entities(3);
        let mut registry = HotspotRegistry::default();
        registry.register("Engine", ids[0]);
        registry.register("Bridge", ids[1]);
        registry.register("Galley", ids[2]);

        assert_eq!(registry.names(), vec!["Engine", "Bridge", "Galley"]);
        assert_eq!(registry.get("Bridge"), Some(ids[1]));
        assert_eq!(registry.get("Hold"), None);
    }
}
