use bevy::prelude::*;

/// Entities spawned by the viewer. Cleared on teardown.
#[derive(Resource, Default, Debug)]
pub struct ViewerScene {
    pub camera: Option<Entity>,
    pub skybox: Option<Entity>,
    pub floor_root: Option<Entity>,
}

impl ViewerScene {
    /// Take every tracked entity, leaving the scene empty.
    pub fn take_all(&mut self) -> Vec<Entity> {
        [self.camera.take(), self.skybox.take(), self.floor_root.take()]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_all_empties_the_scene() {
        let mut world = World::new();
        let camera = world.spawn_empty().id();
        let skybox = world.spawn_empty().id();

        let mut scene = ViewerScene {
            camera: Some(camera),
            skybox: Some(skybox),
            floor_root: None,
        };

        assert_eq!(scene.take_all(), vec![camera, skybox]);
        assert!(scene.take_all().is_empty());
    }
}
