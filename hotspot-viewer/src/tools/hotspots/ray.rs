use bevy::prelude::*;
use bevy::render::primitives::Aabb;

/// Ray against a mesh's local bounding box placed by `xf`.
///
/// The ray is carried into mesh-local space, so the returned `t` is measured
/// along the world-space `dir` and hits on different meshes compare directly.
pub fn ray_hits_aabb(origin: Vec3, dir: Vec3, xf: &GlobalTransform, aabb: &Aabb) -> Option<f32> {
    let inv = xf.affine().inverse();
    let o_local = inv.transform_point3(origin);
    let d_local = inv.transform_vector3(dir);
    let center = Vec3::from(aabb.center);
    let he = Vec3::from(aabb.half_extents);
    ray_aabb_hit_t(o_local, d_local, center - he, center + he)
}

// Slab-method ray-AABB intersection. Returns the entry distance, or the exit
// distance when the origin is inside the box.
pub fn ray_aabb_hit_t(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;

    for axis in 0..3 {
        let o = ray_origin[axis];
        let d = ray_direction[axis];
        if d == 0.0 {
            // Parallel to this slab: must already be inside it.
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let (mut t0, mut t1) = ((min[axis] - o) * inv, (max[axis] - o) * inv);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }

    if t_far < 0.0 {
        return None;
    }
    Some(if t_near >= 0.0 { t_near } else { t_far })
}

/// Hotspot owning the closest hit part, if any.
pub fn nearest_hotspot<'a>(
    origin: Vec3,
    dir: Vec3,
    parts: impl IntoIterator<Item = (Entity, &'a GlobalTransform, &'a Aabb)>,
) -> Option<Entity> {
    parts
        .into_iter()
        .filter_map(|(hotspot, xf, aabb)| {
            ray_hits_aabb(origin, dir, xf, aabb).map(|t| (hotspot, t))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(hotspot, _)| hotspot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::from_min_max(Vec3::splat(-1.0), Vec3::splat(1.0))
    }

    #[test]
    fn straight_hit_returns_entry_distance() {
        let t = ray_aabb_hit_t(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z, Vec3::splat(-1.0), Vec3::ONE);
        assert_eq!(t, Some(9.0));
    }

    #[test]
    fn miss_and_behind_return_none() {
        let min = Vec3::splat(-1.0);
        assert_eq!(ray_aabb_hit_t(Vec3::new(5.0, 0.0, 10.0), Vec3::NEG_Z, min, Vec3::ONE), None);
        assert_eq!(ray_aabb_hit_t(Vec3::new(0.0, 0.0, 10.0), Vec3::Z, min, Vec3::ONE), None);
    }

    #[test]
    fn origin_inside_returns_exit_distance() {
        let t = ray_aabb_hit_t(Vec3::ZERO, Vec3::X, Vec3::splat(-1.0), Vec3::splat(2.0));
        assert_eq!(t, Some(2.0));
    }

    #[test]
    fn transformed_box_is_hit_in_world_space() {
        let xf = GlobalTransform::from(
            Transform::from_xyz(0.0, -40.0, 0.0).with_scale(Vec3::new(50.0, 1.0, 50.0)),
        );
        // World box spans x/z in [-50, 50] and y in [-41, -39].
        let t = ray_hits_aabb(Vec3::new(30.0, 0.0, -30.0), Vec3::NEG_Y, &xf, &unit_box()).unwrap();
        assert!((t - 39.0).abs() < 1e-4);
        assert!(ray_hits_aabb(Vec3::new(60.0, 0.0, 0.0), Vec3::NEG_Y, &xf, &unit_box()).is_none());
    }

    #[test]
    fn nearest_part_wins() {
        let mut world = World::new();
        let far = world.spawn_empty().id();
        let near = world.spawn_empty().id();
        let aside = world.spawn_empty().id();

        let far_xf = GlobalTransform::from_xyz(0.0, 0.0, -20.0);
        let near_xf = GlobalTransform::from_xyz(0.0, 0.0, -5.0);
        let aside_xf = GlobalTransform::from_xyz(10.0, 0.0, -2.0);
        let aabb = unit_box();

        let hit = nearest_hotspot(
            Vec3::ZERO,
            Vec3::NEG_Z,
            [(far, &far_xf, &aabb), (near, &near_xf, &aabb), (aside, &aside_xf, &aabb)],
        );
        assert_eq!(hit, Some(near));
        assert_eq!(nearest_hotspot(Vec3::ZERO, Vec3::Z, [(far, &far_xf, &aabb)]), None);
    }
}
