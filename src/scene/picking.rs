//! Ray casting against the editor scene

use crate::core::types::Vec3;
use crate::math::{lattice, Ray};
use crate::voxel::VoxelId;

use super::graph::Scene;
use super::node::GroundPlane;

/// What a pick ray struck
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    Plane,
    Voxel(VoxelId),
}

/// Nearest intersection of a pick ray with the scene
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub target: HitTarget,
    /// Distance along the ray
    pub distance: f32,
    pub point: Vec3,
    /// Face normal of the surface that was hit
    pub normal: Option<Vec3>,
}

impl Hit {
    /// Center of the cell a new voxel would occupy for this hit
    pub fn placement(&self, voxel_size: f32) -> Option<Vec3> {
        self.normal
            .map(|normal| lattice::snap_to_cell_center(self.point, normal, voxel_size))
    }
}

impl Scene {
    /// Cast `ray` against the plane and every voxel; the roll-over is skipped.
    ///
    /// Returns the closest hit, if any.
    pub fn pick(&self, ray: &Ray) -> Option<Hit> {
        let mut nearest = ray
            .hit_plane(Vec3::ZERO, GroundPlane::NORMAL)
            .filter(|hit| self.plane.contains(hit.point))
            .map(|hit| Hit {
                target: HitTarget::Plane,
                distance: hit.t,
                point: hit.point,
                normal: hit.normal,
            });

        let size = self.voxels.voxel_size();
        for voxel in self.voxels.iter() {
            let Some(hit) = ray.hit_aabb(&voxel.bounds(size)) else {
                continue;
            };
            if nearest.is_some_and(|n| n.distance <= hit.t) {
                continue;
            }
            nearest = Some(Hit {
                target: HitTarget::Voxel(voxel.id),
                distance: hit.t,
                point: hit.point,
                normal: hit.normal,
            });
        }

        nearest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxel::Color;

    fn down_at(x: f32, z: f32) -> Ray {
        Ray::new(Vec3::new(x, 1000.0, z), -Vec3::Y)
    }

    #[test]
    fn test_pick_plane() {
        let scene = Scene::default();
        let hit = scene.pick(&down_at(10.0, 10.0)).unwrap();

        assert_eq!(hit.target, HitTarget::Plane);
        assert_eq!(hit.normal, Some(Vec3::Y));
        assert_eq!(hit.placement(50.0), Some(Vec3::splat(25.0)));
    }

    #[test]
    fn test_pick_misses_outside_plane() {
        let scene = Scene::default();
        assert!(scene.pick(&down_at(600.0, 0.0)).is_none());
        // Plane is single-sided
        let up = Ray::new(Vec3::new(0.0, -100.0, 0.0), Vec3::Y);
        assert!(scene.pick(&up).is_none());
    }

    #[test]
    fn test_pick_nearest_voxel() {
        let mut scene = Scene::default();
        let low = scene.voxels.insert(Vec3::splat(25.0), Color::WHITE).unwrap();
        let high = scene.voxels.insert(Vec3::new(25.0, 75.0, 25.0), Color::WHITE).unwrap();

        let hit = scene.pick(&down_at(25.0, 25.0)).unwrap();
        assert_eq!(hit.target, HitTarget::Voxel(high));
        assert_ne!(hit.target, HitTarget::Voxel(low));
        assert_eq!(hit.placement(50.0), Some(Vec3::new(25.0, 125.0, 25.0)));
    }

    #[test]
    fn test_pick_ignores_roll_over() {
        let mut scene = Scene::default();
        scene.roll_over.position = Vec3::new(25.0, 25.0, 25.0);

        let hit = scene.pick(&down_at(25.0, 25.0)).unwrap();
        assert_eq!(hit.target, HitTarget::Plane);
    }
}
