//! Ray type and operations

use crate::core::types::Vec3;
use super::aabb::Aabb;

/// A ray defined by origin and direction
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    /// Precomputed 1/direction for fast AABB intersection
    pub inv_direction: Vec3,
}

/// Where a ray meets a surface
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance along the ray
    pub t: f32,
    /// World-space hit point
    pub point: Vec3,
    /// Outward normal of the face that was hit
    pub normal: Option<Vec3>,
}

impl Ray {
    /// Create a new ray (direction should be normalized)
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            inv_direction: Vec3::new(
                1.0 / direction.x,
                1.0 / direction.y,
                1.0 / direction.z,
            ),
        }
    }

    /// Get point along ray at parameter t
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Hit on the outside of an AABB, with the normal of the entry face.
    ///
    /// Boxes are single-sided: a ray starting inside the box does not hit it.
    /// A ray entering on an edge or corner gets the face of the lowest axis
    /// among those entered last.
    pub fn hit_aabb(&self, aabb: &Aabb) -> Option<RayHit> {
        let t1 = (aabb.min - self.origin) * self.inv_direction;
        let t2 = (aabb.max - self.origin) * self.inv_direction;

        let t_min = t1.min(t2);
        let t_max = t1.max(t2);

        let t_near = t_min.x.max(t_min.y).max(t_min.z);
        let t_far = t_max.x.min(t_max.y).min(t_max.z);

        if t_near > t_far || t_near < 0.0 {
            return None;
        }

        // The entry face lies on the axis whose slab is entered last
        let axis = (1..3).fold(0, |best, i| if t_min[i] > t_min[best] { i } else { best });
        let mut normal = Vec3::ZERO;
        normal[axis] = -self.direction[axis].signum();

        Some(RayHit {
            t: t_near,
            point: self.at(t_near),
            normal: Some(normal),
        })
    }

    /// Hit on the front side of a plane through `point` with outward `normal`
    pub fn hit_plane(&self, point: Vec3, normal: Vec3) -> Option<RayHit> {
        let denom = normal.dot(self.direction);
        if denom > -f32::EPSILON {
            // Parallel, or approaching from behind
            return None;
        }

        let t = (point - self.origin).dot(normal) / denom;
        if t < 0.0 {
            return None;
        }

        Some(RayHit {
            t,
            point: self.at(t),
            normal: Some(normal),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(ray.at(5.0), Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_hit_aabb_miss() {
        let ray = Ray::new(Vec3::new(-2.0, 5.0, 0.5), Vec3::X);
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert!(ray.hit_aabb(&aabb).is_none());
    }

    #[test]
    fn test_hit_aabb_top_face() {
        let ray = Ray::new(Vec3::new(25.0, 500.0, 20.0), -Vec3::Y);
        let aabb = Aabb::cube(Vec3::splat(25.0), 50.0);

        let hit = ray.hit_aabb(&aabb).unwrap();
        assert!((hit.t - 450.0).abs() < 1e-3);
        assert!((hit.point.y - 50.0).abs() < 1e-3);
        assert_eq!(hit.normal, Some(Vec3::Y));
    }

    #[test]
    fn test_hit_aabb_side_faces() {
        let aabb = Aabb::cube(Vec3::splat(25.0), 50.0);

        let from_left = Ray::new(Vec3::new(-100.0, 10.0, 30.0), Vec3::X);
        assert_eq!(from_left.hit_aabb(&aabb).unwrap().normal, Some(-Vec3::X));

        let dir = Vec3::new(0.1, -0.2, -1.0).normalize();
        let from_front = Ray::new(Vec3::new(20.0, 60.0, 300.0), dir);
        assert_eq!(from_front.hit_aabb(&aabb).unwrap().normal, Some(Vec3::Z));
    }

    #[test]
    fn test_hit_aabb_from_inside_is_ignored() {
        let ray = Ray::new(Vec3::splat(25.0), Vec3::X);
        let aabb = Aabb::cube(Vec3::splat(25.0), 50.0);
        assert!(ray.hit_aabb(&aabb).is_none());
    }

    #[test]
    fn test_hit_aabb_edge_picks_lowest_axis() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let dir = Vec3::new(1.0, -1.0, 0.0).normalize();
        let ray = Ray::new(Vec3::new(-1.0, 2.0, 0.5), dir);

        // Enters the x and y slabs together on the top-left edge
        let hit = ray.hit_aabb(&aabb).unwrap();
        assert_eq!(hit.normal, Some(-Vec3::X));

        let down = Ray::new(Vec3::new(0.5, 2.0, -1.0), Vec3::new(0.0, -1.0, 1.0).normalize());
        assert_eq!(down.hit_aabb(&aabb).unwrap().normal, Some(Vec3::Y));
    }

    #[test]
    fn test_hit_plane_front_and_back() {
        let down = Ray::new(Vec3::new(3.0, 10.0, -4.0), -Vec3::Y);
        let hit = down.hit_plane(Vec3::ZERO, Vec3::Y).unwrap();
        assert!((hit.t - 10.0).abs() < 1e-5);
        assert_eq!(hit.point, Vec3::new(3.0, 0.0, -4.0));
        assert_eq!(hit.normal, Some(Vec3::Y));

        let up = Ray::new(Vec3::new(0.0, -10.0, 0.0), Vec3::Y);
        assert!(up.hit_plane(Vec3::ZERO, Vec3::Y).is_none());

        let parallel = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::X);
        assert!(parallel.hit_plane(Vec3::ZERO, Vec3::Y).is_none());
    }
}
