//! Sphere tracing
//!
//! Walks a ray through the scene using the SDF's distance as a safe step
//! size. This is the performance-critical inner loop: every pixel marches at
//! least once, and shadow and bounce rays march again per shaded point.

use crate::objects::Scene;
use crate::sdf::distance_to_scene;
use crate::{Point, Ray};

/// Step budget per ray; the only bounded-execution guarantee
pub const MAX_STEPS: usize = 1000;
/// Distances below this count as touching a surface
pub const HIT_EPSILON: f64 = 1e-3;
/// Distances beyond this count as having left the scene
pub const OUTER_BOUNDS: f64 = 1e6;

/// Result of marching one ray
#[derive(Debug, Clone)]
pub struct Intersection {
    /// Index of the nearest object, `None` on a miss
    pub object: Option<usize>,
    /// SDF value at termination; infinite on a miss
    pub distance: f64,
    /// Where the march stopped
    pub position: Point,
}
impl Intersection {
    pub fn is_hit(&self) -> bool {
        self.object.is_some()
    }
}

/// March a ray to its first surface.
///
/// Terminates as a hit when the scene distance drops below [`HIT_EPSILON`],
/// and as a miss when it exceeds [`OUTER_BOUNDS`] or the step budget runs
/// out; budget exhaustion and escape are indistinguishable to the caller.
pub fn march(scene: &Scene, ray: &Ray) -> Intersection {
    let mut traveled = 0.0;
    for _ in 0..MAX_STEPS {
        let position = ray.get(traveled);
        let sample = distance_to_scene(scene, &position);
        if sample.distance < HIT_EPSILON {
            return Intersection {
                object: sample.object,
                distance: sample.distance,
                position,
            };
        }
        if sample.distance > OUTER_BOUNDS {
            break;
        }
        traveled += sample.distance;
    }
    Intersection {
        object: None,
        distance: f64::INFINITY,
        position: ray.get(traveled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::Scene;
    use crate::Vec3;

    fn sphere_scene(center: [f64; 3], radius: f64) -> Scene {
        Scene::from_json(&format!(
            r#"[{{"type": "camera", "width": 2, "height": 2}},
                {{"type": "light", "color": [1,1,1], "position": [0,0,-5]}},
                {{"type": "sphere", "radius": {radius},
                  "position": [{}, {}, {}],
                  "diffuse_color": [1,0,0], "specular_color": [1,1,1]}}]"#,
            center[0], center[1], center[2]
        ))
        .unwrap()
    }

    fn ray_from_origin(direction: Vec3) -> Ray {
        Ray::new(Point::new(0.0, 0.0, 0.0), direction.normalize())
    }

    #[test]
    fn ray_pointing_away_from_everything_misses() {
        let scene = sphere_scene([0.0, 0.0, 10.0], 1.0);
        let hit = march(&scene, &ray_from_origin(Vec3::new(0.0, 0.0, -1.0)));
        assert!(!hit.is_hit());
        assert!(hit.distance.is_infinite());
    }

    #[test]
    fn ray_aimed_at_sphere_converges_onto_the_surface() {
        let scene = sphere_scene([0.0, 0.0, 10.0], 1.0);
        let hit = march(&scene, &ray_from_origin(Vec3::new(0.0, 0.0, 1.0)));
        assert_eq!(hit.object, Some(0));
        // The stop position lies within epsilon of the sphere surface
        let surface_error = ((hit.position - Point::new(0.0, 0.0, 10.0)).norm() - 1.0).abs();
        assert!(surface_error <= HIT_EPSILON);
    }

    #[test]
    fn off_axis_ray_misses_a_small_sphere() {
        let scene = sphere_scene([0.0, 0.0, 10.0], 1.0);
        let hit = march(&scene, &ray_from_origin(Vec3::new(1.0, 1.0, 1.0)));
        assert!(!hit.is_hit());
    }

    #[test]
    fn empty_scene_is_an_immediate_miss() {
        let scene = Scene::from_json(
            r#"[{"type": "camera", "width": 2, "height": 2},
                {"type": "light", "color": [1,1,1], "position": [0,0,-5]}]"#,
        )
        .unwrap();
        let hit = march(&scene, &ray_from_origin(Vec3::new(0.0, 0.0, 1.0)));
        assert!(!hit.is_hit());
    }
}
