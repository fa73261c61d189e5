//! Shading: normals, direct lighting, shadows, and bounce rays
//!
//! Implements the full recursive model: diffuse and specular terms with
//! radial/angular attenuation, a hard shadow test, and reflection plus
//! refraction bounces weighted by the surface's coefficients.

use crate::marcher::{march, Intersection, HIT_EPSILON, MAX_STEPS};
use crate::objects::{Light, Scene};
use crate::sdf::distance_to_scene;
use crate::utils;
use crate::{Color, Point, Ray, Vec3};

/// Finite-difference offset for normal estimation. A tunable: accurate for
/// smooth primitives, noisier near mandelbulb iteration boundaries.
pub const NORMAL_EPSILON: f64 = 1e-4;
/// Offset applied when restarting a ray from a surface
pub const SHADOW_BIAS: f64 = 1e-2;
/// Slack when comparing the shadow march against the light distance
const SHADOW_TOLERANCE: f64 = 2.0 * SHADOW_BIAS;
/// Brightness multiplier for occluded points
pub const SHADOW_DIM: f64 = 0.25;
/// Bounce recursion cap
pub const MAX_DEPTH: u32 = 7;

/// Estimate the surface normal at `point` by central differencing of the
/// scene SDF along each axis
pub fn surface_normal(scene: &Scene, point: &Point) -> Vec3 {
    let e = NORMAL_EPSILON;
    let d = |offset: Vec3| distance_to_scene(scene, &(point + offset)).distance;
    let gradient = Vec3::new(
        d(Vec3::new(e, 0.0, 0.0)) - d(Vec3::new(-e, 0.0, 0.0)),
        d(Vec3::new(0.0, e, 0.0)) - d(Vec3::new(0.0, -e, 0.0)),
        d(Vec3::new(0.0, 0.0, e)) - d(Vec3::new(0.0, 0.0, -e)),
    );
    // A degenerate gradient can occur at medial points; any unit fallback is
    // as good as another there
    if gradient.norm() == 0.0 {
        Vec3::new(0.0, 0.0, -1.0)
    } else {
        gradient.normalize()
    }
}

/// Inverse-quadratic radial falloff; a non-positive denominator means the
/// light does not attenuate
pub fn radial_attenuation(light: &Light, distance: f64) -> f64 {
    let denominator =
        light.radial_a2 * distance * distance + light.radial_a1 * distance + light.radial_a0;
    if denominator <= 0.0 {
        1.0
    } else {
        1.0 / denominator
    }
}

/// Spotlight falloff for the direction from the light toward the shaded
/// point; 1.0 for omnidirectional lights
pub fn angular_attenuation(light: &Light, from_light: &Vec3) -> f64 {
    if light.theta == 0.0 {
        return 1.0;
    }
    let cos_alpha = light.direction.dot(from_light);
    if cos_alpha < light.theta.cos() {
        0.0
    } else {
        cos_alpha.max(0.0).powf(light.angular_a0)
    }
}

/// Hard shadow test: 1.0 when the light is reachable from `point`, the dim
/// factor when another surface blocks it
pub fn shadow_factor(scene: &Scene, point: &Point, normal: &Vec3, light: &Light) -> f64 {
    let to_light = light.position - point;
    let light_distance = to_light.norm();
    if light_distance == 0.0 {
        return 1.0;
    }
    let direction = to_light / light_distance;
    let origin = point + normal * SHADOW_BIAS;
    let hit = march(scene, &Ray::new(origin, direction));
    if !hit.is_hit() {
        return 1.0;
    }
    let traveled = (hit.position - origin).norm();
    if traveled + SHADOW_TOLERANCE >= light_distance {
        1.0
    } else {
        SHADOW_DIM
    }
}

/// Color seen along a ray that produced `intersection`. Misses shade to the
/// background; hits combine local lighting with reflection and refraction
/// bounces up to [`MAX_DEPTH`].
pub fn shade(scene: &Scene, incoming: &Vec3, intersection: &Intersection, depth: u32) -> Color {
    let index = match intersection.object {
        Some(index) => index,
        None => return Color::zeros(),
    };
    let object = &scene.objects[index];
    let light = scene.primary_light();
    let point = intersection.position;
    let normal = surface_normal(scene, &point);

    let to_light_vec = light.position - point;
    let light_distance = to_light_vec.norm();
    let to_light = if light_distance > 0.0 {
        to_light_vec / light_distance
    } else {
        normal
    };

    let diffuse_intensity = utils::clamp_unit(normal.dot(&to_light));
    let mut local = diffuse_intensity * light.color.component_mul(&object.diffuse_color);

    if object.shininess > 0.0 {
        let reflected = utils::reflect(&-to_light, &normal);
        let specular_intensity = reflected.dot(&-incoming).max(0.0).powf(object.shininess);
        local += specular_intensity * light.color.component_mul(&object.specular_color);
    }

    local *= radial_attenuation(light, light_distance) * angular_attenuation(light, &-to_light);
    local *= shadow_factor(scene, &point, &normal, light);
    let local = utils::clamp_color(&local);

    let bounce_weight = object.reflectivity + object.refractivity;
    if depth >= MAX_DEPTH || bounce_weight == 0.0 {
        return local;
    }

    let mut color = (1.0 - bounce_weight) * local;

    if object.reflectivity > 0.0 {
        let direction = utils::reflect(incoming, &normal).normalize();
        let bounce = march(scene, &Ray::new(point + normal * SHADOW_BIAS, direction));
        color += object.reflectivity * shade(scene, &direction, &bounce, depth + 1);
    }

    if object.refractivity > 0.0 {
        if let Some(through) = refracted_ray(scene, incoming, &point, &normal, object.ior) {
            let onward = march(scene, &through);
            color += object.refractivity * shade(scene, &through.dir, &onward, depth + 1);
        }
    }

    utils::clamp_color(&color)
}

/// Bend a ray into the surface at `point`, sphere-trace through the interior
/// to the far boundary, and bend it again on exit. Returns the ray to march
/// onward, or `None` when the ray cannot enter or never leaves the interior
/// within the step budget.
fn refracted_ray(
    scene: &Scene,
    incoming: &Vec3,
    point: &Point,
    normal: &Vec3,
    ior: f64,
) -> Option<Ray> {
    let entry = utils::refract(&incoming.normalize(), normal, 1.0 / ior)?.normalize();
    let exit = interior_exit(scene, point, &entry)?;
    let exit_normal = surface_normal(scene, &exit);
    // Leaving the medium: the boundary normal opposes the ray, the ratio
    // inverts. Total internal reflection is approximated by passing straight
    // through.
    let direction = utils::refract(&entry, &-exit_normal, ior)
        .unwrap_or(entry)
        .normalize();
    Some(Ray::new(exit + direction * SHADOW_BIAS, direction))
}

/// March through an object's interior, where the SDF is negative, until the
/// sample point is back outside
fn interior_exit(scene: &Scene, point: &Point, direction: &Vec3) -> Option<Point> {
    let mut position = point + direction * SHADOW_BIAS;
    for _ in 0..MAX_STEPS {
        let distance = distance_to_scene(scene, &position).distance;
        if distance >= HIT_EPSILON {
            return Some(position);
        }
        // |distance| is the gap to the nearest boundary from inside; the
        // floor guarantees progress across the surface shell itself
        position += *direction * distance.abs().max(HIT_EPSILON);
    }
    None
}
