//! Signed distance field evaluation
//!
//! Every primitive exposes a distance function in its local frame; the scene
//! evaluator folds the sample point for domain repetition, moves it into the
//! object's frame, and tracks the minimum across all objects.

use crate::objects::{Object, Scene, Shape};
use crate::{Point, Vec3};
use nalgebra::Vector2;

type Vec2 = Vector2<f64>;

/// Mandelbulb iteration cap
pub const MANDELBULB_ITERATIONS: usize = 20;
const MANDELBULB_POWER: f64 = 8.0;
const MANDELBULB_ESCAPE: f64 = 2.0;

/// Distance to the nearest surface and the object that produced it
#[derive(Debug, Clone, Copy)]
pub struct SceneDistance {
    pub distance: f64,
    pub object: Option<usize>,
}

/// Minimum signed distance from `point` to every object in the scene.
///
/// Pure and allocation-free; lights contribute no geometry. An empty object
/// list reports an unbounded distance.
pub fn distance_to_scene(scene: &Scene, point: &Point) -> SceneDistance {
    let mut best = SceneDistance {
        distance: f64::INFINITY,
        object: None,
    };
    for (index, object) in scene.objects.iter().enumerate() {
        let distance = object_distance(object, point);
        if distance < best.distance {
            best = SceneDistance {
                distance,
                object: Some(index),
            };
        }
    }
    best
}

/// Signed distance from a world-space point to one object
pub fn object_distance(object: &Object, point: &Point) -> f64 {
    let mut p = *point;
    if object.infinite_interval > 0.0 {
        p = tile(&p, object.infinite_interval);
    }
    p -= object.position;
    if let Some(inverse_rotation) = &object.inverse_rotation {
        p = inverse_rotation * p;
    }
    match &object.shape {
        Shape::Sphere { radius } => sphere(&p, *radius),
        Shape::Plane { normal } => plane(&p, normal),
        Shape::Box { half_extents } => cuboid(&p, half_extents),
        Shape::Donut {
            ring_radius,
            thickness,
        } => donut(&p, *ring_radius, *thickness),
        Shape::Cone { angle, height } => cone(&p, *angle, *height),
        Shape::InfiniteCylinder { radius } => infinite_cylinder(&p, *radius),
        Shape::Mandelbulb => mandelbulb(&p),
    }
}

/// Fold a coordinate into the centered periodic cell, repeating the
/// primitive along all three axes
fn tile(point: &Point, period: f64) -> Point {
    point.map(|c| c - period * (c / period).round())
}

fn sphere(p: &Point, radius: f64) -> f64 {
    p.norm() - radius
}

fn plane(p: &Point, normal: &Vec3) -> f64 {
    p.dot(normal)
}

fn cuboid(p: &Point, half_extents: &Vec3) -> f64 {
    let d = p.abs() - half_extents;
    let outside = d.map(|c| c.max(0.0)).norm();
    outside + d.max().min(0.0)
}

fn donut(p: &Point, ring_radius: f64, thickness: f64) -> f64 {
    let q = Vec2::new(p[0].hypot(p[2]) - ring_radius, p[1]);
    q.norm() - thickness
}

/// Exact distance to a cone with apex at the origin opening toward -Y,
/// given its half-angle and height
fn cone(p: &Point, angle: f64, height: f64) -> f64 {
    let q = Vec2::new(height * angle.tan(), -height);
    let w = Vec2::new(p[0].hypot(p[2]), p[1]);

    let a = w - q * (w.dot(&q) / q.dot(&q)).clamp(0.0, 1.0);
    let b = w - Vec2::new(q[0] * (w[0] / q[0]).clamp(0.0, 1.0), q[1]);
    let k = q[1].signum();
    let d = a.dot(&a).min(b.dot(&b));
    let s = (k * (w[0] * q[1] - w[1] * q[0])).max(k * (w[1] - q[1]));
    d.sqrt() * s.signum()
}

fn infinite_cylinder(p: &Point, radius: f64) -> f64 {
    p[0].hypot(p[2]) - radius
}

/// Distance estimate for the power-8 mandelbulb
fn mandelbulb(p: &Point) -> f64 {
    let mut z = *p;
    let mut dr = 1.0;
    let mut r = z.norm();
    // The spherical-coordinate step is undefined at the exact origin, which
    // sits well inside the set
    if r == 0.0 {
        return -0.5;
    }
    for _ in 0..MANDELBULB_ITERATIONS {
        if r > MANDELBULB_ESCAPE {
            break;
        }
        let theta = (z[2] / r).acos() * MANDELBULB_POWER;
        let phi = z[1].atan2(z[0]) * MANDELBULB_POWER;
        dr = r.powf(MANDELBULB_POWER - 1.0) * MANDELBULB_POWER * dr + 1.0;

        let zr = r.powf(MANDELBULB_POWER);
        z = p + zr * Vec3::new(theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos());
        r = z.norm();
    }
    0.5 * r.ln() * r / dr
}
