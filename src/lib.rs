//! SDF Ray Marching Library
//!
//! Renders a static scene of signed-distance-field primitives and point
//! lights into a pixel buffer by sphere tracing one camera ray per pixel.

use nalgebra::{Matrix3, Vector3};

pub mod error;
pub mod marcher;
pub mod objects;
pub mod output;
pub mod render;
pub mod sdf;
pub mod shading;
pub mod utils;

pub use error::Error;

pub type Vec3 = Vector3<f64>;
pub type Point = Vec3;
pub type Color = Vec3;
pub type Mat3 = Matrix3<f64>;

/// Prelude
pub mod prelude {
    pub use crate::marcher::{march, Intersection};
    pub use crate::objects::{Camera, Light, Object, Scene, Shape};
    pub use crate::render::{render, PixelBuffer};
    pub use crate::{Color, Error, Mat3, Point, Ray, Vec3};
}

/// A ray, origin plus unit direction
#[derive(Debug, Clone)]
pub struct Ray {
    pub orig: Point,
    pub dir: Vec3,
}
impl Ray {
    pub fn new(orig: Point, dir: Vec3) -> Self {
        Self { orig, dir }
    }

    pub fn get(&self, t: f64) -> Point {
        self.orig + t * self.dir
    }
}
