//! Frame assembly: one camera ray per pixel into a color buffer

use crate::marcher::march;
use crate::objects::Scene;
use crate::shading::shade;
use crate::{Color, Point, Ray, Vec3};
use indicatif::ProgressBar;

/// Dense row-major color buffer, row 0 at the top of the image
#[derive(Debug)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<Color>,
}
impl PixelBuffer {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![Color::zeros(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// All pixels in row-major order, top row first
    pub fn pixels(&self) -> &[Color] {
        &self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> &Color {
        &self.data[y * self.width + x]
    }
}

/// Render the scene into a `width` x `height` buffer.
///
/// A pinhole projection down +Z from the world origin: the camera's
/// width/height span the image plane at z = 1, rays pass through pixel
/// centers. Scan rows are stored flipped so the buffer's row 0 is the top
/// scanline of the output raster. Misses keep the black background.
pub fn render(scene: &Scene, width: usize, height: usize) -> PixelBuffer {
    let camera = &scene.camera;
    let pixel_width = camera.width / width as f64;
    let pixel_height = camera.height / height as f64;
    let origin = Point::zeros();

    let mut buffer = PixelBuffer::new(width, height);
    let bar = ProgressBar::new((width * height) as u64);
    for y in 0..height {
        for x in 0..width {
            let direction = Vec3::new(
                -camera.width / 2.0 + pixel_width * (x as f64 + 0.5),
                -camera.height / 2.0 + pixel_height * (y as f64 + 0.5),
                1.0,
            )
            .normalize();
            let intersection = march(scene, &Ray::new(origin, direction));
            if intersection.is_hit() {
                buffer.data[(height - 1 - y) * width + x] =
                    shade(scene, &direction, &intersection, 0);
            }
            bar.inc(1);
        }
    }
    bar.finish();
    buffer
}
