//! Scene objects and their configs
//!
//! The scene file is a JSON array of typed objects. Each kind has a config
//! struct deserialized with serde; `Scene::from_config` validates the parsed
//! configs and freezes them into the immutable model the renderer consumes.

use crate::{error::Error, utils, utils::SerdeVector, Color, Mat3, Point, Vec3};
use serde::{Deserialize, Serialize};

/// Cap on non-camera objects, matching the scene format's limit
pub const MAX_OBJECTS: usize = 128;

/// Shape-specific payload. Dimensions are in object-local units.
#[derive(Debug, Clone)]
pub enum Shape {
    Sphere { radius: f64 },
    Plane { normal: Vec3 },
    Box { half_extents: Vec3 },
    Donut { ring_radius: f64, thickness: f64 },
    /// Half-angle in radians, apex at the local origin opening toward -Y
    Cone { angle: f64, height: f64 },
    InfiniteCylinder { radius: f64 },
    Mandelbulb,
}

/// A primitive together with its surface properties
#[derive(Debug, Clone)]
pub struct Object {
    pub shape: Shape,
    pub diffuse_color: Color,
    pub specular_color: Color,
    pub position: Point,
    /// World-to-local rotation, `None` when the object is unrotated
    pub inverse_rotation: Option<Mat3>,
    pub shininess: f64,
    pub ior: f64,
    pub reflectivity: f64,
    pub refractivity: f64,
    /// > 0 tiles the primitive along all three axes with this period
    pub infinite_interval: f64,
}
impl Object {
    pub fn from_config(shape: Shape, surface: SurfaceConfig) -> Result<Self, Error> {
        let diffuse_color = check_color(surface.diffuse_color.into(), "diffuse_color")?;
        let specular_color = check_color(surface.specular_color.into(), "specular_color")?;
        if surface.reflectivity < 0.0
            || surface.refractivity < 0.0
            || surface.reflectivity + surface.refractivity > 1.0
        {
            return Err(Error::InvalidSurfaceWeights);
        }

        // Rotation angles arrive in degrees; the world-to-local matrix is
        // built once here so the SDF inner loop never recomputes it.
        let inverse_rotation = surface.rotation.and_then(|rot| {
            let radians = Vec3::from(rot).map(f64::to_radians);
            if radians == Vec3::zeros() {
                None
            } else {
                Some(utils::euler_rotation(&radians).transpose())
            }
        });

        Ok(Self {
            shape,
            diffuse_color,
            specular_color,
            position: surface.position.into(),
            inverse_rotation,
            shininess: surface.shininess,
            ior: surface.ior.max(1.0),
            reflectivity: surface.reflectivity,
            refractivity: surface.refractivity,
            infinite_interval: surface.infinite_interval,
        })
    }
}

/// A point light with radial and angular (spotlight) falloff
#[derive(Debug, Clone)]
pub struct Light {
    pub color: Color,
    pub position: Point,
    pub direction: Vec3,
    pub radial_a2: f64,
    pub radial_a1: f64,
    pub radial_a0: f64,
    pub angular_a0: f64,
    /// Spotlight half-angle in radians, 0 disables the cone test
    pub theta: f64,
}
impl Light {
    pub fn from_config(config: LightConfig) -> Result<Self, Error> {
        let direction = match config.direction {
            Some(dir) => {
                let dir = Vec3::from(dir);
                // A degenerate direction only matters for spotlights; fall
                // back to the default facing rather than propagate NaNs.
                if dir.norm() > 0.0 {
                    dir.normalize()
                } else {
                    Vec3::new(0.0, 0.0, 1.0)
                }
            }
            None => Vec3::new(0.0, 0.0, 1.0),
        };
        Ok(Self {
            color: check_color(config.color.into(), "light color")?,
            position: config.position.into(),
            direction,
            radial_a2: config.radial_a2,
            radial_a1: config.radial_a1,
            radial_a0: config.radial_a0,
            angular_a0: config.angular_a0,
            theta: config.theta.to_radians(),
        })
    }
}

/// Pinhole camera at the world origin looking down +Z
#[derive(Debug, Clone)]
pub struct Camera {
    pub width: f64,
    pub height: f64,
}
impl Camera {
    pub fn from_config(config: CameraConfig) -> Result<Self, Error> {
        if config.width <= 0.0 || config.height <= 0.0 {
            return Err(Error::NonPositiveCamera);
        }
        Ok(Self {
            width: config.width,
            height: config.height,
        })
    }
}

/// The validated, immutable scene
///
/// Construction enforces the configuration invariants: exactly one camera,
/// at least one light, at most [`MAX_OBJECTS`] non-camera objects.
#[derive(Debug)]
pub struct Scene {
    pub camera: Camera,
    pub objects: Vec<Object>,
    pub lights: Vec<Light>,
}
impl Scene {
    pub fn from_config(configs: Vec<ObjectConfig>) -> Result<Self, Error> {
        let mut camera = None;
        let mut objects = Vec::new();
        let mut lights = Vec::new();

        for config in configs {
            match config {
                ObjectConfig::Camera(c) => {
                    if camera.is_some() {
                        return Err(Error::MultipleCameras);
                    }
                    camera = Some(Camera::from_config(c)?);
                }
                ObjectConfig::Light(c) => lights.push(Light::from_config(c)?),
                ObjectConfig::Sphere(c) => objects.push(Object::from_config(
                    Shape::Sphere { radius: c.radius },
                    c.surface,
                )?),
                ObjectConfig::Plane(c) => {
                    let raw = Vec3::from(c.normal);
                    if raw.norm() == 0.0 {
                        return Err(Error::DegenerateNormal);
                    }
                    // Orient the facing hemisphere toward the camera side
                    let normal = (if raw[2] > 0.0 { -raw } else { raw }).normalize();
                    objects.push(Object::from_config(Shape::Plane { normal }, c.surface)?)
                }
                ObjectConfig::Box(c) => objects.push(Object::from_config(
                    Shape::Box {
                        half_extents: c.dimensions.into(),
                    },
                    c.surface,
                )?),
                ObjectConfig::Donut(c) => objects.push(Object::from_config(
                    Shape::Donut {
                        ring_radius: c.radius,
                        thickness: c.thickness,
                    },
                    c.surface,
                )?),
                ObjectConfig::Cone(c) => objects.push(Object::from_config(
                    Shape::Cone {
                        angle: c.angle.to_radians(),
                        height: c.height,
                    },
                    c.surface,
                )?),
                ObjectConfig::InfiniteCylinder(c) => objects.push(Object::from_config(
                    Shape::InfiniteCylinder { radius: c.radius },
                    c.surface,
                )?),
                ObjectConfig::Mandelbulb(c) => {
                    objects.push(Object::from_config(Shape::Mandelbulb, c.surface)?)
                }
            }
        }

        let camera = camera.ok_or(Error::MissingCamera)?;
        if lights.is_empty() {
            return Err(Error::MissingLight);
        }
        let non_camera = objects.len() + lights.len();
        if non_camera > MAX_OBJECTS {
            return Err(Error::TooManyObjects {
                max: MAX_OBJECTS,
                found: non_camera,
            });
        }

        Ok(Self {
            camera,
            objects,
            lights,
        })
    }

    /// Parse a scene description straight from JSON text
    pub fn from_json(text: &str) -> Result<Self, Error> {
        let configs: Vec<ObjectConfig> = serde_json::from_str(text)?;
        Self::from_config(configs)
    }

    /// The light consulted for shading. Scenes with several lights use the
    /// first one only.
    pub fn primary_light(&self) -> &Light {
        &self.lights[0]
    }
}

fn check_color(color: Color, field: &'static str) -> Result<Color, Error> {
    if color.iter().all(|c| (0.0..=1.0).contains(c)) {
        Ok(color)
    } else {
        Err(Error::ColorOutOfRange { field })
    }
}

/// Scene file object, tagged by its `"type"` field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectConfig {
    Camera(CameraConfig),
    Sphere(SphereConfig),
    Plane(PlaneConfig),
    Box(BoxConfig),
    Donut(DonutConfig),
    Cone(ConeConfig),
    InfiniteCylinder(CylinderConfig),
    Mandelbulb(MandelbulbConfig),
    Light(LightConfig),
}

/// Surface fields shared by every shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceConfig {
    pub diffuse_color: SerdeVector,
    pub specular_color: SerdeVector,
    pub position: SerdeVector,
    /// Euler angles in degrees
    #[serde(default)]
    pub rotation: Option<SerdeVector>,
    #[serde(default)]
    pub shininess: f64,
    #[serde(default = "default_ior")]
    pub ior: f64,
    #[serde(default)]
    pub reflectivity: f64,
    #[serde(default)]
    pub refractivity: f64,
    #[serde(default)]
    pub infinite_interval: f64,
}

fn default_ior() -> f64 {
    1.0
}

fn default_radial_a0() -> f64 {
    1.0
}

/// Camera config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    pub width: f64,
    pub height: f64,
}

/// Sphere config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SphereConfig {
    #[serde(flatten)]
    pub surface: SurfaceConfig,
    pub radius: f64,
}

/// Plane config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaneConfig {
    #[serde(flatten)]
    pub surface: SurfaceConfig,
    pub normal: SerdeVector,
}

/// Box config; `dimensions` are half-extents per axis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxConfig {
    #[serde(flatten)]
    pub surface: SurfaceConfig,
    pub dimensions: SerdeVector,
}

/// Donut config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonutConfig {
    #[serde(flatten)]
    pub surface: SurfaceConfig,
    pub radius: f64,
    pub thickness: f64,
}

/// Cone config; `angle` is the half-angle in degrees
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConeConfig {
    #[serde(flatten)]
    pub surface: SurfaceConfig,
    pub angle: f64,
    pub height: f64,
}

/// Infinite cylinder config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CylinderConfig {
    #[serde(flatten)]
    pub surface: SurfaceConfig,
    pub radius: f64,
}

/// Mandelbulb config; the fractal has no parameters beyond its surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MandelbulbConfig {
    #[serde(flatten)]
    pub surface: SurfaceConfig,
}

/// Light config; attenuation keys keep the scene file's hyphenated names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightConfig {
    pub color: SerdeVector,
    pub position: SerdeVector,
    #[serde(default)]
    pub direction: Option<SerdeVector>,
    #[serde(default = "default_radial_a0", rename = "radial-a0")]
    pub radial_a0: f64,
    #[serde(default, rename = "radial-a1")]
    pub radial_a1: f64,
    #[serde(default, rename = "radial-a2")]
    pub radial_a2: f64,
    #[serde(default, rename = "angular-a0")]
    pub angular_a0: f64,
    /// Spotlight half-angle in degrees
    #[serde(default)]
    pub theta: f64,
}
