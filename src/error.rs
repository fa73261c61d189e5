//! Error taxonomy
//!
//! Configuration problems are typed and surfaced to the caller; the
//! rendering core itself never terminates the process. "No intersection"
//! is a value, not an error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed scene description: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("scene must contain exactly one camera")]
    MissingCamera,

    #[error("scene may only contain one camera")]
    MultipleCameras,

    #[error("scene must contain at least one light")]
    MissingLight,

    #[error("scene may contain at most {max} non-camera objects, found {found}")]
    TooManyObjects { max: usize, found: usize },

    #[error("{field} channels must be within [0, 1]")]
    ColorOutOfRange { field: &'static str },

    #[error("camera width and height must be greater than 0")]
    NonPositiveCamera,

    #[error("plane normal must be non-zero")]
    DegenerateNormal,

    #[error("reflectivity and refractivity must each be >= 0 and sum to at most 1")]
    InvalidSurfaceWeights,

    #[error("unsupported image format {extension:?}, expected .ppm or .png")]
    UnsupportedImageFormat { extension: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}
