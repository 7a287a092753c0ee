use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EllipseError {
    #[error("Ellipse radius must be a finite, non-negative number, got {0}")]
    InvalidRadius(f64),

    #[error("Ellipse radiusY must be a finite, non-negative number, got {0}")]
    InvalidRadiusY(f64),

    #[error("Invalid LatLng object: ({lat}, {lng})")]
    InvalidLatLng { lat: f64, lng: f64 },

    #[error("Invalid options: {0}")]
    Config(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjError {
    #[error("Unknown CRS: {0}")]
    UnknownCrs(String),

    #[error("Transform failed: {0}")]
    TransformFailed(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl From<serde_json::Error> for EllipseError {
    fn from(e: serde_json::Error) -> Self {
        EllipseError::Config(e.to_string())
    }
}
