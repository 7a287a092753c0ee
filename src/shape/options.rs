//! Shape options and normalisation of the accepted constructor argument shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EllipseError;

fn default_radius() -> f64 {
    10.0
}

/// Stroke and fill settings shared by all vector shapes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PathStyle {
    pub stroke: bool,
    pub color: String,
    /// Stroke width in pixels.
    pub weight: f64,
    pub opacity: f64,
    pub fill: bool,
    /// Renderers fall back to `color` when unset.
    pub fill_color: Option<String>,
    pub fill_opacity: f64,
    /// Extra pixels around the shape that still count as a hit.
    pub click_tolerance: f64,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            stroke: true,
            color: "#3388ff".to_string(),
            weight: 3.0,
            opacity: 1.0,
            fill: true,
            fill_color: None,
            fill_opacity: 0.2,
            click_tolerance: 0.0,
        }
    }
}

impl PathStyle {
    /// Hit-test padding: renderer tolerance plus half the stroke.
    pub fn hit_tolerance(&self) -> f64 {
        let stroke = if self.stroke { self.weight / 2.0 } else { 0.0 };
        self.click_tolerance + stroke
    }
}

/// Options accepted by [`crate::shape::Ellipse::new`].
///
/// `radius` is the east-west radius, `radius_y` the north-south one, both in
/// the CRS's planar unit. An unset `radius_y` is rejected at construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EllipseOptions {
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default)]
    pub radius_y: Option<f64>,
    #[serde(flatten)]
    pub style: PathStyle,
}

impl Default for EllipseOptions {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            radius_y: None,
            style: PathStyle::default(),
        }
    }
}

impl EllipseOptions {
    pub fn new(radius: f64, radius_y: f64) -> Self {
        Self {
            radius,
            radius_y: Some(radius_y),
            ..Self::default()
        }
    }

    pub fn with_style(mut self, style: PathStyle) -> Self {
        self.style = style;
        self
    }

    /// Build options from radii supplied outside the JSON value, so NaN and
    /// infinite radii (which JSON cannot carry) still reach construction checks.
    /// Given radii override any `radius`/`radiusY` keys in `rest`.
    pub fn from_parts(
        radius: Option<f64>,
        radius_y: Option<f64>,
        rest: Value,
    ) -> Result<Self, EllipseError> {
        let mut options: Self = match rest {
            Value::Null => Self::default(),
            Value::Object(_) => serde_json::from_value(rest)?,
            other => {
                return Err(EllipseError::Config(format!(
                    "expected an options object, got {other}"
                )))
            }
        };
        if let Some(radius) = radius {
            options.radius = radius;
        }
        if radius_y.is_some() {
            options.radius_y = radius_y;
        }
        Ok(options)
    }

    pub fn from_json(json: &str) -> Result<Self, EllipseError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, EllipseError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// The two call shapes the ellipse factory accepts.
#[derive(Clone, Debug, PartialEq)]
pub enum EllipseArgs {
    /// `(center, options)`
    Options(EllipseOptions),
    /// `(center, radius, options?)`: the number sets both radii.
    Legacy {
        radius: f64,
        options: Option<EllipseOptions>,
    },
}

impl EllipseArgs {
    /// Collapse either shape into a single options value.
    pub fn normalize(self) -> EllipseOptions {
        match self {
            EllipseArgs::Options(options) => options,
            EllipseArgs::Legacy { radius, options } => EllipseOptions {
                radius,
                radius_y: Some(radius),
                ..options.unwrap_or_default()
            },
        }
    }

    /// Parse loosely typed arguments: a number selects the legacy shape and
    /// `legacy` then supplies the remaining options.
    pub fn from_values(options: Value, legacy: Option<Value>) -> Result<Self, EllipseError> {
        match options {
            Value::Number(n) => {
                let radius = n
                    .as_f64()
                    .ok_or_else(|| EllipseError::Config(format!("radius {n} is not a float")))?;
                let options = match legacy {
                    Some(Value::Null) | None => None,
                    Some(v) => Some(serde_json::from_value(v)?),
                };
                Ok(EllipseArgs::Legacy { radius, options })
            }
            Value::Object(_) => Ok(EllipseArgs::Options(serde_json::from_value(options)?)),
            Value::Null => Ok(EllipseArgs::Options(EllipseOptions::default())),
            other => Err(EllipseError::Config(format!(
                "expected a radius or an options object, got {other}"
            ))),
        }
    }
}

impl From<EllipseOptions> for EllipseArgs {
    fn from(options: EllipseOptions) -> Self {
        EllipseArgs::Options(options)
    }
}

impl From<f64> for EllipseArgs {
    fn from(radius: f64) -> Self {
        EllipseArgs::Legacy {
            radius,
            options: None,
        }
    }
}

impl From<(f64, EllipseOptions)> for EllipseArgs {
    fn from((radius, options): (f64, EllipseOptions)) -> Self {
        EllipseArgs::Legacy {
            radius,
            options: Some(options),
        }
    }
}
