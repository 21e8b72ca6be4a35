use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result};
use crate::geometry::Point;

/// How coordinates are written on export.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde_derive::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum Coordinates {
    /// Keep each command's own absolute / relative mode
    #[default]
    Initial,
    Absolute,
    Relative,
    /// Per command, whichever of absolute or relative is shorter
    Auto,
}

impl FromStr for Coordinates {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "initial" => Ok(Coordinates::Initial),
            "absolute" => Ok(Coordinates::Absolute),
            "relative" => Ok(Coordinates::Relative),
            "auto" => Ok(Coordinates::Auto),
            _ => Err(Error::InvalidValue("coordinates".to_string(), s.to_string())),
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Coordinates::Initial => "initial",
            Coordinates::Absolute => "absolute",
            Coordinates::Relative => "relative",
            Coordinates::Auto => "auto",
        };
        write!(f, "{name}")
    }
}

/// Options controlling `Path::export`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(serde_derive::Deserialize))]
#[cfg_attr(
    feature = "json",
    serde(default, deny_unknown_fields, rename_all = "camelCase")
)]
pub struct ExportSettings {
    pub coordinates: Coordinates,
    /// Drop every character not needed to read the data back
    pub compress: bool,
    /// Merge chained moves and collinear lines
    pub combine: bool,
    pub fraction_digits: u32,
    #[cfg_attr(feature = "json", serde(deserialize_with = "de_vector"))]
    pub scale: Option<Point>,
    #[cfg_attr(feature = "json", serde(deserialize_with = "de_vector"))]
    pub translate: Option<Point>,
    /// Wrap output at command boundaries once a line would exceed this
    pub max_chars_per_line: Option<usize>,
    pub commands_on_new_lines: bool,
    /// Emit a bare point list suitable for `<polygon points="...">`
    pub to_polygon: bool,
    /// Yield to the runtime between commands in `Path::export_async`
    #[cfg_attr(feature = "json", serde(rename = "async"))]
    pub async_export: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            coordinates: Coordinates::Initial,
            compress: false,
            combine: true,
            fraction_digits: 3,
            scale: None,
            translate: None,
            max_chars_per_line: None,
            commands_on_new_lines: false,
            to_polygon: false,
            async_export: false,
        }
    }
}

impl ExportSettings {
    pub fn validate(&self) -> Result<()> {
        if self.max_chars_per_line == Some(0) {
            return Err(Error::Validation(
                "maxCharsPerLine must be a positive integer".to_string(),
            ));
        }
        check_finite("scale", self.scale)?;
        check_finite("translate", self.translate)
    }

    /// Settings as actually applied: polygon output is always absolute.
    pub(crate) fn normalized(&self) -> Self {
        let mut settings = self.clone();
        if settings.to_polygon {
            settings.coordinates = Coordinates::Absolute;
        }
        settings
    }

    /// Position of an absolute point in the output coordinate space.
    pub(crate) fn place(&self, point: Point) -> Point {
        apply_transform(point, self.translate, self.scale, Some(self.fraction_digits))
    }

    /// Parse settings from the camelCase JSON option object, e.g.
    /// `{"coordinates": "auto", "compress": true, "scale": [2, 1]}`.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| Error::Validation(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }
}

/// Geometry changes applied in place by `Path::transform`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransformSettings {
    pub fraction_digits: Option<u32>,
    pub scale: Option<Point>,
    pub translate: Option<Point>,
}

impl TransformSettings {
    pub fn validate(&self) -> Result<()> {
        check_finite("scale", self.scale)?;
        check_finite("translate", self.translate)
    }

    pub(crate) fn apply(&self, point: Point) -> Point {
        apply_transform(point, self.translate, self.scale, self.fraction_digits)
    }

    pub(crate) fn round(&self, value: f64) -> f64 {
        match self.fraction_digits {
            Some(digits) => crate::geometry::round_to(value, digits),
            None => value,
        }
    }

    pub(crate) fn scale(&self) -> Point {
        self.scale.unwrap_or(Point::new(1., 1.))
    }
}

/// Scale factors with opposite signs reverse the winding direction.
pub(crate) fn is_mirrored(scale: Option<Point>) -> bool {
    scale.is_some_and(|s| s.x * s.y < 0.)
}

fn apply_transform(
    point: Point,
    translate: Option<Point>,
    scale: Option<Point>,
    fraction_digits: Option<u32>,
) -> Point {
    let mut point = point;
    if let Some(translate) = translate {
        point = point + translate;
    }
    if let Some(scale) = scale {
        point = point * scale;
    }
    match fraction_digits {
        Some(digits) => point.round(digits),
        None => point,
    }
}

fn check_finite(name: &str, value: Option<Point>) -> Result<()> {
    match value {
        Some(p) if !p.is_finite() => Err(Error::Validation(format!(
            "{name} must be finite, got {p}"
        ))),
        _ => Ok(()),
    }
}

#[cfg(feature = "json")]
#[derive(serde_derive::Deserialize)]
#[serde(untagged)]
enum VectorArg {
    Scalar(f64),
    Pair([f64; 2]),
    Object { x: f64, y: f64 },
}

#[cfg(feature = "json")]
fn de_vector<'de, D>(deserializer: D) -> std::result::Result<Option<Point>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    Ok(
        Option::<VectorArg>::deserialize(deserializer)?.map(|v| match v {
            VectorArg::Scalar(s) => Point::from(s),
            VectorArg::Pair(pair) => Point::from(pair),
            VectorArg::Object { x, y } => Point::new(x, y),
        }),
    )
}
