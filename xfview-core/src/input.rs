/// Numeric form fields and their text parsing
use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use nom::{
    character::complete::multispace0,
    combinator::all_consuming,
    number::complete::double,
    sequence::delimited,
    IResult,
};

/// Amount a field moves per nudge
pub const FIELD_STEP: f64 = 0.1;

/// Parse the text of a numeric form field.
///
/// Empty or unparsable text, and text that parses to NaN, yield `0.0`.
pub fn parse_field(text: &str) -> f64 {
    if text.trim().is_empty() {
        return 0.0;
    }

    match parse_number(text) {
        Ok((_, value)) if !value.is_nan() => value,
        Ok(_) => {
            log::debug!("field text {text:?} is NaN, using 0");
            0.0
        }
        Err(e) => {
            log::debug!("field text {text:?} is not a number ({e:?}), using 0");
            0.0
        }
    }
}

fn parse_number(input: &str) -> IResult<&str, f64> {
    all_consuming(delimited(multispace0, double, multispace0))(input)
}

/// Every numeric field of the form, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    RotationX,
    RotationY,
    RotationZ,
    TranslationX,
    TranslationY,
    TranslationZ,
    ScaleX,
    ScaleY,
    ScaleZ,
    CameraX,
    CameraY,
    CameraZ,
    CameraRotationX,
    CameraRotationY,
    CameraRotationZ,
    Fov,
    Aspect,
    Near,
    Far,
    Left,
    Right,
    Bottom,
    Top,
}

impl Field {
    pub const ALL: [Field; 23] = [
        Field::RotationX,
        Field::RotationY,
        Field::RotationZ,
        Field::TranslationX,
        Field::TranslationY,
        Field::TranslationZ,
        Field::ScaleX,
        Field::ScaleY,
        Field::ScaleZ,
        Field::CameraX,
        Field::CameraY,
        Field::CameraZ,
        Field::CameraRotationX,
        Field::CameraRotationY,
        Field::CameraRotationZ,
        Field::Fov,
        Field::Aspect,
        Field::Near,
        Field::Far,
        Field::Left,
        Field::Right,
        Field::Bottom,
        Field::Top,
    ];

    /// Stable identifier, also accepted by `FromStr`
    pub fn name(self) -> &'static str {
        match self {
            Field::RotationX => "rotation.x",
            Field::RotationY => "rotation.y",
            Field::RotationZ => "rotation.z",
            Field::TranslationX => "translation.x",
            Field::TranslationY => "translation.y",
            Field::TranslationZ => "translation.z",
            Field::ScaleX => "scale.x",
            Field::ScaleY => "scale.y",
            Field::ScaleZ => "scale.z",
            Field::CameraX => "camera.x",
            Field::CameraY => "camera.y",
            Field::CameraZ => "camera.z",
            Field::CameraRotationX => "camera.rotation.x",
            Field::CameraRotationY => "camera.rotation.y",
            Field::CameraRotationZ => "camera.rotation.z",
            Field::Fov => "fov",
            Field::Aspect => "aspect",
            Field::Near => "near",
            Field::Far => "far",
            Field::Left => "ortho.left",
            Field::Right => "ortho.right",
            Field::Bottom => "ortho.bottom",
            Field::Top => "ortho.top",
        }
    }

    /// Short label for form rendering
    pub fn label(self) -> &'static str {
        match self {
            Field::RotationX => "rot x",
            Field::RotationY => "rot y",
            Field::RotationZ => "rot z",
            Field::TranslationX => "tra x",
            Field::TranslationY => "tra y",
            Field::TranslationZ => "tra z",
            Field::ScaleX => "sca x",
            Field::ScaleY => "sca y",
            Field::ScaleZ => "sca z",
            Field::CameraX => "cam x",
            Field::CameraY => "cam y",
            Field::CameraZ => "cam z",
            Field::CameraRotationX => "cam rx",
            Field::CameraRotationY => "cam ry",
            Field::CameraRotationZ => "cam rz",
            Field::Fov => "fov",
            Field::Aspect => "aspect",
            Field::Near => "near",
            Field::Far => "far",
            Field::Left => "xmin",
            Field::Right => "xmax",
            Field::Bottom => "ymin",
            Field::Top => "ymax",
        }
    }

    pub fn step(self) -> f64 {
        FIELD_STEP
    }

    /// Position in `Field::ALL`
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&field| field == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        match Self::ALL.iter().find(|field| field.name() == name) {
            Some(&field) => Ok(field),
            None => bail!("unknown field `{name}`"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_field("1.5"), 1.5);
        assert_eq!(parse_field("  -3 "), -3.0);
        assert_eq!(parse_field("1e3"), 1000.0);
        assert_eq!(parse_field(".25"), 0.25);
    }

    #[test]
    fn test_parse_failures_become_zero() {
        assert_eq!(parse_field(""), 0.0);
        assert_eq!(parse_field("   "), 0.0);
        assert_eq!(parse_field("abc"), 0.0);
        assert_eq!(parse_field("1.5x"), 0.0);
        assert_eq!(parse_field("-"), 0.0);
        assert_eq!(parse_field("NaN"), 0.0);
    }

    #[test]
    fn test_parse_infinity_passes_through() {
        assert_eq!(parse_field("inf"), f64::INFINITY);
        assert_eq!(parse_field("1e400"), f64::INFINITY);
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(field.name().parse::<Field>().unwrap(), field);
            assert_eq!(field.step(), FIELD_STEP);
        }
        assert!("rotation.w".parse::<Field>().is_err());
    }

    #[test]
    fn test_field_navigation_wraps() {
        assert_eq!(Field::RotationX.previous(), Field::Top);
        assert_eq!(Field::Top.next(), Field::RotationX);
        assert_eq!(Field::Fov.next(), Field::Aspect);
    }
}
