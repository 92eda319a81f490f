//! Horizontal and vertical text alignment

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl HAlign {
    /// X offset applied to every vertex of a line
    pub fn offset(self, line_width: f32, block_width: f32) -> f32 {
        match self {
            HAlign::Left => 0.0,
            HAlign::Center => -line_width / 2.0,
            HAlign::Right => block_width - line_width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

impl VAlign {
    /// Y offset applied to the whole block
    pub fn offset(self, block_height: f32) -> f32 {
        match self {
            VAlign::Top => 0.0,
            VAlign::Center => block_height / 2.0,
            VAlign::Bottom => block_height,
        }
    }
}

impl FromStr for HAlign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(HAlign::Left),
            "center" | "centre" => Ok(HAlign::Center),
            "right" => Ok(HAlign::Right),
            other => Err(format!(
                "unknown horizontal alignment '{other}' (expected left, center or right)"
            )),
        }
    }
}

impl FromStr for VAlign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "top" => Ok(VAlign::Top),
            "center" | "centre" => Ok(VAlign::Center),
            "bottom" => Ok(VAlign::Bottom),
            other => Err(format!(
                "unknown vertical alignment '{other}' (expected top, center or bottom)"
            )),
        }
    }
}

impl fmt::Display for HAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HAlign::Left => "left",
            HAlign::Center => "center",
            HAlign::Right => "right",
        };
        f.write_str(name)
    }
}

impl fmt::Display for VAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VAlign::Top => "top",
            VAlign::Center => "center",
            VAlign::Bottom => "bottom",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_offsets() {
        assert_eq!(HAlign::Left.offset(40.0, 100.0), 0.0);
        assert_eq!(HAlign::Center.offset(40.0, 100.0), -20.0);
        assert_eq!(HAlign::Right.offset(40.0, 100.0), 60.0);
    }

    #[test]
    fn vertical_offsets() {
        assert_eq!(VAlign::Top.offset(30.0), 0.0);
        assert_eq!(VAlign::Center.offset(30.0), 15.0);
        assert_eq!(VAlign::Bottom.offset(30.0), 30.0);
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("Center".parse::<HAlign>(), Ok(HAlign::Center));
        assert_eq!("bottom".parse::<VAlign>(), Ok(VAlign::Bottom));
        assert!("middle".parse::<HAlign>().is_err());
        assert_eq!(HAlign::Right.to_string(), "right");
        assert_eq!(
            serde_json::to_string(&VAlign::Center).unwrap(),
            "\"center\""
        );
    }
}
