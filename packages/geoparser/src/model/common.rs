//! Value types shared by several node kinds.

use serde::Serialize;

/// A position in degrees, altitude in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
    pub altitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(longitude: f64, latitude: f64, altitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            altitude,
        }
    }
}

/// How altitude values are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AltitudeMode {
    #[default]
    ClampToGround,
    RelativeToGround,
    Absolute,
    ClampToSeaFloor,
    RelativeToSeaFloor,
}

impl AltitudeMode {
    /// Parse a KML `altitudeMode` (or `gx:altitudeMode`) value.
    ///
    /// # Examples
    /// ```
    /// use marble_geoparser::model::AltitudeMode;
    ///
    /// assert_eq!(AltitudeMode::from_kml("absolute"), Some(AltitudeMode::Absolute));
    /// assert_eq!(AltitudeMode::from_kml("bogus"), None);
    /// ```
    #[must_use]
    pub fn from_kml(text: &str) -> Option<Self> {
        match text.trim() {
            "clampToGround" => Some(Self::ClampToGround),
            "relativeToGround" => Some(Self::RelativeToGround),
            "absolute" => Some(Self::Absolute),
            "clampToSeaFloor" => Some(Self::ClampToSeaFloor),
            "relativeToSeaFloor" => Some(Self::RelativeToSeaFloor),
            _ => None,
        }
    }
}

/// An RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    /// Parse a KML colour, written as hexadecimal `aabbggrr`.
    ///
    /// A leading `#` is accepted, as is the six digit `bbggrr` form, which
    /// is taken as fully opaque.
    #[must_use]
    pub fn from_kml(text: &str) -> Option<Self> {
        let hex = text.trim().trim_start_matches('#');
        let digits = match hex.len() {
            8 => hex.to_string(),
            6 => format!("ff{hex}"),
            _ => return None,
        };
        let value = u32::from_str_radix(&digits, 16).ok()?;
        let [alpha, blue, green, red] = value.to_be_bytes();
        Some(Self {
            red,
            green,
            blue,
            alpha,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorMode {
    #[default]
    Normal,
    Random,
}

impl ColorMode {
    #[must_use]
    pub fn from_kml(text: &str) -> Option<Self> {
        match text.trim() {
            "normal" => Some(Self::Normal),
            "random" => Some(Self::Random),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_kml_byte_order() {
        let color = Color::from_kml("7f00ff14").unwrap();
        assert_eq!(
            color,
            Color {
                red: 0x14,
                green: 0xff,
                blue: 0x00,
                alpha: 0x7f
            }
        );
    }

    #[test]
    fn test_color_from_kml_short_and_invalid() {
        assert_eq!(Color::from_kml("#0000ff").unwrap().alpha, 0xff);
        assert_eq!(Color::from_kml("#0000ff").unwrap().red, 0xff);
        assert!(Color::from_kml("red").is_none());
        assert!(Color::from_kml("zz00ff14").is_none());
    }

    #[test]
    fn test_altitude_mode_gx_values() {
        assert_eq!(
            AltitudeMode::from_kml(" relativeToSeaFloor "),
            Some(AltitudeMode::RelativeToSeaFloor)
        );
        assert_eq!(AltitudeMode::default(), AltitudeMode::ClampToGround);
    }
}
