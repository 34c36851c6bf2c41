use serde::{Deserialize, Serialize};

/// An sRGB colour with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` string
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        match (
            u8::from_str_radix(&digits[0..2], 16),
            u8::from_str_radix(&digits[2..4], 16),
            u8::from_str_radix(&digits[4..6], 16),
        ) {
            (Ok(r), Ok(g), Ok(b)) => Some(Self { r, g, b }),
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Euclidean distance in RGB space
    pub fn distance(&self, other: &Rgb) -> f64 {
        let dr = self.r as f64 - other.r as f64;
        let dg = self.g as f64 - other.g as f64;
        let db = self.b as f64 - other.b as f64;
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

/// Primary gel colours available for mixing.
///
/// Variant order is the tie-break order used when two gels need the same amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryColor {
    Red,
    Yellow,
    Blue,
    White,
    Black,
    Green,
    Orange,
    Purple,
    Pink,
    Brown,
}

impl PrimaryColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimaryColor::Red => "red",
            PrimaryColor::Yellow => "yellow",
            PrimaryColor::Blue => "blue",
            PrimaryColor::White => "white",
            PrimaryColor::Black => "black",
            PrimaryColor::Green => "green",
            PrimaryColor::Orange => "orange",
            PrimaryColor::Purple => "purple",
            PrimaryColor::Pink => "pink",
            PrimaryColor::Brown => "brown",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "red" => Some(PrimaryColor::Red),
            "yellow" => Some(PrimaryColor::Yellow),
            "blue" => Some(PrimaryColor::Blue),
            "white" => Some(PrimaryColor::White),
            "black" => Some(PrimaryColor::Black),
            "green" => Some(PrimaryColor::Green),
            "orange" => Some(PrimaryColor::Orange),
            "purple" => Some(PrimaryColor::Purple),
            "pink" => Some(PrimaryColor::Pink),
            "brown" => Some(PrimaryColor::Brown),
            _ => None,
        }
    }

    /// Capitalised name for instructions, e.g. "Red"
    pub fn display_name(&self) -> &'static str {
        match self {
            PrimaryColor::Red => "Red",
            PrimaryColor::Yellow => "Yellow",
            PrimaryColor::Blue => "Blue",
            PrimaryColor::White => "White",
            PrimaryColor::Black => "Black",
            PrimaryColor::Green => "Green",
            PrimaryColor::Orange => "Orange",
            PrimaryColor::Purple => "Purple",
            PrimaryColor::Pink => "Pink",
            PrimaryColor::Brown => "Brown",
        }
    }

    /// Canonical colour of the gel
    pub fn reference(&self) -> Rgb {
        match self {
            PrimaryColor::Red => Rgb::new(255, 0, 0),
            PrimaryColor::Yellow => Rgb::new(255, 255, 0),
            PrimaryColor::Blue => Rgb::new(0, 0, 255),
            PrimaryColor::White => Rgb::new(255, 255, 255),
            PrimaryColor::Black => Rgb::new(0, 0, 0),
            PrimaryColor::Green => Rgb::new(0, 255, 0),
            PrimaryColor::Orange => Rgb::new(255, 165, 0),
            PrimaryColor::Purple => Rgb::new(128, 0, 128),
            PrimaryColor::Pink => Rgb::new(255, 192, 203),
            PrimaryColor::Brown => Rgb::new(139, 69, 19),
        }
    }

    pub fn all() -> Vec<PrimaryColor> {
        vec![
            PrimaryColor::Red,
            PrimaryColor::Yellow,
            PrimaryColor::Blue,
            PrimaryColor::White,
            PrimaryColor::Black,
            PrimaryColor::Green,
            PrimaryColor::Orange,
            PrimaryColor::Purple,
            PrimaryColor::Pink,
            PrimaryColor::Brown,
        ]
    }
}

/// Gel colour manufacturers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Brand {
    Wilton,
    AmeriColor,
    Sugarflair,
    Generic,
}

impl Brand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Brand::Wilton => "Wilton",
            Brand::AmeriColor => "AmeriColor",
            Brand::Sugarflair => "Sugarflair",
            Brand::Generic => "Generic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "wilton" => Some(Brand::Wilton),
            "americolor" => Some(Brand::AmeriColor),
            "sugarflair" => Some(Brand::Sugarflair),
            "generic" => Some(Brand::Generic),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Brand::Wilton => "Standard intensity gel colors",
            Brand::AmeriColor => "More concentrated, use less",
            Brand::Sugarflair => "Slightly less concentrated",
            Brand::Generic => "Basic gel colors, may need more",
        }
    }

    /// Multiplier written into a fresh calibration
    pub fn factory_multiplier(&self) -> f64 {
        match self {
            Brand::Wilton => 1.0,
            Brand::AmeriColor => 1.15,
            Brand::Sugarflair => 1.05,
            Brand::Generic => 0.8,
        }
    }

    pub fn all() -> Vec<Brand> {
        vec![
            Brand::Wilton,
            Brand::AmeriColor,
            Brand::Sugarflair,
            Brand::Generic,
        ]
    }
}
