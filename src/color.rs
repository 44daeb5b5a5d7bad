use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorName {
    Black,
    White,
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Pink,
}

impl ColorName {
    /// Catalog order. Index `i` holds the variant whose discriminant is `i`.
    pub const ALL: [ColorName; 8] = [
        Self::Black,
        Self::White,
        Self::Red,
        Self::Green,
        Self::Blue,
        Self::Yellow,
        Self::Purple,
        Self::Pink,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
            Self::Purple => "purple",
            Self::Pink => "pink",
        }
    }

    pub fn capitalized(self) -> &'static str {
        match self {
            Self::Black => "Black",
            Self::White => "White",
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
            Self::Yellow => "Yellow",
            Self::Purple => "Purple",
            Self::Pink => "Pink",
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Black => (0, 0, 0),
            Self::White => (255, 255, 255),
            Self::Red => (255, 0, 0),
            Self::Green => (0, 255, 0),
            Self::Blue => (0, 0, 255),
            Self::Yellow => (255, 255, 0),
            Self::Purple => (128, 0, 128),
            Self::Pink => (255, 182, 193),
        }
    }

    pub fn color(self) -> Color {
        let (r, g, b) = self.rgb();
        Color::Rgb(r, g, b)
    }
}

impl Display for ColorName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ColorOption {
    pub name: ColorName,
    pub rgb: (u8, u8, u8),
    pub enabled: bool,
}

/// The fixed set of colors the game knows, with the player's enabled flags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    options: [ColorOption; 8],
}

impl Default for Catalog {
    fn default() -> Self {
        Self::with_enabled(&[ColorName::Black, ColorName::White])
    }
}

impl Catalog {
    pub fn with_enabled(enabled: &[ColorName]) -> Self {
        let options = ColorName::ALL.map(|name| ColorOption {
            name,
            rgb: name.rgb(),
            enabled: enabled.contains(&name),
        });
        Self { options }
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColorOption> {
        self.options.iter()
    }

    pub fn get(&self, name: ColorName) -> &ColorOption {
        &self.options[name as usize]
    }

    pub fn is_enabled(&self, name: ColorName) -> bool {
        self.get(name).enabled
    }

    pub fn enabled(&self) -> impl Iterator<Item = ColorName> + '_ {
        self.options.iter().filter(|o| o.enabled).map(|o| o.name)
    }

    pub fn enabled_count(&self) -> usize {
        self.options.iter().filter(|o| o.enabled).count()
    }

    pub(crate) fn set_enabled(&mut self, name: ColorName, enabled: bool) {
        self.options[name as usize].enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_discriminant_order() {
        for (i, name) in ColorName::ALL.iter().enumerate() {
            assert_eq!(*name as usize, i);
        }
    }

    #[test]
    fn default_catalog_enables_black_and_white() {
        let catalog = Catalog::default();
        assert_eq!(catalog.len(), 8);
        assert_eq!(
            catalog.enabled().collect::<Vec<_>>(),
            vec![ColorName::Black, ColorName::White]
        );
        assert_eq!(catalog.get(ColorName::Pink).rgb, (255, 182, 193));
    }

    #[test]
    fn names_parse_from_lowercase_json() {
        let name: ColorName = serde_json::from_str("\"purple\"").unwrap();
        assert_eq!(name, ColorName::Purple);
        assert_eq!(name.to_string(), "purple");
        assert_eq!(name.capitalized(), "Purple");
    }
}
