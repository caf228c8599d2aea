use crate::config::ThemeConfig;
use serde::Deserialize;
use std::{fmt, str::FromStr};

/// An RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub(crate) struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    pub(crate) const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        if digits.len() != 6 {
            return Err(ColorError::Length(input.to_string()));
        }
        let bytes = hex::decode(digits)?;
        Ok(Self::new(bytes[0], bytes[1], bytes[2]))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(input: String) -> Result<Self, Self::Error> {
        input.parse()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", hex::encode([self.r, self.g, self.b]))
    }
}

#[cfg(feature = "json-schema")]
impl schemars::JsonSchema for Color {
    fn schema_name() -> String {
        "Color".into()
    }

    fn json_schema(generator: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        String::json_schema(generator)
    }
}

impl From<Color> for crossterm::style::Color {
    fn from(color: Color) -> Self {
        Self::Rgb { r: color.r, g: color.g, b: color.b }
    }
}

#[derive(thiserror::Error, Debug)]
pub(crate) enum ColorError {
    #[error("color '{0}' must have exactly 6 hex digits")]
    Length(String),

    #[error("invalid hex color: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// Whether the dark or the light palette is in use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum, strum::Display)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub(crate) fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// The colors used to draw a frame and its surrounding text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Palette {
    pub(crate) background: Color,
    pub(crate) text: Color,
    pub(crate) muted: Color,
    pub(crate) bar: Color,
    pub(crate) highlight: Color,
}

const DEFAULT_BAR: Color = Color::new(0x34, 0x98, 0xdb);
const DEFAULT_HIGHLIGHT: Color = Color::new(0xff, 0x00, 0x00);

impl Palette {
    fn dark(bar: Color, highlight: Color) -> Self {
        Self {
            background: Color::new(0x12, 0x12, 0x12),
            text: Color::new(0xee, 0xee, 0xee),
            muted: Color::new(0x88, 0x88, 0x88),
            bar,
            highlight,
        }
    }

    fn light(bar: Color, highlight: Color) -> Self {
        Self {
            background: Color::new(0xf5, 0xf5, 0xf5),
            text: Color::new(0x22, 0x22, 0x22),
            muted: Color::new(0x66, 0x66, 0x66),
            bar,
            highlight,
        }
    }
}

/// The active presentation theme.
///
/// Toggling the theme only changes how things are presented; it never affects a running session.
#[derive(Clone, Debug)]
pub(crate) struct Theme {
    mode: ThemeMode,
    dark: Palette,
    light: Palette,
}

impl Theme {
    pub(crate) fn new(config: &ThemeConfig) -> Self {
        let bar = config.bar.unwrap_or(DEFAULT_BAR);
        let highlight = config.highlight.unwrap_or(DEFAULT_HIGHLIGHT);
        Self { mode: config.mode, dark: Palette::dark(bar, highlight), light: Palette::light(bar, highlight) }
    }

    pub(crate) fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub(crate) fn palette(&self) -> &Palette {
        match self.mode {
            ThemeMode::Dark => &self.dark,
            ThemeMode::Light => &self.light,
        }
    }

    pub(crate) fn toggle(&mut self) {
        self.mode = self.mode.toggled();
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(&ThemeConfig::default())
    }
}
