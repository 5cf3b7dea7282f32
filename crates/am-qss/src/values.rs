//! QSS Property Definitions
//!
//! All supported style properties and their value types.
//! Uses enums for fixed values to save memory vs strings.

use std::fmt;

/// Property identifier - uses enum for type safety and memory efficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum PropertyId {
    // Backgrounds & colors
    Background,
    BackgroundColor,
    AlternateBackgroundColor,
    Color,
    SelectionBackgroundColor,
    SelectionColor,
    GridlineColor,

    // Border
    Border,
    BorderStyle,
    BorderWidth,
    BorderColor,
    BorderBottomColor,
    BorderRadius,
    BorderTopLeftRadius,
    BorderTopRightRadius,
    BorderBottomLeftRadius,
    BorderBottomRightRadius,

    // Box model
    Padding,
    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,
    Margin,
    MarginTop,
    MarginRight,
    MarginBottom,
    MarginLeft,
    Width,
    Height,
    MinWidth,
    MinHeight,
    MaxWidth,
    MaxHeight,
    Spacing,

    // Font
    FontFamily,
    FontSize,
    FontWeight,
    FontStyle,

    // Images & sub-control placement
    Image,
    SubcontrolOrigin,
    SubcontrolPosition,
}

impl PropertyId {
    /// Parse a property name into a PropertyId
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "background" => Self::Background,
            "background-color" => Self::BackgroundColor,
            "alternate-background-color" => Self::AlternateBackgroundColor,
            "color" => Self::Color,
            "selection-background-color" => Self::SelectionBackgroundColor,
            "selection-color" => Self::SelectionColor,
            "gridline-color" => Self::GridlineColor,

            "border" => Self::Border,
            "border-style" => Self::BorderStyle,
            "border-width" => Self::BorderWidth,
            "border-color" => Self::BorderColor,
            "border-bottom-color" => Self::BorderBottomColor,
            "border-radius" => Self::BorderRadius,
            "border-top-left-radius" => Self::BorderTopLeftRadius,
            "border-top-right-radius" => Self::BorderTopRightRadius,
            "border-bottom-left-radius" => Self::BorderBottomLeftRadius,
            "border-bottom-right-radius" => Self::BorderBottomRightRadius,

            "padding" => Self::Padding,
            "padding-top" => Self::PaddingTop,
            "padding-right" => Self::PaddingRight,
            "padding-bottom" => Self::PaddingBottom,
            "padding-left" => Self::PaddingLeft,

            "margin" => Self::Margin,
            "margin-top" => Self::MarginTop,
            "margin-right" => Self::MarginRight,
            "margin-bottom" => Self::MarginBottom,
            "margin-left" => Self::MarginLeft,

            "width" => Self::Width,
            "height" => Self::Height,
            "min-width" => Self::MinWidth,
            "min-height" => Self::MinHeight,
            "max-width" => Self::MaxWidth,
            "max-height" => Self::MaxHeight,
            "spacing" => Self::Spacing,

            "font-family" => Self::FontFamily,
            "font-size" => Self::FontSize,
            "font-weight" => Self::FontWeight,
            "font-style" => Self::FontStyle,

            "image" => Self::Image,
            "subcontrol-origin" => Self::SubcontrolOrigin,
            "subcontrol-position" => Self::SubcontrolPosition,

            _ => return None,
        })
    }

    /// Canonical property name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::BackgroundColor => "background-color",
            Self::AlternateBackgroundColor => "alternate-background-color",
            Self::Color => "color",
            Self::SelectionBackgroundColor => "selection-background-color",
            Self::SelectionColor => "selection-color",
            Self::GridlineColor => "gridline-color",

            Self::Border => "border",
            Self::BorderStyle => "border-style",
            Self::BorderWidth => "border-width",
            Self::BorderColor => "border-color",
            Self::BorderBottomColor => "border-bottom-color",
            Self::BorderRadius => "border-radius",
            Self::BorderTopLeftRadius => "border-top-left-radius",
            Self::BorderTopRightRadius => "border-top-right-radius",
            Self::BorderBottomLeftRadius => "border-bottom-left-radius",
            Self::BorderBottomRightRadius => "border-bottom-right-radius",

            Self::Padding => "padding",
            Self::PaddingTop => "padding-top",
            Self::PaddingRight => "padding-right",
            Self::PaddingBottom => "padding-bottom",
            Self::PaddingLeft => "padding-left",

            Self::Margin => "margin",
            Self::MarginTop => "margin-top",
            Self::MarginRight => "margin-right",
            Self::MarginBottom => "margin-bottom",
            Self::MarginLeft => "margin-left",

            Self::Width => "width",
            Self::Height => "height",
            Self::MinWidth => "min-width",
            Self::MinHeight => "min-height",
            Self::MaxWidth => "max-width",
            Self::MaxHeight => "max-height",
            Self::Spacing => "spacing",

            Self::FontFamily => "font-family",
            Self::FontSize => "font-size",
            Self::FontWeight => "font-weight",
            Self::FontStyle => "font-style",

            Self::Image => "image",
            Self::SubcontrolOrigin => "subcontrol-origin",
            Self::SubcontrolPosition => "subcontrol-position",
        }
    }
}

/// Property value - parsed and typed
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Keyword value (none, solid, bold, etc.)
    Keyword(Keyword),
    /// Length value (px, pt, em, ex, %)
    Length(Length),
    /// Color value (hex, rgb()/rgba(), named, transparent)
    Color(Color),
    /// qlineargradient(...) value
    Gradient(LinearGradient),
    /// Bare number (font-weight: 600, spacing factors)
    Number(f32),
    /// Quoted string or unrecognized bare token (font names etc.)
    String(String),
    /// url(...) reference, kept verbatim; resolved by the renderer
    Url(String),
    /// Whitespace/comma separated shorthand ("1px solid #999999")
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Parse a declaration value.
    ///
    /// Components are split on top-level whitespace and commas, so
    /// `qlineargradient(...)` and `rgba(...)` stay intact.
    pub fn parse(text: &str) -> Option<Self> {
        let mut components = Vec::new();
        for token in split_components(text) {
            components.push(Self::parse_component(token)?);
        }
        match components.len() {
            0 => None,
            1 => components.pop(),
            _ => Some(Self::List(components)),
        }
    }

    fn parse_component(token: &str) -> Option<Self> {
        if let Some(inner) = strip_func(token, "qlineargradient") {
            return LinearGradient::parse_args(inner).map(Self::Gradient);
        }
        if let Some(inner) = strip_func(token, "url") {
            let path = inner.trim().trim_matches('"').trim_matches('\'');
            return Some(Self::Url(path.to_string()));
        }
        if let Some(color) = Color::parse(token) {
            return Some(Self::Color(color));
        }
        if let Some(length) = Length::parse(token) {
            return Some(Self::Length(length));
        }
        if let Ok(num) = token.parse::<f32>() {
            return Some(Self::Number(num));
        }
        if (token.starts_with('\'') && token.ends_with('\'') && token.len() >= 2)
            || (token.starts_with('"') && token.ends_with('"') && token.len() >= 2)
        {
            return Some(Self::String(token[1..token.len() - 1].to_string()));
        }
        if let Some(kw) = Keyword::from_str(token) {
            return Some(Self::Keyword(kw));
        }
        // Unrecognized bare token (e.g. a font family): keep it as-is
        // so the rule survives and round-trips.
        Some(Self::String(token.to_string()))
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(kw) => f.write_str(kw.as_str()),
            Self::Length(len) => write!(f, "{len}"),
            Self::Color(color) => write!(f, "{color}"),
            Self::Gradient(grad) => write!(f, "{grad}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => {
                if s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                    f.write_str(s)
                } else {
                    write!(f, "'{s}'")
                }
            }
            Self::Url(path) => write!(f, "url({path})"),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

/// Split a value into components on top-level whitespace and commas
///
/// Parenthesized arguments and quoted strings are kept intact.
fn split_components(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = None;
    for (i, ch) in text.char_indices() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            start.get_or_insert(i);
            continue;
        }
        match ch {
            '\'' | '"' => {
                quote = Some(ch);
                start.get_or_insert(i);
            }
            '(' => {
                depth += 1;
                start.get_or_insert(i);
            }
            ')' => depth = depth.saturating_sub(1),
            c if depth == 0 && (c.is_whitespace() || c == ',') => {
                if let Some(s) = start.take() {
                    out.push(&text[s..i]);
                }
            }
            _ => {
                start.get_or_insert(i);
            }
        }
    }
    if let Some(s) = start {
        out.push(&text[s..]);
    }
    out
}

/// Split on a separator, ignoring separators inside parentheses
pub(crate) fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in text.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                out.push(&text[start..i]);
                start = i + ch.len_utf8();
            }
            _ => {}
        }
    }
    out.push(&text[start..]);
    out
}

/// Strip `name(` ... `)` from a token, returning the inner text
fn strip_func<'a>(token: &'a str, name: &str) -> Option<&'a str> {
    let rest = token.strip_prefix(name)?;
    let rest = rest.strip_prefix('(')?;
    rest.strip_suffix(')')
}

/// QSS keyword values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    None,
    Auto,

    // Border styles
    Solid,
    Dashed,
    Dotted,
    Double,
    Inset,
    Outset,
    Ridge,

    // Font
    Bold,
    Bolder,
    Lighter,
    Normal,
    Italic,
    Oblique,

    // subcontrol-origin boxes
    Margin,
    Border,
    Padding,
    Content,

    // subcontrol-position / alignment
    Top,
    Bottom,
    Left,
    Right,
    Center,
}

impl Keyword {
    pub fn from_str(s: &str) -> Option<Self> {
        Some(match s {
            "none" => Self::None,
            "auto" => Self::Auto,
            "solid" => Self::Solid,
            "dashed" => Self::Dashed,
            "dotted" => Self::Dotted,
            "double" => Self::Double,
            "inset" => Self::Inset,
            "outset" => Self::Outset,
            "ridge" => Self::Ridge,
            "bold" => Self::Bold,
            "bolder" => Self::Bolder,
            "lighter" => Self::Lighter,
            "normal" => Self::Normal,
            "italic" => Self::Italic,
            "oblique" => Self::Oblique,
            "margin" => Self::Margin,
            "border" => Self::Border,
            "padding" => Self::Padding,
            "content" => Self::Content,
            "top" => Self::Top,
            "bottom" => Self::Bottom,
            "left" => Self::Left,
            "right" => Self::Right,
            "center" => Self::Center,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Auto => "auto",
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
            Self::Double => "double",
            Self::Inset => "inset",
            Self::Outset => "outset",
            Self::Ridge => "ridge",
            Self::Bold => "bold",
            Self::Bolder => "bolder",
            Self::Lighter => "lighter",
            Self::Normal => "normal",
            Self::Italic => "italic",
            Self::Oblique => "oblique",
            Self::Margin => "margin",
            Self::Border => "border",
            Self::Padding => "padding",
            Self::Content => "content",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
        }
    }
}

/// QSS length value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    pub value: f32,
    pub unit: LengthUnit,
}

impl Length {
    pub fn px(value: f32) -> Self {
        Self {
            value,
            unit: LengthUnit::Px,
        }
    }

    pub fn pt(value: f32) -> Self {
        Self {
            value,
            unit: LengthUnit::Pt,
        }
    }

    pub fn zero() -> Self {
        Self::px(0.0)
    }

    /// Parse "16px", "-4px", "10pt", "50%", or a bare "0"
    pub fn parse(s: &str) -> Option<Self> {
        let (num, unit) = if let Some(n) = s.strip_suffix("px") {
            (n, LengthUnit::Px)
        } else if let Some(n) = s.strip_suffix("pt") {
            (n, LengthUnit::Pt)
        } else if let Some(n) = s.strip_suffix("em") {
            (n, LengthUnit::Em)
        } else if let Some(n) = s.strip_suffix("ex") {
            (n, LengthUnit::Ex)
        } else if let Some(n) = s.strip_suffix('%') {
            (n, LengthUnit::Percent)
        } else if s == "0" {
            // Unitless zero is common in margin/padding shorthands
            ("0", LengthUnit::Px)
        } else {
            return None;
        };
        let value: f32 = num.trim().parse().ok()?;
        Some(Self { value, unit })
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.as_str())
    }
}

/// Length units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Px,
    Pt,
    Em,
    Ex,
    Percent,
}

impl LengthUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Pt => "pt",
            Self::Em => "em",
            Self::Ex => "ex",
            Self::Percent => "%",
        }
    }
}

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const TRANSPARENT: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };
    pub const BLACK: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse any color form: hex, rgb()/rgba(), named, transparent
    pub fn parse(s: &str) -> Option<Self> {
        if s.starts_with('#') {
            return Self::from_hex(s);
        }
        if s.starts_with("rgb(") || s.starts_with("rgba(") {
            return Self::from_rgb_func(s);
        }
        Self::from_name(s)
    }

    /// Parse a hex color (#RGB, #RRGGBB, #RRGGBBAA)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
                Some(Self::rgb(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::rgb(r, g, b))
            }
            8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
                Some(Self::rgba(r, g, b, a))
            }
            _ => None,
        }
    }

    /// Parse rgb(r, g, b) or rgba(r, g, b, a).
    ///
    /// Alpha is on Qt's 0-255 scale, e.g. `rgba(29, 185, 84, 120)`.
    pub fn from_rgb_func(s: &str) -> Option<Self> {
        let inner = s
            .strip_prefix("rgba")
            .or_else(|| s.strip_prefix("rgb"))?
            .strip_prefix('(')?
            .strip_suffix(')')?;
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        match parts.len() {
            3 => Some(Self::rgb(
                parts[0].parse().ok()?,
                parts[1].parse().ok()?,
                parts[2].parse().ok()?,
            )),
            4 => Some(Self::rgba(
                parts[0].parse().ok()?,
                parts[1].parse().ok()?,
                parts[2].parse().ok()?,
                parts[3].parse().ok()?,
            )),
            _ => None,
        }
    }

    /// Parse a named color
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "transparent" => Self::TRANSPARENT,
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::rgb(255, 0, 0),
            "green" => Self::rgb(0, 128, 0),
            "blue" => Self::rgb(0, 0, 255),
            "yellow" => Self::rgb(255, 255, 0),
            "cyan" | "aqua" => Self::rgb(0, 255, 255),
            "magenta" | "fuchsia" => Self::rgb(255, 0, 255),
            "gray" | "grey" => Self::rgb(128, 128, 128),
            "darkgray" | "darkgrey" => Self::rgb(169, 169, 169),
            "lightgray" | "lightgrey" => Self::rgb(211, 211, 211),
            "silver" => Self::rgb(192, 192, 192),
            "maroon" => Self::rgb(128, 0, 0),
            "olive" => Self::rgb(128, 128, 0),
            "lime" => Self::rgb(0, 255, 0),
            "navy" => Self::rgb(0, 0, 128),
            "purple" => Self::rgb(128, 0, 128),
            "teal" => Self::rgb(0, 128, 128),
            "orange" => Self::rgb(255, 165, 0),
            _ => return None,
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// qlineargradient value
///
/// Endpoints are in normalized bounding-rect coordinates, as Qt
/// defines them.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub stops: Vec<GradientStop>,
}

/// One color stop of a gradient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub position: f32,
    pub color: Color,
}

impl LinearGradient {
    /// Parse the argument list of `qlineargradient(...)`:
    /// `x1:0, y1:0, x2:0, y2:1, stop:0 #191414, stop:1 #121212`
    pub fn parse_args(args: &str) -> Option<Self> {
        let mut grad = Self {
            x1: 0.0,
            y1: 0.0,
            x2: 0.0,
            y2: 0.0,
            stops: Vec::new(),
        };
        for part in split_top_level(args, ',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let (key, rest) = part.split_once(':')?;
            match key.trim() {
                "x1" => grad.x1 = rest.trim().parse().ok()?,
                "y1" => grad.y1 = rest.trim().parse().ok()?,
                "x2" => grad.x2 = rest.trim().parse().ok()?,
                "y2" => grad.y2 = rest.trim().parse().ok()?,
                "stop" => {
                    let rest = rest.trim();
                    let (pos, color) = rest.split_once(char::is_whitespace)?;
                    grad.stops.push(GradientStop {
                        position: pos.trim().parse().ok()?,
                        color: Color::parse(color.trim())?,
                    });
                }
                _ => return None,
            }
        }
        if grad.stops.is_empty() {
            return None;
        }
        Some(grad)
    }
}

impl fmt::Display for LinearGradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "qlineargradient(x1:{}, y1:{}, x2:{}, y2:{}",
            self.x1, self.y1, self.x2, self.y2
        )?;
        for stop in &self.stops {
            write!(f, ", stop:{} {}", stop.position, stop.color)?;
        }
        f.write_str(")")
    }
}
