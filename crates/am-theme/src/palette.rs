//! AudioMine Color Palette
//!
//! The named colors behind the dark theme. Widgets that paint outside
//! the stylesheet path (visualizer bars, album-art placeholders) pull
//! from here so everything stays on the same palette.

use am_qss::Color;

/// Primary accent green
pub const ACCENT: Color = Color::rgb(0x1d, 0xb9, 0x54);
/// Accent on hover, one step lighter
pub const ACCENT_HOVER: Color = Color::rgb(0x1e, 0xd7, 0x60);
/// Accent while pressed, one step darker
pub const ACCENT_PRESSED: Color = Color::rgb(0x1a, 0xa3, 0x4a);

/// Window gradient, top edge
pub const WINDOW_TOP: Color = Color::rgb(0x19, 0x14, 0x14);
/// Window gradient, bottom edge
pub const WINDOW_BOTTOM: Color = Color::rgb(0x12, 0x12, 0x12);

/// Raised surfaces: lists, menus, tabs, tooltips
pub const SURFACE: Color = Color::rgb(0x28, 0x28, 0x28);
/// Alternating row background
pub const SURFACE_ALT: Color = Color::rgb(0x1e, 0x1e, 0x1e);
/// Hovered rows and tabs
pub const SURFACE_HOVER: Color = Color::rgb(0x33, 0x33, 0x33);

/// Borders and disabled fills
pub const BORDER: Color = Color::rgb(0x3e, 0x3e, 0x3e);
/// Primary text
pub const TEXT: Color = Color::WHITE;
/// Secondary text
pub const TEXT_MUTED: Color = Color::rgb(0xb3, 0xb3, 0xb3);
