//! Dashboard palette, one dark theme.

pub const BACKGROUND: &str = "oklch(15% 0.025 255)";
pub const SURFACE: &str = "oklch(22% 0.025 255)";
pub const SURFACE_HOVER: &str = "oklch(27% 0.03 255)";
pub const BORDER: &str = "oklch(32% 0.03 255)";
pub const TEXT: &str = "oklch(92% 0.01 255)";
pub const TEXT_MUTED: &str = "oklch(65% 0.02 255)";
pub const ACCENT: &str = "oklch(60% 0.15 250)";
pub const ONLINE: &str = "oklch(70% 0.17 150)";
pub const OFFLINE: &str = "oklch(62% 0.2 25)";

pub const SPACING_4: u32 = 4;
pub const SPACING_8: u32 = 8;
pub const SPACING_12: u32 = 12;
pub const SPACING_16: u32 = 16;
