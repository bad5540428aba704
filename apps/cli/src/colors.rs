//! Report colours for terminal output.
//!
//! Gauge bands, headings, and alerts share one palette, with truecolor
//! when the terminal advertises it and the closest ANSI colour otherwise.
//!
//! # Palette
//!
//! - Heading: Cyan (#00D9FF)
//! - Low band / success: Green (#10B981)
//! - Middle band / warning: Yellow (#F59E0B)
//! - High band / error: Red (#EF4444)
//! - Muted: Gray (#6B7280)

use auditor_core::BandColor;
use colored::Color;

/// Colour depth the terminal supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSupport {
    Truecolor,
    Color16,
}

impl ColorSupport {
    /// Detects truecolor from `COLORTERM`, the de-facto convention.
    pub fn detect() -> Self {
        Self::from_colorterm(std::env::var("COLORTERM").ok().as_deref())
    }

    fn from_colorterm(value: Option<&str>) -> Self {
        match value {
            Some("truecolor" | "24bit") => Self::Truecolor,
            _ => Self::Color16,
        }
    }
}

/// Report colour palette.
#[derive(Debug, Clone, Copy)]
pub struct ReportColors {
    color_support: ColorSupport,
}

impl ReportColors {
    pub const HEADING_RGB: (u8, u8, u8) = (0, 217, 255);
    pub const SUCCESS_RGB: (u8, u8, u8) = (16, 185, 129);
    pub const WARNING_RGB: (u8, u8, u8) = (245, 158, 11);
    pub const ERROR_RGB: (u8, u8, u8) = (239, 68, 68);
    pub const MUTED_RGB: (u8, u8, u8) = (107, 114, 128);

    pub fn new() -> Self {
        Self::with_support(ColorSupport::detect())
    }

    pub fn with_support(color_support: ColorSupport) -> Self {
        Self { color_support }
    }

    fn rgb_to_color(&self, rgb: (u8, u8, u8), fallback: Color) -> Color {
        match self.color_support {
            ColorSupport::Truecolor => Color::TrueColor { r: rgb.0, g: rgb.1, b: rgb.2 },
            ColorSupport::Color16 => fallback,
        }
    }

    pub fn heading(&self) -> Color {
        self.rgb_to_color(Self::HEADING_RGB, Color::Cyan)
    }

    pub fn success(&self) -> Color {
        self.rgb_to_color(Self::SUCCESS_RGB, Color::Green)
    }

    pub fn warning(&self) -> Color {
        self.rgb_to_color(Self::WARNING_RGB, Color::Yellow)
    }

    pub fn error(&self) -> Color {
        self.rgb_to_color(Self::ERROR_RGB, Color::Red)
    }

    pub fn muted(&self) -> Color {
        self.rgb_to_color(Self::MUTED_RGB, Color::BrightBlack)
    }

    /// Colour for a gauge band.
    pub fn band(&self, band: BandColor) -> Color {
        match band {
            BandColor::Green => self.success(),
            BandColor::Yellow => self.warning(),
            BandColor::Red => self.error(),
        }
    }
}

impl Default for ReportColors {
    fn default() -> Self {
        Self::new()
    }
}
