//! Toast appearance and timing constants

use crate::animation::Easing;
use crate::layout::Size;
use crate::timeline::TimelineConfig;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from unit components (0.0..=1.0)
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(channel(r), channel(g), channel(b))
    }

    /// 0x00BBGGRR (Win32 COLORREF layout)
    pub fn bgr(&self) -> u32 {
        (self.r as u32) | ((self.g as u32) << 8) | ((self.b as u32) << 16)
    }
}

/// Full toast configuration
#[derive(Debug, Clone)]
pub struct ToastConfig {
    /// Window canvas; the panel fills it
    pub canvas: Size,
    pub corner_radius: i32,
    pub panel_color: Rgb,
    /// Panel opacity at full visibility
    pub panel_opacity: f64,
    pub text_color: Rgb,
    pub font_face: &'static str,
    /// Character height in px
    pub font_size: i32,
    pub font_weight: i32,
    pub icon_size: Size,
    /// Gap between icon and label
    pub spacing: i32,
    pub timeline: TimelineConfig,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            canvas: Size::new(640, 480),
            corner_radius: 14,
            panel_color: Rgb::from_unit(0.33, 0.33, 0.33),
            panel_opacity: 0.9,
            text_color: Rgb::WHITE,
            font_face: "Microsoft YaHei UI",
            font_size: 32,
            font_weight: 600, // semibold
            icon_size: Size::new(32, 32),
            spacing: 12,
            timeline: TimelineConfig {
                fade_in_ms: 200,
                hold_ms: 3000,
                fade_out_ms: 200,
                fade_in_easing: Easing::Quad,
                fade_out_easing: Easing::Linear,
            },
        }
    }
}
