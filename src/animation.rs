//! Animation module: easing, opacity fades, fade loop

use std::time::Duration;

#[cfg(windows)]
use std::time::Instant;
#[cfg(windows)]
use windows::Win32::Foundation::{COLORREF, HWND};
#[cfg(windows)]
use windows::Win32::Graphics::Dwm::DwmFlush;
#[cfg(windows)]
use windows::Win32::UI::WindowsAndMessaging::{LWA_ALPHA, SetLayeredWindowAttributes};

/// Easing function type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    Quad,
}

impl Easing {
    /// Apply easing function: t ∈ [0,1] → [0,1]
    /// ease-out variant: fast start, slow end
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Quad => 1.0 - (1.0 - t).powi(2),
        }
    }
}

/// Linear interpolation: lerp(a, b, t) = a + (b - a) * t
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Opacity transition from → to over duration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
    pub easing: Easing,
}

impl Fade {
    pub fn fade_in(duration: Duration, easing: Easing) -> Self {
        Self {
            from: 0.0,
            to: 1.0,
            duration,
            easing,
        }
    }

    pub fn fade_out(duration: Duration, easing: Easing) -> Self {
        Self {
            from: 1.0,
            to: 0.0,
            duration,
            easing,
        }
    }

    /// Raw progress ∈ [0,1]; zero duration is immediately complete
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Eased opacity at elapsed time
    pub fn opacity_at(&self, elapsed: Duration) -> f64 {
        lerp(self.from, self.to, self.easing.apply(self.progress(elapsed)))
    }

    pub fn is_done(&self, elapsed: Duration) -> bool {
        self.progress(elapsed) >= 1.0
    }
}

/// Window alpha byte: opacity scaled by the panel's full-visibility opacity
pub fn layered_alpha(opacity: f64, panel_opacity: f64) -> u8 {
    (opacity.clamp(0.0, 1.0) * panel_opacity.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Run an opacity fade on a layered window
/// Blocks until the fade completes; final frame is exactly `fade.to`
#[cfg(windows)]
pub fn run_fade(hwnd: HWND, fade: &Fade, panel_opacity: f64) {
    // Frame sync: wait for VSync before each alpha update
    fn frame_sync() {
        unsafe {
            if DwmFlush().is_err() {
                std::thread::sleep(Duration::from_millis(16));
            }
        }
    }

    let start = Instant::now();
    loop {
        frame_sync();

        let elapsed = start.elapsed();
        let alpha = layered_alpha(fade.opacity_at(elapsed), panel_opacity);
        unsafe {
            let _ = SetLayeredWindowAttributes(hwnd, COLORREF(0), alpha, LWA_ALPHA);
        }

        if fade.is_done(elapsed) {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== Easing Tests ==========

    #[test]
    fn test_easing_linear_boundaries() {
        assert_eq!(Easing::Linear.apply(0.0), 0.0);
        assert_eq!(Easing::Linear.apply(1.0), 1.0);
    }

    #[test]
    fn test_easing_quad_mid() {
        // ease-out-quad: 1 - (1 - t)^2 = 1 - 0.25 = 0.75
        assert!((Easing::Quad.apply(0.5) - 0.75).abs() < 1e-10);
    }

    #[test]
    fn test_easing_clamps_out_of_range() {
        assert_eq!(Easing::Quad.apply(-0.5), 0.0);
        assert_eq!(Easing::Quad.apply(1.5), 1.0);
    }

    // ========== Fade Tests ==========

    #[test]
    fn test_fade_in_endpoints() {
        let fade = Fade::fade_in(Duration::from_millis(200), Easing::Quad);
        assert_eq!(fade.opacity_at(Duration::ZERO), 0.0);
        assert_eq!(fade.opacity_at(Duration::from_millis(200)), 1.0);
        assert_eq!(fade.opacity_at(Duration::from_millis(500)), 1.0);
    }

    #[test]
    fn test_fade_out_endpoints() {
        let fade = Fade::fade_out(Duration::from_millis(200), Easing::Linear);
        assert_eq!(fade.opacity_at(Duration::ZERO), 1.0);
        assert!((fade.opacity_at(Duration::from_millis(100)) - 0.5).abs() < 1e-10);
        assert_eq!(fade.opacity_at(Duration::from_millis(200)), 0.0);
    }

    #[test]
    fn test_fade_done() {
        let fade = Fade::fade_in(Duration::from_millis(200), Easing::Linear);
        assert!(!fade.is_done(Duration::from_millis(199)));
        assert!(fade.is_done(Duration::from_millis(200)));
    }

    #[test]
    fn test_zero_duration_fade_is_immediate() {
        let fade = Fade::fade_out(Duration::ZERO, Easing::Quad);
        assert!(fade.is_done(Duration::ZERO));
        assert_eq!(fade.opacity_at(Duration::ZERO), 0.0);
    }

    // ========== Alpha Tests ==========

    #[test]
    fn test_layered_alpha() {
        assert_eq!(layered_alpha(0.0, 0.9), 0);
        assert_eq!(layered_alpha(1.0, 0.8), 204);
        assert_eq!(layered_alpha(0.5, 0.8), 102);
        assert_eq!(layered_alpha(1.0, 1.0), 255);
        assert_eq!(layered_alpha(2.0, 1.0), 255);
    }
}
