// Overlay-only items (layout, fades, GDI colors) are unused off Windows
#![cfg_attr(not(windows), allow(dead_code))]

mod animation;
mod assets;
mod cli;
mod config;
mod error;
mod icon;
mod layout;
mod notification;
#[cfg(windows)]
mod overlay;
mod status;
mod timeline;

use std::path::Path;

use anyhow::Context;
use tracing::{debug, info, warn};

use config::ToastConfig;
use status::Status;

fn main() -> anyhow::Result<()> {
    // stdout is reserved for the usage line
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args: Vec<_> = std::env::args_os().collect();
    let status = match cli::parse(&args) {
        Ok(status) => status,
        Err(e) => {
            println!("{e}");
            std::process::exit(1);
        }
    };

    let exe_dir = assets::exe_dir(args.first().map(|a| a.as_os_str()))
        .context("Locating toast assets")?;
    debug!(dir = %exe_dir.display(), "Executable directory");

    let icon_path = match assets::icon_path(&exe_dir, status) {
        Ok(path) => Some(path),
        Err(e) => {
            // Text only
            warn!("{e}");
            None
        }
    };

    let config = ToastConfig::default();
    present(status, icon_path.as_deref(), &config);

    info!(status = ?status, "Done");
    Ok(())
}

/// Decode the icon; failures mean text only
fn load_icon(path: Option<&Path>, config: &ToastConfig) -> Option<icon::IconPixels> {
    let path = path?;
    match icon::load(path, config.icon_size) {
        Ok(pixels) => Some(pixels),
        Err(e) => {
            warn!("{e}");
            None
        }
    }
}

#[cfg(windows)]
fn present(status: Status, icon_path: Option<&Path>, config: &ToastConfig) {
    let pixels = load_icon(icon_path, config);
    if let Err(e) = overlay::run(status, pixels.as_ref(), config) {
        warn!("Overlay unavailable ({e}), falling back to notification");
        notification::show(status, icon_path, config);
    }
}

#[cfg(not(windows))]
fn present(status: Status, icon_path: Option<&Path>, config: &ToastConfig) {
    debug!("No overlay on this platform, using notification");
    // Only hand the notification server an icon that decodes
    let icon_path = icon_path.filter(|path| load_icon(Some(*path), config).is_some());
    notification::show(status, icon_path, config);
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_load_icon_without_path_is_text_only() {
        assert!(load_icon(None, &ToastConfig::default()).is_none());
    }

    #[test]
    fn test_load_icon_missing_file_is_text_only() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("fail.png");
        assert!(load_icon(Some(missing.as_path()), &ToastConfig::default()).is_none());
    }

    #[test]
    fn test_load_icon_scales_to_config_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pass.png");
        RgbaImage::from_pixel(48, 48, Rgba([0, 200, 0, 255]))
            .save(&path)
            .unwrap();

        let config = ToastConfig::default();
        let pixels = load_icon(Some(path.as_path()), &config).unwrap();
        assert_eq!(pixels.size, config.icon_size);
    }
}
