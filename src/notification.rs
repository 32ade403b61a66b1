//! Desktop notification fallback (no overlay available)

use std::path::Path;
use std::time::Duration;

use notify_rust::{Notification, Timeout};

use crate::config::ToastConfig;
use crate::status::Status;
use crate::timeline::{Step, Timeline, TimelineConfig};

const APP_NAME: &str = "Toast";

/// Show the status as a desktop notification, then wait out the toast lifetime
/// A missing notification server is logged, not fatal
pub fn show(status: Status, icon: Option<&Path>, config: &ToastConfig) {
    let total = config.timeline.total();

    let mut notification = Notification::new();
    notification
        .appname(APP_NAME)
        .summary(status.message())
        .timeout(Timeout::Milliseconds(total.as_millis() as u32));
    if let Some(path) = icon {
        notification.icon(&path.display().to_string());
    }

    match notification.show() {
        Ok(_) => tracing::info!(status = ?status, "Notification shown"),
        Err(e) => tracing::warn!(status = ?status, "Notification failed: {e}"),
    }

    let waited = wait_out(config.timeline);
    tracing::debug!(?waited, "Timeline finished");
}

/// Keep the process alive for the same stages the overlay would run
fn wait_out(config: TimelineConfig) -> Duration {
    let mut timeline = Timeline::new(config);
    let mut waited = Duration::ZERO;
    let mut step = timeline.start();
    loop {
        tracing::debug!(phase = ?timeline.phase(), "Timeline stage");
        let delay = match step {
            Step::Fade(fade) => fade.duration,
            Step::Wait(delay) => delay,
            Step::Exit => break,
        };
        std::thread::sleep(delay);
        waited += delay;
        step = timeline.complete();
    }
    waited
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Easing;

    fn short_timeline() -> TimelineConfig {
        TimelineConfig {
            fade_in_ms: 5,
            hold_ms: 20,
            fade_out_ms: 5,
            fade_in_easing: Easing::Quad,
            fade_out_easing: Easing::Linear,
        }
    }

    #[test]
    fn test_wait_out_covers_every_stage() {
        assert_eq!(wait_out(short_timeline()), Duration::from_millis(30));
    }

    #[test]
    fn test_show_returns_without_notification_server() {
        // Headless hosts have no server; show still completes the timeline
        let config = ToastConfig {
            timeline: short_timeline(),
            ..ToastConfig::default()
        };
        show(Status::Failure, None, &config);
    }
}
