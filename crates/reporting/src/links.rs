use frigate_core::{FrigateConfig, ReviewEvent};

use crate::window::VideoWindow;

/// Builds the media URLs embedded in each day-log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaLinks {
    api_base: String,
    vod_base: String,
    thumb_base: String,
    media_prefix: String,
}

impl MediaLinks {
    pub fn new(api_base: &str, vod_base: &str, thumb_base: &str, media_prefix: &str) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            vod_base: vod_base.trim_end_matches('/').to_string(),
            thumb_base: thumb_base.trim_end_matches('/').to_string(),
            media_prefix: media_prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &FrigateConfig) -> Self {
        Self::new(
            &config.api_base,
            &config.vod_base,
            &config.thumb_base,
            &config.media_prefix,
        )
    }

    /// HLS playlist covering `window` on the event's camera.
    pub fn video_url(&self, camera: &str, window: VideoWindow) -> String {
        format!(
            "{}/vod/{camera}/start/{}/end/{}/index.m3u8",
            self.vod_base, window.start, window.end
        )
    }

    pub fn preview_url(&self, review_id: &str) -> String {
        format!("{}/api/review/{review_id}/preview", self.api_base)
    }

    /// Served copy of `thumb_path`, or the conventional review thumbnail
    /// name when the event carries no path.
    pub fn thumbnail_url(&self, event: &ReviewEvent) -> String {
        match &event.thumb_path {
            Some(path) => format!("{}{}", self.thumb_base, self.served_path(path)),
            None => format!(
                "{}/clips/review/thumb-{}-{}.webp",
                self.api_base,
                event.camera,
                event.start_time.display()
            ),
        }
    }

    fn served_path(&self, path: &str) -> String {
        let relative = if self.media_prefix.is_empty() {
            path
        } else {
            path.strip_prefix(self.media_prefix.as_str()).unwrap_or(path)
        };
        format!("/{}", relative.trim_start_matches('/'))
    }
}

impl Default for MediaLinks {
    fn default() -> Self {
        Self::from_config(&frigate_core::Config::default_config().frigate)
    }
}
