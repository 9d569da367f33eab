use std::fmt::Display;

use time::UtcOffset;

use frigate_core::{Config, ReviewEvent};

pub mod clock;
pub mod links;
pub mod window;

pub use links::MediaLinks;
pub use window::{Padding, VideoWindow};

const SEPARATOR_WIDTH: usize = 50;
const NO_THREAT_LEVEL: &str = "N/A";
const NO_SCENE: &str = "No GenAI available";
const DEFAULT_TITLE: &str = "Security event";

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub links: MediaLinks,
    pub padding: Padding,
    /// Offset for event times computed from `start_time`.
    pub offset: UtcOffset,
}

impl RenderOptions {
    pub fn from_config(config: &Config, offset: UtcOffset) -> Self {
        Self {
            links: MediaLinks::from_config(&config.frigate),
            padding: Padding {
                before: config.render.pre_padding_secs,
                after: config.render.post_padding_secs,
            },
            offset,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            links: MediaLinks::default(),
            padding: Padding::default(),
            offset: UtcOffset::UTC,
        }
    }
}

/// The rendered body of one day's log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayLog {
    pub lines: Vec<String>,
}

impl DayLog {
    pub fn render(date: &str, events: &[ReviewEvent], options: &RenderOptions) -> Self {
        Self {
            lines: render_lines(date, events, options),
        }
    }

    /// Report written in place of events when the review query failed.
    pub fn fetch_error(date: &str, error: impl Display) -> Self {
        Self {
            lines: vec![format!("{date} - Error fetching data: {error}")],
        }
    }

    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

pub fn render_lines(date: &str, events: &[ReviewEvent], options: &RenderOptions) -> Vec<String> {
    if events.is_empty() {
        return vec![format!("{date} - No events.")];
    }

    let mut lines = Vec::with_capacity(2 + events.len() * 9);
    lines.push(format!("{date} - Frigate Events"));
    lines.push("-".repeat(SEPARATOR_WIDTH));
    for (index, event) in events.iter().enumerate() {
        push_entry(&mut lines, index + 1, event, options);
    }
    lines
}

/// Fields that come from GenAI metadata or stand in for it.
struct Summary {
    title: String,
    scene: String,
    time: String,
    threat_level: String,
}

impl Summary {
    fn for_event(event: &ReviewEvent, offset: UtcOffset) -> Self {
        match &event.metadata {
            Some(metadata) => Self {
                title: metadata.title.clone(),
                scene: metadata.scene.clone(),
                time: metadata.time.clone(),
                threat_level: metadata.threat_level.clone(),
            },
            None => Self {
                title: DEFAULT_TITLE.to_string(),
                scene: NO_SCENE.to_string(),
                time: clock::clock_label(&event.start_time, offset),
                threat_level: NO_THREAT_LEVEL.to_string(),
            },
        }
    }
}

fn push_entry(lines: &mut Vec<String>, index: usize, event: &ReviewEvent, options: &RenderOptions) {
    let summary = Summary::for_event(event, options.offset);
    let window = VideoWindow::for_event(event, options.padding);
    let video_url = options.links.video_url(&event.camera, window);

    lines.push(format!("{index}.   {} - {}", summary.time, event.camera));
    lines.push(format!("Threat:{}", summary.threat_level));
    lines.push(format!("Severity:{}", event.severity));
    lines.push(format!("Objects:{}", event.objects.join(", ")));
    lines.push(format!("[{}]({video_url})", summary.title));
    lines.push(format!("   {}", summary.scene));
    lines.push(format!("![Thumbnail]({})", options.links.thumbnail_url(event)));
    lines.push(format!(
        "[Video]({video_url}) [Preview]({})",
        options.links.preview_url(&event.id)
    ));
    lines.push(String::new());
}
