use frigate_core::{whole_seconds, RawTimestamp, ReviewEvent};

/// Seconds added around an event when linking to its recording.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub before: f64,
    pub after: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            before: 5.0,
            after: 10.0,
        }
    }
}

/// Whole-second range handed to the VOD endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoWindow {
    pub start: i64,
    pub end: i64,
}

impl VideoWindow {
    /// Used when neither the padded nor the raw timestamps are usable.
    pub const FALLBACK: VideoWindow = VideoWindow { start: 0, end: 1 };

    /// Padded window when both timestamps are numeric, else the raw integer
    /// window, else [`VideoWindow::FALLBACK`].
    pub fn for_event(event: &ReviewEvent, padding: Padding) -> Self {
        padded_window(&event.start_time, &event.end_time, padding)
            .or_else(|| raw_window(&event.start_time, &event.end_time))
            .unwrap_or(Self::FALLBACK)
    }
}

fn padded_window(start: &RawTimestamp, end: &RawTimestamp, padding: Padding) -> Option<VideoWindow> {
    let start = start.as_f64()? - padding.before;
    let end = end.as_f64()? + padding.after;
    Some(VideoWindow {
        start: whole_seconds(start)?,
        end: whole_seconds(end)?,
    })
}

fn raw_window(start: &RawTimestamp, end: &RawTimestamp) -> Option<VideoWindow> {
    Some(VideoWindow {
        start: start.as_i64()?,
        end: end.as_i64()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn event(start: Value, end: Value) -> ReviewEvent {
        ReviewEvent::from_value(&json!({ "start_time": start, "end_time": end }))
    }

    #[test]
    fn test_numeric_timestamps_are_padded() {
        let window = VideoWindow::for_event(&event(json!(1714570290.7), json!(1714570301.2)), Padding::default());
        assert_eq!(window, VideoWindow { start: 1714570285, end: 1714570311 });
    }

    #[test]
    fn test_numeric_strings_are_padded() {
        let window = VideoWindow::for_event(&event(json!("1714570290"), json!("1714570300.5")), Padding::default());
        assert_eq!(window, VideoWindow { start: 1714570285, end: 1714570310 });
    }

    #[test]
    fn test_custom_padding() {
        let padding = Padding { before: 30.0, after: 0.0 };
        let window = VideoWindow::for_event(&event(json!(100), json!(200)), padding);
        assert_eq!(window, VideoWindow { start: 70, end: 200 });
    }

    #[test]
    fn test_fractional_negatives_truncate_toward_zero() {
        let window = VideoWindow::for_event(&event(json!("2.5"), json!("-12.5")), Padding::default());
        assert_eq!(window, VideoWindow { start: -2, end: -2 });
    }

    #[test]
    fn test_non_finite_values_use_fallback_window() {
        let window = VideoWindow::for_event(&event(json!("inf"), json!(200)), Padding::default());
        assert_eq!(window, VideoWindow::FALLBACK);

        let window = VideoWindow::for_event(&event(json!(100), json!("nan")), Padding::default());
        assert_eq!(window, VideoWindow::FALLBACK);
    }

    #[test]
    fn test_raw_window_reads_integers() {
        let window = raw_window(&RawTimestamp::new(json!("100")), &RawTimestamp::new(json!(250.9)));
        assert_eq!(window, Some(VideoWindow { start: 100, end: 250 }));
        assert_eq!(raw_window(&RawTimestamp::new(json!("100.5")), &RawTimestamp::new(json!(250))), None);
    }

    #[test]
    fn test_unparseable_timestamps_use_fallback_window() {
        let window = VideoWindow::for_event(&event(json!("soon"), json!(null)), Padding::default());
        assert_eq!(window, VideoWindow::FALLBACK);

        let window = VideoWindow::for_event(&ReviewEvent::default(), Padding::default());
        assert_eq!(window, VideoWindow { start: 0, end: 1 });
    }
}
