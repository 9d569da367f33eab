use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use time::UtcOffset;
use tracing::{debug, info, warn};

use frigate_core::config::{Config, ConfigPaths};
use frigate_core::expand_output_template;
use reporting::{DayLog, RenderOptions};
use review_client::{HttpReviewSource, ReviewSource, ReviewWindow};

pub struct ReportInputs {
    pub config_path: Option<PathBuf>,
    pub date: String,
    pub window: ReviewWindow,
    pub output: Option<PathBuf>,
    pub echo: bool,
}

pub fn execute(inputs: ReportInputs) -> Result<()> {
    let config = load_config(inputs.config_path)?;
    // Read the host offset while the process is still single-threaded; the
    // blocking HTTP client starts a runtime thread.
    let offset = resolve_offset(&config)?;
    let options = RenderOptions::from_config(&config, offset);
    let output = inputs
        .output
        .unwrap_or_else(|| expand_output_template(&config.output.path_template, &inputs.date));

    let log = match HttpReviewSource::from_config(&config.frigate) {
        Ok(source) => build_day_log(&source, &inputs.date, &inputs.window, &options),
        Err(err) => {
            warn!(error = %err, "review client unavailable");
            DayLog::fetch_error(&inputs.date, err)
        }
    };

    write_day_log(&output, &log)?;
    info!(path = %output.display(), lines = log.lines.len(), "day log written");

    if inputs.echo {
        println!("{}", log.to_text());
    }
    Ok(())
}

/// Fetches the window and renders it. A failed fetch becomes the one-line
/// error report; nothing from a partial fetch is kept.
pub fn build_day_log<S: ReviewSource>(
    source: &S,
    date: &str,
    window: &ReviewWindow,
    options: &RenderOptions,
) -> DayLog {
    match source.fetch_reviews(window) {
        Ok(events) => {
            info!(count = events.len(), "fetched review items");
            DayLog::render(date, &events, options)
        }
        Err(err) => {
            warn!(error = %err, "fetching review items failed");
            DayLog::fetch_error(date, err)
        }
    }
}

pub fn write_day_log(path: &Path, log: &DayLog) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output dir {}", parent.display()))?;
    }
    fs::write(path, log.to_text()).with_context(|| format!("write day log {}", path.display()))?;
    Ok(())
}

fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    let platform_path = match ConfigPaths::resolve() {
        Ok(paths) => Some(paths.config_path),
        Err(err) => {
            debug!(error = %err, "no config directory");
            None
        }
    };
    resolve_config(config_path.as_deref(), platform_path.as_deref())
}

/// Explicit path (must load), then the platform file when it exists, then
/// built-in defaults.
fn resolve_config(explicit: Option<&Path>, platform: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "loading config");
        return Config::load(path).with_context(|| format!("load config {}", path.display()));
    }

    match platform {
        Some(path) if path.exists() => {
            debug!(path = %path.display(), "loading config");
            Config::load(path).with_context(|| format!("load config {}", path.display()))
        }
        _ => {
            debug!("using built-in config");
            Ok(Config::default_config())
        }
    }
}

fn resolve_offset(config: &Config) -> Result<UtcOffset> {
    if let Some(minutes) = config.render.utc_offset_minutes {
        return UtcOffset::from_whole_seconds(minutes.saturating_mul(60))
            .with_context(|| format!("render.utc_offset_minutes {minutes} is out of range"));
    }
    Ok(UtcOffset::current_local_offset().unwrap_or_else(|err| {
        debug!(error = %err, "host UTC offset unavailable, using UTC");
        UtcOffset::UTC
    }))
}
