pub mod config;
pub mod error;
pub mod paths;
pub mod types;

pub use config::{Config, ConfigPaths, FrigateConfig, OutputConfig, RenderConfig};
pub use error::FrigateLogError;
pub use paths::expand_output_template;
pub use types::{whole_seconds, Metadata, RawTimestamp, ReviewEvent};
