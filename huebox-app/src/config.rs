use std::{
    path::PathBuf,
    time::Duration,
};

use huebox_core::{
    SwatchSize,
    store::DEFAULT_EXPORT_FILE_NAME,
};
use serde::{
    Deserialize,
    Serialize,
};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub clipboard: ClipboardConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportConfig {
    /// in pixels
    #[serde(default = "default_swatch_width")]
    pub swatch_width: u32,

    /// in pixels
    #[serde(default = "default_swatch_height")]
    pub swatch_height: u32,

    /// Used when `export` is not given an output path. Relative to the working
    /// directory.
    #[serde(default = "default_export_file_name")]
    pub file_name: PathBuf,
}

impl ExportConfig {
    pub fn swatch_size(&self) -> SwatchSize {
        SwatchSize::new(self.swatch_width, self.swatch_height)
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            swatch_width: default_swatch_width(),
            swatch_height: default_swatch_height(),
            file_name: default_export_file_name(),
        }
    }
}

fn default_swatch_width() -> u32 {
    SwatchSize::DEFAULT.width
}

fn default_swatch_height() -> u32 {
    SwatchSize::DEFAULT.height
}

fn default_export_file_name() -> PathBuf {
    DEFAULT_EXPORT_FILE_NAME.into()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClipboardConfig {
    #[serde(default = "default_notice_duration_ms")]
    pub notice_duration_ms: u64,

    /// On Linux the copied text is only available while `huebox` owns the
    /// clipboard. If set, `copy` keeps running until another program (e.g. a
    /// clipboard manager) takes it over.
    #[serde(default = "default_hold_until_replaced")]
    pub hold_until_replaced: bool,
}

impl ClipboardConfig {
    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_duration_ms)
    }
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            notice_duration_ms: default_notice_duration_ms(),
            hold_until_replaced: default_hold_until_replaced(),
        }
    }
}

fn default_notice_duration_ms() -> u64 {
    huebox_core::picker::DEFAULT_NOTICE_DURATION.as_millis() as u64
}

fn default_hold_until_replaced() -> bool {
    true
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Overrides the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}
