use crate::GaugeParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Where frames come from: a directory (sorted by name) or an explicit list.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputConfig {
    Dir(PathBuf),
    Files(Vec<PathBuf>),
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SequenceOutputConfig {
    /// JSON-lines file receiving one report per tick.
    pub reports_jsonl: Option<PathBuf>,
    /// Pretty JSON run summary.
    pub summary_json: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SequenceToolConfig {
    pub input: InputConfig,
    #[serde(default)]
    pub output: SequenceOutputConfig,
    #[serde(default)]
    pub gauge: GaugeParams,
    /// Fixed spacing between frame timestamps; wall clock when absent.
    #[serde(default)]
    pub frame_interval_ms: Option<f64>,
}

pub fn load_config(path: &Path) -> Result<SequenceToolConfig, String> {
    super::read_json(path)
}
