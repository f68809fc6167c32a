use crate::lines::LineOptions;
use crate::preprocess::PreprocessOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct EdgeMapToolConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub preprocess: PreprocessOptions,
    #[serde(default)]
    pub lines: LineOptions,
    pub output: EdgeMapOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct EdgeMapOutputConfig {
    pub edges_image: PathBuf,
    /// Optional dump of the thresholded and opened binary maps.
    #[serde(default)]
    pub binary_image: Option<PathBuf>,
    #[serde(default)]
    pub opened_image: Option<PathBuf>,
    pub lines_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<EdgeMapToolConfig, String> {
    super::read_json(path)
}
