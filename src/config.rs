use std::path::{Path, PathBuf};

use clap::{Parser, ValueHint};

/// Looked up in the working directory when no dataset is given.
pub const DEFAULT_DATASET: &str = "Datasets/spacex_launch_dash.csv";

/// SpaceX launch records dashboard.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Config {
    /// Launch table to open at startup (.csv, .json or .parquet)
    #[arg(value_hint = ValueHint::FilePath)]
    pub dataset: Option<PathBuf>,

    /// Initial window width in points
    #[arg(long, default_value_t = 1200.0)]
    pub width: f32,

    /// Initial window height in points
    #[arg(long, default_value_t = 800.0)]
    pub height: f32,
}

impl Config {
    /// The explicit dataset, else the default one if it exists.
    pub fn startup_dataset(&self) -> Option<PathBuf> {
        match &self.dataset {
            Some(path) => Some(path.clone()),
            None => {
                let fallback = Path::new(DEFAULT_DATASET);
                fallback.is_file().then(|| fallback.to_path_buf())
            }
        }
    }
}
