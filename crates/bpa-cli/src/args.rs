use std::path::PathBuf;

use clap::Parser;

use bpa_core::config::DEFAULT_SOURCE_GLOB;

#[derive(Debug, Parser)]
#[command(
    name = "bpa",
    version,
    about = "Best-practice analysis for PBIR report definitions"
)]
pub struct Args {
    /// Working root under which the inspector and rule set are provisioned
    pub root: Option<PathBuf>,

    /// Glob selecting report container folders, resolved against the root
    #[arg(default_value = DEFAULT_SOURCE_GLOB)]
    pub source_glob: String,
}
