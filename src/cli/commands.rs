use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT: &str = "listening_history.csv";

#[derive(Parser, Debug)]
#[command(name = "convert")]
#[command(version = "1.0")]
#[command(about = "Convert exported listening history JSON files into a single CSV", long_about = None)]
pub struct Cli {
    /// Directory containing the exported JSON files
    #[arg(default_value = ".")]
    pub input_dir: PathBuf,

    /// Output CSV file path
    #[arg(default_value = DEFAULT_OUTPUT)]
    pub output_file: PathBuf,
}
