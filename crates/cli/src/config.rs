use std::path::PathBuf;

use clap::{Parser, Subcommand};
use skinscout_observability::LogFormat;
use skinscout_pipeline::{PipelineConfig, DEFAULT_INPUT, DEFAULT_OUTPUT};

#[derive(Debug, Parser)]
#[command(name = "skinscout")]
#[command(about = "Builds the SkinScout item lookup module from a catalog dump")]
pub struct Cli {
    /// Catalog JSON to classify.
    #[arg(long, env = "SKINSCOUT_INPUT", default_value = DEFAULT_INPUT, global = true)]
    pub input: PathBuf,

    /// Where the generated module is written. Replaced on every run.
    #[arg(long, env = "SKINSCOUT_OUTPUT", default_value = DEFAULT_OUTPUT, global = true)]
    pub output: PathBuf,

    #[arg(long, env = "SKINSCOUT_LOG_FORMAT", default_value = "pretty", global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Classify the catalog and write the module (default).
    Generate,
    /// Classify the catalog and print the summary without writing.
    Check,
    /// Show how a single item name would be classified.
    Inspect {
        name: String,
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
}

impl Cli {
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            input: self.input.clone(),
            output: self.output.clone(),
        }
    }
}
