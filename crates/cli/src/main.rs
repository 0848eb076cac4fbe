mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use skinscout_core::{classify_view, matching_rule, RecordView};
use skinscout_observability::{init_tracing, RunMetrics};
use skinscout_pipeline::CatalogPipeline;
use skinscout_storage::{FileStore, Store};
use tracing::info;

use config::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing("skinscout", cli.log_format);

    match cli.command.clone().unwrap_or(Command::Generate) {
        Command::Generate => {
            let pipeline = build_pipeline()?;
            let summary = pipeline.run(&cli.pipeline_config())?;
            info!(metrics = ?pipeline.metrics().snapshot(), "run finished");
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Check => {
            let pipeline = build_pipeline()?;
            let summary = pipeline.check(&cli.pipeline_config())?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Inspect { name, id, category } => {
            let view = RecordView::new(
                &name,
                id.as_deref().unwrap_or(""),
                category.as_deref().unwrap_or(""),
            );
            let rule = matching_rule(&view).map(|rule| rule.bucket);
            let outcome = classify_view(&view);

            let report = json!({
                "normalized": view.name,
                "rule": rule,
                "result": outcome,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn build_pipeline() -> Result<CatalogPipeline<Store>> {
    let files = FileStore::current_dir().context("failed preparing artifact store")?;
    let store = Store::File(files);
    Ok(CatalogPipeline::new(Arc::new(store), RunMetrics::shared()))
}
