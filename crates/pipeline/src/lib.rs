use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use skinscout_core::{build_taxonomy, render_module, Catalog, ClassificationReport, Taxonomy};
use skinscout_observability::{Phase, RunMetrics};
use skinscout_storage::ArtifactStore;
use tracing::{info, instrument};

pub const DEFAULT_INPUT: &str = "csgo_data.json";
pub const DEFAULT_OUTPUT: &str = "../data.js";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BucketSizes {
    pub weapons: usize,
    pub knives: usize,
    pub gloves: usize,
    pub stickers: usize,
    pub music_kits: usize,
    pub graffiti: usize,
    pub containers: usize,
    pub tools: usize,
    pub agents: usize,
    pub weapon_skin_keys: usize,
    pub generic_skins: usize,
}

impl BucketSizes {
    pub fn of(taxonomy: &Taxonomy) -> Self {
        Self {
            weapons: taxonomy.weapons.len(),
            knives: taxonomy.knives.len(),
            gloves: taxonomy.gloves.len(),
            stickers: taxonomy.stickers.len(),
            music_kits: taxonomy.music_kits.len(),
            graffiti: taxonomy.graffiti.len(),
            containers: taxonomy.containers.len(),
            tools: taxonomy.tools.len(),
            agents: taxonomy.agents.len(),
            weapon_skin_keys: taxonomy.weapon_skins.len(),
            generic_skins: taxonomy.generic_skins.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineSummary {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub records_loaded: usize,
    pub report: ClassificationReport,
    pub sizes: BucketSizes,
    pub artifact_bytes: usize,
}

/// Output of the in-memory part of a run, before anything is written.
#[derive(Debug, Clone)]
pub struct Generated {
    pub taxonomy: Taxonomy,
    pub report: ClassificationReport,
    pub module: String,
}

pub struct CatalogPipeline<S>
where
    S: ArtifactStore,
{
    store: Arc<S>,
    metrics: Arc<RunMetrics>,
}

impl<S> CatalogPipeline<S>
where
    S: ArtifactStore,
{
    pub fn new(store: Arc<S>, metrics: Arc<RunMetrics>) -> Self {
        Self { store, metrics }
    }

    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    /// Loads, classifies, renders and writes. The artifact is only touched
    /// once every earlier phase has succeeded.
    #[instrument(
        skip(self, config),
        fields(input = %config.input.display(), output = %config.output.display())
    )]
    pub fn run(&self, config: &PipelineConfig) -> Result<PipelineSummary> {
        self.metrics.inc_run();
        let catalog = self.load(&config.input)?;
        let generated = self.generate(&catalog);

        let started = Instant::now();
        self.store
            .write_artifact(&config.output, &generated.module)
            .with_context(|| format!("failed writing {}", config.output.display()))?;
        self.metrics.observe_phase(Phase::Write, started.elapsed());

        info!(
            path = %config.output.display(),
            bytes = generated.module.len(),
            "lookup module written"
        );

        Ok(summarize(config, catalog.len(), &generated, true))
    }

    /// Same as [`run`](Self::run) without the write.
    #[instrument(skip(self, config), fields(input = %config.input.display()))]
    pub fn check(&self, config: &PipelineConfig) -> Result<PipelineSummary> {
        self.metrics.inc_run();
        let catalog = self.load(&config.input)?;
        let generated = self.generate(&catalog);
        Ok(summarize(config, catalog.len(), &generated, false))
    }

    pub fn load(&self, input: &Path) -> Result<Catalog> {
        let started = Instant::now();
        let raw = self.store.read_artifact(input)?;
        let catalog = Catalog::from_json_str(&raw)
            .with_context(|| format!("failed parsing catalog {}", input.display()))?;
        self.metrics.observe_phase(Phase::Load, started.elapsed());
        self.metrics.add_records(catalog.len());

        info!(records = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn generate(&self, catalog: &Catalog) -> Generated {
        let started = Instant::now();
        let (taxonomy, report) = build_taxonomy(catalog.records());
        self.metrics.observe_phase(Phase::Classify, started.elapsed());

        info!(
            placed = report.placed_total(),
            skipped_empty_name = report.skipped_empty_name,
            dropped_vanilla_weapons = report.dropped_vanilla_weapons,
            "classification complete"
        );

        let started = Instant::now();
        let module = render_module(&taxonomy);
        self.metrics.observe_phase(Phase::Render, started.elapsed());

        Generated {
            taxonomy,
            report,
            module,
        }
    }
}

fn summarize(
    config: &PipelineConfig,
    records_loaded: usize,
    generated: &Generated,
    written: bool,
) -> PipelineSummary {
    PipelineSummary {
        input: config.input.clone(),
        output: written.then(|| config.output.clone()),
        records_loaded,
        report: generated.report.clone(),
        sizes: BucketSizes::of(&generated.taxonomy),
        artifact_bytes: generated.module.len(),
    }
}
