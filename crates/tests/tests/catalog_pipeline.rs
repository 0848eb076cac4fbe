use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use skinscout_core::{build_taxonomy, Bucket, Catalog, Taxonomy};
use skinscout_observability::RunMetrics;
use skinscout_pipeline::{CatalogPipeline, PipelineConfig, DEFAULT_INPUT, DEFAULT_OUTPUT};
use skinscout_storage::{ArtifactStore, FileStore, MemoryStore, Store};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/catalog.json")
}

fn fixture() -> String {
    std::fs::read_to_string(fixture_path()).expect("fixture should be readable")
}

fn memory_pipeline() -> (MemoryStore, CatalogPipeline<MemoryStore>) {
    let store = MemoryStore::new();
    store.insert(DEFAULT_INPUT, fixture());
    let pipeline = CatalogPipeline::new(Arc::new(store.clone()), RunMetrics::shared());
    (store, pipeline)
}

fn fixture_taxonomy() -> Taxonomy {
    let catalog = Catalog::from_json_str(&fixture()).expect("fixture should parse");
    build_taxonomy(catalog.records()).0
}

fn set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Pulls the string entries of `export const NAME = [...]` back out of the
/// rendered module, in rendered order.
fn rendered_list(module: &str, name: &str) -> Vec<String> {
    let header = format!("export const {name} = [\n");
    let start = module.find(&header).expect("constant should be rendered") + header.len();
    let end = start + module[start..].find("];").expect("list should be closed");

    module[start..end]
        .lines()
        .map(|line| line.trim().trim_end_matches(','))
        .filter(|line| !line.is_empty())
        .map(|line| serde_json::from_str::<String>(line).expect("entry should be a JSON string"))
        .collect()
}

#[test]
fn fixture_is_partitioned_into_every_bucket() {
    let taxonomy = fixture_taxonomy();

    assert_eq!(
        taxonomy.agents,
        set(&[
            "Sir Bloody Miami Darryl | The Professionals",
            "Sticker | Impostor Agent"
        ])
    );
    assert_eq!(
        taxonomy.music_kits,
        set(&["Music Kit | Daniel Sadowski, Crimson Assault"])
    );
    assert_eq!(
        taxonomy.stickers,
        set(&["Shooter", "Titan (Holo) | Katowice 2014"])
    );
    assert_eq!(
        taxonomy.graffiti,
        set(&["Sealed Graffiti | GGWP (Battle Green)"])
    );
    assert_eq!(
        taxonomy.containers,
        set(&["Audience Participation Parcel", "Operation Hydra Case"])
    );
    assert_eq!(taxonomy.tools, set(&["Name Tag"]));
    assert_eq!(taxonomy.gloves, set(&["Hydra Gloves", "Sport Gloves"]));
    assert_eq!(taxonomy.knives, set(&["Bayonet", "Karambit"]));
    assert_eq!(taxonomy.weapons, set(&["AK-47", "Desert Eagle", "M4A4"]));
    assert_eq!(
        taxonomy.generic_skins,
        set(&["Asiimov", "Fade", "Howl", "Redline", "Vice"])
    );
}

#[test]
fn weapon_skins_only_cover_weapons() {
    let taxonomy = fixture_taxonomy();

    let keys = taxonomy.weapon_skins.keys().cloned().collect::<BTreeSet<_>>();
    assert_eq!(keys, taxonomy.weapons);
    assert_eq!(taxonomy.skins_for("AK-47"), Some(&set(&["Asiimov", "Redline"])));
    assert_eq!(taxonomy.skins_for("Desert Eagle"), Some(&set(&["Fade"])));
    assert!(taxonomy.skins_for("Karambit").is_none());
}

#[test]
fn agent_prefixed_records_appear_only_in_agents() {
    let catalog = Catalog::from_json_str(&fixture()).unwrap();
    let taxonomy = build_taxonomy(catalog.records()).0;

    for record in catalog.records() {
        if !record.identifier().starts_with("agent-") {
            continue;
        }
        let name = skinscout_core::normalize_name(record.display_name());
        if name.is_empty() {
            continue;
        }

        assert!(taxonomy.agents.contains(&name));
        for bucket in Bucket::ALL.into_iter().filter(|b| *b != Bucket::Agent) {
            assert!(!taxonomy.bucket(bucket).contains(&name), "{name} leaked into {bucket:?}");
        }
        assert!(!taxonomy.generic_skins.contains(&name));
    }
}

#[test]
fn summary_accounts_for_every_record() {
    let (_, pipeline) = memory_pipeline();
    let summary = pipeline.run(&PipelineConfig::default()).unwrap();

    assert_eq!(summary.records_loaded, 23);
    assert_eq!(summary.report.records_seen, 23);
    assert_eq!(summary.report.skipped_empty_name, 2);
    assert_eq!(summary.report.dropped_vanilla_weapons, 1);
    assert_eq!(summary.report.placed_total(), 20);
    assert_eq!(summary.sizes.weapon_skin_keys, 3);
    assert_eq!(summary.output.as_deref(), Some(Path::new(DEFAULT_OUTPUT)));

    let snapshot = pipeline.metrics().snapshot();
    assert_eq!(snapshot.runs_total, 1);
    assert_eq!(snapshot.records_total, 23);
}

#[test]
fn rendered_lists_are_strictly_sorted() {
    let (store, pipeline) = memory_pipeline();
    pipeline.run(&PipelineConfig::default()).unwrap();
    let module = store.get(Path::new(DEFAULT_OUTPUT)).unwrap();

    for name in [
        "WEAPONS",
        "KNIVES",
        "GLOVES",
        "STICKERS",
        "MUSIC_KITS",
        "GRAFFITI",
        "CONTAINERS",
        "TOOLS",
        "AGENTS",
        "GENERIC_SKINS",
    ] {
        let values = rendered_list(&module, name);
        assert!(!values.is_empty(), "{name} should not be empty");
        assert!(
            values.windows(2).all(|pair| pair[0] < pair[1]),
            "{name} is not strictly sorted: {values:?}"
        );
    }

    assert_eq!(
        rendered_list(&module, "CONDITIONS"),
        ["Factory New", "Minimal Wear", "Field-Tested", "Well-Worn", "Battle-Scarred"]
    );
    assert!(module.contains("    \"AK-47\": [\"Asiimov\", \"Redline\"],\n"));
}

#[test]
fn repeated_runs_are_byte_identical() {
    let (store, pipeline) = memory_pipeline();

    pipeline.run(&PipelineConfig::default()).unwrap();
    let first = store.get(Path::new(DEFAULT_OUTPUT)).unwrap();
    pipeline.run(&PipelineConfig::default()).unwrap();
    let second = store.get(Path::new(DEFAULT_OUTPUT)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn file_store_run_replaces_stale_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let work = dir.path().join("scripts");
    std::fs::create_dir(&work).unwrap();
    std::fs::copy(fixture_path(), work.join(DEFAULT_INPUT)).unwrap();
    std::fs::write(dir.path().join("data.js"), "const STALE = [];\n".repeat(100)).unwrap();

    let store = FileStore::new(&work);
    let pipeline = CatalogPipeline::new(Arc::new(store.clone()), RunMetrics::shared());
    let summary = pipeline.run(&PipelineConfig::default()).unwrap();

    let written = std::fs::read_to_string(dir.path().join("data.js")).unwrap();
    assert!(!written.contains("STALE"));
    assert_eq!(written.len(), summary.artifact_bytes);
    assert_eq!(store.read_artifact(Path::new(DEFAULT_OUTPUT)).unwrap(), written);
}

#[test]
fn missing_input_file_is_fatal_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let work = dir.path().join("scripts");
    std::fs::create_dir(&work).unwrap();

    let pipeline = CatalogPipeline::new(Arc::new(FileStore::new(&work)), RunMetrics::shared());
    let err = pipeline.run(&PipelineConfig::default()).unwrap_err();

    assert!(format!("{err:#}").contains(DEFAULT_INPUT));
    assert!(!dir.path().join("data.js").exists());
}

#[test]
fn store_backed_pipeline_writes_next_to_working_dir() {
    let dir = tempfile::tempdir().unwrap();
    let work = dir.path().join("scripts");
    std::fs::create_dir(&work).unwrap();
    std::fs::copy(fixture_path(), work.join(DEFAULT_INPUT)).unwrap();

    let store = Store::File(FileStore::new(&work));
    let pipeline = CatalogPipeline::new(Arc::new(store), RunMetrics::shared());
    let summary = pipeline.run(&PipelineConfig::default()).unwrap();

    let written = std::fs::read_to_string(dir.path().join("data.js")).unwrap();
    assert_eq!(written.len(), summary.artifact_bytes);
    assert!(written.contains("export const WEAPON_SKINS = {"));
}
