//! Test fixture loader for Quill golden bundles, plus a scripted text
//! generator for orchestrator and engine tests.

pub mod generator;

pub use generator::{ScriptedGenerator, Step};

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::Utc;
use quill_core::models::RawDataBundle;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Root directory of the fixture data.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").join("golden").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures").join("golden")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// List all JSON files in a fixture subdirectory.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut found: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect();
    found.sort();
    found
}

/// On-disk shape of a bundle fixture: endpoint name to raw payload.
#[derive(Debug, Deserialize)]
struct BundleFixture {
    subject: String,
    endpoints: BTreeMap<String, serde_json::Value>,
}

/// Load `bundles/<name>.json` as a raw data bundle stamped with the
/// current time.
pub fn load_bundle(name: &str) -> RawDataBundle {
    let fixture: BundleFixture = load_fixture(&format!("bundles/{name}.json"));
    let now = Utc::now();
    let mut bundle = RawDataBundle::new(fixture.subject);
    for (endpoint, payload) in fixture.endpoints {
        bundle.insert(endpoint, payload, now);
    }
    bundle
}

/// Names of every bundle fixture, without extension.
pub fn bundle_names() -> Vec<String> {
    list_fixtures("bundles")
        .into_iter()
        .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .collect()
}
