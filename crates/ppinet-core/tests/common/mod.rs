//! Shared test helpers for integration tests.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use ppinet_core::config::PipelineConfig;

/// Resolve `tests/fixtures/{name}` relative to the workspace root.
pub fn fixture_path(name: &str) -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir)
        .join("../../tests/fixtures")
        .join(name)
        .canonicalize()
        .unwrap_or_else(|_| {
            Path::new(manifest_dir)
                .join("../../tests/fixtures")
                .join(name)
        })
}

/// Write one file into `dir` and return its path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let mut f = File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    path
}

/// Config over a scratch network + candidate file pair.
pub fn scratch_config(dir: &Path, network: &str, candidates: &str) -> PipelineConfig {
    let network_path = write_file(dir, "network.tsv", network);
    let candidate_path = write_file(dir, "candidates.tsv", candidates);
    PipelineConfig {
        network_path: network_path.to_string_lossy().to_string(),
        candidate_path: candidate_path.to_string_lossy().to_string(),
        ..Default::default()
    }
}
