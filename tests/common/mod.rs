#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::{TempDir, tempdir};

pub const RAW_FIXTURE: &str = "encuesta_raw.csv";

/// Returns the absolute path to a fixture under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Path to the overrides file shipped under `config/`.
pub fn shipped_overrides() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("config")
        .join("overrides.yml")
}

pub fn bin() -> Command {
    Command::cargo_bin("encuesta-salarial").expect("binary exists")
}

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    /// Runs `normalize` over the raw fixture and returns the output path.
    pub fn normalized_fixture(&self) -> PathBuf {
        let output = self.join("normalizada.csv");
        bin()
            .args([
                "normalize",
                "-i",
                fixture_path(RAW_FIXTURE).to_str().unwrap(),
                "-o",
                output.to_str().unwrap(),
                "--no-summary",
            ])
            .assert()
            .success();
        output
    }
}
