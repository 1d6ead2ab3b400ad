// ABOUTME: Project manifest describing how a project is built and run
// ABOUTME: Read from TOML; its run section seeds job creation input

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ExecutorError, Result};
use crate::remote::models::CreateJobInput;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShocManifest {
    pub name: String,
    #[serde(default)]
    pub build: BuildSpec,
    #[serde(default)]
    pub run: RunSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildSpec {
    /// Base image the project is built on.
    pub base: Option<String>,
    #[serde(default)]
    pub entrypoint: Vec<String>,
    /// Paths left out of the build context.
    #[serde(default)]
    pub ignore: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSpec {
    #[serde(default)]
    pub args: Vec<String>,
    /// Cluster id to run on when the command line does not name one.
    pub cluster: Option<String>,
}

impl ShocManifest {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ExecutorError::Config(format!("failed to read manifest {}: {}", path.display(), e))
        })?;
        toml::from_str(&raw).map_err(|e| {
            ExecutorError::Config(format!("invalid manifest {}: {}", path.display(), e))
        })
    }

    /// Job input for `project_id` with this manifest's run arguments. An
    /// explicit `cluster_id` takes precedence over `run.cluster`.
    pub fn job_input(&self, project_id: &str, cluster_id: Option<String>) -> CreateJobInput {
        CreateJobInput {
            project_id: project_id.to_string(),
            version_id: None,
            cluster_id: cluster_id.or_else(|| self.run.cluster.clone()),
            args: self.run.args.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MANIFEST: &str = r#"
name = "mnist-train"

[build]
base = "python:3.11"
entrypoint = ["python", "train.py"]
ignore = [".venv"]

[run]
args = ["--epochs", "5"]
cluster = "gpu-pool"
"#;

    #[test]
    fn test_load_manifest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MANIFEST.as_bytes()).unwrap();

        let manifest = ShocManifest::load(file.path()).unwrap();
        assert_eq!(manifest.name, "mnist-train");
        assert_eq!(manifest.build.base.as_deref(), Some("python:3.11"));
        assert_eq!(manifest.build.entrypoint, vec!["python", "train.py"]);
        assert_eq!(manifest.run.cluster.as_deref(), Some("gpu-pool"));
    }

    #[test]
    fn test_minimal_manifest() {
        let manifest: ShocManifest = toml::from_str("name = \"hello\"").unwrap();
        assert_eq!(manifest.build, BuildSpec::default());
        assert_eq!(manifest.run, RunSpec::default());
    }

    #[test]
    fn test_manifest_without_name_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[run]\nargs = []\n").unwrap();

        let err = ShocManifest::load(file.path()).unwrap_err();
        assert!(matches!(err, ExecutorError::Config(ref msg) if msg.contains("invalid manifest")));
    }

    #[test]
    fn test_job_input_cluster_precedence() {
        let manifest: ShocManifest = toml::from_str(MANIFEST).unwrap();

        let input = manifest.job_input("p-1", None);
        assert_eq!(input.project_id, "p-1");
        assert_eq!(input.cluster_id.as_deref(), Some("gpu-pool"));
        assert_eq!(input.args, vec!["--epochs", "5"]);

        let input = manifest.job_input("p-1", Some("cpu-pool".to_string()));
        assert_eq!(input.cluster_id.as_deref(), Some("cpu-pool"));
    }
}
