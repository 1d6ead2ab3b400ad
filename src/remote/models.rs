// ABOUTME: Data structures exchanged with the executor API
// ABOUTME: Serialized as camelCase JSON; unknown response fields are kept verbatim

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A job as the service reports it. Only `id` is typed; every other field,
/// nulls included, is kept as sent and read through the accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Job {
    pub fn project_id(&self) -> Option<&str> {
        text_field(&self.extra, "projectId")
    }

    pub fn cluster_id(&self) -> Option<&str> {
        text_field(&self.extra, "clusterId")
    }

    /// Name or numeric code, depending on how the service serializes it.
    pub fn status(&self) -> Option<&Value> {
        self.extra.get("status").filter(|v| !v.is_null())
    }

    pub fn message(&self) -> Option<&str> {
        text_field(&self.extra, "message")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobInput {
    pub project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KubernetesCluster {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl KubernetesCluster {
    pub fn api_server_uri(&self) -> Option<&str> {
        text_field(&self.extra, "apiServerUri")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateKubernetesCluster {
    pub name: String,
    pub api_server_uri: String,
    /// Kubeconfig contents used by the executor to reach the cluster.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kube_config: Option<String>,
}

fn text_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}
