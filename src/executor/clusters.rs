// ABOUTME: Kubernetes cluster operations of the executor client
// ABOUTME: List with optional name filter, create and delete

use reqwest::Method;
use tracing::{debug, info};

use super::ExecutorClient;
use crate::error::Result;
use crate::remote::models::{CreateKubernetesCluster, KubernetesCluster};

impl ExecutorClient {
    /// Lists clusters known to the service. A `None` or empty filter sends no
    /// `name` parameter and returns every cluster.
    pub async fn get_clusters(
        &self,
        token: &str,
        name: Option<&str>,
    ) -> Result<Vec<KubernetesCluster>> {
        let mut url = self.api.api_url(&["api", "kubernetes-clusters"]).await?;
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push("");
        }
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            url.query_pairs_mut().append_pair("name", name);
        }

        let clusters: Vec<KubernetesCluster> =
            self.api.call_url(Method::GET, url, None::<&()>, token).await?;
        debug!("listed {} clusters", clusters.len());
        Ok(clusters)
    }

    /// Registers a cluster. Not idempotent: the same input twice registers
    /// twice unless the service refuses it.
    pub async fn create_cluster(
        &self,
        token: &str,
        input: &CreateKubernetesCluster,
    ) -> Result<KubernetesCluster> {
        let cluster: KubernetesCluster = self
            .api
            .call(
                Method::POST,
                &["api", "kubernetes-clusters"],
                Some(input),
                token,
            )
            .await?;
        info!("registered cluster {} ({})", cluster.name, cluster.id);
        Ok(cluster)
    }

    pub async fn delete_cluster(&self, token: &str, id: &str) -> Result<KubernetesCluster> {
        let cluster: KubernetesCluster = self
            .api
            .call(
                Method::DELETE,
                &["api", "kubernetes-clusters", id],
                None::<&()>,
                token,
            )
            .await?;
        info!("deleted cluster {} ({})", cluster.name, cluster.id);
        Ok(cluster)
    }
}
