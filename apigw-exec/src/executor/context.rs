use std::collections::BTreeMap;

use apigw_core::DesiredEndpoint;
use uuid::Uuid;

use crate::services::ApiResource;

/// Per-run state threaded through every step. Nothing here outlives the run.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: Uuid,
    pub endpoint_name: String,
    pub endpoint: DesiredEndpoint,
    pub stage: String,
    pub region: String,
    pub account_number: String,
    pub alias: String,
    pub resources: ResourceCache,
}

/// Resources of one REST API keyed by path: what was listed at run start plus what this
/// run created.
#[derive(Debug, Clone, Default)]
pub struct ResourceCache {
    by_path: BTreeMap<String, ApiResource>,
}

impl ResourceCache {
    pub fn from_resources(resources: impl IntoIterator<Item = ApiResource>) -> Self {
        let mut cache = Self::default();
        cache.extend(resources);
        cache
    }

    pub fn get(&self, path: &str) -> Option<&ApiResource> {
        self.by_path.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.by_path.contains_key(path)
    }

    pub fn insert(&mut self, resource: ApiResource) {
        self.by_path.insert(resource.path.clone(), resource);
    }

    /// Add resources whose path is not cached yet; existing entries win.
    pub fn extend(&mut self, resources: impl IntoIterator<Item = ApiResource>) {
        for r in resources {
            self.by_path.entry(r.path.clone()).or_insert(r);
        }
    }
}

/// The endpoint's leaf resource and its direct parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedResource {
    pub resource: ApiResource,
    pub parent: Option<ApiResource>,
}
