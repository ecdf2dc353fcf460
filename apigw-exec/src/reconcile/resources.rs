use apigw_core::paths::{parent_path, path_part, prefixes, ROOT_PATH};

use crate::executor::context::{ResolvedResource, ResourceCache};
use crate::executor::retrying::RetryingClient;
use crate::executor::StepError;
use crate::services::{ApiGatewayClient, ApiResource};

#[derive(Debug, Clone)]
pub struct TreeResolution {
    pub leaf: ResolvedResource,
    /// Resources created by this call, parents before children.
    pub created: Vec<ApiResource>,
}

/// Make sure a resource exists for every prefix of `path`, creating missing ones
/// root-to-leaf. Created resources go into `cache` immediately.
pub async fn resolve_resource_tree(
    api: &dyn ApiGatewayClient,
    retry: &RetryingClient<'_>,
    rest_api_id: &str,
    cache: &mut ResourceCache,
    path: &str,
) -> Result<TreeResolution, StepError> {
    let mut created = Vec::new();

    if !cache.contains(path) {
        for prefix in prefixes(path) {
            if cache.contains(&prefix) {
                continue;
            }

            let parent = parent_path(&prefix).unwrap_or_else(|| ROOT_PATH.to_string());
            let parent_id = cache
                .get(&parent)
                .map(|r| r.id.clone())
                .ok_or_else(|| StepError::MissingParent {
                    path: prefix.clone(),
                    parent: parent.clone(),
                })?;
            let part = path_part(&prefix);

            let result = retry
                .call("createResource", || {
                    api.create_resource(rest_api_id, &parent_id, part)
                })
                .await;

            match result {
                Ok(mut resource) => {
                    if resource.path.is_empty() {
                        resource.path = prefix.clone();
                    }
                    tracing::debug!(path = %prefix, id = %resource.id, "created resource");
                    cache.insert(resource.clone());
                    created.push(resource);
                }
                // Another run created it between our listing and this call.
                Err(e) if e.is_conflict() => {
                    tracing::debug!(path = %prefix, "resource already exists, re-listing");
                    let listed = retry
                        .call("getResources", || api.get_resources(rest_api_id))
                        .await?;
                    cache.extend(listed);
                    if !cache.contains(&prefix) {
                        return Err(e.into());
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    let resource = cache
        .get(path)
        .cloned()
        .ok_or_else(|| StepError::MissingParent {
            path: path.to_string(),
            parent: parent_path(path).unwrap_or_default(),
        })?;
    let parent = parent_path(path).and_then(|p| cache.get(&p).cloned());

    Ok(TreeResolution {
        leaf: ResolvedResource { resource, parent },
        created,
    })
}
