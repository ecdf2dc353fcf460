use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_apigateway::types::IntegrationType;
use aws_sdk_apigateway::Client;

use crate::aws::{service_error, PAGE_LIMIT};
use crate::services::{
    ApiGatewayClient, ApiResource, ExistingMethod, IntegrationSummary, PutIntegrationInput,
    PutIntegrationResponseInput, PutMethodInput, PutMethodResponseInput, RestApi, ServiceError,
    ServiceKind,
};

pub struct AwsApiGateway {
    client: Client,
}

impl AwsApiGateway {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_conf(config: &aws_config::SdkConfig) -> Self {
        Self::new(Client::new(config))
    }
}

fn err<E, R>(e: aws_sdk_apigateway::error::SdkError<E, R>) -> ServiceError
where
    E: aws_sdk_apigateway::error::ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug + 'static,
{
    service_error(ServiceKind::ApiGateway, e)
}

fn to_hash_map<V: Clone>(m: &std::collections::BTreeMap<String, V>) -> HashMap<String, V> {
    m.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

#[async_trait]
impl ApiGatewayClient for AwsApiGateway {
    async fn find_rest_api_by_name(&self, name: &str) -> Result<Option<RestApi>, ServiceError> {
        let mut position: Option<String> = None;
        loop {
            let page = self
                .client
                .get_rest_apis()
                .limit(PAGE_LIMIT)
                .set_position(position.take())
                .send()
                .await
                .map_err(err)?;

            let found = page.items().iter().find(|api| api.name() == Some(name));
            if let Some(api) = found {
                return Ok(Some(RestApi {
                    id: api.id().unwrap_or_default().to_string(),
                    name: name.to_string(),
                }));
            }

            match page.position() {
                Some(p) if !p.is_empty() => position = Some(p.to_string()),
                _ => return Ok(None),
            }
        }
    }

    async fn get_resources(&self, rest_api_id: &str) -> Result<Vec<ApiResource>, ServiceError> {
        let mut out = Vec::new();
        let mut position: Option<String> = None;
        loop {
            let page = self
                .client
                .get_resources()
                .rest_api_id(rest_api_id)
                .limit(PAGE_LIMIT)
                .set_position(position.take())
                .send()
                .await
                .map_err(err)?;

            out.extend(page.items().iter().map(|r| ApiResource {
                id: r.id().unwrap_or_default().to_string(),
                parent_id: r.parent_id().map(str::to_string),
                path_part: r.path_part().map(str::to_string),
                path: r.path().unwrap_or_default().to_string(),
            }));

            match page.position() {
                Some(p) if !p.is_empty() => position = Some(p.to_string()),
                _ => return Ok(out),
            }
        }
    }

    async fn create_resource(
        &self,
        rest_api_id: &str,
        parent_id: &str,
        path_part: &str,
    ) -> Result<ApiResource, ServiceError> {
        let r = self
            .client
            .create_resource()
            .rest_api_id(rest_api_id)
            .parent_id(parent_id)
            .path_part(path_part)
            .send()
            .await
            .map_err(err)?;

        Ok(ApiResource {
            id: r.id().unwrap_or_default().to_string(),
            parent_id: r.parent_id().map(str::to_string),
            path_part: r.path_part().map(str::to_string),
            path: r.path().unwrap_or_default().to_string(),
        })
    }

    async fn get_method(
        &self,
        rest_api_id: &str,
        resource_id: &str,
        http_method: &str,
    ) -> Result<Option<ExistingMethod>, ServiceError> {
        let res = self
            .client
            .get_method()
            .rest_api_id(rest_api_id)
            .resource_id(resource_id)
            .http_method(http_method)
            .send()
            .await;

        let m = match res.map_err(err) {
            Ok(m) => m,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };

        Ok(Some(ExistingMethod {
            http_method: m.http_method().unwrap_or(http_method).to_string(),
            authorization_type: m.authorization_type().map(str::to_string),
            api_key_required: m.api_key_required().unwrap_or(false),
            integration: m.method_integration().map(|i| IntegrationSummary {
                integration_type: i.r#type().map(|t| t.as_str().to_string()),
                uri: i.uri().map(str::to_string),
            }),
        }))
    }

    async fn delete_method(
        &self,
        rest_api_id: &str,
        resource_id: &str,
        http_method: &str,
    ) -> Result<(), ServiceError> {
        self.client
            .delete_method()
            .rest_api_id(rest_api_id)
            .resource_id(resource_id)
            .http_method(http_method)
            .send()
            .await
            .map_err(err)?;
        Ok(())
    }

    async fn put_method(
        &self,
        rest_api_id: &str,
        resource_id: &str,
        input: &PutMethodInput,
    ) -> Result<(), ServiceError> {
        self.client
            .put_method()
            .rest_api_id(rest_api_id)
            .resource_id(resource_id)
            .http_method(&input.http_method)
            .authorization_type(&input.authorization_type)
            .api_key_required(input.api_key_required)
            .set_request_models(Some(to_hash_map(&input.request_models)))
            .set_request_parameters(Some(to_hash_map(&input.request_parameters)))
            .send()
            .await
            .map_err(err)?;
        Ok(())
    }

    async fn put_integration(
        &self,
        rest_api_id: &str,
        resource_id: &str,
        input: &PutIntegrationInput,
    ) -> Result<IntegrationSummary, ServiceError> {
        let out = self
            .client
            .put_integration()
            .rest_api_id(rest_api_id)
            .resource_id(resource_id)
            .http_method(&input.http_method)
            .r#type(IntegrationType::from(input.integration_type.as_str()))
            .integration_http_method(&input.integration_http_method)
            .uri(&input.uri)
            .set_request_parameters(Some(to_hash_map(&input.request_parameters)))
            .set_request_templates(Some(to_hash_map(&input.request_templates)))
            .set_cache_key_parameters(Some(input.cache_key_parameters.clone()))
            .set_cache_namespace(input.cache_namespace.clone())
            .send()
            .await
            .map_err(err)?;

        Ok(IntegrationSummary {
            integration_type: out.r#type().map(|t| t.as_str().to_string()),
            uri: out.uri().map(str::to_string),
        })
    }

    async fn put_method_response(
        &self,
        rest_api_id: &str,
        resource_id: &str,
        input: &PutMethodResponseInput,
    ) -> Result<(), ServiceError> {
        self.client
            .put_method_response()
            .rest_api_id(rest_api_id)
            .resource_id(resource_id)
            .http_method(&input.http_method)
            .status_code(&input.status_code)
            .set_response_parameters(Some(to_hash_map(&input.response_parameters)))
            .set_response_models(Some(to_hash_map(&input.response_models)))
            .send()
            .await
            .map_err(err)?;
        Ok(())
    }

    async fn put_integration_response(
        &self,
        rest_api_id: &str,
        resource_id: &str,
        input: &PutIntegrationResponseInput,
    ) -> Result<(), ServiceError> {
        self.client
            .put_integration_response()
            .rest_api_id(rest_api_id)
            .resource_id(resource_id)
            .http_method(&input.http_method)
            .status_code(&input.status_code)
            .set_selection_pattern(input.selection_pattern.clone())
            .set_response_parameters(Some(to_hash_map(&input.response_parameters)))
            .set_response_templates(Some(to_hash_map(&input.response_templates)))
            .send()
            .await
            .map_err(err)?;
        Ok(())
    }
}
