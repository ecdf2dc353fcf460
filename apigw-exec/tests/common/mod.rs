#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::{Arc, Mutex};

use apigw_core::Endpoint;
use apigw_exec::executor::events::{Event, EventSink};
use apigw_exec::services::{
    AddPermissionInput, ApiGatewayClient, ApiResource, ExistingMethod, FunctionConfiguration,
    IntegrationSummary, LambdaClient, PutIntegrationInput, PutIntegrationResponseInput,
    PutMethodInput, PutMethodResponseInput, RestApi, ServiceError, ServiceErrorKind, ServiceKind,
};
use apigw_exec::{BuildRequest, EndpointBuilder, EngineConfig};
use async_trait::async_trait;
use serde_json::json;

pub const REGION: &str = "us-east-1";
pub const STAGE: &str = "dev";
pub const ACCOUNT: &str = "123456789012";
pub const REST_API_ID: &str = "api123";
pub const REST_API_NAME: &str = "shop-api";
pub const ROLE_ARN: &str = "arn:aws:iam::123456789012:role/shop-lambda";

#[derive(Debug, Clone, PartialEq)]
pub struct StoredMethod {
    pub input: PutMethodInput,
    pub integration: Option<PutIntegrationInput>,
    pub method_responses: BTreeMap<String, PutMethodResponseInput>,
    pub integration_responses: BTreeMap<String, PutIntegrationResponseInput>,
}

/// Remote state of the fake control planes.
#[derive(Debug, Default)]
pub struct CloudState {
    pub rest_apis: Vec<RestApi>,
    pub resources: Vec<ApiResource>,
    /// (resource id, http method) -> method
    pub methods: BTreeMap<(String, String), StoredMethod>,
    /// function name -> deployed function
    pub functions: BTreeMap<String, FunctionConfiguration>,
    /// function ARN -> statement id -> permission
    pub policies: BTreeMap<String, BTreeMap<String, AddPermissionInput>>,
    /// Raw policy returned by `get_policy` instead of the real one.
    pub policy_override: Option<String>,
    /// Paths another writer creates right before our create call lands.
    pub racing_paths: BTreeSet<String>,
    /// Operations whose next call is applied but answered with a timeout.
    pub lost_responses: BTreeSet<String>,
    pub failures: BTreeMap<String, VecDeque<ServiceError>>,
    pub calls: Vec<String>,
    next_id: usize,
}

#[derive(Default)]
pub struct FakeCloud {
    pub state: Mutex<CloudState>,
}

impl FakeCloud {
    /// A REST API with only its root resource and one deployed function per name.
    pub fn new(function_names: &[&str]) -> Arc<Self> {
        let cloud = Self::default();
        {
            let mut s = cloud.state.lock().unwrap();
            s.rest_apis.push(RestApi {
                id: REST_API_ID.to_string(),
                name: REST_API_NAME.to_string(),
            });
            s.resources.push(ApiResource {
                id: "root".to_string(),
                parent_id: None,
                path_part: None,
                path: "/".to_string(),
            });
            for name in function_names {
                s.functions.insert(
                    name.to_string(),
                    FunctionConfiguration {
                        function_name: name.to_string(),
                        function_arn: format!(
                            "arn:aws:lambda:{REGION}:{ACCOUNT}:function:{name}:{STAGE}"
                        ),
                    },
                );
            }
        }
        Arc::new(cloud)
    }

    pub fn fail_next(&self, operation: &str, error: ServiceError) {
        self.state
            .lock()
            .unwrap()
            .failures
            .entry(operation.to_string())
            .or_default()
            .push_back(error);
    }

    /// The next `operation` call takes effect remotely, but the caller sees a timeout.
    pub fn lose_next_response(&self, operation: &str) {
        self.state
            .lock()
            .unwrap()
            .lost_responses
            .insert(operation.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn count(&self, operation: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.split(' ').next() == Some(operation))
            .count()
    }

    pub fn resource(&self, path: &str) -> Option<ApiResource> {
        self.state
            .lock()
            .unwrap()
            .resources
            .iter()
            .find(|r| r.path == path)
            .cloned()
    }

    pub fn method(&self, path: &str, http_method: &str) -> Option<StoredMethod> {
        let id = self.resource(path)?.id;
        self.state
            .lock()
            .unwrap()
            .methods
            .get(&(id, http_method.to_string()))
            .cloned()
    }

    pub fn statements(&self, function_name: &str) -> Vec<AddPermissionInput> {
        let s = self.state.lock().unwrap();
        let Some(f) = s.functions.get(function_name) else {
            return Vec::new();
        };
        s.policies
            .get(&f.function_arn)
            .map(|p| p.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Snapshot of everything the engine converges, for idempotence checks.
    pub fn snapshot(&self) -> String {
        let s = self.state.lock().unwrap();
        format!("{:?}|{:?}|{:?}", s.resources, s.methods, s.policies)
    }

    fn enter(&self, call: String) -> Result<std::sync::MutexGuard<'_, CloudState>, ServiceError> {
        let mut s = self.state.lock().unwrap();
        let op = call.split(' ').next().unwrap_or_default().to_string();
        s.calls.push(call);
        if let Some(e) = s.failures.get_mut(&op).and_then(|q| q.pop_front()) {
            return Err(e);
        }
        Ok(s)
    }
}

pub fn apigw_error(kind: ServiceErrorKind, message: &str) -> ServiceError {
    ServiceError::new(ServiceKind::ApiGateway, kind, message)
}

pub fn lambda_error(kind: ServiceErrorKind, message: &str) -> ServiceError {
    ServiceError::new(ServiceKind::Lambda, kind, message)
}

fn method_key(resource_id: &str, http_method: &str) -> (String, String) {
    (resource_id.to_string(), http_method.to_string())
}

#[async_trait]
impl ApiGatewayClient for FakeCloud {
    async fn find_rest_api_by_name(&self, name: &str) -> Result<Option<RestApi>, ServiceError> {
        let s = self.enter(format!("getRestApis {name}"))?;
        Ok(s.rest_apis.iter().find(|a| a.name == name).cloned())
    }

    async fn get_resources(&self, _rest_api_id: &str) -> Result<Vec<ApiResource>, ServiceError> {
        let s = self.enter("getResources".to_string())?;
        Ok(s.resources.clone())
    }

    async fn create_resource(
        &self,
        _rest_api_id: &str,
        parent_id: &str,
        path_part: &str,
    ) -> Result<ApiResource, ServiceError> {
        let mut s = self.enter(format!("createResource {path_part}"))?;
        let parent = s
            .resources
            .iter()
            .find(|r| r.id == parent_id)
            .cloned()
            .ok_or_else(|| apigw_error(ServiceErrorKind::NotFound, "Invalid Resource identifier specified"))?;
        let path = if parent.path == "/" {
            format!("/{path_part}")
        } else {
            format!("{}/{path_part}", parent.path)
        };

        let racing = s.racing_paths.remove(&path);
        if racing || s.resources.iter().any(|r| r.path == path) {
            if racing {
                s.next_id += 1;
                let id = format!("other{}", s.next_id);
                s.resources.push(ApiResource {
                    id,
                    parent_id: Some(parent_id.to_string()),
                    path_part: Some(path_part.to_string()),
                    path,
                });
            }
            return Err(apigw_error(
                ServiceErrorKind::Conflict,
                "Another resource with the same parent already has this name",
            ));
        }

        s.next_id += 1;
        let resource = ApiResource {
            id: format!("res{}", s.next_id),
            parent_id: Some(parent_id.to_string()),
            path_part: Some(path_part.to_string()),
            path,
        };
        s.resources.push(resource.clone());
        Ok(resource)
    }

    async fn get_method(
        &self,
        _rest_api_id: &str,
        resource_id: &str,
        http_method: &str,
    ) -> Result<Option<ExistingMethod>, ServiceError> {
        let s = self.enter(format!("getMethod {http_method}"))?;
        Ok(s.methods.get(&method_key(resource_id, http_method)).map(|m| ExistingMethod {
            http_method: http_method.to_string(),
            authorization_type: Some(m.input.authorization_type.clone()),
            api_key_required: m.input.api_key_required,
            integration: m.integration.as_ref().map(|i| IntegrationSummary {
                integration_type: Some(i.integration_type.clone()),
                uri: Some(i.uri.clone()),
            }),
        }))
    }

    async fn delete_method(
        &self,
        _rest_api_id: &str,
        resource_id: &str,
        http_method: &str,
    ) -> Result<(), ServiceError> {
        let mut s = self.enter(format!("deleteMethod {http_method}"))?;
        s.methods
            .remove(&method_key(resource_id, http_method))
            .ok_or_else(|| apigw_error(ServiceErrorKind::NotFound, "Invalid Method identifier specified"))?;
        if s.lost_responses.remove("deleteMethod") {
            return Err(apigw_error(ServiceErrorKind::Transient, "Request timed out"));
        }
        Ok(())
    }

    async fn put_method(
        &self,
        _rest_api_id: &str,
        resource_id: &str,
        input: &PutMethodInput,
    ) -> Result<(), ServiceError> {
        let mut s = self.enter(format!("putMethod {}", input.http_method))?;
        let key = method_key(resource_id, &input.http_method);
        if s.methods.contains_key(&key) {
            return Err(apigw_error(ServiceErrorKind::Conflict, "Method already exists for this resource"));
        }
        s.methods.insert(
            key,
            StoredMethod {
                input: input.clone(),
                integration: None,
                method_responses: BTreeMap::new(),
                integration_responses: BTreeMap::new(),
            },
        );
        Ok(())
    }

    async fn put_integration(
        &self,
        _rest_api_id: &str,
        resource_id: &str,
        input: &PutIntegrationInput,
    ) -> Result<IntegrationSummary, ServiceError> {
        let mut s = self.enter(format!("putIntegration {}", input.http_method))?;
        let m = s
            .methods
            .get_mut(&method_key(resource_id, &input.http_method))
            .ok_or_else(|| apigw_error(ServiceErrorKind::NotFound, "Invalid Method identifier specified"))?;
        m.integration = Some(input.clone());
        Ok(IntegrationSummary {
            integration_type: Some(input.integration_type.clone()),
            uri: Some(input.uri.clone()),
        })
    }

    async fn put_method_response(
        &self,
        _rest_api_id: &str,
        resource_id: &str,
        input: &PutMethodResponseInput,
    ) -> Result<(), ServiceError> {
        let mut s = self.enter(format!("putMethodResponse {}", input.status_code))?;
        let m = s
            .methods
            .get_mut(&method_key(resource_id, &input.http_method))
            .ok_or_else(|| apigw_error(ServiceErrorKind::NotFound, "Invalid Method identifier specified"))?;
        m.method_responses
            .insert(input.status_code.clone(), input.clone());
        Ok(())
    }

    async fn put_integration_response(
        &self,
        _rest_api_id: &str,
        resource_id: &str,
        input: &PutIntegrationResponseInput,
    ) -> Result<(), ServiceError> {
        let mut s = self.enter(format!("putIntegrationResponse {}", input.status_code))?;
        let m = s
            .methods
            .get_mut(&method_key(resource_id, &input.http_method))
            .ok_or_else(|| apigw_error(ServiceErrorKind::NotFound, "Invalid Method identifier specified"))?;
        if !m.method_responses.contains_key(&input.status_code) {
            return Err(apigw_error(ServiceErrorKind::NotFound, "Invalid Response status code specified"));
        }
        m.integration_responses
            .insert(input.status_code.clone(), input.clone());
        Ok(())
    }
}

#[async_trait]
impl LambdaClient for FakeCloud {
    async fn get_function(
        &self,
        function_name: &str,
        qualifier: &str,
    ) -> Result<FunctionConfiguration, ServiceError> {
        let s = self.enter(format!("getFunction {function_name}:{qualifier}"))?;
        s.functions.get(function_name).cloned().ok_or_else(|| {
            lambda_error(
                ServiceErrorKind::NotFound,
                &format!("Function not found: {function_name}"),
            )
        })
    }

    async fn get_policy(&self, function: &str) -> Result<Option<String>, ServiceError> {
        let s = self.enter("getPolicy".to_string())?;
        if let Some(raw) = &s.policy_override {
            return Ok(Some(raw.clone()));
        }
        let statements = match s.policies.get(function) {
            Some(p) if !p.is_empty() => p,
            _ => return Ok(None),
        };
        let sids: Vec<_> = statements
            .keys()
            .map(|sid| json!({ "Sid": sid, "Effect": "Allow" }))
            .collect();
        Ok(Some(
            json!({ "Version": "2012-10-17", "Statement": sids }).to_string(),
        ))
    }

    async fn remove_permission(&self, function: &str, statement_id: &str) -> Result<(), ServiceError> {
        let mut s = self.enter(format!("removePermission {statement_id}"))?;
        s.policies
            .get_mut(function)
            .and_then(|p| p.remove(statement_id))
            .map(|_| ())
            .ok_or_else(|| lambda_error(ServiceErrorKind::NotFound, "The resource you requested does not exist."))
    }

    async fn add_permission(&self, input: &AddPermissionInput) -> Result<(), ServiceError> {
        let mut s = self.enter(format!("addPermission {}", input.statement_id))?;
        let policy = s.policies.entry(input.function_name.clone()).or_default();
        if policy.contains_key(&input.statement_id) {
            return Err(lambda_error(
                ServiceErrorKind::Conflict,
                "The statement id provided already exists. Please provide a new statement id.",
            ));
        }
        policy.insert(input.statement_id.clone(), input.clone());
        Ok(())
    }
}

/// Collects every event in order.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<Event>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn types(&self) -> Vec<&'static str> {
        self.events().iter().map(|e| e.event_type()).collect()
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn emit(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn users_show_endpoint() -> Endpoint {
    serde_json::from_value(json!({
        "path": "users/{id}",
        "method": "get",
        "authorizationType": "NONE",
        "apiKeyRequired": false,
        "requestParameters": {
            "integration.request.path.id": "method.request.path.id"
        },
        "requestTemplates": {
            "application/json": { "id": "$input.params('id')", "body": "$input.json('$')" }
        },
        "responses": {
            "default": {
                "statusCode": 200,
                "responseParameters": {
                    "method.response.header.Access-Control-Allow-Origin": "'*'"
                },
                "responseModels": { "application/json": "Empty" },
                "responseTemplates": { "application/json": "" }
            },
            "400": {
                "statusCode": "400",
                "selectionPattern": ".*\\[400\\].*",
                "responseTemplates": { "application/json": "$input.path('$.errorMessage')" }
            }
        }
    }))
    .unwrap()
}

pub fn request(endpoint: Endpoint, function_name: &str) -> BuildRequest {
    let name = format!(
        "users/show@{}~{}",
        apigw_core::paths::canonical_path(endpoint.path.as_deref().unwrap_or_default()),
        endpoint.method.as_deref().unwrap_or_default().to_ascii_uppercase()
    );
    BuildRequest {
        endpoint_name: name,
        endpoint,
        stage: STAGE.to_string(),
        region: REGION.to_string(),
        iam_role_arn: Some(ROLE_ARN.to_string()),
        rest_api_name: Some(REST_API_NAME.to_string()),
        function_name: function_name.to_string(),
    }
}

pub fn builder(cloud: &Arc<FakeCloud>, sink: &Arc<RecordingSink>, config: EngineConfig) -> EndpointBuilder {
    EndpointBuilder::new(cloud.clone(), cloud.clone(), sink.clone(), config)
}
