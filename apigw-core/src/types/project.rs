use std::collections::BTreeMap;

use crate::types::{Endpoint, Extensions};

/// A project: stage/region variables plus the functions and the endpoints they serve.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProjectDocument {
    pub name: String,

    /// stage -> region -> variables
    #[serde(default)]
    pub stages: BTreeMap<String, BTreeMap<String, RegionVariables>>,

    /// function path (e.g. `users/show`) -> function
    #[serde(default)]
    pub functions: BTreeMap<String, FunctionDef>,

    #[serde(flatten, default)]
    pub extensions: Extensions,
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct RegionVariables {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "iamRoleArnLambda")]
    pub iam_role_arn_lambda: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "apiGatewayApi")]
    pub api_gateway_api: Option<String>,

    #[serde(flatten, default)]
    pub extensions: Extensions,
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct FunctionDef {
    /// Deployed Lambda function name; derived from the project name when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "deployedName")]
    pub deployed_name: Option<String>,

    #[serde(default)]
    pub endpoints: Vec<Endpoint>,

    #[serde(flatten, default)]
    pub extensions: Extensions,
}

impl ProjectDocument {
    pub fn region_variables(&self, stage: &str, region: &str) -> Option<&RegionVariables> {
        self.stages.get(stage)?.get(region)
    }

    pub fn deployed_function_name(&self, function_path: &str) -> Option<String> {
        let f = self.functions.get(function_path)?;
        Some(match &f.deployed_name {
            Some(n) => n.clone(),
            None => format!("{}-{}", self.name, function_path.replace('/', "-")),
        })
    }

    /// Every endpoint with its address, in document order per function.
    pub fn endpoints(&self) -> Vec<(EndpointAddress, &Endpoint)> {
        let mut out = Vec::new();
        for (function_path, f) in &self.functions {
            for e in &f.endpoints {
                if let (Some(path), Some(method)) = (&e.path, &e.method) {
                    out.push((EndpointAddress::new(function_path, path, method), e));
                }
            }
        }
        out
    }
}

/// `function@path~METHOD`, the stable name of one endpoint within a project.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EndpointAddress {
    pub function: String,
    pub path: String,
    pub method: String,
}

impl EndpointAddress {
    pub fn new(function: &str, path: &str, method: &str) -> Self {
        Self {
            function: function.to_string(),
            path: crate::paths::canonical_path(path),
            method: method.trim().to_ascii_uppercase(),
        }
    }

    pub fn parse(s: &str) -> Result<Self, EndpointAddressParseError> {
        let (function, rest) = s
            .split_once('@')
            .ok_or_else(|| EndpointAddressParseError(s.to_string()))?;
        let (path, method) = rest
            .rsplit_once('~')
            .ok_or_else(|| EndpointAddressParseError(s.to_string()))?;
        if function.is_empty() || path.is_empty() || method.is_empty() {
            return Err(EndpointAddressParseError(s.to_string()));
        }
        Ok(Self::new(function, path, method))
    }
}

impl std::fmt::Display for EndpointAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}~{}", self.function, self.path, self.method)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid endpoint address {0:?} (expected function@path~METHOD)")]
pub struct EndpointAddressParseError(pub String);
