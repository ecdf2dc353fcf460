use apigw_core::types::RequestTemplate;
use apigw_core::{
    parse_project_str, validate_project, DesiredEndpoint, DocumentFormat, EndpointAddress,
};

fn minimal_valid_yaml() -> &'static str {
    r#"
name: shop
stages:
  dev:
    us-east-1:
      iamRoleArnLambda: arn:aws:iam::123456789012:role/shop-lambda
      apiGatewayApi: shop-api
functions:
  users/show:
    endpoints:
      - path: users/{id}
        method: get
        authorizationType: none
        apiKeyRequired: false
        requestParameters:
          integration.request.path.id: method.request.path.id
        requestTemplates:
          application/json: '{"id": "$input.params(''id'')"}'
        responses:
          default:
            statusCode: 200
            responseTemplates:
              application/json: ''
          '400':
            statusCode: '400'
"#
}

#[test]
fn parse_yaml_and_validate_ok() {
    let parsed = parse_project_str(minimal_valid_yaml(), DocumentFormat::Yaml).unwrap();
    validate_project(&parsed.project).unwrap();
}

#[test]
fn parse_auto_detects_yaml() {
    let parsed = parse_project_str(minimal_valid_yaml(), DocumentFormat::Auto).unwrap();
    assert_eq!(parsed.format, DocumentFormat::Yaml);
}

#[test]
fn parse_auto_detects_json() {
    let json = r#"{ "name": "shop", "functions": { "f": { "endpoints": [] } } }"#;
    let parsed = parse_project_str(json, DocumentFormat::Auto).unwrap();
    assert_eq!(parsed.format, DocumentFormat::Json);
    validate_project(&parsed.project).unwrap();
}

#[test]
fn parse_garbage_is_rejected() {
    let err = parse_project_str("name: [unclosed", DocumentFormat::Auto).unwrap_err();
    assert!(format!("{err}").contains("YAML"));
}

#[test]
fn numeric_status_codes_are_accepted() {
    let parsed = parse_project_str(minimal_valid_yaml(), DocumentFormat::Yaml).unwrap();
    let (_, e) = parsed.project.endpoints().into_iter().next().unwrap();
    let desired = DesiredEndpoint::from_endpoint(e).unwrap();
    assert_eq!(desired.responses["default"].status_code, "200");
    assert_eq!(desired.responses["400"].status_code, "400");
}

#[test]
fn desired_endpoint_is_canonical() {
    let parsed = parse_project_str(minimal_valid_yaml(), DocumentFormat::Yaml).unwrap();
    let (addr, e) = parsed.project.endpoints().into_iter().next().unwrap();
    let desired = DesiredEndpoint::from_endpoint(e).unwrap();
    assert_eq!(desired.path, "/users/{id}");
    assert_eq!(desired.method, "GET");
    assert_eq!(desired.integration_type, "AWS");
    assert_eq!(addr.to_string(), "users/show@/users/{id}~GET");
    assert_eq!(
        desired.method_request_parameters().get("method.request.path.id"),
        Some(&true)
    );
}

#[test]
fn missing_required_fields_are_reported() {
    let yaml = r#"
name: shop
functions:
  f:
    endpoints:
      - path: /users
        method: GET
"#;
    let parsed = parse_project_str(yaml, DocumentFormat::Yaml).unwrap();
    let err = validate_project(&parsed.project).unwrap_err();
    let paths: Vec<&str> = err.violations.iter().map(|v| v.path.as_str()).collect();
    for field in [
        "authorizationType",
        "apiKeyRequired",
        "requestTemplates",
        "requestParameters",
        "responses",
    ] {
        let expected = format!("$.functions.f.endpoints[0].{field}");
        assert!(paths.contains(&expected.as_str()), "missing violation for {field}");
    }
}

#[test]
fn desired_endpoint_rejects_incomplete_endpoint() {
    let parsed = parse_project_str(minimal_valid_yaml(), DocumentFormat::Yaml).unwrap();
    let (_, e) = parsed.project.endpoints().into_iter().next().unwrap();
    let mut e = e.clone();
    e.authorization_type = None;
    let err = DesiredEndpoint::from_endpoint(&e).unwrap_err();
    assert_eq!(err.violations[0].path, "$.authorizationType");
}

#[test]
fn root_path_endpoint_is_accepted() {
    let parsed = parse_project_str(minimal_valid_yaml(), DocumentFormat::Yaml).unwrap();
    let (_, e) = parsed.project.endpoints().into_iter().next().unwrap();
    let mut e = e.clone();
    e.path = Some("/".to_string());
    let desired = DesiredEndpoint::from_endpoint(&e).unwrap();
    assert_eq!(desired.path, "/");
}

#[test]
fn empty_path_is_rejected_with_a_neutral_message() {
    let parsed = parse_project_str(minimal_valid_yaml(), DocumentFormat::Yaml).unwrap();
    let (_, e) = parsed.project.endpoints().into_iter().next().unwrap();
    let mut e = e.clone();
    e.path = Some("  ".to_string());
    let err = DesiredEndpoint::from_endpoint(&e).unwrap_err();
    assert_eq!(err.violations.len(), 1);
    assert_eq!(err.violations[0].path, "$.path");
    assert_eq!(err.to_string(), "validation failed (1 violations)");
}

#[test]
fn duplicate_path_and_method_across_functions_is_rejected() {
    let yaml = r#"
name: shop
functions:
  a:
    endpoints:
      - { path: /x, method: GET, authorizationType: none, apiKeyRequired: false,
          requestParameters: {}, requestTemplates: {}, responses: {} }
  b:
    endpoints:
      - { path: x/, method: get, authorizationType: none, apiKeyRequired: false,
          requestParameters: {}, requestTemplates: {}, responses: {} }
"#;
    let parsed = parse_project_str(yaml, DocumentFormat::Yaml).unwrap();
    let err = validate_project(&parsed.project).unwrap_err();
    assert!(err
        .violations
        .iter()
        .any(|v| v.message.contains("already declared by function \"a\"")));
}

#[test]
fn bad_role_arn_and_status_code_are_reported() {
    let yaml = minimal_valid_yaml()
        .replace("arn:aws:iam::123456789012:role/shop-lambda", "not-an-arn")
        .replace("statusCode: '400'", "statusCode: '4000'");
    let parsed = parse_project_str(&yaml, DocumentFormat::Yaml).unwrap();
    let err = validate_project(&parsed.project).unwrap_err();
    assert!(err
        .violations
        .iter()
        .any(|v| v.path == "$.stages.dev.us-east-1.iamRoleArnLambda"));
    assert!(err
        .violations
        .iter()
        .any(|v| v.path == "$.functions.users/show.endpoints[0].responses.400.statusCode"));
}

#[test]
fn structured_request_template_is_parsed_as_value() {
    let yaml = r#"
name: shop
functions:
  f:
    endpoints:
      - path: /orders
        method: POST
        authorizationType: none
        apiKeyRequired: true
        requestParameters: {}
        requestTemplates:
          application/json:
            body: $input.json('$')
        responses: {}
"#;
    let parsed = parse_project_str(yaml, DocumentFormat::Yaml).unwrap();
    let (_, e) = parsed.project.endpoints().into_iter().next().unwrap();
    let templates = e.request_templates.as_ref().unwrap();
    assert!(matches!(templates["application/json"], RequestTemplate::Structured(_)));

    let desired = DesiredEndpoint::from_endpoint(e).unwrap();
    assert_eq!(
        desired.request_templates["application/json"],
        "{\"body\":$input.json('$')}"
    );
}

#[test]
fn endpoint_address_round_trips_through_display() {
    let addr = EndpointAddress::parse("users/show@users/{id}/~get").unwrap();
    assert_eq!(addr.function, "users/show");
    assert_eq!(addr.path, "/users/{id}");
    assert_eq!(addr.method, "GET");
    assert!(EndpointAddress::parse("no-at-sign").is_err());
    assert!(EndpointAddress::parse("f@/x").is_err());
}

#[test]
fn deployed_name_defaults_to_project_prefix() {
    let parsed = parse_project_str(minimal_valid_yaml(), DocumentFormat::Yaml).unwrap();
    assert_eq!(
        parsed.project.deployed_function_name("users/show").as_deref(),
        Some("shop-users-show")
    );
    assert_eq!(parsed.project.deployed_function_name("missing"), None);
}
