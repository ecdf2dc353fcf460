use crate::paths::{canonical_path, segments};
use crate::types::Endpoint;
use crate::validate::validator::{Validator, PARAM_SEGMENT_RE, SEGMENT_RE, STATUS_CODE_RE};

const METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS", "ANY"];

pub(crate) fn validate_endpoint(v: &mut Validator, e: &Endpoint, path: &str) {
    v.validate_extensions(path, &e.extensions);

    match &e.path {
        None => v.push(format!("{path}.path"), "endpoint does not have a \"path\" property"),
        Some(p) => {
            if p.trim().is_empty() {
                v.push(format!("{path}.path"), "path must not be empty");
            }
            let canonical = canonical_path(p);
            for seg in segments(&canonical) {
                if !SEGMENT_RE.is_match(seg) && !PARAM_SEGMENT_RE.is_match(seg) {
                    v.push(
                        format!("{path}.path"),
                        format!("invalid path segment {seg:?}"),
                    );
                }
            }
        }
    }

    match &e.method {
        None => v.push(
            format!("{path}.method"),
            "endpoint does not have a \"method\" property",
        ),
        Some(m) => {
            let upper = m.trim().to_ascii_uppercase();
            if !METHODS.contains(&upper.as_str()) {
                v.push(
                    format!("{path}.method"),
                    format!("unsupported HTTP method {m:?}"),
                );
            }
        }
    }

    match &e.authorization_type {
        None => v.push(
            format!("{path}.authorizationType"),
            "endpoint does not have a \"authorizationType\" property",
        ),
        Some(a) if a.trim().is_empty() => {
            v.push(format!("{path}.authorizationType"), "must not be empty")
        }
        Some(_) => {}
    }

    if e.api_key_required.is_none() {
        v.push(
            format!("{path}.apiKeyRequired"),
            "endpoint does not have a \"apiKeyRequired\" property",
        );
    }
    if e.request_templates.is_none() {
        v.push(
            format!("{path}.requestTemplates"),
            "endpoint does not have a \"requestTemplates\" property",
        );
    }
    if e.request_parameters.is_none() {
        v.push(
            format!("{path}.requestParameters"),
            "endpoint does not have a \"requestParameters\" property",
        );
    }

    if let Some(t) = &e.integration_type {
        if t.trim().is_empty() {
            v.push(format!("{path}.type"), "must not be empty");
        }
    }

    let Some(responses) = &e.responses else {
        v.push(
            format!("{path}.responses"),
            "endpoint does not have a \"responses\" property",
        );
        return;
    };

    for (key, r) in responses {
        let rpath = format!("{path}.responses.{key}");
        match &r.status_code {
            None => v.push(format!("{rpath}.statusCode"), "is required"),
            Some(code) if !STATUS_CODE_RE.is_match(code) => v.push(
                format!("{rpath}.statusCode"),
                format!("must be a 3-digit HTTP status code, got {code:?}"),
            ),
            Some(_) => {}
        }
    }
}
