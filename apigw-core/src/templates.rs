//! Request template preparation.
//!
//! Templates may be written as structured values instead of strings. Those are serialized
//! to JSON before being sent, which quotes every string, including `$input.json(...)`
//! calls that Velocity must see as bare expressions. The one rewrite we do is to unquote
//! those calls.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::RequestTemplate;

static QUOTED_INPUT_JSON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""\$input\.json\(['\\"]+([^\\)]+)['\\"]+\)""#).expect("valid")
});

pub fn prepare_request_templates(
    templates: &BTreeMap<String, RequestTemplate>,
) -> BTreeMap<String, String> {
    templates
        .iter()
        .map(|(content_type, t)| (content_type.clone(), prepare_request_template(t)))
        .collect()
}

pub fn prepare_request_template(template: &RequestTemplate) -> String {
    match template {
        RequestTemplate::Text(s) => s.clone(),
        RequestTemplate::Structured(v) => {
            let serialized = serde_json::to_string(v).unwrap_or_default();
            unquote_input_json(&serialized)
        }
    }
}

pub fn unquote_input_json(serialized: &str) -> String {
    QUOTED_INPUT_JSON_RE
        .replace_all(serialized, "$$input.json('${1}')")
        .into_owned()
}
