use std::collections::BTreeMap;

/// Fields we do not model, captured so validation can report them.
pub type Extensions = BTreeMap<String, serde_json::Value>;

/// Status codes are strings on the wire, but YAML authors tend to write `200`.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
    }

    let raw: Option<Raw> = serde::Deserialize::deserialize(deserializer)?;
    Ok(raw.map(|r| match r {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
    }))
}
