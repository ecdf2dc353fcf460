use crate::error::ParseError;
use crate::types::ProjectDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Auto,
}

#[derive(Debug, Clone)]
pub struct ParsedProject {
    pub project: ProjectDocument,
    pub format: DocumentFormat,
}

pub fn parse_project_str(input: &str, format: DocumentFormat) -> Result<ParsedProject, ParseError> {
    match format {
        DocumentFormat::Json => Ok(ParsedProject {
            project: serde_json::from_str::<ProjectDocument>(input)?,
            format,
        }),
        DocumentFormat::Yaml => Ok(ParsedProject {
            project: serde_yaml::from_str::<ProjectDocument>(input)?,
            format,
        }),
        DocumentFormat::Auto => parse_project_auto(input),
    }
}

fn parse_project_auto(input: &str) -> Result<ParsedProject, ParseError> {
    // JSON always starts with `{` after trimming; YAML is a superset so try it second.
    if input.trim_start().starts_with('{') {
        return match serde_json::from_str::<ProjectDocument>(input) {
            Ok(project) => Ok(ParsedProject {
                project,
                format: DocumentFormat::Json,
            }),
            Err(e) => match serde_yaml::from_str::<ProjectDocument>(input) {
                Ok(project) => Ok(ParsedProject {
                    project,
                    format: DocumentFormat::Yaml,
                }),
                Err(_) => Err(ParseError::Json(e)),
            },
        };
    }

    match serde_yaml::from_str::<ProjectDocument>(input) {
        Ok(project) => Ok(ParsedProject {
            project,
            format: DocumentFormat::Yaml,
        }),
        Err(e) => Err(ParseError::Yaml(e)),
    }
}
