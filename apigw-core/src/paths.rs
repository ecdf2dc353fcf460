//! Resource path helpers.
//!
//! API Gateway resources form a tree rooted at `/`. Every helper here works on canonical
//! paths: a leading `/`, no trailing `/`, no empty segments.

pub const ROOT_PATH: &str = "/";

/// Canonicalize a user-supplied path: add the leading slash, drop trailing and repeated
/// slashes.
pub fn canonical_path(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim()
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    if segments.is_empty() {
        return ROOT_PATH.to_string();
    }
    format!("/{}", segments.join("/"))
}

pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Parent of a canonical path; `None` for the root.
pub fn parent_path(path: &str) -> Option<String> {
    if path == ROOT_PATH {
        return None;
    }
    match path.rfind('/') {
        Some(0) | None => Some(ROOT_PATH.to_string()),
        Some(idx) => Some(path[..idx].to_string()),
    }
}

/// Every non-root prefix of `path`, shortest first.
///
/// `/users/{id}` yields `/users` then `/users/{id}`.
pub fn prefixes(path: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for seg in segments(path) {
        current.push('/');
        current.push_str(seg);
        out.push(current.clone());
    }
    out
}

/// Last segment of a canonical path, i.e. the API Gateway `pathPart`.
pub fn path_part(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or_default()
}
