//! Path-addressed access into the form tree.
//!
//! Paths are dot-separated property names with bracketed array indices, e.g.
//! `experiences[0].jobTitle` or `personalInfo.currentLocation.country`.
//! [`resolve`] walks any JSON tree (form values or the parallel error tree);
//! [`FieldPath`] is the typed lens the store uses for writes.

pub mod lens;

use serde_json::Value;
use thiserror::Error;

pub use lens::{
    EducationField, ExperienceField, FieldError, FieldPath, FieldUpdate, FieldValue,
    PersonalField, ReferenceField, SkillField,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path is empty")]
    Empty,
    #[error("malformed path segment `{0}`")]
    MalformedSegment(String),
    #[error("`{0}` does not name a form field")]
    UnknownField(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Splits a path into property keys and array indices.
pub fn parse(path: &str) -> Result<Vec<PathSegment>, PathError> {
    if path.trim().is_empty() {
        return Err(PathError::Empty);
    }
    let mut segments = Vec::new();
    for part in path.split('.') {
        let (key, brackets) = match part.split_once('[') {
            Some((key, rest)) => (key, Some(rest)),
            None => (part, None),
        };
        if key.is_empty() {
            return Err(PathError::MalformedSegment(part.to_string()));
        }
        segments.push(PathSegment::Key(key.to_string()));
        if let Some(rest) = brackets {
            let inner = rest
                .strip_suffix(']')
                .ok_or_else(|| PathError::MalformedSegment(part.to_string()))?;
            for raw in inner.split("][") {
                let index = raw
                    .parse::<usize>()
                    .map_err(|_| PathError::MalformedSegment(part.to_string()))?;
                segments.push(PathSegment::Index(index));
            }
        }
    }
    Ok(segments)
}

/// Reads the value at `path`. Missing properties, out-of-range indices,
/// traversal through scalars, malformed paths and explicit nulls all yield
/// `None`.
pub fn resolve<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let segments = parse(path).ok()?;
    segments
        .iter()
        .try_fold(root, |current, segment| match segment {
            PathSegment::Key(key) => current.as_object()?.get(key),
            PathSegment::Index(index) => current.as_array()?.get(*index),
        })
        .filter(|value| !value.is_null())
}

/// Reads a string leaf, as used for error messages.
pub fn resolve_str<'a>(root: &'a Value, path: &str) -> Option<&'a str> {
    resolve(root, path).and_then(Value::as_str)
}
