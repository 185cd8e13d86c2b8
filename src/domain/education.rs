use serde::{Deserialize, Serialize};

use super::common::blank_to_none;

/// Certificate attached to an education entry. Only the name survives
/// persistence; file contents are re-attached by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Certificate {
    pub name: String,
}

impl Certificate {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default)]
    pub school_name: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub field_of_study: String,
    #[serde(default)]
    pub start_year: String,
    #[serde(default)]
    pub end_year: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::common::de_optional_text"
    )]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certificates: Vec<Certificate>,
}

impl Education {
    pub fn new(
        school_name: impl Into<String>,
        degree: impl Into<String>,
        field_of_study: impl Into<String>,
        start_year: impl Into<String>,
        end_year: impl Into<String>,
    ) -> Self {
        Self {
            school_name: school_name.into(),
            degree: degree.into(),
            field_of_study: field_of_study.into(),
            start_year: start_year.into(),
            end_year: end_year.into(),
            grade: None,
            certificates: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EducationPatch {
    pub school_name: Option<String>,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub start_year: Option<String>,
    pub end_year: Option<String>,
    pub grade: Option<Option<String>>,
    pub certificates: Option<Vec<Certificate>>,
}

impl EducationPatch {
    pub fn apply(self, target: &mut Education) {
        if let Some(value) = self.school_name {
            target.school_name = value;
        }
        if let Some(value) = self.degree {
            target.degree = value;
        }
        if let Some(value) = self.field_of_study {
            target.field_of_study = value;
        }
        if let Some(value) = self.start_year {
            target.start_year = value;
        }
        if let Some(value) = self.end_year {
            target.end_year = value;
        }
        if let Some(value) = self.grade {
            target.grade = value.and_then(|v| blank_to_none(&v));
        }
        if let Some(value) = self.certificates {
            target.certificates = value;
        }
    }
}
