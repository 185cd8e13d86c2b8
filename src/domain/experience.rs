use serde::{Deserialize, Serialize};

use super::common::{blank_to_none, choice_traits, Choice};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EmploymentType {
    #[default]
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Internship,
    Contract,
    Freelance,
}

impl Choice for EmploymentType {
    const ALL: &'static [Self] = &[
        EmploymentType::FullTime,
        EmploymentType::PartTime,
        EmploymentType::Internship,
        EmploymentType::Contract,
        EmploymentType::Freelance,
    ];

    fn label(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "Full-time",
            EmploymentType::PartTime => "Part-time",
            EmploymentType::Internship => "Internship",
            EmploymentType::Contract => "Contract",
            EmploymentType::Freelance => "Freelance",
        }
    }
}

choice_traits!(EmploymentType);

/// A single position in the applicant's work history.
///
/// `end_date` is expected unless `currently_working` is set; the validator
/// enforces that, the store does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub employment_type: EmploymentType,
    #[serde(default)]
    pub start_date: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::common::de_optional_text"
    )]
    pub end_date: Option<String>,
    #[serde(default)]
    pub currently_working: bool,
    #[serde(default)]
    pub responsibilities: String,
}

impl Experience {
    pub fn new(
        job_title: impl Into<String>,
        company_name: impl Into<String>,
        start_date: impl Into<String>,
    ) -> Self {
        Self {
            job_title: job_title.into(),
            company_name: company_name.into(),
            start_date: start_date.into(),
            ..Self::default()
        }
    }

    pub fn ending(mut self, end_date: impl Into<String>) -> Self {
        self.end_date = blank_to_none(&end_date.into());
        self.currently_working = false;
        self
    }

    pub fn ongoing(mut self) -> Self {
        self.end_date = None;
        self.currently_working = true;
        self
    }

    pub fn with_responsibilities(mut self, text: impl Into<String>) -> Self {
        self.responsibilities = text.into();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperiencePatch {
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub employment_type: Option<EmploymentType>,
    pub start_date: Option<String>,
    pub end_date: Option<Option<String>>,
    pub currently_working: Option<bool>,
    pub responsibilities: Option<String>,
}

impl ExperiencePatch {
    pub fn apply(self, target: &mut Experience) {
        if let Some(value) = self.job_title {
            target.job_title = value;
        }
        if let Some(value) = self.company_name {
            target.company_name = value;
        }
        if let Some(value) = self.employment_type {
            target.employment_type = value;
        }
        if let Some(value) = self.start_date {
            target.start_date = value;
        }
        if let Some(value) = self.end_date {
            target.end_date = value.and_then(|v| blank_to_none(&v));
        }
        if let Some(value) = self.currently_working {
            target.currently_working = value;
        }
        if let Some(value) = self.responsibilities {
            target.responsibilities = value;
        }
    }
}
