use serde::{Deserialize, Serialize};

/// Errors for one list field: either a single list-level message (for
/// example a cardinality violation) or per-entry field errors aligned with
/// the list's indices. Never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListErrors<E> {
    List(String),
    Entries(Vec<Option<E>>),
}

impl<E> ListErrors<E> {
    pub fn message(&self) -> Option<&str> {
        match self {
            ListErrors::List(message) => Some(message),
            ListErrors::Entries(_) => None,
        }
    }

    pub fn entry(&self, index: usize) -> Option<&E> {
        match self {
            ListErrors::List(_) => None,
            ListErrors::Entries(entries) => entries.get(index).and_then(Option::as_ref),
        }
    }
}

/// Collects per-entry errors, returning `None` when every entry passed.
pub(crate) fn collect_entries<T, E>(
    items: &[T],
    mut check: impl FnMut(&T) -> Option<E>,
) -> Option<ListErrors<E>> {
    let entries: Vec<Option<E>> = items.iter().map(&mut check).collect();
    if entries.iter().all(Option::is_none) {
        None
    } else {
        Some(ListErrors::Entries(entries))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationErrors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl LocationErrors {
    pub fn is_empty(&self) -> bool {
        self.country.is_none() && self.city.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfoErrors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location: Option<LocationErrors>,
}

impl PersonalInfoErrors {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
            && self.date_of_birth.is_none()
            && self.current_location.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceErrors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsibilities: Option<String>,
}

impl ExperienceErrors {
    pub fn is_empty(&self) -> bool {
        self.job_title.is_none()
            && self.company_name.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.responsibilities.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationErrors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_year: Option<String>,
}

impl EducationErrors {
    pub fn is_empty(&self) -> bool {
        self.school_name.is_none()
            && self.degree.is_none()
            && self.field_of_study.is_none()
            && self.start_year.is_none()
            && self.end_year.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillErrors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceErrors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

impl ReferenceErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.relationship.is_none()
            && self.company.is_none()
            && self.contact.is_none()
    }
}

/// Validation messages shaped like the form data they describe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorTree {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_info: Option<PersonalInfoErrors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experiences: Option<ListErrors<ExperienceErrors>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<ListErrors<EducationErrors>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<ListErrors<SkillErrors>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<ListErrors<ReferenceErrors>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_agreed: Option<String>,
}

impl ErrorTree {
    pub fn is_empty(&self) -> bool {
        self.personal_info.is_none()
            && self.experiences.is_none()
            && self.education.is_none()
            && self.skills.is_none()
            && self.references.is_none()
            && self.terms_agreed.is_none()
    }

    /// Folds in errors from another tree; fields already set here win.
    pub fn absorb(&mut self, other: ErrorTree) {
        self.personal_info = self.personal_info.take().or(other.personal_info);
        self.experiences = self.experiences.take().or(other.experiences);
        self.education = self.education.take().or(other.education);
        self.skills = self.skills.take().or(other.skills);
        self.references = self.references.take().or(other.references);
        self.terms_agreed = self.terms_agreed.take().or(other.terms_agreed);
    }

    /// Number of individual messages in the tree.
    pub fn count(&self) -> usize {
        serde_json::to_value(self)
            .map(|value| count_leaves(&value))
            .unwrap_or(0)
    }
}

fn count_leaves(value: &serde_json::Value) -> usize {
    match value {
        serde_json::Value::String(_) => 1,
        serde_json::Value::Array(items) => items.iter().map(count_leaves).sum(),
        serde_json::Value::Object(map) => map.values().map(count_leaves).sum(),
        _ => 0,
    }
}
