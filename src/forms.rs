//! Declarative field tables for each wizard step.
//!
//! A renderer walks [`FormDescriptor::rows`] to draw N similar inputs for an
//! entity without knowing its fields; writes go back through
//! [`crate::store::FieldStore::handle_change`] with the row's path.

use crate::{
    domain::{Choice, EducationLevel, EmploymentType, FormData, Gender},
    path::{
        EducationField, ExperienceField, FieldPath, FieldValue, PersonalField, ReferenceField,
        SkillField,
    },
    store::FieldStore,
    wizard::Step,
};

/// Supported input kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    LongText,
    Email,
    Phone,
    Date,
    Month,
    Year,
    Number,
    Boolean,
    Choice(Vec<&'static str>),
}

type HiddenPredicate = fn(&FormData, usize) -> bool;

/// Declarative description of a single form field.
#[derive(Clone)]
pub struct FieldDescriptor {
    pub path: fn(usize) -> FieldPath,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub help: Option<&'static str>,
    hidden: Option<HiddenPredicate>,
}

impl FieldDescriptor {
    pub fn new(path: fn(usize) -> FieldPath, kind: FieldKind) -> Self {
        Self {
            label: path(0).label(),
            path,
            kind,
            required: true,
            help: None,
            hidden: None,
        }
    }

    pub fn with_optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    pub fn hidden_when(mut self, predicate: HiddenPredicate) -> Self {
        self.hidden = Some(predicate);
        self
    }

    pub fn is_hidden(&self, data: &FormData, index: usize) -> bool {
        self.hidden.map_or(false, |predicate| predicate(data, index))
    }
}

/// One field ready to render: where it lives, what it holds, what is wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow {
    pub path: FieldPath,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub value: Option<FieldValue>,
    pub error: Option<String>,
}

#[derive(Clone)]
pub struct FormDescriptor {
    pub name: &'static str,
    pub step: Step,
    pub fields: Vec<FieldDescriptor>,
}

impl FormDescriptor {
    pub fn new(name: &'static str, step: Step, fields: Vec<FieldDescriptor>) -> Self {
        Self { name, step, fields }
    }

    /// Visible rows for entry `index` (ignored for personal info).
    pub fn rows(&self, store: &FieldStore, index: usize) -> Vec<FieldRow> {
        self.fields
            .iter()
            .filter(|field| !field.is_hidden(store.data(), index))
            .map(|field| {
                let path = (field.path)(index);
                FieldRow {
                    path,
                    label: field.label,
                    kind: field.kind.clone(),
                    required: field.required,
                    value: store.value(&path),
                    error: store.error(&path).map(str::to_string),
                }
            })
            .collect()
    }
}

fn currently_working(data: &FormData, index: usize) -> bool {
    data.experiences
        .get(index)
        .map_or(false, |experience| experience.currently_working)
}

pub fn personal_info_form() -> FormDescriptor {
    FormDescriptor::new(
        "personalInfo",
        Step::PersonalInfo,
        vec![
            FieldDescriptor::new(|_| FieldPath::Personal(PersonalField::FullName), FieldKind::Text),
            FieldDescriptor::new(|_| FieldPath::Personal(PersonalField::Email), FieldKind::Email),
            FieldDescriptor::new(
                |_| FieldPath::Personal(PersonalField::PhoneNumber),
                FieldKind::Phone,
            )
            .with_help("Include the country code, e.g. +91 1234567890"),
            FieldDescriptor::new(
                |_| FieldPath::Personal(PersonalField::DateOfBirth),
                FieldKind::Date,
            )
            .with_optional()
            .with_help("YYYY-MM-DD"),
            FieldDescriptor::new(
                |_| FieldPath::Personal(PersonalField::Gender),
                FieldKind::Choice(Gender::labels()),
            )
            .with_optional(),
            FieldDescriptor::new(|_| FieldPath::Personal(PersonalField::Country), FieldKind::Text),
            FieldDescriptor::new(|_| FieldPath::Personal(PersonalField::City), FieldKind::Text),
            FieldDescriptor::new(
                |_| FieldPath::Personal(PersonalField::EducationLevel),
                FieldKind::Choice(EducationLevel::labels()),
            )
            .with_optional()
            .with_help("Graduates are asked for their education history"),
        ],
    )
}

pub fn experience_form() -> FormDescriptor {
    FormDescriptor::new(
        "experiences",
        Step::Experience,
        vec![
            FieldDescriptor::new(
                |i| FieldPath::Experience(i, ExperienceField::JobTitle),
                FieldKind::Text,
            ),
            FieldDescriptor::new(
                |i| FieldPath::Experience(i, ExperienceField::CompanyName),
                FieldKind::Text,
            ),
            FieldDescriptor::new(
                |i| FieldPath::Experience(i, ExperienceField::EmploymentType),
                FieldKind::Choice(EmploymentType::labels()),
            ),
            FieldDescriptor::new(
                |i| FieldPath::Experience(i, ExperienceField::StartDate),
                FieldKind::Month,
            ),
            FieldDescriptor::new(
                |i| FieldPath::Experience(i, ExperienceField::EndDate),
                FieldKind::Month,
            )
            .hidden_when(currently_working),
            FieldDescriptor::new(
                |i| FieldPath::Experience(i, ExperienceField::CurrentlyWorking),
                FieldKind::Boolean,
            )
            .with_optional(),
            FieldDescriptor::new(
                |i| FieldPath::Experience(i, ExperienceField::Responsibilities),
                FieldKind::LongText,
            ),
        ],
    )
}

pub fn education_form() -> FormDescriptor {
    FormDescriptor::new(
        "education",
        Step::Education,
        vec![
            FieldDescriptor::new(
                |i| FieldPath::Education(i, EducationField::SchoolName),
                FieldKind::Text,
            ),
            FieldDescriptor::new(|i| FieldPath::Education(i, EducationField::Degree), FieldKind::Text),
            FieldDescriptor::new(
                |i| FieldPath::Education(i, EducationField::FieldOfStudy),
                FieldKind::Text,
            ),
            FieldDescriptor::new(
                |i| FieldPath::Education(i, EducationField::StartYear),
                FieldKind::Year,
            ),
            FieldDescriptor::new(|i| FieldPath::Education(i, EducationField::EndYear), FieldKind::Year),
            FieldDescriptor::new(|i| FieldPath::Education(i, EducationField::Grade), FieldKind::Text)
                .with_optional(),
        ],
    )
}

pub fn skill_form() -> FormDescriptor {
    FormDescriptor::new(
        "skills",
        Step::Skills,
        vec![
            FieldDescriptor::new(|i| FieldPath::Skill(i, SkillField::Name), FieldKind::Text),
            FieldDescriptor::new(
                |i| FieldPath::Skill(i, SkillField::YearsOfExperience),
                FieldKind::Number,
            )
            .with_optional(),
        ],
    )
}

pub fn reference_form() -> FormDescriptor {
    FormDescriptor::new(
        "references",
        Step::References,
        vec![
            FieldDescriptor::new(|i| FieldPath::Reference(i, ReferenceField::Name), FieldKind::Text),
            FieldDescriptor::new(
                |i| FieldPath::Reference(i, ReferenceField::Relationship),
                FieldKind::Text,
            ),
            FieldDescriptor::new(
                |i| FieldPath::Reference(i, ReferenceField::Company),
                FieldKind::Text,
            ),
            FieldDescriptor::new(
                |i| FieldPath::Reference(i, ReferenceField::Contact),
                FieldKind::Text,
            )
            .with_help("Email or phone number"),
        ],
    )
}

/// Field table for a data-entry step; summary and submit have none.
pub fn form_for(step: Step) -> Option<FormDescriptor> {
    match step {
        Step::PersonalInfo => Some(personal_info_form()),
        Step::Experience => Some(experience_form()),
        Step::Education => Some(education_form()),
        Step::Skills => Some(skill_form()),
        Step::References => Some(reference_form()),
        Step::Summary | Step::Submit => None,
    }
}
