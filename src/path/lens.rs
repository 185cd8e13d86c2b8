use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::domain::{
    ChoiceError, EducationLevel, EducationPatch, EmploymentType, ExperiencePatch, FormData,
    Gender, Location, PersonalInfoPatch, ReferencePatch, SkillPatch,
};
use crate::validation::ErrorTree;

use super::{parse, PathError, PathSegment};

/// Generic field payload exchanged with whatever renders the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Number(Option<u32>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(value) => f.write_str(value),
            FieldValue::Flag(true) => f.write_str("Yes"),
            FieldValue::Flag(false) => f.write_str("No"),
            FieldValue::Number(Some(value)) => write!(f, "{value}"),
            FieldValue::Number(None) => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("`{path}` expects a {expected} value")]
    TypeMismatch {
        path: String,
        expected: &'static str,
    },
    #[error("invalid value for `{path}`: {source}")]
    Choice {
        path: String,
        #[source]
        source: ChoiceError,
    },
    #[error("`{path}`: `{input}` is not a whole number")]
    NotANumber { path: String, input: String },
}

macro_rules! field_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => ($key:literal, $label:literal)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Path key relative to the owning entity.
            pub fn key(self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            pub fn from_key(key: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|field| field.key() == key)
            }
        }
    };
}

field_enum!(PersonalField {
    FullName => ("fullName", "Full Name"),
    Email => ("email", "Email"),
    PhoneNumber => ("phoneNumber", "Phone Number"),
    DateOfBirth => ("dateOfBirth", "Date of Birth"),
    Gender => ("gender", "Gender"),
    Country => ("currentLocation.country", "Country"),
    City => ("currentLocation.city", "City"),
    EducationLevel => ("educationLevel", "Education Level"),
});

field_enum!(ExperienceField {
    JobTitle => ("jobTitle", "Job Title"),
    CompanyName => ("companyName", "Company Name"),
    EmploymentType => ("employmentType", "Employment Type"),
    StartDate => ("startDate", "Start Date"),
    EndDate => ("endDate", "End Date"),
    CurrentlyWorking => ("currentlyWorking", "Currently Working"),
    Responsibilities => ("responsibilities", "Responsibilities"),
});

field_enum!(EducationField {
    SchoolName => ("schoolName", "School Name"),
    Degree => ("degree", "Degree"),
    FieldOfStudy => ("fieldOfStudy", "Field of Study"),
    StartYear => ("startYear", "Start Year"),
    EndYear => ("endYear", "End Year"),
    Grade => ("grade", "Grade"),
});

field_enum!(SkillField {
    Name => ("name", "Skill"),
    YearsOfExperience => ("yearsOfExperience", "Years of Experience"),
});

field_enum!(ReferenceField {
    Name => ("name", "Name"),
    Relationship => ("relationship", "Relationship"),
    Company => ("company", "Company"),
    Contact => ("contact", "Contact"),
});

/// Typed address of one editable leaf in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Personal(PersonalField),
    Experience(usize, ExperienceField),
    Education(usize, EducationField),
    Skill(usize, SkillField),
    Reference(usize, ReferenceField),
    TermsAgreed,
}

/// A typed store operation produced from a generic field write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Personal(PersonalInfoPatch),
    Experience(usize, ExperiencePatch),
    Education(usize, EducationPatch),
    Skill(usize, SkillPatch),
    Reference(usize, ReferencePatch),
    TermsAgreed(bool),
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Personal(field) => write!(f, "personalInfo.{}", field.key()),
            FieldPath::Experience(index, field) => {
                write!(f, "experiences[{index}].{}", field.key())
            }
            FieldPath::Education(index, field) => write!(f, "education[{index}].{}", field.key()),
            FieldPath::Skill(index, field) => write!(f, "skills[{index}].{}", field.key()),
            FieldPath::Reference(index, field) => {
                write!(f, "references[{index}].{}", field.key())
            }
            FieldPath::TermsAgreed => f.write_str("termsAgreed"),
        }
    }
}

fn join_keys(segments: &[PathSegment]) -> Option<String> {
    let keys: Option<Vec<&str>> = segments
        .iter()
        .map(|segment| match segment {
            PathSegment::Key(key) => Some(key.as_str()),
            PathSegment::Index(_) => None,
        })
        .collect();
    keys.map(|keys| keys.join("."))
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || PathError::UnknownField(s.to_string());
        let segments = parse(s)?;
        let (PathSegment::Key(root), rest) = segments.split_first().ok_or(PathError::Empty)? else {
            return Err(unknown());
        };
        match (root.as_str(), rest) {
            ("termsAgreed", []) => Ok(FieldPath::TermsAgreed),
            ("personalInfo", rest) => join_keys(rest)
                .and_then(|key| PersonalField::from_key(&key))
                .map(FieldPath::Personal)
                .ok_or_else(unknown),
            (list, [PathSegment::Index(index), rest @ ..]) => {
                let key = join_keys(rest).ok_or_else(unknown)?;
                let index = *index;
                match list {
                    "experiences" => ExperienceField::from_key(&key)
                        .map(|field| FieldPath::Experience(index, field)),
                    "education" => EducationField::from_key(&key)
                        .map(|field| FieldPath::Education(index, field)),
                    "skills" => {
                        SkillField::from_key(&key).map(|field| FieldPath::Skill(index, field))
                    }
                    "references" => ReferenceField::from_key(&key)
                        .map(|field| FieldPath::Reference(index, field)),
                    _ => None,
                }
                .ok_or_else(unknown)
            }
            _ => Err(unknown()),
        }
    }
}

fn optional_text(value: &Option<String>) -> FieldValue {
    FieldValue::Text(value.clone().unwrap_or_default())
}

impl FieldPath {
    pub fn label(&self) -> &'static str {
        match self {
            FieldPath::Personal(field) => field.label(),
            FieldPath::Experience(_, field) => field.label(),
            FieldPath::Education(_, field) => field.label(),
            FieldPath::Skill(_, field) => field.label(),
            FieldPath::Reference(_, field) => field.label(),
            FieldPath::TermsAgreed => "Terms & Conditions",
        }
    }

    /// List position addressed by the path, when it points into a list.
    pub fn index(&self) -> Option<usize> {
        match self {
            FieldPath::Experience(index, _)
            | FieldPath::Education(index, _)
            | FieldPath::Skill(index, _)
            | FieldPath::Reference(index, _) => Some(*index),
            FieldPath::Personal(_) | FieldPath::TermsAgreed => None,
        }
    }

    /// Current value at this path, or `None` when the index is out of range.
    pub fn read(&self, data: &FormData) -> Option<FieldValue> {
        let value = match *self {
            FieldPath::Personal(field) => {
                let info = &data.personal_info;
                match field {
                    PersonalField::FullName => FieldValue::text(&info.full_name),
                    PersonalField::Email => FieldValue::text(&info.email),
                    PersonalField::PhoneNumber => FieldValue::text(&info.phone_number),
                    PersonalField::DateOfBirth => optional_text(&info.date_of_birth),
                    PersonalField::Gender => FieldValue::text(info.gender.to_string()),
                    PersonalField::Country => FieldValue::text(&info.current_location.country),
                    PersonalField::City => FieldValue::text(&info.current_location.city),
                    PersonalField::EducationLevel => FieldValue::Text(
                        info.education_level
                            .map(|level| level.to_string())
                            .unwrap_or_default(),
                    ),
                }
            }
            FieldPath::Experience(index, field) => {
                let entry = data.experiences.get(index)?;
                match field {
                    ExperienceField::JobTitle => FieldValue::text(&entry.job_title),
                    ExperienceField::CompanyName => FieldValue::text(&entry.company_name),
                    ExperienceField::EmploymentType => {
                        FieldValue::text(entry.employment_type.to_string())
                    }
                    ExperienceField::StartDate => FieldValue::text(&entry.start_date),
                    ExperienceField::EndDate => optional_text(&entry.end_date),
                    ExperienceField::CurrentlyWorking => FieldValue::Flag(entry.currently_working),
                    ExperienceField::Responsibilities => FieldValue::text(&entry.responsibilities),
                }
            }
            FieldPath::Education(index, field) => {
                let entry = data.education.get(index)?;
                match field {
                    EducationField::SchoolName => FieldValue::text(&entry.school_name),
                    EducationField::Degree => FieldValue::text(&entry.degree),
                    EducationField::FieldOfStudy => FieldValue::text(&entry.field_of_study),
                    EducationField::StartYear => FieldValue::text(&entry.start_year),
                    EducationField::EndYear => FieldValue::text(&entry.end_year),
                    EducationField::Grade => optional_text(&entry.grade),
                }
            }
            FieldPath::Skill(index, field) => {
                let entry = data.skills.get(index)?;
                match field {
                    SkillField::Name => FieldValue::text(&entry.name),
                    SkillField::YearsOfExperience => FieldValue::Number(entry.years_of_experience),
                }
            }
            FieldPath::Reference(index, field) => {
                let entry = data.references.get(index)?;
                match field {
                    ReferenceField::Name => FieldValue::text(&entry.name),
                    ReferenceField::Relationship => FieldValue::text(&entry.relationship),
                    ReferenceField::Company => FieldValue::text(&entry.company),
                    ReferenceField::Contact => FieldValue::text(&entry.contact),
                }
            }
            FieldPath::TermsAgreed => FieldValue::Flag(data.terms_agreed),
        };
        Some(value)
    }

    /// Error message currently attached to this path.
    pub fn read_error<'a>(&self, errors: &'a ErrorTree) -> Option<&'a str> {
        match *self {
            FieldPath::Personal(field) => {
                let personal = errors.personal_info.as_ref()?;
                let location = personal.current_location.as_ref();
                match field {
                    PersonalField::FullName => personal.full_name.as_deref(),
                    PersonalField::Email => personal.email.as_deref(),
                    PersonalField::PhoneNumber => personal.phone_number.as_deref(),
                    PersonalField::DateOfBirth => personal.date_of_birth.as_deref(),
                    PersonalField::Country => location?.country.as_deref(),
                    PersonalField::City => location?.city.as_deref(),
                    PersonalField::Gender | PersonalField::EducationLevel => None,
                }
            }
            FieldPath::Experience(index, field) => {
                let entry = errors.experiences.as_ref()?.entry(index)?;
                match field {
                    ExperienceField::JobTitle => entry.job_title.as_deref(),
                    ExperienceField::CompanyName => entry.company_name.as_deref(),
                    ExperienceField::StartDate => entry.start_date.as_deref(),
                    ExperienceField::EndDate => entry.end_date.as_deref(),
                    ExperienceField::Responsibilities => entry.responsibilities.as_deref(),
                    ExperienceField::EmploymentType | ExperienceField::CurrentlyWorking => None,
                }
            }
            FieldPath::Education(index, field) => {
                let entry = errors.education.as_ref()?.entry(index)?;
                match field {
                    EducationField::SchoolName => entry.school_name.as_deref(),
                    EducationField::Degree => entry.degree.as_deref(),
                    EducationField::FieldOfStudy => entry.field_of_study.as_deref(),
                    EducationField::StartYear => entry.start_year.as_deref(),
                    EducationField::EndYear => entry.end_year.as_deref(),
                    EducationField::Grade => None,
                }
            }
            FieldPath::Skill(index, field) => {
                let entry = errors.skills.as_ref()?.entry(index)?;
                match field {
                    SkillField::Name => entry.name.as_deref(),
                    SkillField::YearsOfExperience => None,
                }
            }
            FieldPath::Reference(index, field) => {
                let entry = errors.references.as_ref()?.entry(index)?;
                match field {
                    ReferenceField::Name => entry.name.as_deref(),
                    ReferenceField::Relationship => entry.relationship.as_deref(),
                    ReferenceField::Company => entry.company.as_deref(),
                    ReferenceField::Contact => entry.contact.as_deref(),
                }
            }
            FieldPath::TermsAgreed => errors.terms_agreed.as_deref(),
        }
    }

    /// Converts a generic write into the typed store operation it stands for.
    /// `data` supplies sibling values for nested objects that are replaced
    /// wholesale.
    pub fn to_update(&self, data: &FormData, value: FieldValue) -> Result<FieldUpdate, FieldError> {
        let update = match *self {
            FieldPath::Personal(field) => {
                let mut patch = PersonalInfoPatch::default();
                match field {
                    PersonalField::FullName => patch.full_name = Some(self.expect_text(value)?),
                    PersonalField::Email => patch.email = Some(self.expect_text(value)?),
                    PersonalField::PhoneNumber => {
                        patch.phone_number = Some(self.expect_text(value)?)
                    }
                    PersonalField::DateOfBirth => {
                        patch.date_of_birth = Some(Some(self.expect_text(value)?))
                    }
                    PersonalField::Gender => {
                        patch.gender = Some(self.expect_choice::<Gender>(value)?)
                    }
                    PersonalField::Country => {
                        let current = &data.personal_info.current_location;
                        patch.current_location =
                            Some(Location::new(self.expect_text(value)?, current.city.clone()));
                    }
                    PersonalField::City => {
                        let current = &data.personal_info.current_location;
                        patch.current_location =
                            Some(Location::new(current.country.clone(), self.expect_text(value)?));
                    }
                    PersonalField::EducationLevel => {
                        let raw = self.expect_text(value)?;
                        patch.education_level = Some(if raw.trim().is_empty() {
                            None
                        } else {
                            Some(self.parse_choice::<EducationLevel>(&raw)?)
                        });
                    }
                }
                FieldUpdate::Personal(patch)
            }
            FieldPath::Experience(index, field) => {
                let mut patch = ExperiencePatch::default();
                match field {
                    ExperienceField::JobTitle => patch.job_title = Some(self.expect_text(value)?),
                    ExperienceField::CompanyName => {
                        patch.company_name = Some(self.expect_text(value)?)
                    }
                    ExperienceField::EmploymentType => {
                        patch.employment_type = Some(self.expect_choice::<EmploymentType>(value)?)
                    }
                    ExperienceField::StartDate => patch.start_date = Some(self.expect_text(value)?),
                    ExperienceField::EndDate => {
                        patch.end_date = Some(Some(self.expect_text(value)?))
                    }
                    ExperienceField::CurrentlyWorking => {
                        patch.currently_working = Some(self.expect_flag(value)?)
                    }
                    ExperienceField::Responsibilities => {
                        patch.responsibilities = Some(self.expect_text(value)?)
                    }
                }
                FieldUpdate::Experience(index, patch)
            }
            FieldPath::Education(index, field) => {
                let mut patch = EducationPatch::default();
                let text = self.expect_text(value)?;
                match field {
                    EducationField::SchoolName => patch.school_name = Some(text),
                    EducationField::Degree => patch.degree = Some(text),
                    EducationField::FieldOfStudy => patch.field_of_study = Some(text),
                    EducationField::StartYear => patch.start_year = Some(text),
                    EducationField::EndYear => patch.end_year = Some(text),
                    EducationField::Grade => patch.grade = Some(Some(text)),
                }
                FieldUpdate::Education(index, patch)
            }
            FieldPath::Skill(index, field) => {
                let mut patch = SkillPatch::default();
                match field {
                    SkillField::Name => patch.name = Some(self.expect_text(value)?),
                    SkillField::YearsOfExperience => {
                        patch.years_of_experience = Some(self.expect_number(value)?)
                    }
                }
                FieldUpdate::Skill(index, patch)
            }
            FieldPath::Reference(index, field) => {
                let mut patch = ReferencePatch::default();
                let text = self.expect_text(value)?;
                match field {
                    ReferenceField::Name => patch.name = Some(text),
                    ReferenceField::Relationship => patch.relationship = Some(text),
                    ReferenceField::Company => patch.company = Some(text),
                    ReferenceField::Contact => patch.contact = Some(text),
                }
                FieldUpdate::Reference(index, patch)
            }
            FieldPath::TermsAgreed => FieldUpdate::TermsAgreed(self.expect_flag(value)?),
        };
        Ok(update)
    }

    fn mismatch(&self, expected: &'static str) -> FieldError {
        FieldError::TypeMismatch {
            path: self.to_string(),
            expected,
        }
    }

    fn expect_text(&self, value: FieldValue) -> Result<String, FieldError> {
        match value {
            FieldValue::Text(text) => Ok(text),
            _ => Err(self.mismatch("text")),
        }
    }

    fn expect_flag(&self, value: FieldValue) -> Result<bool, FieldError> {
        match value {
            FieldValue::Flag(flag) => Ok(flag),
            _ => Err(self.mismatch("yes/no")),
        }
    }

    fn expect_number(&self, value: FieldValue) -> Result<Option<u32>, FieldError> {
        match value {
            FieldValue::Number(number) => Ok(number),
            FieldValue::Text(text) if text.trim().is_empty() => Ok(None),
            FieldValue::Text(text) => {
                text.trim()
                    .parse::<u32>()
                    .map(Some)
                    .map_err(|_| FieldError::NotANumber {
                        path: self.to_string(),
                        input: text,
                    })
            }
            FieldValue::Flag(_) => Err(self.mismatch("number")),
        }
    }

    fn expect_choice<T>(&self, value: FieldValue) -> Result<T, FieldError>
    where
        T: FromStr<Err = ChoiceError>,
    {
        let raw = self.expect_text(value)?;
        self.parse_choice(&raw)
    }

    fn parse_choice<T>(&self, raw: &str) -> Result<T, FieldError>
    where
        T: FromStr<Err = ChoiceError>,
    {
        raw.parse::<T>().map_err(|source| FieldError::Choice {
            path: self.to_string(),
            source,
        })
    }
}
