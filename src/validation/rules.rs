//! Field-level rules for each entity. Every check returns `None` when the
//! entity is valid.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{Education, Experience, PersonalInfo, Reference, Skill};

use super::errors::{
    EducationErrors, ExperienceErrors, LocationErrors, PersonalInfoErrors, ReferenceErrors,
    SkillErrors,
};

pub mod messages {
    pub const NAME_REQUIRED: &str = "Name is required";
    pub const NAME_LETTERS: &str = "Name must contain only letters and spaces";
    pub const EMAIL_INVALID: &str = "Invalid email format";
    pub const PHONE_INVALID: &str = "Invalid phone number format (e.g., +91 1234567890)";
    pub const DATE_OF_BIRTH_INVALID: &str = "Invalid date of birth";
    pub const COUNTRY_REQUIRED: &str = "Country is required";
    pub const CITY_REQUIRED: &str = "City is required";

    pub const JOB_TITLE_REQUIRED: &str = "Job title is required";
    pub const COMPANY_NAME_REQUIRED: &str = "Company name is required";
    pub const START_DATE_REQUIRED: &str = "Start date is required";
    pub const END_DATE_REQUIRED: &str = "End date is required unless currently working";
    pub const RESPONSIBILITIES_REQUIRED: &str = "Responsibilities are required";

    pub const SCHOOL_NAME_REQUIRED: &str = "School name is required";
    pub const DEGREE_REQUIRED: &str = "Degree is required";
    pub const FIELD_OF_STUDY_REQUIRED: &str = "Field of study is required";
    pub const START_YEAR_REQUIRED: &str = "Start year is required";
    pub const END_YEAR_REQUIRED: &str = "End year is required";
    pub const START_YEAR_FORMAT: &str = "Start year must be a 4-digit year";
    pub const END_YEAR_FORMAT: &str = "End year must be a 4-digit year";
    pub const END_YEAR_BEFORE_START: &str = "End year must be on or after start year";

    pub const SKILL_NAME_REQUIRED: &str = "Skill name is required";

    pub const REFERENCE_NAME_REQUIRED: &str = "Name is required";
    pub const RELATIONSHIP_REQUIRED: &str = "Relationship is required";
    pub const COMPANY_REQUIRED: &str = "Company is required";
    pub const CONTACT_REQUIRED: &str = "Contact is required";

    pub const EXPERIENCES_REQUIRED: &str = "At least one experience is required";
    pub const EDUCATION_REQUIRED: &str = "At least one education entry is required";
    pub const SKILLS_REQUIRED: &str = "At least one skill is required";
    pub const REFERENCES_REQUIRED: &str = "At least one reference is required";
    pub const TERMS_REQUIRED: &str = "You must agree to the terms";
}

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("name pattern compiles"));
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[0-9]{1,3}[0-9]{9,15}$").expect("phone pattern compiles"));
static YEAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}$").expect("year pattern compiles"));

fn required(value: &str, message: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some(message.to_string())
    } else {
        None
    }
}

/// Strips the spaces and hyphens phone inputs insert for readability.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

pub fn is_valid_phone(raw: &str) -> bool {
    PHONE_PATTERN.is_match(&normalize_phone(raw))
}

pub fn is_valid_email(raw: &str) -> bool {
    EMAIL_PATTERN.is_match(raw.trim())
}

fn check_full_name(name: &str) -> Option<String> {
    if name.trim().is_empty() {
        Some(messages::NAME_REQUIRED.into())
    } else if !NAME_PATTERN.is_match(name) {
        Some(messages::NAME_LETTERS.into())
    } else {
        None
    }
}

fn check_year(value: &str, missing: &str, malformed: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some(missing.into())
    } else if !YEAR_PATTERN.is_match(value.trim()) {
        Some(malformed.into())
    } else {
        None
    }
}

fn parse_year(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}

pub fn check_personal_info(info: &PersonalInfo) -> Option<PersonalInfoErrors> {
    let location = LocationErrors {
        country: required(&info.current_location.country, messages::COUNTRY_REQUIRED),
        city: required(&info.current_location.city, messages::CITY_REQUIRED),
    };
    let date_of_birth = info.date_of_birth.as_deref().and_then(|dob| {
        chrono::NaiveDate::parse_from_str(dob.trim(), "%Y-%m-%d")
            .err()
            .map(|_| messages::DATE_OF_BIRTH_INVALID.to_string())
    });
    let errors = PersonalInfoErrors {
        full_name: check_full_name(&info.full_name),
        email: (!is_valid_email(&info.email)).then(|| messages::EMAIL_INVALID.into()),
        phone_number: (!is_valid_phone(&info.phone_number))
            .then(|| messages::PHONE_INVALID.into()),
        date_of_birth,
        current_location: (!location.is_empty()).then_some(location),
    };
    (!errors.is_empty()).then_some(errors)
}

pub fn check_experience(experience: &Experience) -> Option<ExperienceErrors> {
    let has_end_date = experience
        .end_date
        .as_deref()
        .map_or(false, |date| !date.trim().is_empty());
    let end_date = if experience.currently_working || has_end_date {
        None
    } else {
        Some(messages::END_DATE_REQUIRED.into())
    };
    let errors = ExperienceErrors {
        job_title: required(&experience.job_title, messages::JOB_TITLE_REQUIRED),
        company_name: required(&experience.company_name, messages::COMPANY_NAME_REQUIRED),
        start_date: required(&experience.start_date, messages::START_DATE_REQUIRED),
        end_date,
        responsibilities: required(
            &experience.responsibilities,
            messages::RESPONSIBILITIES_REQUIRED,
        ),
    };
    (!errors.is_empty()).then_some(errors)
}

pub fn check_education(education: &Education) -> Option<EducationErrors> {
    let mut start_year = check_year(
        &education.start_year,
        messages::START_YEAR_REQUIRED,
        messages::START_YEAR_FORMAT,
    );
    let mut end_year = check_year(
        &education.end_year,
        messages::END_YEAR_REQUIRED,
        messages::END_YEAR_FORMAT,
    );
    if start_year.is_none() && end_year.is_none() {
        match (parse_year(&education.start_year), parse_year(&education.end_year)) {
            (Some(start), Some(end)) if end < start => {
                end_year = Some(messages::END_YEAR_BEFORE_START.into());
            }
            (Some(_), Some(_)) => {}
            (None, _) => start_year = Some(messages::START_YEAR_FORMAT.into()),
            (_, None) => end_year = Some(messages::END_YEAR_FORMAT.into()),
        }
    }
    let errors = EducationErrors {
        school_name: required(&education.school_name, messages::SCHOOL_NAME_REQUIRED),
        degree: required(&education.degree, messages::DEGREE_REQUIRED),
        field_of_study: required(&education.field_of_study, messages::FIELD_OF_STUDY_REQUIRED),
        start_year,
        end_year,
    };
    (!errors.is_empty()).then_some(errors)
}

pub fn check_skill(skill: &Skill) -> Option<SkillErrors> {
    required(&skill.name, messages::SKILL_NAME_REQUIRED).map(|name| SkillErrors { name: Some(name) })
}

pub fn check_reference(reference: &Reference) -> Option<ReferenceErrors> {
    let errors = ReferenceErrors {
        name: required(&reference.name, messages::REFERENCE_NAME_REQUIRED),
        relationship: required(&reference.relationship, messages::RELATIONSHIP_REQUIRED),
        company: required(&reference.company, messages::COMPANY_REQUIRED),
        contact: required(&reference.contact, messages::CONTACT_REQUIRED),
    };
    (!errors.is_empty()).then_some(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_accepts_separators_and_country_code() {
        assert!(is_valid_phone("+91 1234567890"));
        assert!(is_valid_phone("+1-555-123-4567"));
        assert!(!is_valid_phone("1234567890"));
        assert!(!is_valid_phone("+91 12345"));
        assert!(!is_valid_phone("+٩١ ١٢٣٤٥٦٧٨٩٠"));
    }

    #[test]
    fn years_must_use_ascii_digits() {
        let education = Education::new("MIT", "BSc", "Physics", "٢٠٢٠", "2010");
        let errors = check_education(&education).unwrap();
        assert_eq!(errors.start_year.as_deref(), Some(messages::START_YEAR_FORMAT));

        let education = Education::new("MIT", "BSc", "Physics", "2020", "٢٠١٠");
        let errors = check_education(&education).unwrap();
        assert_eq!(errors.end_year.as_deref(), Some(messages::END_YEAR_FORMAT));
    }

    #[test]
    fn name_rejects_digits() {
        assert_eq!(check_full_name("R2 D2"), Some(messages::NAME_LETTERS.into()));
        assert_eq!(check_full_name("  "), Some(messages::NAME_REQUIRED.into()));
        assert_eq!(check_full_name("Ada Lovelace"), None);
    }

    #[test]
    fn end_year_before_start_attaches_to_end_year() {
        let education = Education::new("MIT", "BSc", "Physics", "2019", "2015");
        let errors = check_education(&education).unwrap();
        assert_eq!(errors.end_year.as_deref(), Some(messages::END_YEAR_BEFORE_START));
        assert!(errors.start_year.is_none());
    }

    #[test]
    fn malformed_year_is_reported_without_ordering_check() {
        let education = Education::new("MIT", "BSc", "Physics", "19", "2015");
        let errors = check_education(&education).unwrap();
        assert_eq!(errors.start_year.as_deref(), Some(messages::START_YEAR_FORMAT));
        assert!(errors.end_year.is_none());
    }

    #[test]
    fn end_date_optional_while_currently_working() {
        let experience = Experience::new("Engineer", "Acme", "2021-01")
            .ongoing()
            .with_responsibilities("Shipping");
        assert!(check_experience(&experience).is_none());

        let mut finished = experience.clone();
        finished.currently_working = false;
        let errors = check_experience(&finished).unwrap();
        assert_eq!(errors.end_date.as_deref(), Some(messages::END_DATE_REQUIRED));
    }

    #[test]
    fn blank_end_date_counts_as_missing() {
        let mut experience = Experience::new("Engineer", "Acme", "2021-01")
            .ending("2022-01")
            .with_responsibilities("Shipping");
        assert!(check_experience(&experience).is_none());

        experience.end_date = Some("  ".into());
        let errors = check_experience(&experience).unwrap();
        assert_eq!(errors.end_date.as_deref(), Some(messages::END_DATE_REQUIRED));
    }
}
