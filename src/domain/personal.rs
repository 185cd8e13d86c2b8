use serde::{Deserialize, Serialize};

use super::common::{blank_to_none, choice_traits, Choice};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    #[serde(rename = "Prefer not to say")]
    PreferNotToSay,
}

impl Choice for Gender {
    const ALL: &'static [Self] = &[
        Gender::Male,
        Gender::Female,
        Gender::Other,
        Gender::PreferNotToSay,
    ];

    fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
            Gender::PreferNotToSay => "Prefer not to say",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EducationLevel {
    #[default]
    #[serde(rename = "High School")]
    HighSchool,
    Undergraduate,
    #[serde(rename = "Graduate or higher")]
    GraduateOrHigher,
}

impl Choice for EducationLevel {
    const ALL: &'static [Self] = &[
        EducationLevel::HighSchool,
        EducationLevel::Undergraduate,
        EducationLevel::GraduateOrHigher,
    ];

    fn label(&self) -> &'static str {
        match self {
            EducationLevel::HighSchool => "High School",
            EducationLevel::Undergraduate => "Undergraduate",
            EducationLevel::GraduateOrHigher => "Graduate or higher",
        }
    }
}

choice_traits!(Gender);
choice_traits!(EducationLevel);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Location {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub city: String,
}

impl Location {
    pub fn new(country: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            city: city.into(),
        }
    }
}

/// Applicant identity and contact details collected on the first step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::common::de_optional_text"
    )]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub current_location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education_level: Option<EducationLevel>,
}

impl Default for PersonalInfo {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            phone_number: String::new(),
            date_of_birth: None,
            gender: Gender::default(),
            current_location: Location::default(),
            education_level: Some(EducationLevel::default()),
        }
    }
}

/// Shallow merge-patch for [`PersonalInfo`]. `current_location` replaces the
/// whole nested object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonalInfoPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<Option<String>>,
    pub gender: Option<Gender>,
    pub current_location: Option<Location>,
    pub education_level: Option<Option<EducationLevel>>,
}

impl PersonalInfoPatch {
    pub fn apply(self, target: &mut PersonalInfo) {
        if let Some(value) = self.full_name {
            target.full_name = value;
        }
        if let Some(value) = self.email {
            target.email = value;
        }
        if let Some(value) = self.phone_number {
            target.phone_number = value;
        }
        if let Some(value) = self.date_of_birth {
            target.date_of_birth = value.and_then(|v| blank_to_none(&v));
        }
        if let Some(value) = self.gender {
            target.gender = value;
        }
        if let Some(value) = self.current_location {
            target.current_location = value;
        }
        if let Some(value) = self.education_level {
            target.education_level = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fresh_form() {
        let info = PersonalInfo::default();
        assert_eq!(info.gender, Gender::PreferNotToSay);
        assert_eq!(info.education_level, Some(EducationLevel::HighSchool));
        assert!(info.date_of_birth.is_none());
    }

    #[test]
    fn location_patch_replaces_whole_object() {
        let mut info = PersonalInfo::default();
        info.current_location = Location::new("India", "Pune");
        PersonalInfoPatch {
            current_location: Some(Location::new("Japan", "")),
            ..Default::default()
        }
        .apply(&mut info);
        assert_eq!(info.current_location, Location::new("Japan", ""));
    }

    #[test]
    fn enum_labels_round_trip_through_json() {
        let json = serde_json::to_string(&EducationLevel::GraduateOrHigher).unwrap();
        assert_eq!(json, "\"Graduate or higher\"");
        assert_eq!(
            "prefer not to say".parse::<Gender>().unwrap(),
            Gender::PreferNotToSay
        );
    }
}
