use serde::{Deserialize, Serialize};

use super::{
    education::Education,
    experience::Experience,
    personal::{EducationLevel, PersonalInfo},
    reference::Reference,
    skill::Skill,
};

/// Everything the applicant enters, without navigation or error state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub references: Vec<Reference>,
    #[serde(default)]
    pub terms_agreed: bool,
}

impl FormData {
    pub fn is_graduate(&self) -> bool {
        self.personal_info.education_level == Some(EducationLevel::GraduateOrHigher)
    }

    pub fn has_skill(&self, name: &str) -> bool {
        self.skills.iter().any(|skill| skill.same_name(name))
    }
}
