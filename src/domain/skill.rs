use serde::{Deserialize, Serialize};

/// Quick-pick suggestions offered next to the free-text skill input.
pub const PREDEFINED_SKILLS: &[&str] = &["React", "Node.js", "Python", "Docker", "TypeScript"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<u32>,
}

impl Skill {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            years_of_experience: None,
        }
    }

    pub fn with_years(mut self, years: u32) -> Self {
        self.years_of_experience = Some(years);
        self
    }

    /// Case-insensitive name comparison used for de-duplication.
    pub fn same_name(&self, other: &str) -> bool {
        self.name.trim().to_lowercase() == other.trim().to_lowercase()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillPatch {
    pub name: Option<String>,
    pub years_of_experience: Option<Option<u32>>,
}

impl SkillPatch {
    pub fn apply(self, target: &mut Skill) {
        if let Some(value) = self.name {
            target.name = value;
        }
        if let Some(value) = self.years_of_experience {
            target.years_of_experience = value;
        }
    }
}
