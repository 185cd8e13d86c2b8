use std::fmt;

use serde::{Deserialize, Serialize};

/// One stage of the application wizard, numbered 1 through 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Step {
    PersonalInfo = 1,
    Experience = 2,
    Education = 3,
    Skills = 4,
    References = 5,
    Summary = 6,
    Submit = 7,
}

impl Step {
    pub const ALL: [Step; 7] = [
        Step::PersonalInfo,
        Step::Experience,
        Step::Education,
        Step::Skills,
        Step::References,
        Step::Summary,
        Step::Submit,
    ];

    pub const FIRST: Step = Step::PersonalInfo;
    pub const LAST: Step = Step::Submit;

    pub fn from_number(number: u8) -> Option<Step> {
        Self::ALL.get(usize::from(number).checked_sub(1)?).copied()
    }

    pub fn number(self) -> u8 {
        self as u8
    }

    /// The following step in raw numeric order, ignoring applicability.
    pub fn following(self) -> Option<Step> {
        Step::from_number(self.number() + 1)
    }

    /// The preceding step in raw numeric order, ignoring applicability.
    pub fn preceding(self) -> Option<Step> {
        Step::from_number(self.number().checked_sub(1)?)
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::PersonalInfo => "Personal Information",
            Step::Experience => "Work Experience",
            Step::Education => "Education",
            Step::Skills => "Skills",
            Step::References => "References",
            Step::Summary => "Summary",
            Step::Submit => "Submit",
        }
    }
}

impl Default for Step {
    fn default() -> Self {
        Step::FIRST
    }
}

impl From<Step> for u8 {
    fn from(step: Step) -> Self {
        step.number()
    }
}

impl TryFrom<u8> for Step {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Step::from_number(value).ok_or_else(|| format!("step {value} is outside 1..=7"))
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} of {}: {}", self.number(), Step::LAST.number(), self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbering_is_one_based() {
        assert_eq!(Step::from_number(0), None);
        assert_eq!(Step::from_number(1), Some(Step::PersonalInfo));
        assert_eq!(Step::from_number(7), Some(Step::Submit));
        assert_eq!(Step::from_number(8), None);
        assert_eq!(Step::Submit.following(), None);
        assert_eq!(Step::PersonalInfo.preceding(), None);
    }

    #[test]
    fn serializes_as_plain_number() {
        assert_eq!(serde_json::to_string(&Step::Skills).unwrap(), "4");
        assert!(serde_json::from_str::<Step>("9").is_err());
        assert_eq!(serde_json::from_str::<Step>("3").unwrap(), Step::Education);
    }
}
