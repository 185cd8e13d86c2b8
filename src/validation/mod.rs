//! Per-step validation of the application form.
//!
//! [`validate`] is a pure function: it never touches the store, and calling it
//! twice on the same data yields the same result. Callers decide what to do
//! with the returned [`ErrorTree`].

pub mod errors;
pub mod rules;

use serde::{Deserialize, Serialize};

use crate::domain::FormData;
use crate::wizard::Step;

pub use errors::{
    EducationErrors, ErrorTree, ExperienceErrors, ListErrors, LocationErrors, PersonalInfoErrors,
    ReferenceErrors, SkillErrors,
};
use errors::collect_entries;
use rules::messages;

/// When the education step applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EducationPolicy {
    /// Education is collected only from applicants at "Graduate or higher".
    #[default]
    GraduateOnly,
    /// Education is collected from every applicant.
    Always,
}

impl EducationPolicy {
    pub fn applies_to(self, data: &FormData) -> bool {
        match self {
            EducationPolicy::Always => true,
            EducationPolicy::GraduateOnly => data.is_graduate(),
        }
    }
}

/// Caller-supplied switches that relax step requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationContext {
    pub education_policy: EducationPolicy,
    pub skip_references: bool,
}

impl ValidationContext {
    pub fn new(education_policy: EducationPolicy, skip_references: bool) -> Self {
        Self {
            education_policy,
            skip_references,
        }
    }
}

/// Validates the data owned by `step`.
pub fn validate(step: Step, data: &FormData, ctx: &ValidationContext) -> Result<(), ErrorTree> {
    let tree = match step {
        Step::PersonalInfo => personal_errors(data),
        Step::Experience => experience_errors(data),
        Step::Education => education_errors(data, ctx),
        Step::Skills => skill_errors(data),
        Step::References => reference_errors(data, ctx),
        Step::Summary => ErrorTree::default(),
        Step::Submit => whole_form_errors(data, ctx),
    };
    if tree.is_empty() {
        Ok(())
    } else {
        Err(tree)
    }
}

fn personal_errors(data: &FormData) -> ErrorTree {
    ErrorTree {
        personal_info: rules::check_personal_info(&data.personal_info),
        ..Default::default()
    }
}

fn experience_errors(data: &FormData) -> ErrorTree {
    let experiences = if data.experiences.is_empty() {
        Some(ListErrors::List(messages::EXPERIENCES_REQUIRED.into()))
    } else {
        collect_entries(&data.experiences, rules::check_experience)
    };
    ErrorTree {
        experiences,
        ..Default::default()
    }
}

fn education_errors(data: &FormData, ctx: &ValidationContext) -> ErrorTree {
    if !ctx.education_policy.applies_to(data) {
        return ErrorTree::default();
    }
    let education = if data.education.is_empty() {
        Some(ListErrors::List(messages::EDUCATION_REQUIRED.into()))
    } else {
        collect_entries(&data.education, rules::check_education)
    };
    ErrorTree {
        education,
        ..Default::default()
    }
}

fn skill_errors(data: &FormData) -> ErrorTree {
    let skills = if data.skills.is_empty() {
        Some(ListErrors::List(messages::SKILLS_REQUIRED.into()))
    } else {
        collect_entries(&data.skills, rules::check_skill)
    };
    ErrorTree {
        skills,
        ..Default::default()
    }
}

fn reference_errors(data: &FormData, ctx: &ValidationContext) -> ErrorTree {
    if ctx.skip_references {
        return ErrorTree::default();
    }
    let references = if data.references.is_empty() {
        Some(ListErrors::List(messages::REFERENCES_REQUIRED.into()))
    } else {
        collect_entries(&data.references, rules::check_reference)
    };
    ErrorTree {
        references,
        ..Default::default()
    }
}

fn whole_form_errors(data: &FormData, ctx: &ValidationContext) -> ErrorTree {
    let mut tree = personal_errors(data);
    tree.absorb(experience_errors(data));
    tree.absorb(education_errors(data, ctx));
    tree.absorb(skill_errors(data));
    tree.absorb(reference_errors(data, ctx));
    if !data.terms_agreed {
        tree.terms_agreed = Some(messages::TERMS_REQUIRED.into());
    }
    tree
}
