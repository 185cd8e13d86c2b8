use thiserror::Error;

use crate::{
    config::Config,
    domain::{FormData, Skill},
    store::FieldStore,
    summary::{build_summary, ApplicationSummary},
    validation::{self, EducationPolicy, ErrorTree, ValidationContext},
};

use super::Step;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("{step} has {count} validation error(s)")]
    ValidationFailed { step: Step, count: usize },
    #[error("step {0} is outside 1..=7")]
    StepOutOfRange(u8),
    #[error("{0} has not been reached yet")]
    StepNotReached(Step),
    #[error("{0} does not apply to this application")]
    StepNotApplicable(Step),
    #[error("already on the last step")]
    NoNextStep,
    #[error("skill name cannot be empty")]
    EmptySkill,
    #[error("skill `{0}` is already listed")]
    DuplicateSkill(String),
}

/// Drives navigation over a [`FieldStore`].
///
/// Forward moves are gated on the current step validating; backward moves
/// never validate. The education step is skipped in both directions while
/// the education policy says it does not apply.
pub struct WizardController {
    store: FieldStore,
    education_policy: EducationPolicy,
    skip_references: bool,
}

impl WizardController {
    pub fn new(store: FieldStore, config: &Config) -> Self {
        let skip_references = store.data().references.is_empty();
        Self {
            store,
            education_policy: config.education_policy,
            skip_references,
        }
    }

    pub fn store(&self) -> &FieldStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut FieldStore {
        &mut self.store
    }

    pub fn into_store(self) -> FieldStore {
        self.store
    }

    pub fn current_step(&self) -> Step {
        self.store.current_step()
    }

    pub fn skip_references(&self) -> bool {
        self.skip_references
    }

    pub fn context(&self) -> ValidationContext {
        ValidationContext::new(self.education_policy, self.skip_references)
    }

    pub fn education_applicable(&self) -> bool {
        self.education_policy.applies_to(self.store.data())
    }

    pub fn is_applicable(&self, step: Step) -> bool {
        step != Step::Education || self.education_applicable()
    }

    /// Validates `step` against current data without touching stored errors.
    pub fn check(&self, step: Step) -> Result<(), ErrorTree> {
        validation::validate(step, self.store.data(), &self.context())
    }

    /// Validates the current step and advances on success. On failure the
    /// errors are stored and the step is unchanged.
    pub fn next(&mut self) -> Result<Step, WizardError> {
        let current = self.current_step();
        let mut target = current.following().ok_or(WizardError::NoNextStep)?;
        self.gate(current)?;
        if !self.is_applicable(target) {
            tracing::debug!(skipped = target.number(), "skipping inapplicable step");
            target = target.following().ok_or(WizardError::NoNextStep)?;
        }
        self.store.set_current_step(target);
        tracing::debug!(from = current.number(), to = target.number(), "advanced");
        Ok(target)
    }

    /// Moves back one applicable step, staying put on the first step.
    pub fn previous(&mut self) -> Step {
        let current = self.current_step();
        let mut target = current.preceding().unwrap_or(Step::FIRST);
        if !self.is_applicable(target) {
            target = target.preceding().unwrap_or(Step::FIRST);
        }
        if target != current {
            self.store.set_current_step(target);
            tracing::debug!(from = current.number(), to = target.number(), "went back");
        }
        target
    }

    /// Jumps to a step already reached, as the summary's edit links do.
    ///
    /// Jumping forward also requires every applicable earlier step to still
    /// validate, so edits made after jumping back cannot be stepped over.
    /// Stored errors are left alone.
    pub fn go_to(&mut self, number: u8) -> Result<Step, WizardError> {
        let step = Step::from_number(number).ok_or(WizardError::StepOutOfRange(number))?;
        let current = self.current_step();
        if step != current && step > self.store.furthest_step() {
            return Err(WizardError::StepNotReached(step));
        }
        if !self.is_applicable(step) {
            return Err(WizardError::StepNotApplicable(step));
        }
        if step > current {
            let blocked = Step::ALL
                .into_iter()
                .take_while(|earlier| *earlier < step)
                .filter(|earlier| self.is_applicable(*earlier))
                .find(|earlier| self.check(*earlier).is_err());
            if let Some(blocked) = blocked {
                tracing::debug!(
                    target_step = step.number(),
                    blocked = blocked.number(),
                    "jump blocked by invalid earlier step"
                );
                return Err(WizardError::StepNotReached(step));
            }
        }
        self.store.set_current_step(step);
        Ok(step)
    }

    /// Validates the whole form. On success the data is handed back and the
    /// store is reset; on failure nothing but the error tree changes.
    pub fn submit(&mut self) -> Result<FormData, WizardError> {
        self.gate(Step::Submit)?;
        let submitted = self.store.data().clone();
        self.store.reset_form();
        self.skip_references = true;
        tracing::info!(
            experiences = submitted.experiences.len(),
            skills = submitted.skills.len(),
            "application submitted"
        );
        Ok(submitted)
    }

    /// Turning skipping on discards any references already entered.
    pub fn set_skip_references(&mut self, skip: bool) {
        self.skip_references = skip;
        if skip {
            let removed = self.store.clear_references();
            if removed > 0 {
                tracing::debug!(removed, "cleared references");
            }
        }
    }

    /// Adds a skill by name, returning its index.
    pub fn add_skill(&mut self, name: &str) -> Result<usize, WizardError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WizardError::EmptySkill);
        }
        if self.store.data().has_skill(name) {
            return Err(WizardError::DuplicateSkill(name.to_string()));
        }
        self.store.add_skill(Skill::new(name));
        Ok(self.store.data().skills.len() - 1)
    }

    pub fn summary(&self) -> ApplicationSummary {
        build_summary(
            self.store.data(),
            self.store.clock().today(),
            self.education_applicable(),
        )
    }

    fn gate(&mut self, step: Step) -> Result<(), WizardError> {
        match self.check(step) {
            Ok(()) => {
                self.store.clear_errors();
                Ok(())
            }
            Err(errors) => {
                let count = errors.count();
                tracing::debug!(step = step.number(), count, "validation blocked step");
                self.store.set_errors(errors);
                Err(WizardError::ValidationFailed { step, count })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        domain::{EducationLevel, PersonalInfoPatch, Reference},
        storage::MemoryStore,
        time::SystemClock,
    };

    fn controller() -> WizardController {
        let config = Config {
            throttle_ms: 0,
            ..Config::default()
        };
        let store = FieldStore::new(Box::new(MemoryStore::new()), Arc::new(SystemClock), &config);
        WizardController::new(store, &config)
    }

    #[test]
    fn next_on_last_step_is_an_error() {
        let mut wizard = controller();
        wizard.store_mut().set_current_step(Step::Submit);
        assert_eq!(wizard.next(), Err(WizardError::NoNextStep));
        assert!(wizard.store().errors().is_empty());
    }

    #[test]
    fn previous_skips_education_and_floors_at_first() {
        let mut wizard = controller();
        assert_eq!(wizard.previous(), Step::PersonalInfo);
        wizard.store_mut().set_current_step(Step::Skills);
        assert_eq!(wizard.previous(), Step::Experience);

        wizard.store_mut().set_current_step(Step::Skills);
        wizard.store_mut().update_personal_info(PersonalInfoPatch {
            education_level: Some(Some(EducationLevel::GraduateOrHigher)),
            ..Default::default()
        });
        assert_eq!(wizard.previous(), Step::Education);
    }

    #[test]
    fn go_to_respects_reach_and_applicability() {
        let mut wizard = controller();
        assert_eq!(wizard.go_to(0), Err(WizardError::StepOutOfRange(0)));
        assert_eq!(wizard.go_to(8), Err(WizardError::StepOutOfRange(8)));
        assert_eq!(wizard.go_to(4), Err(WizardError::StepNotReached(Step::Skills)));

        wizard.store_mut().set_current_step(Step::Summary);
        assert_eq!(wizard.go_to(3), Err(WizardError::StepNotApplicable(Step::Education)));
        assert_eq!(wizard.go_to(2), Ok(Step::Experience));
        // Nothing before the summary validates on an empty form.
        assert_eq!(wizard.go_to(6), Err(WizardError::StepNotReached(Step::Summary)));
        assert_eq!(wizard.current_step(), Step::Experience);
        assert!(wizard.store().errors().is_empty());
    }

    #[test]
    fn skipping_references_clears_them() {
        let mut wizard = controller();
        assert!(wizard.skip_references());
        wizard.store_mut().add_reference(Reference::new("A", "B", "C", "D"));
        wizard.store_mut().add_reference(Reference::new("E", "F", "G", "H"));
        wizard.set_skip_references(false);
        assert_eq!(wizard.store().data().references.len(), 2);
        wizard.set_skip_references(true);
        assert!(wizard.store().data().references.is_empty());
    }

    #[test]
    fn add_skill_trims_and_rejects_duplicates() {
        let mut wizard = controller();
        assert_eq!(wizard.add_skill("  Rust "), Ok(0));
        assert_eq!(wizard.store().data().skills[0].name, "Rust");
        assert_eq!(
            wizard.add_skill("rust"),
            Err(WizardError::DuplicateSkill("rust".into()))
        );
        assert_eq!(wizard.add_skill("   "), Err(WizardError::EmptySkill));
        assert_eq!(wizard.add_skill("Python"), Ok(1));
    }
}
