mod common;

use common::{
    graduate, valid_education, valid_experience, valid_personal_info, valid_reference, wizard,
    wizard_with,
};
use jobapp_core::{
    domain::{Experience, FormData},
    path::FieldPath,
    validation::{rules::messages, EducationPolicy, ListErrors},
    wizard::{Step, WizardController, WizardError},
};

fn advance_to(wizard: &mut WizardController, target: Step) {
    while wizard.current_step() < target {
        wizard
            .next()
            .unwrap_or_else(|err| panic!("blocked at {}: {err}", wizard.current_step()));
    }
}

fn fill_required(wizard: &mut WizardController) {
    let store = wizard.store_mut();
    store.update_personal_info(valid_personal_info());
    store.add_experience(valid_experience());
    wizard.add_skill("Rust").unwrap();
}

#[test]
fn blank_job_title_blocks_with_entry_level_error() {
    let (mut wizard, _, _) = wizard();
    wizard.store_mut().update_personal_info(valid_personal_info());
    advance_to(&mut wizard, Step::Experience);

    wizard
        .store_mut()
        .add_experience(Experience::new("", "Acme", "2020-01").ending("2021-01"));
    let err = wizard.next().unwrap_err();

    assert!(matches!(
        err,
        WizardError::ValidationFailed {
            step: Step::Experience,
            ..
        }
    ));
    assert_eq!(wizard.current_step(), Step::Experience);
    let path: FieldPath = "experiences[0].jobTitle".parse().unwrap();
    assert_eq!(
        wizard.store().error(&path),
        Some(messages::JOB_TITLE_REQUIRED)
    );
    assert_eq!(
        wizard.store().lookup("experiences[0].jobTitle").error.as_deref(),
        Some("Job title is required")
    );
    assert!(wizard.store().lookup("experiences").error.is_none());
}

#[test]
fn empty_experience_list_blocks_with_list_level_error() {
    let (mut wizard, _, _) = wizard();
    wizard.store_mut().update_personal_info(valid_personal_info());
    advance_to(&mut wizard, Step::Experience);

    assert!(wizard.next().is_err());
    assert_eq!(
        wizard.store().lookup("experiences").error.as_deref(),
        Some(messages::EXPERIENCES_REQUIRED)
    );
}

#[test]
fn non_graduate_skips_education_both_ways() {
    let (mut wizard, _, _) = wizard();
    fill_required(&mut wizard);
    advance_to(&mut wizard, Step::Experience);

    assert_eq!(wizard.next(), Ok(Step::Skills));
    assert!(wizard.store().errors().education.is_none());
    assert_eq!(wizard.previous(), Step::Experience);
}

#[test]
fn graduate_must_complete_education() {
    let (mut wizard, _, _) = wizard();
    fill_required(&mut wizard);
    wizard.store_mut().update_personal_info(graduate());
    advance_to(&mut wizard, Step::Experience);

    assert_eq!(wizard.next(), Ok(Step::Education));
    assert!(wizard.next().is_err());
    assert_eq!(
        wizard
            .store()
            .errors()
            .education
            .as_ref()
            .and_then(ListErrors::message),
        Some(messages::EDUCATION_REQUIRED)
    );

    wizard.store_mut().add_education(valid_education());
    assert_eq!(wizard.next(), Ok(Step::Skills));
    assert!(wizard.store().errors().is_empty());
}

#[test]
fn always_policy_never_skips_education() {
    let mut config = common::config(0);
    config.education_policy = EducationPolicy::Always;
    let (mut wizard, _, _) = wizard_with(config);
    fill_required(&mut wizard);
    advance_to(&mut wizard, Step::Experience);
    assert_eq!(wizard.next(), Ok(Step::Education));
}

#[test]
fn references_step_depends_on_skip_flag() {
    let (mut wizard, _, _) = wizard();
    fill_required(&mut wizard);
    advance_to(&mut wizard, Step::References);

    wizard.set_skip_references(false);
    assert!(wizard.next().is_err());
    assert_eq!(
        wizard.store().lookup("references").error.as_deref(),
        Some(messages::REFERENCES_REQUIRED)
    );

    wizard.set_skip_references(true);
    assert_eq!(wizard.next(), Ok(Step::Summary));
}

#[test]
fn skip_flag_starts_false_when_references_exist() {
    let (mut wizard, backend, clock) = wizard();
    wizard.store_mut().add_reference(valid_reference());
    drop(wizard);

    let config = common::config(0);
    let store = jobapp_core::store::FieldStore::open(
        Box::new(backend),
        std::sync::Arc::new(clock),
        &config,
    );
    let wizard = WizardController::new(store, &config);
    assert!(!wizard.skip_references());
}

#[test]
fn failed_validation_never_moves_the_step() {
    let (mut wizard, _, _) = wizard();
    for step in [Step::PersonalInfo, Step::Experience, Step::Skills, Step::References] {
        wizard.store_mut().set_current_step(step);
        wizard.set_skip_references(false);
        let before = wizard.current_step();
        assert!(wizard.next().is_err(), "{step} should not validate");
        assert_eq!(wizard.current_step(), before);
    }
}

#[test]
fn submit_without_terms_keeps_state() {
    let (mut wizard, backend, _) = wizard();
    fill_required(&mut wizard);
    advance_to(&mut wizard, Step::Submit);
    wizard.store_mut().set_terms_agreed(false);
    let before: FormData = wizard.store().data().clone();

    let err = wizard.submit().unwrap_err();
    assert!(matches!(
        err,
        WizardError::ValidationFailed {
            step: Step::Submit,
            ..
        }
    ));
    assert_eq!(
        wizard.store().errors().terms_agreed.as_deref(),
        Some(messages::TERMS_REQUIRED)
    );
    assert_eq!(wizard.store().data(), &before);
    assert_eq!(wizard.current_step(), Step::Submit);
    assert!(common::stored_snapshot(&backend).is_some());
}

#[test]
fn full_run_submits_and_resets() {
    let (mut wizard, backend, _) = wizard();
    fill_required(&mut wizard);
    wizard.store_mut().add_reference(valid_reference());
    wizard.set_skip_references(false);
    advance_to(&mut wizard, Step::Submit);
    wizard.store_mut().set_terms_agreed(true);

    let submitted = wizard.submit().unwrap();
    assert_eq!(submitted.personal_info.full_name, "Ada Lovelace");
    assert_eq!(submitted.references.len(), 1);

    assert_eq!(wizard.store().data(), &FormData::default());
    assert_eq!(wizard.current_step(), Step::PersonalInfo);
    assert!(wizard.store().errors().is_empty());
    assert!(common::stored_snapshot(&backend).is_none());
}

#[test]
fn summary_edit_links_jump_back_and_return() {
    let (mut wizard, _, _) = wizard();
    fill_required(&mut wizard);
    advance_to(&mut wizard, Step::Summary);

    let summary = wizard.summary();
    let skills = summary.section(Step::Skills).unwrap();
    assert_eq!(wizard.go_to(skills.edit_step.number()), Ok(Step::Skills));
    wizard.add_skill("SQL").unwrap();
    assert_eq!(wizard.go_to(6), Ok(Step::Summary));
    assert_eq!(wizard.go_to(7), Err(WizardError::StepNotReached(Step::Submit)));
    assert_eq!(
        wizard.go_to(3),
        Err(WizardError::StepNotApplicable(Step::Education))
    );
}

#[test]
fn jumping_forward_rechecks_edited_steps() {
    let (mut wizard, _, _) = wizard();
    fill_required(&mut wizard);
    advance_to(&mut wizard, Step::Summary);

    assert_eq!(wizard.go_to(2), Ok(Step::Experience));
    let removed = wizard.store_mut().remove_experience(0).unwrap();
    assert_eq!(
        wizard.go_to(6),
        Err(WizardError::StepNotReached(Step::Summary))
    );
    assert_eq!(wizard.current_step(), Step::Experience);

    wizard.store_mut().add_experience(removed);
    assert_eq!(wizard.go_to(6), Ok(Step::Summary));
}

#[test]
fn next_from_last_step_is_rejected() {
    let (mut wizard, _, _) = wizard();
    fill_required(&mut wizard);
    advance_to(&mut wizard, Step::Submit);
    assert_eq!(wizard.next(), Err(WizardError::NoNextStep));
}
