//! The single owner of form data, navigation state and validation errors.
//!
//! Every data mutation schedules a snapshot write through a
//! [`ThrottledWriter`]; storage failures are logged and never surfaced, since
//! in-memory state stays authoritative.

pub mod throttle;

use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::{
    config::Config,
    domain::{
        Education, EducationPatch, Experience, ExperiencePatch, FormData, PersonalInfoPatch,
        Reference, ReferencePatch, Skill, SkillPatch,
    },
    path::{self, FieldError, FieldPath, FieldUpdate, FieldValue},
    storage::{
        snapshot::{self, LoadOutcome, Snapshot},
        KeyValueStore, LEGACY_KEY,
    },
    time::Clock,
    validation::ErrorTree,
    wizard::Step,
};

pub use throttle::ThrottledWriter;

/// Value and error found at one generic path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldView {
    pub value: Option<Value>,
    pub error: Option<String>,
}

pub struct FieldStore {
    data: FormData,
    current_step: Step,
    furthest_step: Step,
    errors: ErrorTree,
    session_id: Uuid,
    key: String,
    persist_navigation: bool,
    writer: ThrottledWriter,
    backend: Box<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

fn patch_entry<T, P>(
    list: &mut [T],
    index: usize,
    patch: P,
    apply: impl FnOnce(P, &mut T),
    entity: &str,
) -> bool {
    match list.get_mut(index) {
        Some(entry) => {
            apply(patch, entry);
            true
        }
        None => {
            tracing::warn!(entity, index, len = list.len(), "update ignored: index out of range");
            false
        }
    }
}

fn remove_entry<T>(list: &mut Vec<T>, index: usize, entity: &str) -> Option<T> {
    if index < list.len() {
        Some(list.remove(index))
    } else {
        tracing::warn!(entity, index, len = list.len(), "remove ignored: index out of range");
        None
    }
}

impl FieldStore {
    /// Creates a store holding a fresh form. Nothing is read from `backend`.
    pub fn new(backend: Box<dyn KeyValueStore>, clock: Arc<dyn Clock>, config: &Config) -> Self {
        Self {
            data: FormData::default(),
            current_step: Step::FIRST,
            furthest_step: Step::FIRST,
            errors: ErrorTree::default(),
            session_id: Uuid::new_v4(),
            key: config.storage_key.clone(),
            persist_navigation: config.persist_navigation,
            writer: ThrottledWriter::new(config.throttle()),
            backend,
            clock,
        }
    }

    /// Creates a store seeded from whatever `backend` holds.
    pub fn open(backend: Box<dyn KeyValueStore>, clock: Arc<dyn Clock>, config: &Config) -> Self {
        let mut store = Self::new(backend, clock, config);
        store.load();
        store
    }

    /// Replaces in-memory state with the persisted snapshot. Unusable or
    /// missing snapshots leave the defaults in place.
    pub fn load(&mut self) -> LoadOutcome {
        let outcome = snapshot::read(self.backend.as_ref(), &self.key);
        match &outcome {
            LoadOutcome::Restored(snapshot) => {
                self.data = snapshot.form_data.clone();
                self.current_step = snapshot.current_step;
                self.furthest_step = snapshot.furthest_step;
                self.session_id = snapshot.session_id;
                tracing::debug!(step = snapshot.current_step.number(), "restored saved form");
            }
            LoadOutcome::Legacy(data) => {
                self.data = data.clone();
                self.current_step = Step::FIRST;
                self.furthest_step = Step::FIRST;
            }
            LoadOutcome::Missing | LoadOutcome::Rejected(_) => {
                self.data = FormData::default();
                self.current_step = Step::FIRST;
                self.furthest_step = Step::FIRST;
            }
        }
        self.errors = ErrorTree::default();
        self.writer.cancel();
        outcome
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn current_step(&self) -> Step {
        self.current_step
    }

    /// Highest step reached in this session.
    pub fn furthest_step(&self) -> Step {
        self.furthest_step
    }

    pub fn errors(&self) -> &ErrorTree {
        &self.errors
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn has_pending_write(&self) -> bool {
        self.writer.has_pending()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.session_id,
            self.clock.now(),
            self.data.clone(),
            self.current_step,
            self.furthest_step,
        )
    }

    // Personal info

    pub fn update_personal_info(&mut self, patch: PersonalInfoPatch) {
        patch.apply(&mut self.data.personal_info);
        self.changed();
    }

    // Experiences

    pub fn add_experience(&mut self, experience: Experience) {
        self.data.experiences.push(experience);
        self.changed();
    }

    pub fn update_experience(&mut self, index: usize, patch: ExperiencePatch) -> bool {
        let updated = patch_entry(
            &mut self.data.experiences,
            index,
            patch,
            ExperiencePatch::apply,
            "experience",
        );
        self.changed_if(updated)
    }

    pub fn remove_experience(&mut self, index: usize) -> Option<Experience> {
        let removed = remove_entry(&mut self.data.experiences, index, "experience");
        self.changed_if(removed.is_some());
        removed
    }

    // Education

    pub fn add_education(&mut self, education: Education) {
        self.data.education.push(education);
        self.changed();
    }

    pub fn update_education(&mut self, index: usize, patch: EducationPatch) -> bool {
        let updated = patch_entry(
            &mut self.data.education,
            index,
            patch,
            EducationPatch::apply,
            "education",
        );
        self.changed_if(updated)
    }

    pub fn remove_education(&mut self, index: usize) -> Option<Education> {
        let removed = remove_entry(&mut self.data.education, index, "education");
        self.changed_if(removed.is_some());
        removed
    }

    // Skills

    pub fn add_skill(&mut self, skill: Skill) {
        self.data.skills.push(skill);
        self.changed();
    }

    pub fn update_skill(&mut self, index: usize, patch: SkillPatch) -> bool {
        let updated = patch_entry(&mut self.data.skills, index, patch, SkillPatch::apply, "skill");
        self.changed_if(updated)
    }

    pub fn remove_skill(&mut self, index: usize) -> Option<Skill> {
        let removed = remove_entry(&mut self.data.skills, index, "skill");
        self.changed_if(removed.is_some());
        removed
    }

    // References

    pub fn add_reference(&mut self, reference: Reference) {
        self.data.references.push(reference);
        self.changed();
    }

    pub fn update_reference(&mut self, index: usize, patch: ReferencePatch) -> bool {
        let updated = patch_entry(
            &mut self.data.references,
            index,
            patch,
            ReferencePatch::apply,
            "reference",
        );
        self.changed_if(updated)
    }

    pub fn remove_reference(&mut self, index: usize) -> Option<Reference> {
        let removed = remove_entry(&mut self.data.references, index, "reference");
        self.changed_if(removed.is_some());
        removed
    }

    /// Removes every reference, front to back. Returns how many were removed.
    pub fn clear_references(&mut self) -> usize {
        let mut removed = 0;
        while self.remove_reference(0).is_some() {
            removed += 1;
        }
        removed
    }

    // Flags, navigation and errors

    pub fn set_terms_agreed(&mut self, agreed: bool) {
        self.data.terms_agreed = agreed;
        self.changed();
    }

    pub fn set_current_step(&mut self, step: Step) {
        self.current_step = step;
        self.furthest_step = self.furthest_step.max(step);
        tracing::debug!(step = step.number(), "current step changed");
        if self.persist_navigation {
            self.changed();
        }
    }

    /// Replaces the error tree wholesale. Errors are never persisted.
    pub fn set_errors(&mut self, errors: ErrorTree) {
        self.errors = errors;
    }

    pub fn clear_errors(&mut self) {
        self.errors = ErrorTree::default();
    }

    // Generic field access

    /// Routes a generic field write to the matching typed operation.
    /// Returns `Ok(false)` when the path points past the end of a list.
    pub fn handle_change(&mut self, path: &FieldPath, value: FieldValue) -> Result<bool, FieldError> {
        let update = path.to_update(&self.data, value)?;
        Ok(self.apply(update))
    }

    pub fn apply(&mut self, update: FieldUpdate) -> bool {
        match update {
            FieldUpdate::Personal(patch) => {
                self.update_personal_info(patch);
                true
            }
            FieldUpdate::Experience(index, patch) => self.update_experience(index, patch),
            FieldUpdate::Education(index, patch) => self.update_education(index, patch),
            FieldUpdate::Skill(index, patch) => self.update_skill(index, patch),
            FieldUpdate::Reference(index, patch) => self.update_reference(index, patch),
            FieldUpdate::TermsAgreed(agreed) => {
                self.set_terms_agreed(agreed);
                true
            }
        }
    }

    pub fn value(&self, path: &FieldPath) -> Option<FieldValue> {
        path.read(&self.data)
    }

    pub fn error(&self, path: &FieldPath) -> Option<&str> {
        path.read_error(&self.errors)
    }

    /// Reads value and error for any path string, including ones that name
    /// whole objects or lists.
    pub fn lookup(&self, raw: &str) -> FieldView {
        let data = serde_json::to_value(&self.data).unwrap_or(Value::Null);
        let errors = serde_json::to_value(&self.errors).unwrap_or(Value::Null);
        FieldView {
            value: path::resolve(&data, raw).cloned(),
            error: path::resolve_str(&errors, raw).map(str::to_string),
        }
    }

    // Lifecycle

    /// Restores defaults and clears persisted state, in memory and storage.
    pub fn reset_form(&mut self) {
        self.data = FormData::default();
        self.current_step = Step::FIRST;
        self.furthest_step = Step::FIRST;
        self.errors = ErrorTree::default();
        self.session_id = Uuid::new_v4();
        self.writer.cancel();

        // A default snapshot under the main key shadows anything left behind.
        let mut overwrite = false;
        if let Err(err) = self.backend.remove(&self.key) {
            tracing::warn!(key = %self.key, error = %err, "failed to remove snapshot; overwriting");
            overwrite = true;
        }
        if let Err(err) = self.backend.remove(LEGACY_KEY) {
            tracing::warn!(key = LEGACY_KEY, error = %err, "failed to remove legacy form data; overwriting");
            overwrite = true;
        }
        if overwrite {
            self.write_snapshot();
        }
        tracing::info!("form reset");
    }

    /// Writes a held snapshot once its throttle interval has passed.
    pub fn poll(&mut self) -> bool {
        if self.writer.poll(self.clock.now()) {
            self.write_snapshot();
            true
        } else {
            false
        }
    }

    /// Writes a held snapshot immediately.
    pub fn flush(&mut self) -> bool {
        if self.writer.take_pending(self.clock.now()) {
            self.write_snapshot();
            true
        } else {
            false
        }
    }

    fn changed(&mut self) {
        if self.writer.schedule(self.clock.now()) {
            self.write_snapshot();
        }
    }

    fn changed_if(&mut self, changed: bool) -> bool {
        if changed {
            self.changed();
        }
        changed
    }

    fn write_snapshot(&self) {
        let result = self
            .snapshot()
            .to_json()
            .and_then(|json| self.backend.set(&self.key, &json));
        match result {
            Ok(()) => tracing::debug!(key = %self.key, "snapshot written"),
            Err(err) => tracing::warn!(key = %self.key, error = %err, "failed to persist snapshot"),
        }
    }
}

impl Drop for FieldStore {
    fn drop(&mut self) {
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::Location,
        path::{ExperienceField, PersonalField},
        storage::MemoryStore,
        time::ManualClock,
    };
    use chrono::{Duration, TimeZone, Utc};

    fn store_with(throttle_ms: u64) -> (FieldStore, MemoryStore, ManualClock) {
        let backend = MemoryStore::new();
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap());
        let config = Config {
            throttle_ms,
            ..Config::default()
        };
        let store = FieldStore::new(Box::new(backend.clone()), Arc::new(clock.clone()), &config);
        (store, backend, clock)
    }

    fn saved(backend: &MemoryStore) -> Option<Snapshot> {
        let raw = backend.get("jobApplicationForm").unwrap()?;
        Snapshot::from_json(&raw).ok()
    }

    #[test]
    fn out_of_range_update_is_a_no_op() {
        let (mut store, backend, _) = store_with(0);
        let updated = store.update_experience(
            3,
            ExperiencePatch {
                job_title: Some("Ghost".into()),
                ..Default::default()
            },
        );
        assert!(!updated);
        assert!(store.data().experiences.is_empty());
        assert!(backend.is_empty());
        assert_eq!(store.remove_skill(0), None);
    }

    #[test]
    fn handle_change_routes_to_typed_update() {
        let (mut store, _, _) = store_with(0);
        store.add_experience(Experience::new("", "Acme", "2022-01"));
        let path = FieldPath::Experience(0, ExperienceField::JobTitle);
        assert!(store.handle_change(&path, FieldValue::text("Engineer")).unwrap());
        assert_eq!(store.data().experiences[0].job_title, "Engineer");

        let missing = FieldPath::Experience(4, ExperienceField::JobTitle);
        assert!(!store.handle_change(&missing, FieldValue::text("x")).unwrap());
    }

    #[test]
    fn lookup_reads_values_and_errors_by_string() {
        let (mut store, _, _) = store_with(0);
        store.update_personal_info(PersonalInfoPatch {
            current_location: Some(Location::new("Peru", "Lima")),
            ..Default::default()
        });
        let mut errors = ErrorTree::default();
        errors.terms_agreed = Some("You must agree to the terms".into());
        store.set_errors(errors);

        assert_eq!(
            store.lookup("personalInfo.currentLocation.city").value,
            Some(Value::String("Lima".into()))
        );
        assert_eq!(
            store.lookup("termsAgreed").error.as_deref(),
            Some("You must agree to the terms")
        );
        assert_eq!(store.lookup("experiences[0].jobTitle"), FieldView::default());
        assert_eq!(
            store.value(&FieldPath::Personal(PersonalField::Country)),
            Some(FieldValue::text("Peru"))
        );
    }

    #[test]
    fn writes_are_throttled_and_flushed_on_drop() {
        let (mut store, backend, clock) = store_with(1000);
        store.set_terms_agreed(true);
        assert!(saved(&backend).unwrap().form_data.terms_agreed);

        store.add_skill(Skill::new("Rust"));
        assert!(store.has_pending_write());
        assert!(saved(&backend).unwrap().form_data.skills.is_empty());

        clock.advance(Duration::milliseconds(400));
        assert!(!store.poll());
        store.add_skill(Skill::new("Go"));
        drop(store);
        assert_eq!(saved(&backend).unwrap().form_data.skills.len(), 2);
    }

    #[test]
    fn errors_are_not_persisted() {
        let (mut store, backend, _) = store_with(0);
        let mut errors = ErrorTree::default();
        errors.terms_agreed = Some("nope".into());
        store.set_errors(errors);
        assert!(backend.is_empty());
    }

    /// Refuses to remove `stuck`, or every key when unset.
    struct StickyStore {
        inner: MemoryStore,
        stuck: Option<&'static str>,
    }

    impl KeyValueStore for StickyStore {
        fn get(&self, key: &str) -> crate::errors::StorageResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> crate::errors::StorageResult<()> {
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> crate::errors::StorageResult<()> {
            match self.stuck {
                Some(stuck) if stuck != key => self.inner.remove(key),
                _ => Err(crate::errors::StorageError::Backend("remove unsupported".into())),
            }
        }
    }

    #[test]
    fn reset_overwrites_snapshot_when_remove_fails() {
        let backend = MemoryStore::new();
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap());
        let config = Config {
            throttle_ms: 0,
            ..Config::default()
        };
        let mut store = FieldStore::new(
            Box::new(StickyStore {
                inner: backend.clone(),
                stuck: None,
            }),
            Arc::new(clock),
            &config,
        );
        store.set_terms_agreed(true);
        store.set_current_step(Step::Skills);
        store.reset_form();

        let snapshot = saved(&backend).unwrap();
        assert!(!snapshot.form_data.terms_agreed);
        assert_eq!(snapshot.current_step, Step::FIRST);
    }

    #[test]
    fn reset_shadows_legacy_data_that_cannot_be_removed() {
        let backend = MemoryStore::new();
        backend
            .set(
                LEGACY_KEY,
                r#"{"personalInfo":{"fullName":"Old Applicant"},"termsAgreed":true}"#,
            )
            .unwrap();
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap());
        let config = Config {
            throttle_ms: 0,
            ..Config::default()
        };
        let sticky = || {
            Box::new(StickyStore {
                inner: backend.clone(),
                stuck: Some(LEGACY_KEY),
            })
        };

        let mut store = FieldStore::open(sticky(), Arc::new(clock.clone()), &config);
        assert_eq!(store.data().personal_info.full_name, "Old Applicant");
        store.reset_form();
        drop(store);

        let reopened = FieldStore::open(sticky(), Arc::new(clock), &config);
        assert_eq!(reopened.data(), &FormData::default());
        assert!(backend.get(LEGACY_KEY).unwrap().is_some());
    }

    #[test]
    fn reset_keeps_memory_authoritative_when_storage_fails() {
        let (mut store, backend, _) = store_with(0);
        store.set_terms_agreed(true);
        backend.set_failing(true);
        store.reset_form();
        assert!(!store.data().terms_agreed);
        assert_eq!(store.current_step(), Step::FIRST);
    }
}
