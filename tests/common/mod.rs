#![allow(dead_code)]

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use jobapp_core::{
    config::Config,
    domain::{
        Education, EducationLevel, Experience, Gender, Location, PersonalInfoPatch, Reference,
    },
    storage::{KeyValueStore, MemoryStore, Snapshot},
    store::FieldStore,
    time::ManualClock,
    wizard::WizardController,
};

pub fn start_clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap())
}

pub fn config(throttle_ms: u64) -> Config {
    Config {
        throttle_ms,
        ..Config::default()
    }
}

/// Wizard over a shared in-memory backend with synchronous writes.
pub fn wizard() -> (WizardController, MemoryStore, ManualClock) {
    wizard_with(config(0))
}

pub fn wizard_with(config: Config) -> (WizardController, MemoryStore, ManualClock) {
    let backend = MemoryStore::new();
    let clock = start_clock();
    let store = FieldStore::open(Box::new(backend.clone()), Arc::new(clock.clone()), &config);
    (WizardController::new(store, &config), backend, clock)
}

pub fn stored_snapshot(backend: &MemoryStore) -> Option<Snapshot> {
    let raw = backend.get("jobApplicationForm").ok()??;
    Snapshot::from_json(&raw).ok()
}

pub fn valid_personal_info() -> PersonalInfoPatch {
    PersonalInfoPatch {
        full_name: Some("Ada Lovelace".into()),
        email: Some("ada@example.com".into()),
        phone_number: Some("+44 2071234567".into()),
        date_of_birth: Some(Some("1990-12-10".into())),
        gender: Some(Gender::Female),
        current_location: Some(Location::new("UK", "London")),
        education_level: None,
    }
}

pub fn graduate() -> PersonalInfoPatch {
    PersonalInfoPatch {
        education_level: Some(Some(EducationLevel::GraduateOrHigher)),
        ..Default::default()
    }
}

pub fn valid_experience() -> Experience {
    Experience::new("Analyst", "Acme", "2020-01")
        .ending("2021-01")
        .with_responsibilities("Reporting")
}

pub fn valid_education() -> Education {
    Education::new("Oxford", "BSc", "Mathematics", "2008", "2011")
}

pub fn valid_reference() -> Reference {
    Reference::new("Charles Babbage", "Mentor", "Analytical Engines", "cb@example.com")
}
