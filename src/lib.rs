#![doc(test(attr(deny(warnings))))]

//! Job Application Core holds the state, validation and step sequencing of a
//! multi-step job application form, independent of how it is rendered.

pub mod config;
pub mod domain;
pub mod errors;
pub mod forms;
pub mod path;
pub mod storage;
pub mod store;
pub mod summary;
pub mod time;
pub mod utils;
pub mod validation;
pub mod wizard;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Job application core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
