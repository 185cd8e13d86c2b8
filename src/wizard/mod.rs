//! Step sequencing for the application wizard.

pub mod controller;
pub mod step;

pub use controller::{WizardController, WizardError};
pub use step::Step;
