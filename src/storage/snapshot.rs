use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{domain::FormData, errors::StorageResult, wizard::Step};

use super::KeyValueStore;

pub const CURRENT_VERSION: u32 = 1;

/// Key the snapshot lives under unless configured otherwise.
pub const DEFAULT_KEY: &str = "jobApplicationForm";

/// Older builds stored the bare form data under this key.
pub const LEGACY_KEY: &str = "formData";

/// Persisted form state. Validation errors are never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub version: u32,
    pub session_id: Uuid,
    pub saved_at: DateTime<Utc>,
    pub form_data: FormData,
    pub current_step: Step,
    #[serde(default)]
    pub furthest_step: Step,
}

impl Snapshot {
    pub fn new(
        session_id: Uuid,
        saved_at: DateTime<Utc>,
        form_data: FormData,
        current_step: Step,
        furthest_step: Step,
    ) -> Self {
        Self {
            version: CURRENT_VERSION,
            session_id,
            saved_at,
            form_data,
            current_step,
            furthest_step: furthest_step.max(current_step),
        }
    }

    pub fn to_json(&self) -> StorageResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a stored document, rejecting ones written by a newer schema.
    pub fn from_json(raw: &str) -> Result<Self, String> {
        let value: Value = serde_json::from_str(raw).map_err(|err| err.to_string())?;
        match value.get("version").and_then(Value::as_u64) {
            Some(version) if version > u64::from(CURRENT_VERSION) => {
                return Err(format!(
                    "snapshot version {version} is newer than supported version {CURRENT_VERSION}"
                ));
            }
            Some(_) => {}
            None => return Err("snapshot has no version".into()),
        }
        let mut snapshot: Snapshot = serde_json::from_value(value).map_err(|err| err.to_string())?;
        snapshot.furthest_step = snapshot.furthest_step.max(snapshot.current_step);
        Ok(snapshot)
    }
}

/// What [`read`] found in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Restored(Snapshot),
    Legacy(FormData),
    Missing,
    /// Something was stored but could not be used; the reason is logged.
    Rejected(String),
}

/// Reads the snapshot under `key`, falling back to the legacy key when the
/// current one is absent. Never fails: unreadable state is reported as
/// [`LoadOutcome::Rejected`].
pub fn read(store: &dyn KeyValueStore, key: &str) -> LoadOutcome {
    match store.get(key) {
        Ok(Some(raw)) => {
            return match Snapshot::from_json(&raw) {
                Ok(snapshot) => LoadOutcome::Restored(snapshot),
                Err(reason) => {
                    tracing::warn!(key, %reason, "discarding stored snapshot");
                    LoadOutcome::Rejected(reason)
                }
            };
        }
        Ok(None) => {}
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to read stored snapshot");
            return LoadOutcome::Rejected(err.to_string());
        }
    }

    match store.get(LEGACY_KEY) {
        Ok(Some(raw)) => match serde_json::from_str::<FormData>(&raw) {
            Ok(data) => {
                tracing::debug!("restored legacy form data");
                LoadOutcome::Legacy(data)
            }
            Err(err) => {
                tracing::warn!(key = LEGACY_KEY, error = %err, "discarding legacy form data");
                LoadOutcome::Rejected(err.to_string())
            }
        },
        Ok(None) => LoadOutcome::Missing,
        Err(err) => {
            tracing::warn!(key = LEGACY_KEY, error = %err, "failed to read legacy form data");
            LoadOutcome::Rejected(err.to_string())
        }
    }
}
