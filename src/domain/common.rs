use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Raised when free text does not name any option of a closed choice set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Value must be one of: {}", .options.join(", "))]
pub struct ChoiceError {
    pub input: String,
    pub options: Vec<&'static str>,
}

/// Closed set of options presented as a select field.
pub trait Choice: Sized + Copy + 'static {
    const ALL: &'static [Self];

    /// Presentation label, also used as the serialized value.
    fn label(&self) -> &'static str;

    fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|choice| choice.label()).collect()
    }

    /// Case-insensitive lookup by label.
    fn parse(input: &str) -> Result<Self, ChoiceError> {
        let normalized = input.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|candidate| candidate.label().to_lowercase() == normalized)
            .ok_or_else(|| ChoiceError {
                input: input.to_string(),
                options: Self::labels(),
            })
    }
}

/// Derives `Display` and `FromStr` for a [`Choice`] from its labels.
macro_rules! choice_traits {
    ($ty:ty) => {
        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::domain::common::Choice::label(self))
            }
        }

        impl ::std::str::FromStr for $ty {
            type Err = $crate::domain::common::ChoiceError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as $crate::domain::common::Choice>::parse(s)
            }
        }
    };
}

pub(crate) use choice_traits;

/// Optional text fields treat blank input as absent.
pub fn blank_to_none(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

pub(crate) fn de_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| blank_to_none(&value)))
}
