use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Reference {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub relationship: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub contact: String,
}

impl Reference {
    pub fn new(
        name: impl Into<String>,
        relationship: impl Into<String>,
        company: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            relationship: relationship.into(),
            company: company.into(),
            contact: contact.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferencePatch {
    pub name: Option<String>,
    pub relationship: Option<String>,
    pub company: Option<String>,
    pub contact: Option<String>,
}

impl ReferencePatch {
    pub fn apply(self, target: &mut Reference) {
        if let Some(value) = self.name {
            target.name = value;
        }
        if let Some(value) = self.relationship {
            target.relationship = value;
        }
        if let Some(value) = self.company {
            target.company = value;
        }
        if let Some(value) = self.contact {
            target.contact = value;
        }
    }
}
