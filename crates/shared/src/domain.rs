use std::{collections::HashSet, fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Stable identifier of a page section; doubles as the address fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(pub String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub label: String,
    pub order: u32,
}

impl Section {
    pub fn new(id: impl Into<String>, label: impl Into<String>, order: u32) -> Self {
        Self {
            id: SectionId::new(id),
            label: label.into(),
            order,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SectionListError {
    #[error("section list is empty")]
    Empty,
    #[error("duplicate section id '{0}'")]
    DuplicateId(SectionId),
    #[error("duplicate section order {order} (sections '{first}' and '{second}')")]
    DuplicateOrder {
        order: u32,
        first: SectionId,
        second: SectionId,
    },
}

/// The fixed, ordered set of navigable sections. Cheap to clone and never
/// mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionList {
    sections: Arc<[Section]>,
}

impl SectionList {
    pub fn new(mut sections: Vec<Section>) -> Result<Self, SectionListError> {
        if sections.is_empty() {
            return Err(SectionListError::Empty);
        }

        let mut seen = HashSet::new();
        for section in &sections {
            if !seen.insert(section.id.clone()) {
                return Err(SectionListError::DuplicateId(section.id.clone()));
            }
        }

        sections.sort_by_key(|section| section.order);
        for pair in sections.windows(2) {
            if pair[0].order == pair[1].order {
                return Err(SectionListError::DuplicateOrder {
                    order: pair[0].order,
                    first: pair[0].id.clone(),
                    second: pair[1].id.clone(),
                });
            }
        }

        Ok(Self {
            sections: sections.into(),
        })
    }

    /// Home, About and Contact, in that order.
    pub fn portfolio() -> Self {
        Self {
            sections: vec![
                Section::new("home", "Home", 0),
                Section::new("about", "About", 1),
                Section::new("contact", "Contact", 2),
            ]
            .into(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// The canonical first section (lowest `order`).
    pub fn first(&self) -> &Section {
        &self.sections[0]
    }

    pub fn get(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id.as_str() == id)
    }

    pub fn order_of(&self, id: &SectionId) -> Option<u32> {
        self.sections
            .iter()
            .find(|section| &section.id == id)
            .map(|section| section.order)
    }
}

/// Which section is currently highlighted, if any. `Default` is none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSection(Option<SectionId>);

impl ActiveSection {
    pub fn of(id: SectionId) -> Self {
        Self(Some(id))
    }

    pub fn id(&self) -> Option<&SectionId> {
        self.0.as_ref()
    }

    pub fn is(&self, id: &SectionId) -> bool {
        self.0.as_ref() == Some(id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactDraft {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.message.is_empty()
    }

    pub fn has_blank_field(&self) -> bool {
        self.name.trim().is_empty() || self.email.trim().is_empty() || self.message.trim().is_empty()
    }
}

/// Correlates one submission attempt across log lines and worker replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttemptId(pub Uuid);

impl AttemptId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AttemptId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusErrorKind {
    Validation,
    Configuration,
    Delivery,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Sending,
    Success(String),
    Error {
        kind: StatusErrorKind,
        message: String,
    },
}

impl SubmissionStatus {
    pub fn is_sending(&self) -> bool {
        matches!(self, Self::Sending)
    }

    /// Text for the status banner; `None` for `Idle` and `Sending`.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Idle | Self::Sending => None,
            Self::Success(message) | Self::Error { message, .. } => Some(message),
        }
    }

    pub fn error_kind(&self) -> Option<StatusErrorKind> {
        match self {
            Self::Error { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
