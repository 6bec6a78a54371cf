//! Editable text sections (the dashboard's "about" and "accommodation" blurbs).
//!
//! Storage sits behind [`SectionStore`] so the in-process map can be replaced
//! by a managed key-value backend.

use std::collections::HashMap;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Section names the dashboard may edit.
pub const EDITABLE_SECTIONS: [&str; 2] = ["about", "accommodation"];

/// Upper bound on section text, in characters.
pub const MAX_SECTION_CHARS: usize = 20_000;

pub fn is_editable_section(name: &str) -> bool {
    EDITABLE_SECTIONS.contains(&name)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditableSection {
    pub section: String,
    pub text: String,
    pub updated_at: Timestamp,
}

/// Read/write access to section text by key.
#[async_trait::async_trait]
pub trait SectionStore: Send + Sync {
    async fn get(&self, section: &str) -> Result<Option<EditableSection>, CoreError>;

    /// Replace the text of `section`, creating it if absent.
    async fn put(
        &self,
        section: &str,
        text: String,
        now: Timestamp,
    ) -> Result<EditableSection, CoreError>;
}

/// Check a section write before it reaches the store.
pub fn validate_section_write(section: &str, text: &str) -> Result<(), CoreError> {
    if !is_editable_section(section) {
        return Err(CoreError::NotFound {
            entity: "Section",
            key: section.to_string(),
        });
    }
    let chars = text.chars().count();
    if chars > MAX_SECTION_CHARS {
        return Err(CoreError::Validation(format!(
            "Section text must be at most {MAX_SECTION_CHARS} characters, got {chars}"
        )));
    }
    Ok(())
}

#[derive(Debug, Default)]
pub struct InMemorySectionStore {
    sections: RwLock<HashMap<String, EditableSection>>,
}

impl InMemorySectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with initial texts, all stamped `now`.
    pub fn seeded<I>(initial: I, now: Timestamp) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let sections = initial
            .into_iter()
            .map(|(section, text)| {
                let entry = EditableSection {
                    section: section.clone(),
                    text,
                    updated_at: now,
                };
                (section, entry)
            })
            .collect();
        Self {
            sections: RwLock::new(sections),
        }
    }
}

#[async_trait::async_trait]
impl SectionStore for InMemorySectionStore {
    async fn get(&self, section: &str) -> Result<Option<EditableSection>, CoreError> {
        Ok(self.sections.read().await.get(section).cloned())
    }

    async fn put(
        &self,
        section: &str,
        text: String,
        now: Timestamp,
    ) -> Result<EditableSection, CoreError> {
        let entry = EditableSection {
            section: section.to_string(),
            text,
            updated_at: now,
        };
        self.sections
            .write()
            .await
            .insert(section.to_string(), entry.clone());
        Ok(entry)
    }
}
