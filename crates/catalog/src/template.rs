//! Template entries and the field sets used to create and edit them

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a template held by a [`TemplateStore`](crate::TemplateStore).
///
/// The identifier is independent of the user-editable `number` field and of
/// display order, so it stays valid while views are re-sorted or filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateId(Uuid);

impl TemplateId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TemplateId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog entry: a titled, categorized code snippet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Store-assigned identifier
    pub id: TemplateId,
    /// User-facing sequence number; absent on some imported rows
    pub number: Option<i64>,
    /// Display title
    pub title: String,
    /// Free-form category (see [`Category`](crate::Category) for the usual ones)
    pub category: String,
    /// Optional description
    pub description: String,
    /// Snippet body
    pub code: String,
}

impl Template {
    /// Whether every field carries no data.
    pub fn is_blank(&self) -> bool {
        self.number.is_none()
            && self.title.is_empty()
            && self.category.is_empty()
            && self.description.is_empty()
            && self.code.is_empty()
    }

    /// The text free-text search runs against.
    ///
    /// Includes the number, so searching for "3" also hits template #3.
    pub fn search_text(&self) -> String {
        let number = self.number.map(|n| n.to_string()).unwrap_or_default();
        [
            number.as_str(),
            self.title.as_str(),
            self.category.as_str(),
            self.description.as_str(),
            self.code.as_str(),
        ]
        .join("\n")
    }

    /// Number of characters in the code body
    pub fn code_length(&self) -> usize {
        self.code.chars().count()
    }

    /// Label used in selection lists, e.g. `"3. Login Form"`
    pub fn label(&self) -> String {
        let title = if self.title.is_empty() { "Untitled" } else { self.title.as_str() };
        match self.number {
            Some(n) => format!("{}. {}", n, title),
            None => title.to_string(),
        }
    }
}

/// Fields supplied when adding a template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTemplate {
    pub title: String,
    pub category: String,
    pub description: String,
    pub code: String,
}

impl NewTemplate {
    /// Create a new template draft with the two required fields
    pub fn new(title: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            code: code.into(),
            ..Default::default()
        }
    }

    /// Set the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Partial edit of a template; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateUpdate {
    /// `Some(None)` clears the number
    pub number: Option<Option<i64>>,
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
}

impl TemplateUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn number(mut self, number: i64) -> Self {
        self.number = Some(Some(number));
        self
    }

    /// Remove the number, as on imported rows that never had one
    pub fn clear_number(mut self) -> Self {
        self.number = Some(None);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Whether the update carries no fields
    pub fn is_empty(&self) -> bool {
        self.number.is_none()
            && self.title.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.code.is_none()
    }

    pub(crate) fn apply(self, template: &mut Template) {
        if let Some(number) = self.number {
            template.number = number;
        }
        if let Some(title) = self.title {
            template.title = title;
        }
        if let Some(category) = self.category {
            template.category = category;
        }
        if let Some(description) = self.description {
            template.description = description;
        }
        if let Some(code) = self.code {
            template.code = code;
        }
    }
}
