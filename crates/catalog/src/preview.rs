//! Display helpers for template previews

use serde::{Deserialize, Serialize};

/// Default number of lines shown in a code preview
pub const DEFAULT_PREVIEW_LINES: usize = 20;

/// The categories the dashboard knows a color for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    HtmlCss,
    JavaScript,
    Python,
    React,
    Vue,
    Api,
    Database,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::HtmlCss,
        Category::JavaScript,
        Category::Python,
        Category::React,
        Category::Vue,
        Category::Api,
        Category::Database,
        Category::Other,
    ];

    /// Name as stored in the `category` field
    pub fn name(&self) -> &'static str {
        match self {
            Self::HtmlCss => "HTML/CSS",
            Self::JavaScript => "JavaScript",
            Self::Python => "Python",
            Self::React => "React",
            Self::Vue => "Vue",
            Self::Api => "API",
            Self::Database => "Database",
            Self::Other => "Other",
        }
    }

    /// Badge color as a hex string
    pub fn color(&self) -> &'static str {
        match self {
            Self::HtmlCss => "#e74c3c",
            Self::JavaScript => "#f39c12",
            Self::Python => "#3498db",
            Self::React => "#61dafb",
            Self::Vue => "#42b883",
            Self::Api => "#9b59b6",
            Self::Database => "#2ecc71",
            Self::Other => "#95a5a6",
        }
    }

    /// Look up a known category by its exact name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Badge color for a category name, if it is a known one
pub fn category_color(name: &str) -> Option<&'static str> {
    Category::from_name(name).map(|c| c.color())
}

/// Syntax highlighting language for a category's code
pub fn highlight_language(category: &str) -> &'static str {
    match Category::from_name(category) {
        Some(Category::HtmlCss) => "html",
        Some(Category::JavaScript) => "javascript",
        Some(Category::React) => "jsx",
        _ => "python",
    }
}

/// Whether code in this category can be rendered as a live HTML page
pub fn supports_live_render(category: &str) -> bool {
    matches!(
        Category::from_name(category),
        Some(Category::HtmlCss | Category::JavaScript | Category::React)
    )
}

/// Cut code down to `max_lines` lines, noting how many were hidden.
pub fn truncate_code(code: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = code.split('\n').collect();
    if lines.len() <= max_lines {
        return code.to_string();
    }
    format!(
        "{}\n\n... ({} more lines)",
        lines[..max_lines].join("\n"),
        lines.len() - max_lines
    )
}
