//! Statistics derived from a collection snapshot
//!
//! Everything here is a pure function of the templates passed in and is
//! recomputed on every call.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::template::Template;

/// Aggregate figures for the dashboard overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateStats {
    pub total_templates: usize,
    /// Category to template count; categories with no templates are absent
    pub categories: BTreeMap<String, usize>,
    /// Highest count, ties going to the category seen first
    pub most_common_category: Option<String>,
    /// Character length of each template's code, in collection order
    pub code_lengths: Vec<usize>,
    pub avg_code_length: f64,
    pub total_code_length: usize,
}

impl TemplateStats {
    /// Number of distinct categories
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}

/// Compute overview statistics for a collection
pub fn compute_stats<'a>(templates: impl IntoIterator<Item = &'a Template>) -> TemplateStats {
    let mut categories: BTreeMap<String, usize> = BTreeMap::new();
    let mut first_seen: Vec<&str> = Vec::new();
    let mut code_lengths = Vec::new();

    for template in templates {
        let count = categories.entry(template.category.clone()).or_insert(0);
        if *count == 0 {
            first_seen.push(&template.category);
        }
        *count += 1;
        code_lengths.push(template.code_length());
    }

    // Strictly greater keeps the earliest category on ties
    let mut most_common: Option<(&str, usize)> = None;
    for category in first_seen {
        let count = categories[category];
        if most_common.map_or(true, |(_, best)| count > best) {
            most_common = Some((category, count));
        }
    }

    let total_code_length: usize = code_lengths.iter().sum();
    let avg_code_length = if code_lengths.is_empty() {
        0.0
    } else {
        total_code_length as f64 / code_lengths.len() as f64
    };

    TemplateStats {
        total_templates: code_lengths.len(),
        most_common_category: most_common.map(|(category, _)| category.to_string()),
        categories,
        code_lengths,
        avg_code_length,
        total_code_length,
    }
}

/// One line of the per-category statistics table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub count: usize,
    pub avg_code_length: f64,
    pub total_code_length: usize,
}

/// Per-category count and code length figures, sorted by category
pub fn category_breakdown<'a>(templates: impl IntoIterator<Item = &'a Template>) -> Vec<CategorySummary> {
    let mut groups: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for template in templates {
        let entry = groups.entry(template.category.as_str()).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += template.code_length();
    }

    groups
        .into_iter()
        .map(|(category, (count, total))| CategorySummary {
            category: category.to_string(),
            count,
            avg_code_length: total as f64 / count as f64,
            total_code_length: total,
        })
        .collect()
}

/// Size figures for a single code body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeMetrics {
    pub total_lines: usize,
    pub non_empty_lines: usize,
    pub empty_lines: usize,
    pub characters: usize,
    pub characters_no_spaces: usize,
    pub words: usize,
    pub line_lengths: Vec<usize>,
}

impl CodeMetrics {
    /// Measure a code body. Lines are split on `\n`; an empty body is one empty line.
    pub fn measure(code: &str) -> Self {
        let lines: Vec<&str> = code.split('\n').collect();
        let non_empty_lines = lines.iter().filter(|l| !l.trim().is_empty()).count();

        Self {
            total_lines: lines.len(),
            non_empty_lines,
            empty_lines: lines.len() - non_empty_lines,
            characters: code.chars().count(),
            characters_no_spaces: code.chars().filter(|c| *c != ' ').count(),
            words: code.split_whitespace().count(),
            line_lengths: lines.iter().map(|l| l.chars().count()).collect(),
        }
    }

    /// Length of the longest line
    pub fn max_line_length(&self) -> usize {
        self.line_lengths.iter().copied().max().unwrap_or(0)
    }
}
