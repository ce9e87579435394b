//! Search, category filter and sort over a template collection

use serde::{Deserialize, Serialize};

use crate::template::Template;

/// Category filter value that disables category filtering
pub const ALL_CATEGORIES: &str = "All";

/// Field a query result is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Number,
    Title,
    Category,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "number" => Ok(Self::Number),
            "title" => Ok(Self::Title),
            "category" => Ok(Self::Category),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number => write!(f, "Number"),
            Self::Title => write!(f, "Title"),
            Self::Category => write!(f, "Category"),
        }
    }
}

/// Filter for [`TemplateStore::query`](crate::TemplateStore::query).
///
/// All set criteria must hold. The default query matches everything and
/// keeps collection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateQuery {
    /// Case-insensitive substring over all fields
    pub search: Option<String>,
    /// Exact category, or [`ALL_CATEGORIES`]
    pub category: Option<String>,
    /// Stable ascending sort applied after filtering
    pub sort_by: Option<SortKey>,
}

impl TemplateQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn sort_by(mut self, key: SortKey) -> Self {
        self.sort_by = Some(key);
        self
    }

    /// Whether a single template passes the search and category criteria
    pub fn matches(&self, template: &Template) -> bool {
        self.matches_search(template) && self.matches_category(template)
    }

    fn matches_search(&self, template: &Template) -> bool {
        match self.search.as_deref() {
            None | Some("") => true,
            Some(needle) => template
                .search_text()
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        }
    }

    fn matches_category(&self, template: &Template) -> bool {
        match self.category.as_deref() {
            None | Some(ALL_CATEGORIES) => true,
            Some(category) => template.category == category,
        }
    }

    pub(crate) fn run<'a>(&self, templates: &'a [Template]) -> QueryResult<'a> {
        let mut items: Vec<&'a Template> = templates.iter().filter(|t| self.matches(t)).collect();

        // `sort_by` on slices is stable
        match self.sort_by {
            Some(SortKey::Number) => items.sort_by(|a, b| a.number.cmp(&b.number)),
            Some(SortKey::Title) => items.sort_by(|a, b| a.title.cmp(&b.title)),
            Some(SortKey::Category) => items.sort_by(|a, b| a.category.cmp(&b.category)),
            None => {}
        }

        QueryResult {
            items,
            total: templates.len(),
        }
    }
}

/// Read-only ordered view produced by a query
#[derive(Debug, Clone)]
pub struct QueryResult<'a> {
    items: Vec<&'a Template>,
    total: usize,
}

impl<'a> QueryResult<'a> {
    /// Number of templates in the view
    pub fn shown(&self) -> usize {
        self.items.len()
    }

    /// Number of templates in the whole collection
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a Template> {
        self.items.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Template> + '_ {
        self.items.iter().copied()
    }

    /// Sorted unique categories within the view
    pub fn categories(&self) -> Vec<&'a str> {
        let mut categories: Vec<&str> = self.items.iter().map(|t| t.category.as_str()).collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// "Showing X of Y templates"
    pub fn summary(&self) -> String {
        format!("Showing {} of {} templates", self.shown(), self.total)
    }
}

impl<'a> IntoIterator for QueryResult<'a> {
    type Item = &'a Template;
    type IntoIter = std::vec::IntoIter<&'a Template>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TemplateId;

    fn template(number: i64, title: &str, category: &str) -> Template {
        Template {
            id: TemplateId::new(),
            number: Some(number),
            title: title.to_string(),
            category: category.to_string(),
            description: String::new(),
            code: String::new(),
        }
    }

    fn collection() -> Vec<Template> {
        vec![
            template(3, "Navbar", "React"),
            template(1, "Login Form", "HTML/CSS"),
            template(2, "Card", "React"),
            template(4, "api client", "JavaScript"),
        ]
    }

    #[test]
    fn test_default_query_keeps_order() {
        let templates = collection();
        let result = TemplateQuery::new().run(&templates);
        let titles: Vec<_> = result.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Navbar", "Login Form", "Card", "api client"]);
        assert_eq!(result.total(), 4);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let templates = collection();
        let result = TemplateQuery::new().search("LOGIN").run(&templates);
        assert_eq!(result.len(), 1);
        assert_eq!(result.get(0).unwrap().title, "Login Form");
    }

    #[test]
    fn test_search_hits_number() {
        let templates = collection();
        let result = TemplateQuery::new().search("4").run(&templates);
        assert_eq!(result.len(), 1);
        assert_eq!(result.get(0).unwrap().title, "api client");
    }

    #[test]
    fn test_all_sentinel_disables_category() {
        let templates = collection();
        let result = TemplateQuery::new().category(ALL_CATEGORIES).run(&templates);
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_category_filter_sorted_by_title() {
        let templates = collection();
        let result = TemplateQuery::new()
            .category("React")
            .sort_by(SortKey::Title)
            .run(&templates);
        let titles: Vec<_> = result.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Card", "Navbar"]);
    }

    #[test]
    fn test_title_sort_is_case_sensitive() {
        let templates = collection();
        let result = TemplateQuery::new().sort_by(SortKey::Title).run(&templates);
        let titles: Vec<_> = result.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Card", "Login Form", "Navbar", "api client"]);
    }

    #[test]
    fn test_sort_by_number_and_stability() {
        let mut templates = collection();
        templates[3].number = Some(1);
        let result = TemplateQuery::new().sort_by(SortKey::Number).run(&templates);
        let titles: Vec<_> = result.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Login Form", "api client", "Card", "Navbar"]);
    }

    #[test]
    fn test_sort_by_category_keeps_ties_in_collection_order() {
        let templates = collection();
        let result = TemplateQuery::new().sort_by(SortKey::Category).run(&templates);

        let order: Vec<_> = result
            .iter()
            .map(|t| (t.category.as_str(), t.title.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("HTML/CSS", "Login Form"),
                ("JavaScript", "api client"),
                ("React", "Navbar"),
                ("React", "Card"),
            ]
        );

        // Source order is untouched
        let titles: Vec<_> = templates.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Navbar", "Login Form", "Card", "api client"]);
    }

    #[test]
    fn test_empty_result_and_summary() {
        let templates = collection();
        let result = TemplateQuery::new().search("nothing matches").run(&templates);
        assert!(result.is_empty());
        assert_eq!(result.summary(), "Showing 0 of 4 templates");
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("title".parse::<SortKey>(), Ok(SortKey::Title));
        assert_eq!("Number".parse::<SortKey>(), Ok(SortKey::Number));
        assert!("size".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_result_categories() {
        let templates = collection();
        let result = TemplateQuery::new().run(&templates);
        assert_eq!(result.categories(), vec!["HTML/CSS", "JavaScript", "React"]);
    }
}
