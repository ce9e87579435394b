//! The template store: owner of the in-memory collection

use std::collections::HashSet;

use serde_json::Value as JsonValue;

use crate::error::{CatalogError, Result};
use crate::query::{QueryResult, TemplateQuery, ALL_CATEGORIES};
use crate::snapshot::{rows_from_json, SnapshotRow};
use crate::template::{NewTemplate, Template, TemplateId, TemplateUpdate};

/// Owns an ordered collection of templates.
///
/// Every mutation either applies completely or returns an error and leaves
/// the collection as it was. Readers get shared borrows or copies.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    templates: Vec<Template>,
}

impl TemplateStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            templates: Vec::new(),
        }
    }

    /// Create a store populated from snapshot rows
    pub fn from_rows(rows: impl IntoIterator<Item = SnapshotRow>) -> Self {
        let mut store = Self::new();
        store.import_snapshot(rows);
        store
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Templates in collection order
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    /// Identifiers in collection order
    pub fn ids(&self) -> Vec<TemplateId> {
        self.templates.iter().map(|t| t.id).collect()
    }

    pub fn get(&self, id: TemplateId) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// First template carrying the given number
    pub fn find_by_number(&self, number: i64) -> Option<&Template> {
        self.templates.iter().find(|t| t.number == Some(number))
    }

    fn position(&self, id: TemplateId) -> Result<usize> {
        self.templates
            .iter()
            .position(|t| t.id == id)
            .ok_or(CatalogError::NotFound(id))
    }

    /// Number the next added template receives.
    ///
    /// Fails when the largest number in the collection is `i64::MAX`.
    pub fn next_number(&self) -> Result<i64> {
        match self.templates.iter().filter_map(|t| t.number).max() {
            Some(max) => max.checked_add(1).ok_or_else(|| {
                CatalogError::Validation(format!("no number follows {}", max))
            }),
            None => Ok(self.templates.len() as i64 + 1),
        }
    }

    /// Append a new template.
    ///
    /// Title and code are required. Returns the new template's identifier.
    pub fn add(&mut self, fields: NewTemplate) -> Result<TemplateId> {
        if fields.title.is_empty() {
            return Err(CatalogError::Validation("title is required".to_string()));
        }
        if fields.code.is_empty() {
            return Err(CatalogError::Validation("code is required".to_string()));
        }

        let number = self.next_number()?;
        let template = Template {
            id: TemplateId::new(),
            number: Some(number),
            title: fields.title,
            category: fields.category,
            description: fields.description,
            code: fields.code,
        };
        let id = template.id;

        tracing::debug!("Adding template {} ({:?})", id, template.title);
        self.templates.push(template);
        Ok(id)
    }

    /// Replace the supplied fields of one template
    pub fn update(&mut self, id: TemplateId, fields: TemplateUpdate) -> Result<()> {
        let index = self.position(id)?;
        fields.apply(&mut self.templates[index]);
        tracing::debug!("Updated template {}", id);
        Ok(())
    }

    /// Remove one template; fails if it is already gone
    pub fn delete(&mut self, id: TemplateId) -> Result<Template> {
        let index = self.position(id)?;
        tracing::debug!("Deleting template {}", id);
        Ok(self.templates.remove(index))
    }

    /// Remove every template in `ids`, skipping unknown identifiers.
    ///
    /// Returns how many were removed.
    pub fn bulk_delete<'a>(&mut self, ids: impl IntoIterator<Item = &'a TemplateId>) -> usize {
        let ids: HashSet<TemplateId> = ids.into_iter().copied().collect();
        let before = self.templates.len();
        self.templates.retain(|t| !ids.contains(&t.id));
        let removed = before - self.templates.len();
        tracing::debug!("Bulk delete removed {} of {} selected", removed, ids.len());
        removed
    }

    /// Set the category of every template in `ids`, skipping unknown identifiers.
    ///
    /// Returns how many were updated.
    pub fn bulk_set_category<'a>(
        &mut self,
        ids: impl IntoIterator<Item = &'a TemplateId>,
        category: &str,
    ) -> usize {
        let ids: HashSet<TemplateId> = ids.into_iter().copied().collect();
        let mut updated = 0;
        for template in self.templates.iter_mut().filter(|t| ids.contains(&t.id)) {
            template.category = category.to_string();
            updated += 1;
        }
        tracing::debug!("Bulk category change to {:?} on {} templates", category, updated);
        updated
    }

    /// Reassign numbers 1..N in collection order
    pub fn renumber(&mut self) {
        for (index, template) in self.templates.iter_mut().enumerate() {
            template.number = Some(index as i64 + 1);
        }
        tracing::debug!("Renumbered {} templates", self.templates.len());
    }

    /// Drop templates whose fields are all empty. Returns how many were removed.
    pub fn clean(&mut self) -> usize {
        let before = self.templates.len();
        self.templates.retain(|t| !t.is_blank());
        let removed = before - self.templates.len();
        if removed > 0 {
            tracing::info!("Removed {} empty templates", removed);
        }
        removed
    }

    /// Run a query; never mutates the collection
    pub fn query(&self, query: &TemplateQuery) -> QueryResult<'_> {
        query.run(&self.templates)
    }

    /// Sorted unique categories present in the collection
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self.templates.iter().map(|t| t.category.clone()).collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// Category filter choices: "All" followed by [`categories`](Self::categories)
    pub fn category_options(&self) -> Vec<String> {
        std::iter::once(ALL_CATEGORIES.to_string())
            .chain(self.categories())
            .collect()
    }

    /// The whole collection as flat rows, in collection order
    pub fn export_snapshot(&self) -> Vec<SnapshotRow> {
        self.templates.iter().map(SnapshotRow::from).collect()
    }

    /// Rows for the selected templates, in collection order
    pub fn export_selection<'a>(&self, ids: impl IntoIterator<Item = &'a TemplateId>) -> Vec<SnapshotRow> {
        let ids: HashSet<TemplateId> = ids.into_iter().copied().collect();
        self.templates
            .iter()
            .filter(|t| ids.contains(&t.id))
            .map(SnapshotRow::from)
            .collect()
    }

    /// Replace the whole collection with the given rows.
    ///
    /// Every row gets a fresh identifier; previously issued ids become stale.
    pub fn import_snapshot(&mut self, rows: impl IntoIterator<Item = SnapshotRow>) {
        self.templates = rows
            .into_iter()
            .map(|row| Template {
                id: TemplateId::new(),
                number: row.number,
                title: row.title,
                category: row.category,
                description: row.description,
                code: row.code,
            })
            .collect();
        tracing::info!("Imported {} templates", self.templates.len());
    }

    /// Validate a loosely typed JSON document and replace the collection with it.
    ///
    /// The collection is untouched if validation fails.
    pub fn import_json_value(&mut self, value: &JsonValue) -> Result<usize> {
        let rows = rows_from_json(value)?;
        let count = rows.len();
        self.import_snapshot(rows);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store_with(titles: &[(&str, &str)]) -> (TemplateStore, Vec<TemplateId>) {
        let mut store = TemplateStore::new();
        let ids = titles
            .iter()
            .map(|(title, category)| {
                store
                    .add(NewTemplate::new(*title, "code").with_category(*category))
                    .unwrap()
            })
            .collect();
        (store, ids)
    }

    #[test]
    fn test_add_assigns_next_number() {
        let (mut store, _) = store_with(&[("A", "Python"), ("B", "React")]);
        let id = store.add(NewTemplate::new("C", "x")).unwrap();
        assert_eq!(store.get(id).unwrap().number, Some(3));
    }

    #[test]
    fn test_add_after_gap_uses_max() {
        let mut store = TemplateStore::from_rows(vec![SnapshotRow {
            number: Some(10),
            title: "A".into(),
            code: "a".into(),
            ..Default::default()
        }]);
        let id = store.add(NewTemplate::new("B", "b")).unwrap();
        assert_eq!(store.get(id).unwrap().number, Some(11));
    }

    #[test]
    fn test_add_without_numbers_uses_size() {
        let mut store = TemplateStore::from_rows(vec![
            SnapshotRow { title: "A".into(), ..Default::default() },
            SnapshotRow { title: "B".into(), ..Default::default() },
        ]);
        let id = store.add(NewTemplate::new("C", "c")).unwrap();
        assert_eq!(store.get(id).unwrap().number, Some(3));
    }

    #[test]
    fn test_add_after_largest_number_fails() {
        let mut store = TemplateStore::new();
        store
            .import_json_value(&json!([{ "Number": i64::MAX, "Title": "A", "Code": "a" }]))
            .unwrap();

        let result = store.add(NewTemplate::new("B", "b"));
        assert!(matches!(result, Err(CatalogError::Validation(_))));
        assert_eq!(store.len(), 1);
        assert_eq!(store.templates()[0].number, Some(i64::MAX));
    }

    #[test]
    fn test_add_requires_title_and_code() {
        let (mut store, _) = store_with(&[("A", "Python")]);

        let result = store.add(NewTemplate::new("", "x"));
        assert!(matches!(result, Err(CatalogError::Validation(_))));

        let result = store.add(NewTemplate::new("T", ""));
        assert!(matches!(result, Err(CatalogError::Validation(_))));

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_partial() {
        let (mut store, ids) = store_with(&[("A", "Python"), ("B", "React")]);
        store
            .update(ids[1], TemplateUpdate::new().description("described"))
            .unwrap();

        let t = store.get(ids[1]).unwrap();
        assert_eq!(t.title, "B");
        assert_eq!(t.category, "React");
        assert_eq!(t.description, "described");
        assert_eq!(store.ids(), ids);
    }

    #[test]
    fn test_update_missing() {
        let (mut store, _) = store_with(&[("A", "Python")]);
        let result = store.update(TemplateId::new(), TemplateUpdate::new().title("x"));
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[test]
    fn test_delete_twice_fails() {
        let (mut store, ids) = store_with(&[("A", "Python"), ("B", "React")]);
        let removed = store.delete(ids[0]).unwrap();
        assert_eq!(removed.title, "A");
        assert_eq!(store.len(), 1);

        let result = store.delete(ids[0]);
        assert!(matches!(result, Err(CatalogError::NotFound(id)) if id == ids[0]));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_bulk_delete_ignores_unknown() {
        let (mut store, ids) = store_with(&[("A", "Python"), ("B", "React"), ("C", "Vue")]);
        let unknown = TemplateId::new();

        assert_eq!(store.bulk_delete(&[unknown]), 0);
        assert_eq!(store.len(), 3);

        assert_eq!(store.bulk_delete(&[ids[0], unknown, ids[2]]), 2);
        assert_eq!(store.ids(), vec![ids[1]]);
    }

    #[test]
    fn test_bulk_set_category() {
        let (mut store, ids) = store_with(&[("A", "Python"), ("B", "React"), ("C", "Vue")]);
        let updated = store.bulk_set_category(&[ids[0], ids[2], TemplateId::new()], "Other");
        assert_eq!(updated, 2);

        let categories: Vec<_> = store.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(categories, vec!["Other", "React", "Other"]);
    }

    #[test]
    fn test_update_clears_number() {
        let (mut store, ids) = store_with(&[("A", "Python"), ("B", "React")]);
        store.update(ids[1], TemplateUpdate::new().clear_number()).unwrap();

        assert_eq!(store.get(ids[1]).unwrap().number, None);
        assert_eq!(store.next_number().unwrap(), 2);
    }

    #[test]
    fn test_renumber_keeps_order() {
        let (mut store, ids) = store_with(&[("A", "Python"), ("B", "React"), ("C", "Vue")]);
        store.update(ids[0], TemplateUpdate::new().number(99)).unwrap();
        store.delete(ids[1]).unwrap();

        store.renumber();
        let numbers: Vec<_> = store.iter().map(|t| (t.title.as_str(), t.number)).collect();
        assert_eq!(numbers, vec![("A", Some(1)), ("C", Some(2))]);
    }

    #[test]
    fn test_clean_removes_blank_rows() {
        let mut store = TemplateStore::from_rows(vec![
            SnapshotRow { title: "A".into(), ..Default::default() },
            SnapshotRow::default(),
            SnapshotRow { code: "c".into(), ..Default::default() },
            SnapshotRow::default(),
        ]);
        assert_eq!(store.clean(), 2);
        let titles: Vec<_> = store.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["A", ""]);
    }

    #[test]
    fn test_category_options() {
        let (store, _) = store_with(&[("A", "React"), ("B", "Python"), ("C", "React")]);
        assert_eq!(store.category_options(), vec!["All", "Python", "React"]);
    }

    #[test]
    fn test_export_selection_keeps_collection_order() {
        let (store, ids) = store_with(&[("A", "Python"), ("B", "React"), ("C", "Vue")]);
        let rows = store.export_selection(&[ids[2], ids[0]]);
        let titles: Vec<_> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[test]
    fn test_import_json_value_failure_leaves_store() {
        let (mut store, ids) = store_with(&[("A", "Python")]);
        let result = store.import_json_value(&json!("not rows"));
        assert!(matches!(result, Err(CatalogError::Import(_))));
        assert_eq!(store.ids(), ids);
    }

    #[test]
    fn test_import_json_value_replaces() {
        let (mut store, ids) = store_with(&[("A", "Python")]);
        let count = store
            .import_json_value(&json!([{"Number": 5, "Title": "X", "Code": "y"}]))
            .unwrap();
        assert_eq!(count, 1);
        assert!(store.get(ids[0]).is_none());
        assert_eq!(store.find_by_number(5).unwrap().title, "X");
    }
}
