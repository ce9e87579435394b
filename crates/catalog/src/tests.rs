//! Integration tests for the template collection
//!
//! These exercise whole workflows across the store, queries, snapshots and
//! statistics, plus property checks over generated collections.

#[cfg(test)]
mod integration_tests {
    use crate::*;

    #[test]
    fn test_complete_dashboard_workflow() {
        let mut store = sample_store();
        assert_eq!(store.len(), 5);

        // Add a new template from the form
        let id = store
            .add(
                NewTemplate::new("Todo List", "const [todos, setTodos] = useState([]);")
                    .with_category("React")
                    .with_description("Stateful todo list"),
            )
            .expect("Failed to add template");
        assert_eq!(store.get(id).unwrap().number, Some(6));

        // Filter the sheet view
        let react = store.query(
            &TemplateQuery::new()
                .category("React")
                .sort_by(SortKey::Title),
        );
        let titles: Vec<_> = react.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Dashboard Layout", "Todo List"]);
        assert_eq!(react.summary(), "Showing 2 of 6 templates");

        // Bulk recategorize and delete from a selection
        let forms: Vec<TemplateId> = store
            .query(&TemplateQuery::new().search("form"))
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(forms.len(), 2);
        assert_eq!(store.bulk_set_category(&forms, "Other"), 2);
        assert_eq!(compute_stats(store.iter()).categories.get("Other"), Some(&2));

        assert_eq!(store.bulk_delete(&forms), 2);
        store.renumber();

        let numbers: Vec<_> = store.iter().map(|t| t.number).collect();
        assert_eq!(numbers, vec![Some(1), Some(2), Some(3), Some(4)]);

        let stats = compute_stats(store.iter());
        assert_eq!(stats.total_templates, 4);
        assert_eq!(stats.most_common_category.as_deref(), Some("React"));
    }

    #[test]
    fn test_add_then_query_contains_new_entry() {
        let mut store = sample_store();
        let before = store.query(&TemplateQuery::new()).len();

        let id = store.add(NewTemplate::new("Snippet", "x = 1")).unwrap();

        let all = store.query(&TemplateQuery::new());
        assert_eq!(all.len(), before + 1);
        let added: Vec<_> = all.iter().filter(|t| t.id == id).collect();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].title, "Snippet");
        assert_eq!(added[0].code, "x = 1");
        assert_eq!(added[0].number, Some(6));
    }

    #[test]
    fn test_query_never_mutates_store() {
        let store = sample_store();
        let before = store.export_snapshot();
        let _ = store.query(&TemplateQuery::new().sort_by(SortKey::Category).search("a"));
        assert_eq!(store.export_snapshot(), before);
    }

    #[test]
    fn test_json_value_round_trip() {
        let store = sample_store();
        let json = serde_json::to_value(store.export_snapshot()).unwrap();

        let mut restored = TemplateStore::new();
        restored.import_json_value(&json).unwrap();
        assert_eq!(restored.export_snapshot(), store.export_snapshot());
    }

    #[test]
    fn test_error_handling() {
        let mut store = sample_store();
        let stale = store.ids()[0];

        store.import_snapshot(sample_templates());

        assert!(matches!(
            store.update(stale, TemplateUpdate::new().title("x")),
            Err(CatalogError::NotFound(_))
        ));
        assert!(matches!(store.delete(stale), Err(CatalogError::NotFound(_))));
        assert!(matches!(
            store.add(NewTemplate::new("", "")),
            Err(CatalogError::Validation(_))
        ));
        assert_eq!(store.len(), 5);
    }
}

#[cfg(test)]
mod property_tests {
    use crate::*;
    use proptest::prelude::*;

    fn arb_row() -> impl Strategy<Value = SnapshotRow> {
        (
            proptest::option::of(-1000i64..1000),
            "[a-zA-Z0-9 ]{0,12}",
            prop_oneof![
                Just(String::new()),
                Just("Python".to_string()),
                Just("React".to_string()),
                Just("HTML/CSS".to_string()),
            ],
            "[a-z ]{0,16}",
            "[a-z(){};\n ]{0,24}",
        )
            .prop_map(|(number, title, category, description, code)| SnapshotRow {
                number,
                title,
                category,
                description,
                code,
            })
    }

    fn arb_rows() -> impl Strategy<Value = Vec<SnapshotRow>> {
        proptest::collection::vec(arb_row(), 0..20)
    }

    proptest! {
        #[test]
        fn snapshot_round_trip(rows in arb_rows()) {
            let store = TemplateStore::from_rows(rows.clone());
            let mut restored = TemplateStore::new();
            restored.import_snapshot(store.export_snapshot());
            prop_assert_eq!(restored.export_snapshot(), rows);
        }

        #[test]
        fn renumber_is_idempotent(rows in arb_rows()) {
            let mut store = TemplateStore::from_rows(rows);
            store.renumber();
            let once = store.export_snapshot();
            store.renumber();
            prop_assert_eq!(store.export_snapshot(), once);
        }

        #[test]
        fn search_match_survives_all_category(rows in arb_rows(), needle in "[a-z]{0,2}") {
            let store = TemplateStore::from_rows(rows);
            let narrow: Vec<TemplateId> = store
                .query(&TemplateQuery::new().search(needle.clone()))
                .iter()
                .map(|t| t.id)
                .collect();
            let wide: Vec<TemplateId> = store
                .query(&TemplateQuery::new().search(needle).category(ALL_CATEGORIES))
                .iter()
                .map(|t| t.id)
                .collect();
            for id in narrow {
                prop_assert!(wide.contains(&id));
            }
        }

        #[test]
        fn add_numbers_past_max(rows in arb_rows()) {
            let mut store = TemplateStore::from_rows(rows);
            let expected = store.next_number().unwrap();
            let size = store.len();
            let id = store.add(NewTemplate::new("t", "c")).unwrap();
            prop_assert_eq!(store.get(id).unwrap().number, Some(expected));
            prop_assert_eq!(store.len(), size + 1);
            for t in store.iter().filter(|t| t.id != id) {
                if let Some(n) = t.number {
                    prop_assert!(n < expected);
                }
            }
        }

        #[test]
        fn clean_keeps_survivor_order(rows in arb_rows()) {
            let mut store = TemplateStore::from_rows(rows.clone());
            store.clean();
            let expected: Vec<SnapshotRow> = rows
                .into_iter()
                .filter(|r| *r != SnapshotRow::default())
                .collect();
            prop_assert_eq!(store.export_snapshot(), expected);
        }

        #[test]
        fn stats_totals_agree(rows in arb_rows()) {
            let store = TemplateStore::from_rows(rows);
            let stats = compute_stats(store.iter());
            prop_assert_eq!(stats.total_templates, store.len());
            prop_assert_eq!(stats.categories.values().sum::<usize>(), store.len());
            prop_assert_eq!(stats.code_lengths.iter().sum::<usize>(), stats.total_code_length);
        }
    }
}
