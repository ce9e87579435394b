//! Subcommand handlers

use std::path::Path;

use anyhow::{bail, Context, Result};
use catalog::{
    category_breakdown, compute_stats, highlight_language, sample_templates, supports_live_render,
    truncate_code, CodeMetrics, NewTemplate, TemplateId, TemplateQuery, TemplateStore,
};
use exchange::{export_file_name, ExchangeFormat, ExportScope};
use sheet_sync::{DashboardSettings, SettingsManager};

use crate::{Cli, Commands};

pub fn run(cli: Cli) -> Result<()> {
    ensure_known_format(&cli.file)?;

    let mut manager = SettingsManager::new(cli.settings_dir.clone());
    let settings = manager.load_sync()?.clone();

    let mut store = load_store(&cli.file)?;

    match cli.command {
        Commands::Stats => print_stats(&store),
        Commands::List {
            search,
            category,
            sort_by,
        } => {
            let mut query = TemplateQuery::new().category(category).sort_by(sort_by);
            if let Some(search) = search {
                query = query.search(search);
            }

            let result = store.query(&query);
            println!("{}", result.summary());
            for template in result.iter() {
                println!("  {}  [{}]", template.label(), template.category);
            }
        }
        Commands::Show { number } => {
            let template = store
                .find_by_number(number)
                .with_context(|| format!("no template numbered {}", number))?;
            let metrics = CodeMetrics::measure(&template.code);

            println!("## {}", template.label());
            println!("Category: {}", template.category);
            println!("Description: {}", template.description);
            println!(
                "Language: {}{}",
                highlight_language(&template.category),
                if supports_live_render(&template.category) { " (renderable)" } else { "" }
            );
            println!();
            println!("{}", truncate_code(&template.code, settings.display.preview_lines));
            println!();
            println!(
                "Lines: {} ({} non-empty, {} empty)  Characters: {} ({} without spaces)  Words: {}",
                metrics.total_lines,
                metrics.non_empty_lines,
                metrics.empty_lines,
                metrics.characters,
                metrics.characters_no_spaces,
                metrics.words
            );
        }
        Commands::Add {
            title,
            code,
            category,
            description,
        } => {
            if !category.is_empty() && !settings.display.is_known_category(&category) {
                tracing::warn!("{:?} is not one of the configured categories", category);
            }
            let id = store.add(
                NewTemplate::new(title, code)
                    .with_category(category)
                    .with_description(description),
            )?;
            save_store(&cli.file, &store)?;
            if let Some(template) = store.get(id) {
                println!("Added {}", template.label());
            }
        }
        Commands::Delete { numbers } => {
            let ids = ids_for_numbers(&store, &numbers);
            let removed = store.bulk_delete(&ids);
            save_store(&cli.file, &store)?;
            println!("Deleted {} templates", removed);
        }
        Commands::SetCategory { category, numbers } => {
            let ids = ids_for_numbers(&store, &numbers);
            let updated = store.bulk_set_category(&ids, &category);
            save_store(&cli.file, &store)?;
            println!("Updated {} templates", updated);
        }
        Commands::Renumber => {
            store.renumber();
            save_store(&cli.file, &store)?;
            println!("Renumbered {} templates", store.len());
        }
        Commands::Clean => {
            let removed = store.clean();
            save_store(&cli.file, &store)?;
            println!("Removed {} empty templates", removed);
        }
        Commands::Export {
            format,
            out,
            numbers,
        } => {
            let format: ExchangeFormat = format.parse()?;
            let (scope, rows) = if numbers.is_empty() {
                (ExportScope::All, store.export_snapshot())
            } else {
                let ids = ids_for_numbers(&store, &numbers);
                (ExportScope::Selected, store.export_selection(&ids))
            };

            let path = out.join(export_file_name(scope, format, chrono::Local::now()));
            exchange::save_file(&path, &rows)?;
            println!("Exported {} templates to {}", rows.len(), path.display());
        }
        Commands::Sample => {
            store.import_snapshot(sample_templates());
            save_store(&cli.file, &store)?;
            println!("Wrote {} sample templates", store.len());
        }
        Commands::Settings {
            spreadsheet_id,
            worksheet,
            webhook_url,
            preview_lines,
        } => {
            let mut updated = settings;
            let mut changed = false;
            if let Some(spreadsheet_id) = spreadsheet_id {
                updated.sheet.spreadsheet_id = spreadsheet_id;
                changed = true;
            }
            if let Some(worksheet) = worksheet {
                updated.sheet.worksheet = worksheet;
                changed = true;
            }
            if let Some(url) = webhook_url {
                updated.webhook.url = url;
                changed = true;
            }
            if let Some(lines) = preview_lines {
                updated.display.preview_lines = lines;
                changed = true;
            }
            if changed {
                manager.update_sync(updated)?;
            }
            print_settings(manager.get());
        }
    }

    Ok(())
}

fn load_store(path: &Path) -> Result<TemplateStore> {
    let mut store = TemplateStore::new();
    if path.exists() {
        exchange::import_file(&mut store, path)
            .with_context(|| format!("failed to load {}", path.display()))?;
    } else {
        tracing::info!("{} does not exist yet; starting empty", path.display());
    }
    Ok(store)
}

fn save_store(path: &Path, store: &TemplateStore) -> Result<()> {
    exchange::export_file(store, path).with_context(|| format!("failed to save {}", path.display()))
}

/// Every template carrying one of the given numbers
fn ids_for_numbers(store: &TemplateStore, numbers: &[i64]) -> Vec<TemplateId> {
    store
        .iter()
        .filter(|t| t.number.map_or(false, |n| numbers.contains(&n)))
        .map(|t| t.id)
        .collect()
}

fn print_stats(store: &TemplateStore) {
    let stats = compute_stats(store.iter());

    println!("Total templates:      {}", stats.total_templates);
    println!("Categories:           {}", stats.category_count());
    println!(
        "Most common category: {}",
        stats.most_common_category.as_deref().unwrap_or("-")
    );
    println!("Average code length:  {:.0}", stats.avg_code_length);
    println!("Total code length:    {}", stats.total_code_length);

    let breakdown = category_breakdown(store.iter());
    if breakdown.is_empty() {
        return;
    }

    println!();
    println!("{:<16} {:>6} {:>11} {:>13}", "Category", "Count", "Avg Length", "Total Length");
    for row in breakdown {
        println!(
            "{:<16} {:>6} {:>11.0} {:>13}",
            row.category, row.count, row.avg_code_length, row.total_code_length
        );
    }
}

fn print_settings(settings: &DashboardSettings) {
    let or_none = |value: &str| if value.is_empty() { "(not set)".to_string() } else { value.to_string() };

    println!("Spreadsheet:   {}", or_none(&settings.sheet.spreadsheet_id));
    println!("Worksheet:     {}", or_none(&settings.sheet.worksheet));
    println!("Webhook URL:   {}", or_none(&settings.webhook.url));
    println!("Preview lines: {}", settings.display.preview_lines);
    println!("Categories:    {}", settings.display.categories.join(", "));
}

fn ensure_known_format(path: &Path) -> Result<()> {
    if ExchangeFormat::from_path(path).is_err() {
        bail!("catalog file must end in .json or .csv: {}", path.display());
    }
    Ok(())
}
