use std::collections::HashSet;
use std::sync::Arc;

use crate::app::{AppContext, GazetteError, Result};
use crate::domain::FeedItem;
use crate::refresh::{AutoRefresh, RefreshConfig};

const TITLE_WIDTH: usize = 60;

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

fn format_item(item: &FeedItem) -> String {
    let date = item
        .published_time()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "----------------".to_string());

    format!(
        "{}  {:<width$}  {} · {} min · {}",
        date,
        truncate(&item.title, TITLE_WIDTH),
        item.source,
        item.reading_time,
        item.sentiment,
        width = TITLE_WIDTH
    )
}

fn print_items(items: &[FeedItem]) {
    if items.is_empty() {
        println!("No items");
        return;
    }

    for item in items {
        println!("{}", format_item(item));
        if !item.tags.is_empty() {
            println!("{:18}#{}", "", item.tags.join(" #"));
        }
    }
}

pub async fn show_items(ctx: &AppContext, category: Option<&str>, limit: usize) -> Result<()> {
    let items = ctx.aggregator.get_items(category, limit).await?;
    print_items(&items);
    Ok(())
}

pub async fn show_trending(ctx: &AppContext, limit: usize) -> Result<()> {
    let items = ctx.aggregator.get_trending(limit).await?;
    print_items(&items);
    Ok(())
}

pub async fn show_all(ctx: &AppContext, limit: usize) -> Result<()> {
    let items = ctx.aggregator.get_all(limit).await?;
    print_items(&items);
    Ok(())
}

pub async fn search(ctx: &AppContext, query: &str, limit: usize) -> Result<()> {
    let items = ctx.aggregator.search(query, limit).await?;
    println!("{} results for \"{}\"", items.len(), query);
    print_items(&items);
    Ok(())
}

pub fn list_categories(ctx: &AppContext) {
    for category in ctx.aggregator.list_categories() {
        println!("{}", category);
    }
}

pub fn list_sources(ctx: &AppContext) {
    let sources = ctx.aggregator.list_sources();

    if sources.is_empty() {
        println!("No sources");
        return;
    }

    for source in sources {
        println!(
            "[{}] {:<20} {:<12} {}",
            source.priority, source.name, source.category, source.location
        );
    }
}

pub async fn report(ctx: &AppContext, category: Option<&str>) -> Result<()> {
    let reports = ctx.aggregator.fetch_report(category).await;

    if reports.is_empty() {
        println!("No sources");
        return Ok(());
    }

    let mut errors = 0;
    for report in &reports {
        match &report.error {
            None => println!("  ok    {:<20} {} items", report.source_name, report.items.len()),
            Some(e) => {
                errors += 1;
                println!("  error {:<20} {}", report.source_name, e);
            }
        }
    }

    println!(
        "{} sources, {} items, {} errors",
        reports.len(),
        reports.iter().map(|r| r.items.len()).sum::<usize>(),
        errors
    );
    Ok(())
}

pub async fn watch(
    ctx: &AppContext,
    category: Option<&str>,
    limit: usize,
    interval: Option<&str>,
    force: bool,
) -> Result<()> {
    let mut config = ctx.config.refresh.clone();
    if let Some(interval) = interval {
        config.interval_secs = RefreshConfig::parse_interval(interval).map_err(GazetteError::Config)?;
    }
    config.force |= force;

    let refresher = Arc::new(AutoRefresh::new(ctx.aggregator.clone(), config));

    let stopper = refresher.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            stopper.stop();
        }
    });

    let mut seen: HashSet<String> = HashSet::new();
    refresher
        .run(category, limit, |items| {
            let fresh: Vec<FeedItem> = items
                .iter()
                .filter(|item| seen.insert(fingerprint(item)))
                .cloned()
                .collect();
            if !fresh.is_empty() {
                println!("--- {} new items ---", fresh.len());
                print_items(&fresh);
            }
        })
        .await
}

/// Ids are positional, so identify items by what they point at.
fn fingerprint(item: &FeedItem) -> String {
    format!("{}|{}|{}", item.source, item.url, item.title)
}
