use super::ui;
use crate::core::MarketQuoteService;
use crate::core::snapshot::{QuoteSource, SnapshotRow, build_snapshot};
use crate::core::symbols::{GLOBAL_GROUP, INDIA_GROUP};
use anyhow::Result;
use chrono::Local;
use clap::ValueEnum;
use comfy_table::{Cell, Color};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SnapshotGroup {
    Global,
    India,
}

impl SnapshotGroup {
    pub fn symbols(&self) -> Vec<String> {
        let codes: &[&str] = match self {
            SnapshotGroup::Global => &GLOBAL_GROUP,
            SnapshotGroup::India => &INDIA_GROUP,
        };
        codes.iter().map(|c| c.to_string()).collect()
    }
}

fn source_cell(source: QuoteSource) -> Cell {
    match source {
        QuoteSource::Live => Cell::new("live").fg(Color::Green),
        QuoteSource::Static => Cell::new("static").fg(Color::DarkGrey),
        QuoteSource::Unavailable => ui::na_cell(true),
    }
}

pub fn render(rows: &[SnapshotRow]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Symbol"),
        ui::header_cell("Name"),
        ui::header_cell("Value"),
        ui::header_cell("Change"),
        ui::header_cell("Change %"),
        ui::header_cell("Source"),
    ]);

    for row in rows {
        let mut cells = vec![Cell::new(&row.symbol), Cell::new(&row.name)];
        if row.source == QuoteSource::Unavailable {
            cells.extend([ui::na_cell(false), ui::na_cell(false), ui::na_cell(false)]);
        } else {
            cells.push(Cell::new(ui::format_amount(row.value, 2)));
            cells.push(ui::change_cell(format!("{:+.2}", row.change), row.change));
            cells.push(ui::change_cell(
                format!("{:+.2}%", row.change_percent),
                row.change_percent,
            ));
        }
        cells.push(source_cell(row.source));
        table.add_row(cells);
    }

    let live = rows.iter().filter(|r| r.source == QuoteSource::Live).count();
    let footer = if live == rows.len() {
        "All values are live.".to_string()
    } else {
        format!(
            "{live} of {} values are live, the rest are last known values.",
            rows.len()
        )
    };

    format!(
        "{}\n{}\n{}",
        ui::style_text("Market Snapshot", ui::StyleType::Title),
        table,
        ui::style_text(&footer, ui::StyleType::Subtle)
    )
}

/// Fetches quotes for `symbols` and merges them with the static dataset.
pub async fn collect(service: &MarketQuoteService, symbols: &[String]) -> Vec<SnapshotRow> {
    let pb = ui::new_progress_bar(symbols.len() as u64, true);
    pb.set_message("Fetching quotes...");

    let quotes = service.get_quotes(symbols).await;
    pb.set_position(symbols.len() as u64);
    pb.finish_and_clear();

    info!(
        "Resolved {} of {} symbols live",
        quotes.len(),
        symbols.len()
    );
    build_snapshot(symbols, &quotes)
}

/// Prints the snapshot once, or on every tick when `refresh` is set. The
/// service cache keeps repeated ticks within the TTL off the network.
pub async fn run(
    service: &MarketQuoteService,
    symbols: &[String],
    refresh: Option<Duration>,
) -> Result<()> {
    let Some(period) = refresh else {
        println!("{}", render(&collect(service, symbols).await));
        return Ok(());
    };

    let mut interval = tokio::time::interval(period);
    loop {
        tokio::select! {
            _ = interval.tick() => {
                let rows = collect(service, symbols).await;
                println!("{}", render(&rows));
                println!(
                    "{}",
                    ui::style_text(
                        &format!("Updated at {}", Local::now().format("%H:%M:%S")),
                        ui::StyleType::Subtle
                    )
                );
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Stopping snapshot refresh");
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quote::Quote;
    use std::collections::HashMap;

    #[test]
    fn test_group_symbols() {
        assert_eq!(SnapshotGroup::Global.symbols().len(), 6);
        assert_eq!(SnapshotGroup::India.symbols()[0], "NIFTY50");
    }

    #[test]
    fn test_render_marks_sources() {
        let mut quotes = HashMap::new();
        quotes.insert("SPX".to_string(), Quote::new("SPX", 5000.0, 10.0, 0.2));
        let rows = build_snapshot(&["SPX", "DJI", "ACME"], &quotes);

        let output = console::strip_ansi_codes(&render(&rows)).to_string();
        assert!(output.contains("live"));
        assert!(output.contains("static"));
        assert!(output.contains("N/A"));
        assert!(output.contains("37,305.16"));
        assert!(output.contains("1 of 3 values are live"));
    }

    #[test]
    fn test_render_all_live() {
        let mut quotes = HashMap::new();
        quotes.insert("BTC".to_string(), Quote::new("BTC", 65000.0, -100.0, -0.15));
        let rows = build_snapshot(&["BTC"], &quotes);

        let output = console::strip_ansi_codes(&render(&rows)).to_string();
        assert!(output.contains("-0.15%"));
        assert!(output.contains("All values are live."));
    }
}
