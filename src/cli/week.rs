use super::ui;
use crate::core::report::{self, DailyRateEntry, REPORT_DAYS};
use crate::core::{CurrencyCode, RateProvider};
use comfy_table::Cell;

pub fn render(entries: &[DailyRateEntry], base: &CurrencyCode, target: &CurrencyCode) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell(&format!("1 {base} in {target}")),
    ]);

    for entry in entries {
        table.add_row(vec![
            Cell::new(entry.date.format("%Y-%m-%d")),
            ui::rate_cell(entry.rate),
        ]);
    }

    let missing = entries.iter().filter(|e| e.rate.is_none()).count();
    let mut output = format!(
        "{}\n\n{}",
        ui::style_text("Last 7 days rates", ui::StyleType::Title),
        table
    );
    if missing > 0 {
        output.push_str(&format!(
            "\n{}",
            ui::style_text(
                &format!("{missing} of {} days had no data", entries.len()),
                ui::StyleType::Subtle
            )
        ));
    }
    output
}

/// Fetches the weekly report with a progress spinner and returns the entries.
pub async fn fetch(
    provider: &dyn RateProvider,
    base: &CurrencyCode,
    target: &CurrencyCode,
    today: chrono::NaiveDate,
    concurrency: usize,
) -> Vec<DailyRateEntry> {
    let pb = ui::new_progress_bar(REPORT_DAYS as u64, "Fetching daily rates...");
    let entries = report::run(provider, base, target, today, concurrency, &|| pb.inc(1)).await;
    pb.finish_and_clear();
    entries
}

pub async fn run(
    provider: &dyn RateProvider,
    base: &CurrencyCode,
    target: &CurrencyCode,
    today: chrono::NaiveDate,
    concurrency: usize,
) {
    let entries = fetch(provider, base, target, today, concurrency).await;
    println!("{}", render(&entries, base, target));
}
