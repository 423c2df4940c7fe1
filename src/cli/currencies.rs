use super::ui;
use crate::core::CurrencyCatalog;
use comfy_table::Cell;

pub fn render(catalog: &CurrencyCatalog) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("#"),
        ui::header_cell("Code"),
        ui::header_cell("Currency"),
    ]);

    for (i, entry) in catalog.entries().iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&entry.code),
            Cell::new(&entry.name),
        ]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text("Available Currencies", ui::StyleType::Title),
        table
    )
}

pub fn run(catalog: &CurrencyCatalog) {
    println!("{}", render(catalog));
}
