use chrono::NaiveDateTime;
use tabled::{settings::Style, Table, Tabled};

use crate::pager::page_count;
use crate::record::ProformaRecord;
use crate::store::Store;

#[derive(Tabled)]
struct ProformaRow {
    #[tabled(rename = "S.NO")]
    serial: usize,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "EMP ID")]
    emp_id: String,
    #[tabled(rename = "PROFORMA NUMBER")]
    number: String,
    #[tabled(rename = "PARTY NAME")]
    party_name: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

/// Format an amount with two decimals and thousands separators
pub fn format_amount(value: f64) -> String {
    let rounded = format!("{:.2}", value.abs());
    let (whole, frac) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && rounded != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac}")
}

/// Table of the given rows; serial numbers start at 1 on every page
pub fn render_table(records: &[&ProformaRecord]) -> String {
    let rows: Vec<ProformaRow> = records
        .iter()
        .enumerate()
        .map(|(idx, r)| ProformaRow {
            serial: idx + 1,
            date: r.date.clone(),
            emp_id: r.emp_id.clone(),
            number: r.pro_forma_number.clone(),
            party_name: r.party_name.clone(),
            amount: format_amount(r.grand_total),
            status: r.status().to_string(),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Full list view for the store's current state: title, table, and
/// pagination footer
pub fn render_page(store: &Store, now: NaiveDateTime) -> String {
    let filtered = store.filtered(now);
    let page = store.page();
    let visible = page.window(&filtered);
    let total = filtered.len();

    let mut out = String::new();
    out.push_str(store.filter().active_tab.title());
    out.push('\n');

    if total == 0 {
        out.push_str("No proformas found.\n");
    } else if visible.is_empty() {
        // Page index survives filter changes, so it can point past the end
        out.push_str(&format!(
            "Page {} is past the end of the {} matching proforma(s). Try --page 0.\n",
            page.page, total
        ));
    } else {
        out.push_str(&render_table(visible));
        out.push('\n');
    }

    out.push_str(&format!(
        "Rows per page: {}  {}  (pages 0–{})",
        page.rows_per_page,
        page.label(total),
        page_count(total, page.rows_per_page).saturating_sub(1)
    ));
    out
}
