//! On-screen preview shown before a PDF is generated.

use std::fmt::Write;

use anyhow::Result;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table};
use invoice_core::{amount_to_words, format_amount, format_total, BusinessProfile, InvoiceData};

pub fn render_preview(invoice: &InvoiceData, profile: &BusinessProfile) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{}  |  INVOICE {}", profile.name, invoice.invoice_id)?;
    writeln!(out, "Date:     {}", invoice.formatted_date())?;
    writeln!(out, "Bill to:  {}", invoice.customer_name)?;
    writeln!(out, "Contact:  {}", invoice.customer_contact)?;
    for (i, line) in invoice.address_lines().enumerate() {
        let label = if i == 0 { "Address:" } else { "" };
        writeln!(out, "{:<9} {}", label, line)?;
    }
    writeln!(out, "City:     {}", invoice.city)?;
    writeln!(out)?;

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("#"),
        Cell::new("Description"),
        Cell::new("Color"),
        Cell::new("Warranty"),
        Cell::new(&profile.amount_label).set_alignment(CellAlignment::Right),
    ]);
    for (i, item) in invoice.items.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&item.description),
            Cell::new(item.color),
            Cell::new(format!("{} yrs", item.warranty)),
            Cell::new(format_amount(item.amount)).set_alignment(CellAlignment::Right),
        ]);
    }
    writeln!(out, "{table}")?;

    let total = invoice.total();
    let total_cell = Cell::new(format_total(total, &profile.currency.code))
        .add_attribute(Attribute::Bold)
        .fg(Color::Green);
    let mut summary = Table::new();
    summary.add_row(vec![Cell::new("Total Amount"), total_cell]);
    summary.add_row(vec![
        Cell::new("In words"),
        Cell::new(amount_to_words(total, &profile.currency)?),
    ]);
    writeln!(out, "{summary}")?;
    Ok(out)
}
