use std::borrow::Cow;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::error::RenderError;
use crate::filename::output_filename;
use crate::model::{InvoiceData, LineItem};
use crate::money::{format_amount, format_total};
use crate::pdf::{BuiltinFont, Color, FontMetrics, PdfDocument, TextStyle};
use crate::profile::BusinessProfile;
use crate::words::amount_to_words;

/// A4 portrait, in points.
pub const PAGE_WIDTH: f64 = 595.0;
pub const PAGE_HEIGHT: f64 = 842.0;
/// Lowest baseline the footer may use.
pub const BOTTOM_MARGIN: f64 = 40.0;

const TOP_OFFSET: f64 = 50.0;
const MARGIN: f64 = 50.0;
const CONTENT_WIDTH: f64 = PAGE_WIDTH - 2.0 * MARGIN;
const RIGHT_EDGE: f64 = PAGE_WIDTH - MARGIN;
const TEXT_X: f64 = 70.0;
const TEXT_RIGHT: f64 = PAGE_WIDTH - TEXT_X;
const ADDRESS_X: f64 = 85.0;
const WARRANTY_X: f64 = PAGE_WIDTH - 250.0;
const DESCRIPTION_WIDTH: f64 = WARRANTY_X - TEXT_X - 10.0;

const CUSTOMER_GAP: f64 = 60.0;
const CUSTOMER_BOX_HEIGHT: f64 = 110.0;
const LINE_STEP: f64 = 15.0;
const BLOCK_GAP: f64 = 30.0;
const TABLE_HEADER_HEIGHT: f64 = 30.0;
const ROW_HEIGHT: f64 = 40.0;
const TOTAL_BOX_BASE_HEIGHT: f64 = 68.0;
const WORDS_LINE_STEP: f64 = 12.0;

const PRIMARY: Color = Color::rgb(0.17, 0.24, 0.31);
const ACCENT: Color = Color::rgb(0.15, 0.68, 0.38);
const TEXT: Color = Color::gray(0.33);
const LIGHT_TEXT: Color = Color::gray(0.47);
const ROW_SHADE: Color = Color::gray(0.98);
const TOTAL_SHADE: Color = Color::rgb(0.95, 0.98, 0.95);

fn regular(size: f64, color: Color) -> TextStyle {
    TextStyle::new(BuiltinFont::Helvetica, size, color)
}

fn bold(size: f64, color: Color) -> TextStyle {
    TextStyle::new(BuiltinFont::HelveticaBold, size, color)
}

/// Item rows with an even display index get the shaded background.
pub fn is_shaded_row(index: usize) -> bool {
    index % 2 == 0
}

/// A finished document and the name it should be saved under.
#[derive(Debug, Clone)]
pub struct RenderedInvoice {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub generated_at: NaiveDateTime,
}

/// Lays out invoices for one business. Holds only configuration, so a
/// single renderer can serve any number of calls.
///
/// Blocks are drawn top to bottom on a single cursor; a layout whose
/// footer ends below [`BOTTOM_MARGIN`] fails with
/// [`RenderError::PageOverflow`].
#[derive(Debug, Clone)]
pub struct InvoiceRenderer {
    profile: BusinessProfile,
    compress: bool,
}

impl Default for InvoiceRenderer {
    fn default() -> Self {
        InvoiceRenderer::new(BusinessProfile::default())
    }
}

impl InvoiceRenderer {
    pub fn new(profile: BusinessProfile) -> Self {
        InvoiceRenderer {
            profile,
            compress: true,
        }
    }

    /// FlateDecode the page content (on by default).
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn profile(&self) -> &BusinessProfile {
        &self.profile
    }

    /// Render using the local wall clock as the generation time.
    pub fn render(&self, invoice: &InvoiceData) -> Result<RenderedInvoice, RenderError> {
        self.render_at(invoice, Local::now().naive_local())
    }

    /// Render with an explicit generation time. The time only affects
    /// the filename and the document's creation date.
    #[tracing::instrument(skip_all, fields(invoice_id = %invoice.invoice_id))]
    pub fn render_at(
        &self,
        invoice: &InvoiceData,
        generated_at: NaiveDateTime,
    ) -> Result<RenderedInvoice, RenderError> {
        let filename = output_filename(&invoice.invoice_id, &invoice.city, generated_at);

        let mut doc = PdfDocument::new(Vec::new(), PAGE_WIDTH, PAGE_HEIGHT)?;
        doc.set_compression(self.compress);
        let mut page = Page { doc };
        page.info(&self.profile, invoice, generated_at)?;

        let header_bottom = draw_header(&mut page, &self.profile)?;
        draw_invoice_meta(&mut page, invoice)?;
        let mut cursor = draw_customer(&mut page, invoice, header_bottom)?;
        cursor = draw_table_header(&mut page, &self.profile, cursor)?;
        cursor = draw_items(&mut page, &invoice.items, cursor)?;
        cursor = draw_total(&mut page, &self.profile, invoice, cursor)?;
        cursor = draw_footer(&mut page, &self.profile, cursor)?;

        if cursor < BOTTOM_MARGIN {
            return Err(RenderError::PageOverflow {
                bottom: cursor,
                limit: BOTTOM_MARGIN,
            });
        }

        let bytes = page.doc.end_document()?;
        info!(
            items = invoice.items.len(),
            size = bytes.len(),
            filename = %filename,
            "invoice rendered"
        );
        Ok(RenderedInvoice {
            bytes,
            filename,
            generated_at,
        })
    }
}

/// The page being drawn, with text errors tagged by what was drawn.
struct Page {
    doc: PdfDocument<Vec<u8>>,
}

impl Page {
    fn info(
        &mut self,
        profile: &BusinessProfile,
        invoice: &InvoiceData,
        generated_at: NaiveDateTime,
    ) -> Result<(), RenderError> {
        let title = format!("Invoice {}", invoice.invoice_id);
        let created = format!("D:{}", generated_at.format("%Y%m%d%H%M%S"));
        let producer = concat!("invoice-core ", env!("CARGO_PKG_VERSION"));
        for (key, value, context) in [
            ("Title", title.as_str(), "invoice number"),
            ("Author", profile.name.as_str(), "business name"),
            ("Creator", profile.name.as_str(), "business name"),
            ("Producer", producer, "producer"),
            ("CreationDate", created.as_str(), "creation date"),
        ] {
            self.doc
                .set_info(key, value)
                .map_err(|e| unsupported(e.0, context))?;
        }
        Ok(())
    }

    fn text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        style: &TextStyle,
        context: &str,
    ) -> Result<(), RenderError> {
        self.doc
            .place_text(text, x, y, style)
            .map_err(|e| unsupported(e.0, context))?;
        Ok(())
    }

    /// Text whose right edge sits at `right`.
    fn text_right(
        &mut self,
        text: &str,
        right: f64,
        y: f64,
        style: &TextStyle,
        context: &str,
    ) -> Result<(), RenderError> {
        let width = FontMetrics::measure_text(text, style.font, style.font_size);
        self.text(text, right - width, y, style, context)
    }

    /// Text centered on the page.
    fn text_centered(
        &mut self,
        text: &str,
        y: f64,
        style: &TextStyle,
        context: &str,
    ) -> Result<(), RenderError> {
        let width = FontMetrics::measure_text(text, style.font, style.font_size);
        self.text(text, (PAGE_WIDTH - width) / 2.0, y, style, context)
    }

    fn fill(&mut self, y: f64, height: f64, color: Color) {
        self.doc.fill_rect(MARGIN, y, CONTENT_WIDTH, height, color);
    }
}

fn unsupported(ch: char, context: &str) -> RenderError {
    RenderError::UnsupportedCharacter {
        ch,
        context: context.to_string(),
    }
}

fn draw_header(page: &mut Page, profile: &BusinessProfile) -> Result<f64, RenderError> {
    let mut y = PAGE_HEIGHT - TOP_OFFSET;
    page.text(&profile.name, MARGIN, y, &bold(24.0, PRIMARY), "business name")?;
    y -= 20.0;
    page.text(&profile.address, MARGIN, y, &regular(10.0, LIGHT_TEXT), "business address")?;
    y -= LINE_STEP;
    page.text(&profile.contact, MARGIN, y, &regular(10.0, LIGHT_TEXT), "business contact")?;
    Ok(y)
}

/// Right-hand column; starts at the same height as the header and
/// does not move the main cursor.
fn draw_invoice_meta(page: &mut Page, invoice: &InvoiceData) -> Result<(), RenderError> {
    let mut y = PAGE_HEIGHT - TOP_OFFSET;
    page.text_right("INVOICE", RIGHT_EDGE, y, &bold(20.0, PRIMARY), "heading")?;
    y -= 20.0;
    page.text_right(
        &format!("Invoice No: {}", invoice.invoice_id),
        RIGHT_EDGE,
        y,
        &regular(10.0, LIGHT_TEXT),
        "invoice number",
    )?;
    y -= LINE_STEP;
    page.text_right(
        &format!("Date: {}", invoice.formatted_date()),
        RIGHT_EDGE,
        y,
        &regular(10.0, LIGHT_TEXT),
        "invoice date",
    )?;
    Ok(())
}

/// The shaded box keeps its fixed height; a long address runs out of
/// it and pushes the table down instead.
fn draw_customer(page: &mut Page, invoice: &InvoiceData, cursor: f64) -> Result<f64, RenderError> {
    let top = cursor - CUSTOMER_GAP;
    let box_bottom = top - CUSTOMER_BOX_HEIGHT;
    page.fill(box_bottom, CUSTOMER_BOX_HEIGHT, ROW_SHADE);

    let body = regular(10.0, TEXT);
    let mut y = top - 20.0;
    page.text("Bill to:", TEXT_X, y, &bold(14.0, PRIMARY), "heading")?;
    y -= 20.0;
    page.text(&format!("Name: {}", invoice.customer_name), TEXT_X, y, &body, "customer name")?;
    y -= LINE_STEP;
    page.text(
        &format!("Contact: {}", invoice.customer_contact),
        TEXT_X,
        y,
        &body,
        "customer contact",
    )?;
    y -= LINE_STEP;
    page.text("Address:", TEXT_X, y, &body, "heading")?;
    for line in invoice.address_lines() {
        y -= LINE_STEP;
        if !line.is_empty() {
            page.text(line, ADDRESS_X, y, &body, "customer address")?;
        }
    }
    y -= LINE_STEP;
    page.text(&format!("City: {}", invoice.city), TEXT_X, y, &body, "city")?;

    if y < box_bottom {
        debug!(city_baseline = y, box_bottom, "customer details overflow their box");
    }
    let next = y.min(box_bottom) - BLOCK_GAP;
    debug!(cursor = next, "customer block laid out");
    Ok(next)
}

fn draw_table_header(
    page: &mut Page,
    profile: &BusinessProfile,
    cursor: f64,
) -> Result<f64, RenderError> {
    page.fill(cursor - TABLE_HEADER_HEIGHT, TABLE_HEADER_HEIGHT, PRIMARY);
    let label = bold(12.0, Color::WHITE);
    let y = cursor - 20.0;
    page.text("Item Description", TEXT_X, y, &label, "heading")?;
    page.text("Warranty", WARRANTY_X, y, &label, "heading")?;
    page.text_right(&profile.amount_label, TEXT_RIGHT, y, &label, "amount label")?;
    Ok(cursor - TABLE_HEADER_HEIGHT)
}

fn draw_items(page: &mut Page, items: &[LineItem], mut cursor: f64) -> Result<f64, RenderError> {
    let description_style = bold(10.0, TEXT);
    let finish_style = regular(9.0, LIGHT_TEXT);
    let cell_style = regular(10.0, TEXT);

    for (index, item) in items.iter().enumerate() {
        if is_shaded_row(index) {
            page.fill(cursor - ROW_HEIGHT, ROW_HEIGHT, ROW_SHADE);
        }

        let description = fit_width(&item.description, &description_style, DESCRIPTION_WIDTH);
        if let Cow::Owned(_) = description {
            warn!(index, "item description truncated to fit its column");
        }
        page.text(&description, TEXT_X, cursor - 15.0, &description_style, "item description")?;
        page.text(
            &format!("Color: {}", item.color),
            TEXT_X,
            cursor - 30.0,
            &finish_style,
            "item color",
        )?;
        page.text(
            &format!("{} yrs warranty", item.warranty.years()),
            WARRANTY_X,
            cursor - 20.0,
            &cell_style,
            "item warranty",
        )?;
        page.text_right(
            &format_amount(item.amount),
            TEXT_RIGHT,
            cursor - 20.0,
            &cell_style,
            "item amount",
        )?;

        cursor -= ROW_HEIGHT;
    }
    debug!(cursor, rows = items.len(), "item rows laid out");
    Ok(cursor)
}

fn draw_total(
    page: &mut Page,
    profile: &BusinessProfile,
    invoice: &InvoiceData,
    cursor: f64,
) -> Result<f64, RenderError> {
    let total = invoice.total();
    let words_style = regular(10.0, LIGHT_TEXT);
    let words = amount_to_words(total, &profile.currency)?;
    let lines = wrap_words(&words, &words_style, CONTENT_WIDTH - 2.0 * (TEXT_X - MARGIN));

    let top = cursor - BLOCK_GAP;
    let height = TOTAL_BOX_BASE_HEIGHT + WORDS_LINE_STEP * lines.len() as f64;
    page.fill(top - height, height, TOTAL_SHADE);

    let y = top - 20.0;
    page.text("Total Amount:", TEXT_X, y, &regular(12.0, TEXT), "heading")?;
    page.text_right(
        &format_total(total, &profile.currency.code),
        TEXT_RIGHT,
        y,
        &bold(20.0, ACCENT),
        "currency code",
    )?;

    let mut line_y = y - 25.0;
    for line in &lines {
        page.text(line, TEXT_X, line_y, &words_style, "amount in words")?;
        line_y -= WORDS_LINE_STEP;
    }
    debug!(total = %total, lines = lines.len(), "total block laid out");
    Ok(top - height)
}

fn draw_footer(page: &mut Page, profile: &BusinessProfile, cursor: f64) -> Result<f64, RenderError> {
    let mut y = cursor - BLOCK_GAP;
    page.text_centered(&profile.thank_you, y, &bold(12.0, PRIMARY), "thank-you line")?;
    y -= 20.0;
    page.text_centered(&profile.payment_terms, y, &regular(10.0, LIGHT_TEXT), "payment terms")?;
    Ok(y)
}

/// Shorten `text` with a trailing "..." so it fits `max_width`.
fn fit_width<'a>(text: &'a str, style: &TextStyle, max_width: f64) -> Cow<'a, str> {
    let measure = |s: &str| FontMetrics::measure_text(s, style.font, style.font_size);
    if measure(text) <= max_width {
        return Cow::Borrowed(text);
    }
    let budget = max_width - measure("...");
    let mut width = 0.0;
    let mut end = 0;
    for (i, ch) in text.char_indices() {
        width += FontMetrics::char_width(style.font, ch) as f64 * style.font_size / 1000.0;
        if width > budget {
            break;
        }
        end = i + ch.len_utf8();
    }
    Cow::Owned(format!("{}...", text[..end].trim_end()))
}

/// Greedy word wrap. A single word wider than the line stays whole.
fn wrap_words(text: &str, style: &TextStyle, max_width: f64) -> Vec<String> {
    let space = FontMetrics::measure_text(" ", style.font, style.font_size);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut width = 0.0;

    for word in text.split_whitespace() {
        let word_width = FontMetrics::measure_text(word, style.font, style.font_size);
        if !current.is_empty() && width + space + word_width > max_width {
            lines.push(std::mem::take(&mut current));
            width = 0.0;
        }
        if !current.is_empty() {
            current.push(' ');
            width += space;
        }
        current.push_str(word);
        width += word_width;
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_rows_are_shaded() {
        let shaded: Vec<usize> = (0..5).filter(|&i| is_shaded_row(i)).collect();
        assert_eq!(shaded, [0, 2, 4]);
    }

    #[test]
    fn short_text_is_not_truncated() {
        let style = bold(10.0, TEXT);
        assert!(matches!(fit_width("Sofa", &style, 100.0), Cow::Borrowed("Sofa")));
    }

    #[test]
    fn long_text_gets_ellipsis_within_width() {
        let style = bold(10.0, TEXT);
        let text = "Solid teak eight-seater dining table with matching benches and cushions";
        let fitted = fit_width(text, &style, DESCRIPTION_WIDTH);
        assert!(fitted.ends_with("..."));
        assert!(fitted.len() < text.len());
        let width = FontMetrics::measure_text(&fitted, style.font, style.font_size);
        assert!(width <= DESCRIPTION_WIDTH);
    }

    #[test]
    fn latin_1_text_is_measured_at_real_width() {
        let style = bold(10.0, TEXT);
        let text = "É".repeat(50);
        let fitted = fit_width(&text, &style, DESCRIPTION_WIDTH);
        assert!(fitted.ends_with("..."));
        let width = FontMetrics::measure_text(&fitted, style.font, style.font_size);
        assert!(width <= DESCRIPTION_WIDTH);
        // 6.67pt each at 10pt; 38 of them leave room for the ellipsis.
        assert_eq!(fitted.chars().filter(|&c| c == 'É').count(), 38);
    }

    #[test]
    fn wrap_breaks_between_words() {
        let style = regular(10.0, TEXT);
        // "One Two" is 40.57pt wide at 10pt Helvetica.
        let lines = wrap_words("One Two Three", &style, 45.0);
        assert_eq!(lines, ["One Two", "Three"]);
        assert_eq!(wrap_words("", &style, 45.0), [""]);
    }

    #[test]
    fn short_sentence_stays_on_one_line() {
        let style = regular(10.0, TEXT);
        let lines = wrap_words("Four Hundred Sri Lankan Rupees", &style, 455.0);
        assert_eq!(lines.len(), 1);
    }
}
