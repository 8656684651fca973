use std::io::Read;

use chrono::{NaiveDate, NaiveDateTime};
use flate2::read::ZlibDecoder;
use invoice_core::{
    BusinessProfile, Finish, InvoiceData, InvoiceRenderer, LineItem, RenderError, Warranty,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|w| w == needle)
}

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    find_bytes(haystack, needle).is_some()
}

fn count_bytes(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}

fn generated_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 5)
        .unwrap()
        .and_hms_opt(14, 30, 5)
        .unwrap()
}

fn item(description: &str, amount: Decimal) -> LineItem {
    LineItem {
        description: description.into(),
        color: Finish::TeakBrown,
        warranty: Warranty::new(2).unwrap(),
        amount,
    }
}

fn invoice(items: Vec<LineItem>) -> InvoiceData {
    InvoiceData {
        invoice_id: "INV-007".into(),
        customer_name: "Kamala Silva".into(),
        customer_address: "No 5, Lake Drive".into(),
        customer_contact: "0712345678".into(),
        city: "Colombo".into(),
        date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        items,
    }
}

fn plain() -> InvoiceRenderer {
    InvoiceRenderer::default().with_compression(false)
}

#[test]
fn produces_single_page_pdf() {
    let data = invoice(vec![item("Dining table", dec!(100.00))]);
    let rendered = plain().render_at(&data, generated_at()).unwrap();
    let bytes = &rendered.bytes;

    assert!(bytes.starts_with(b"%PDF-1.7\n"));
    assert!(bytes.ends_with(b"%%EOF\n"));
    assert!(contains_bytes(bytes, b"/Type /Catalog"));
    assert!(contains_bytes(bytes, b"/Count 1"));
    assert!(contains_bytes(bytes, b"/MediaBox [0 0 595.0 842.0]"));
    assert!(contains_bytes(bytes, b"/BaseFont /Helvetica-Bold"));
    assert!(contains_bytes(bytes, b"/Encoding /WinAnsiEncoding"));
    assert_eq!(count_bytes(bytes, b"/Type /Page "), 1);
}

#[test]
fn page_shows_every_block() {
    let data = invoice(vec![
        item("Dining table", dec!(100.00)),
        item("Coffee table", dec!(250.50)),
        item("Stool", dec!(49.50)),
    ]);
    let bytes = plain().render_at(&data, generated_at()).unwrap().bytes;

    for text in [
        "(Furnistore) Tj",
        "(INVOICE) Tj",
        "(Invoice No: INV-007) Tj",
        "(Date: January 5, 2024) Tj",
        "(Bill to:) Tj",
        "(Name: Kamala Silva) Tj",
        "(No 5, Lake Drive) Tj",
        "(City: Colombo) Tj",
        "(Item Description) Tj",
        "(Amount \\(Rs.\\)) Tj",
        "(Color: Teak Brown) Tj",
        "(2 yrs warranty) Tj",
        "(250.50) Tj",
        "(400.00 LKR) Tj",
        "(Four Hundred Sri Lankan Rupees) Tj",
        "(Thank you for your business!) Tj",
    ] {
        assert!(contains_bytes(&bytes, text.as_bytes()), "missing {text}");
    }
}

#[test]
fn info_dictionary_records_invoice_and_time() {
    let data = invoice(vec![item("Sofa", dec!(1500))]);
    let bytes = plain().render_at(&data, generated_at()).unwrap().bytes;
    assert!(contains_bytes(&bytes, b"/Title (Invoice INV-007)"));
    assert!(contains_bytes(&bytes, b"/Author (Furnistore)"));
    assert!(contains_bytes(&bytes, b"/CreationDate (D:20240305143005)"));
    assert!(contains_bytes(&bytes, b"/Info 7 0 R"));
}

#[test]
fn filename_uses_generation_time() {
    let data = invoice(vec![item("Sofa", dec!(1500))]);
    let rendered = plain().render_at(&data, generated_at()).unwrap();
    assert_eq!(rendered.filename, "INV-007_Colombo_20240305143005.pdf");
    assert_eq!(rendered.generated_at, generated_at());
}

#[test]
fn same_input_same_instant_same_bytes() {
    let data = invoice(vec![item("Sofa", dec!(1500)), item("Chair", dec!(75.25))]);
    let renderer = InvoiceRenderer::default();
    let first = renderer.render_at(&data, generated_at()).unwrap();
    let second = renderer.render_at(&data, generated_at()).unwrap();
    assert_eq!(first.bytes, second.bytes);
    assert_eq!(first.filename, second.filename);
}

#[test]
fn even_rows_are_shaded() {
    let items = (1..=5)
        .map(|n| item(&format!("Item {n}"), Decimal::from(n * 10)))
        .collect();
    let bytes = plain().render_at(&invoice(items), generated_at()).unwrap().bytes;
    // Rows 0, 2 and 4; no other fill on the page is 40pt tall.
    assert_eq!(count_bytes(&bytes, b" 495 40 re\n"), 3);
}

#[test]
fn amounts_have_thousands_separators() {
    let data = invoice(vec![item("Bed", dec!(36000.5))]);
    let bytes = plain().render_at(&data, generated_at()).unwrap().bytes;
    assert!(contains_bytes(&bytes, b"(36,000.50) Tj"));
    assert!(contains_bytes(&bytes, b"(36,000.50 LKR) Tj"));
    assert!(contains_bytes(
        &bytes,
        b"(Thirty Six Thousand Sri Lankan Rupees and Fifty Cents) Tj"
    ));
}

#[test]
fn one_cent_invoice_renders() {
    let data = invoice(vec![item("Drawer knob", dec!(0.01))]);
    let bytes = plain().render_at(&data, generated_at()).unwrap().bytes;
    assert!(contains_bytes(&bytes, b"(0.01 LKR) Tj"));
    assert!(contains_bytes(
        &bytes,
        b"(Zero Sri Lankan Rupees and One Cents) Tj"
    ));
}

#[test]
fn multi_line_address_gets_one_line_each() {
    let mut data = invoice(vec![item("Sofa", dec!(1500))]);
    data.customer_address = "No 5,\r\nLake Drive,\nRajagiriya".into();
    let bytes = plain().render_at(&data, generated_at()).unwrap().bytes;
    assert!(contains_bytes(&bytes, b"(No 5,) Tj"));
    assert!(contains_bytes(&bytes, b"(Lake Drive,) Tj"));
    assert!(contains_bytes(&bytes, b"(Rajagiriya) Tj"));
}

fn address_of(lines: usize) -> String {
    (1..=lines)
        .map(|n| format!("Line {n}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn long_address_overflows_box_and_pushes_table_down() {
    let short = plain()
        .render_at(&invoice(vec![item("Sofa", dec!(1500))]), generated_at())
        .unwrap()
        .bytes;
    assert!(contains_bytes(&short, b"50 587 495 110 re\n"));
    assert!(contains_bytes(&short, b"50 527 495 30 re\n"));

    let mut data = invoice(vec![item("Sofa", dec!(1500))]);
    data.customer_address = address_of(6);
    let bytes = plain().render_at(&data, generated_at()).unwrap().bytes;
    // The box keeps its height; the city line lands at 522, below it.
    assert!(contains_bytes(&bytes, b"50 587 495 110 re\n"));
    assert!(contains_bytes(&bytes, b"70 522 Td\n(City: Colombo) Tj"));
    assert!(contains_bytes(&bytes, b"50 462 495 30 re\n"));
}

#[test]
fn very_long_address_overflows_page() {
    let mut data = invoice(vec![item("Sofa", dec!(1500))]);
    data.customer_address = address_of(20);
    assert!(plain().render_at(&data, generated_at()).is_ok());

    data.customer_address = address_of(21);
    let err = plain().render_at(&data, generated_at()).unwrap_err();
    assert!(matches!(err, RenderError::PageOverflow { .. }));
}

#[test]
fn long_latin_1_description_is_truncated() {
    let data = invoice(vec![item(&"É".repeat(50), dec!(1200))]);
    let bytes = plain().render_at(&data, generated_at()).unwrap().bytes;
    let mut expected = vec![b'('];
    expected.extend(std::iter::repeat(0xC9).take(38));
    expected.extend_from_slice(b"...) Tj");
    assert!(contains_bytes(&bytes, &expected));
}

#[test]
fn long_description_is_truncated() {
    let long = "Hand carved solid teak four poster king size bed with canopy and drawers";
    let data = invoice(vec![item(long, dec!(250000))]);
    let bytes = plain().render_at(&data, generated_at()).unwrap().bytes;
    assert!(!contains_bytes(&bytes, long.as_bytes()));
    assert!(contains_bytes(&bytes, b"...) Tj"));
}

#[test]
fn latin_1_text_is_accepted() {
    let mut data = invoice(vec![item("Café chair", dec!(80))]);
    data.customer_name = "José Pérez".into();
    assert!(plain().render_at(&data, generated_at()).is_ok());
}

#[test]
fn unsupported_character_aborts() {
    let mut data = invoice(vec![item("Sofa", dec!(1500))]);
    data.customer_name = "කමලා".into();
    let err = plain().render_at(&data, generated_at()).unwrap_err();
    match err {
        RenderError::UnsupportedCharacter { ch, context } => {
            assert_eq!(ch, 'ක');
            assert_eq!(context, "customer name");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn eight_items_fit_nine_do_not() {
    let items = |n: i64| -> Vec<LineItem> {
        (1..=n)
            .map(|i| item(&format!("Item {i}"), Decimal::from(i)))
            .collect()
    };
    assert!(plain().render_at(&invoice(items(8)), generated_at()).is_ok());

    let err = plain()
        .render_at(&invoice(items(9)), generated_at())
        .unwrap_err();
    assert!(matches!(err, RenderError::PageOverflow { limit, .. } if limit == 40.0));
}

#[test]
fn oversized_total_fails_to_spell() {
    let data = invoice(vec![item("Palace", dec!(1000000000000000))]);
    let err = plain().render_at(&data, generated_at()).unwrap_err();
    assert!(matches!(err, RenderError::Words(_)));
}

#[test]
fn compressed_content_is_flate_encoded() {
    let data = invoice(vec![item("Sofa", dec!(1500))]);
    let compressed = InvoiceRenderer::default()
        .render_at(&data, generated_at())
        .unwrap()
        .bytes;
    assert!(contains_bytes(&compressed, b"/Filter /FlateDecode"));

    let start = find_bytes(&compressed, b"stream\n").unwrap() + b"stream\n".len();
    let len = find_bytes(&compressed[start..], b"\nendstream").unwrap();
    let mut content = Vec::new();
    ZlibDecoder::new(&compressed[start..start + len])
        .read_to_end(&mut content)
        .unwrap();
    assert!(contains_bytes(&content, b"(Furnistore) Tj"));

    let uncompressed = plain().render_at(&data, generated_at()).unwrap().bytes;
    assert!(!contains_bytes(&uncompressed, b"/Filter"));
}

#[test]
fn profile_replaces_business_details() {
    let mut profile = BusinessProfile::default();
    profile.name = "Lakeside Interiors".into();
    profile.currency.code = "Rs".into();
    let renderer = InvoiceRenderer::new(profile).with_compression(false);
    let bytes = renderer
        .render_at(&invoice(vec![item("Sofa", dec!(1500))]), generated_at())
        .unwrap()
        .bytes;
    assert!(contains_bytes(&bytes, b"(Lakeside Interiors) Tj"));
    assert!(contains_bytes(&bytes, b"(1,500.00 Rs) Tj"));
    assert!(!contains_bytes(&bytes, b"(Furnistore) Tj"));
}
