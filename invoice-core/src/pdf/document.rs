use std::io::{self, Write};

use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::pdf::fonts::{encode_win_ansi, BuiltinFont};
use crate::pdf::graphics::Color;
use crate::pdf::objects::{ObjId, PdfObject};
use crate::pdf::writer::{escape_pdf_bytes, PdfWriter};

const CATALOG_OBJ: ObjId = ObjId(1, 0);
const PAGES_OBJ: ObjId = ObjId(2, 0);
const FONT_HELV_OBJ: ObjId = ObjId(3, 0);
const FONT_HELV_BOLD_OBJ: ObjId = ObjId(4, 0);
const CONTENT_OBJ: ObjId = ObjId(5, 0);
const PAGE_OBJ: ObjId = ObjId(6, 0);
const INFO_OBJ: ObjId = ObjId(7, 0);

/// Text that the built-in fonts cannot show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("character {0:?} has no WinAnsi code point")]
pub struct UnencodableChar(pub char);

/// Font, size and fill color for a run of text.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub font: BuiltinFont,
    pub font_size: f64,
    pub color: Color,
}

impl TextStyle {
    pub fn new(font: BuiltinFont, font_size: f64, color: Color) -> Self {
        TextStyle {
            font,
            font_size,
            color,
        }
    }
}

/// A one-page PDF document.
///
/// Drawing calls append to an in-memory content stream using PDF's
/// bottom-left origin; nothing is clipped, so content placed outside
/// the media box is silently lost by viewers. `end_document` writes
/// the page, the document catalog and the xref table.
pub struct PdfDocument<W: Write> {
    writer: PdfWriter<W>,
    width: f64,
    height: f64,
    info: Vec<(String, Vec<u8>)>,
    content_ops: Vec<u8>,
    compress: bool,
}

impl<W: Write> PdfDocument<W> {
    /// Start a document with a single page of the given size in
    /// points. Writes the header and the shared font objects.
    pub fn new(writer: W, width: f64, height: f64) -> io::Result<Self> {
        let mut pdf_writer = PdfWriter::new(writer);
        pdf_writer.write_header()?;

        for (id, font) in [FONT_HELV_OBJ, FONT_HELV_BOLD_OBJ]
            .into_iter()
            .zip(BuiltinFont::ALL)
        {
            let dict = PdfObject::dict(vec![
                ("Type", PdfObject::name("Font")),
                ("Subtype", PdfObject::name("Type1")),
                ("BaseFont", PdfObject::name(font.pdf_base_name())),
                ("Encoding", PdfObject::name("WinAnsiEncoding")),
            ]);
            pdf_writer.write_object(id, &dict)?;
        }

        Ok(PdfDocument {
            writer: pdf_writer,
            width,
            height,
            info: Vec::new(),
            content_ops: Vec::new(),
            compress: false,
        })
    }

    /// Compress the page content stream with FlateDecode.
    pub fn set_compression(&mut self, compress: bool) -> &mut Self {
        self.compress = compress;
        self
    }

    /// Set a document info entry (e.g. "Title", "Creator").
    pub fn set_info(&mut self, key: &str, value: &str) -> Result<&mut Self, UnencodableChar> {
        let bytes = encode_win_ansi(value).map_err(UnencodableChar)?;
        self.info.push((key.to_string(), bytes));
        Ok(self)
    }

    /// Fill a rectangle whose lower-left corner is (x, y).
    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) -> &mut Self {
        let ops = format!(
            "{} rg\n{} {} {} {} re\nf\n",
            format_color(color),
            format_coord(x),
            format_coord(y),
            format_coord(width),
            format_coord(height),
        );
        self.content_ops.extend_from_slice(ops.as_bytes());
        self
    }

    /// Place a single line of text with its baseline starting at (x, y).
    pub fn place_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        style: &TextStyle,
    ) -> Result<&mut Self, UnencodableChar> {
        let encoded = encode_win_ansi(text).map_err(UnencodableChar)?;
        let ops = format!(
            "BT\n/{} {} Tf\n{} rg\n{} {} Td\n(",
            style.font.pdf_name(),
            format_coord(style.font_size),
            format_color(style.color),
            format_coord(x),
            format_coord(y),
        );
        self.content_ops.extend_from_slice(ops.as_bytes());
        self.content_ops.extend_from_slice(&escape_pdf_bytes(&encoded));
        self.content_ops.extend_from_slice(b") Tj\nET\n");
        Ok(self)
    }

    /// Write the page, pages tree, catalog, info dictionary, xref
    /// table and trailer. Consumes self.
    pub fn end_document(mut self) -> io::Result<W> {
        let content_stream = if self.compress {
            PdfObject::stream(
                vec![("Filter", PdfObject::name("FlateDecode"))],
                deflate(&self.content_ops)?,
            )
        } else {
            PdfObject::stream(vec![], std::mem::take(&mut self.content_ops))
        };
        self.writer.write_object(CONTENT_OBJ, &content_stream)?;

        let fonts = BuiltinFont::ALL
            .iter()
            .zip([FONT_HELV_OBJ, FONT_HELV_BOLD_OBJ])
            .map(|(font, id)| (font.pdf_name(), PdfObject::Reference(id)))
            .collect();
        let page = PdfObject::dict(vec![
            ("Type", PdfObject::name("Page")),
            ("Parent", PdfObject::Reference(PAGES_OBJ)),
            (
                "MediaBox",
                PdfObject::array(vec![
                    PdfObject::Integer(0),
                    PdfObject::Integer(0),
                    PdfObject::Real(self.width),
                    PdfObject::Real(self.height),
                ]),
            ),
            ("Contents", PdfObject::Reference(CONTENT_OBJ)),
            (
                "Resources",
                PdfObject::dict(vec![("Font", PdfObject::dict(fonts))]),
            ),
        ]);
        self.writer.write_object(PAGE_OBJ, &page)?;

        let pages = PdfObject::dict(vec![
            ("Type", PdfObject::name("Pages")),
            ("Kids", PdfObject::array(vec![PdfObject::Reference(PAGE_OBJ)])),
            ("Count", PdfObject::Integer(1)),
        ]);
        self.writer.write_object(PAGES_OBJ, &pages)?;

        let catalog = PdfObject::dict(vec![
            ("Type", PdfObject::name("Catalog")),
            ("Pages", PdfObject::Reference(PAGES_OBJ)),
        ]);
        self.writer.write_object(CATALOG_OBJ, &catalog)?;

        let info_id = if self.info.is_empty() {
            None
        } else {
            let entries = std::mem::take(&mut self.info)
                .into_iter()
                .map(|(k, v)| (k, PdfObject::literal_bytes(v)))
                .collect();
            self.writer
                .write_object(INFO_OBJ, &PdfObject::Dictionary(entries))?;
            Some(INFO_OBJ)
        };

        self.writer.write_xref_and_trailer(CATALOG_OBJ, info_id)?;
        Ok(self.writer.into_inner())
    }
}

fn deflate(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

fn format_color(color: Color) -> String {
    format!(
        "{} {} {}",
        format_coord(color.r),
        format_coord(color.g),
        format_coord(color.b),
    )
}

/// Format a coordinate value for content streams: integers without
/// a decimal point, fractions with at most 4 places.
fn format_coord(v: f64) -> String {
    if v == v.floor() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        let s = format!("{:.4}", v);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
