pub mod document;
pub mod fonts;
pub mod graphics;
pub mod objects;
pub mod writer;

pub use document::{PdfDocument, TextStyle, UnencodableChar};
pub use fonts::{BuiltinFont, FontMetrics};
pub use graphics::Color;
