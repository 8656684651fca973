//! Invoice generation for a furniture store.
//!
//! [`InvoiceData`] is checked by [`validate`], laid out on a single A4
//! page by [`InvoiceRenderer`] and returned as PDF bytes together with
//! the filename it should be saved under. Totals are also spelled out
//! in words by [`amount_to_words`].
//!
//! ```no_run
//! use invoice_core::{validate, InvoiceData, InvoiceRenderer};
//!
//! # fn load() -> InvoiceData { unimplemented!() }
//! let invoice: InvoiceData = load();
//! validate(&invoice).unwrap();
//! let rendered = InvoiceRenderer::default().render(&invoice).unwrap();
//! std::fs::write(&rendered.filename, &rendered.bytes).unwrap();
//! ```

pub mod error;
pub mod filename;
pub mod model;
pub mod money;
pub mod pdf;
pub mod profile;
pub mod render;
pub mod validate;
pub mod words;

pub use error::{ModelError, RenderError, ValidationError, ValidationErrors, WordsError};
pub use filename::output_filename;
pub use model::{Finish, InvoiceData, LineItem, Warranty};
pub use money::{format_amount, format_total};
pub use profile::{BusinessProfile, CurrencyNames};
pub use render::{is_shaded_row, InvoiceRenderer, RenderedInvoice};
pub use validate::validate;
pub use words::amount_to_words;
