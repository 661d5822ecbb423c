pub mod pdf;
pub mod r#trait;

pub use pdf::PdfExtractor;
pub use r#trait::TextExtractor;
