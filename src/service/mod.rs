mod notes;
mod pdf;
mod translation;

pub use notes::NoteService;
pub use pdf::PdfService;
pub use translation::TranslationService;
