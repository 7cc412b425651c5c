pub mod ocr;
pub mod result_store;

pub use ocr::{CommandOcr, LinesFileOcr, OcrEngine, OcrService};
pub use result_store::{ResultRow, ResultStore, ResultsTable, SectionDetail, Student};
