//! FAQ catalog sources for Faqline.

pub mod csv_file;
pub mod in_memory;

pub use csv_file::CsvCatalog;
pub use in_memory::StaticCatalog;
