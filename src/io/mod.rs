pub mod csv_export;
pub mod csv_import;
pub mod file;

pub use file::{load_payload, project_from_payload, LoadedProject, PAGE_LIMIT};
