mod file_finder;

pub use file_finder::{FileCategory, FileFinder, ScannedFile};
