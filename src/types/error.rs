use thiserror::Error;

use crate::types::PageNum;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Page number {page_num} out of bounds (max: {max})")]
    PageOutOfBounds { page_num: PageNum, max: usize },

    #[error("Tried to flush page {page_num}, which was never cached")]
    PageNotCached { page_num: PageNum },

    #[error("Flush of {byte_count} bytes on page {page_num} exceeds the page size of {page_size}")]
    FlushTooLarge {
        page_num: PageNum,
        byte_count: usize,
        page_size: usize,
    },

    #[error("Row number {row_num} exceeds table capacity of {max_rows} rows")]
    RowOutOfBounds { row_num: usize, max_rows: usize },

    #[error("Value for '{field}' is too long: {actual} bytes (max: {max})")]
    FieldTooLong {
        field: &'static str,
        actual: usize,
        max: usize,
    },
}

pub type Result<T> = std::result::Result<T, StorageError>;
