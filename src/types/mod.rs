pub mod error;
pub mod row;

// Common type aliases
pub type PageNum = usize;
pub type RowNum = usize;

// Fixed system limits
pub const PAGE_SIZE: usize = 4096;
pub const TABLE_MAX_PAGES: usize = 100;

// Column bounds for the fixed user schema
pub const USERNAME_MAX_LEN: usize = 32;
pub const EMAIL_MAX_LEN: usize = 255;
