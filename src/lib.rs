pub mod repl;
pub mod statement;
pub mod storage;
pub mod types;
pub mod utils;
