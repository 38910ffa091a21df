pub mod sheet_cache;
pub mod sheet_parser;
pub mod source;
