pub mod environment;
pub mod files;
pub mod format;
pub mod terminal;

pub use environment::{default_data_dir, resolve_data_dir};
pub use files::{format_path_with_tilde, validate_file_size};
pub use format::{format_money, format_price, format_timestamp, format_timestamp_at};
pub use terminal::{sanitize_cell, strip_ansi_codes};
