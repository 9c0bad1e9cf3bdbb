mod downloader;
mod engine;
mod parser;

pub use downloader::download_to_file;
pub use engine::FilterListEngine;
pub use parser::parse_list_line;
