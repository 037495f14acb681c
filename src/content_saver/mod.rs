//! Content decoding and artifact persistence

// Module declarations
pub mod artifact_path;
mod artifact_saver;
mod compression;

// Re-export public API from artifact_path module
pub use artifact_path::{artifact_dir_name, build_artifact_dir, site_label, url_digest};

// Re-export public API from artifact_saver module
pub use artifact_saver::{save_links, save_page_capture, save_site_data, write_artifact};

// Re-export public API from compression module
pub use compression::{ContentEncoding, DecodeError, decode_body};
