//! Text-level extraction from captured markup
//!
//! Everything here works on raw markup with patterns, not on a DOM. The
//! sanitizer and link extractor sit behind traits so a parser-based
//! implementation can replace them without touching the pipeline.

pub mod links;
pub mod sanitizer;
pub mod title;

pub use links::{LinkExtractor, RegexLinkExtractor, extract_links};
pub use sanitizer::{MarkupSanitizer, RegexSanitizer, sanitize_html};
pub use title::extract_title_slug;
