//! Annotation parsing for `// @label` comments

mod parser;

pub use parser::{parse_annotations, parse_identifier, parse_label, scan};
