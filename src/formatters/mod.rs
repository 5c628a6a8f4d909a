pub mod json_report;
pub mod symbols;
pub mod tree;

pub use json_report::JsonReportFormatter;
pub use symbols::SymbolTable;
pub use tree::{RenderOptions, TreeFormatter};
