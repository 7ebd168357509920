//! Renders JSON bank account statements into PDF documents.

pub mod amount;
pub mod builder;
pub mod config;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod loader;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod statement;

pub use amount::{format_currency, Amount};
pub use config::StatementConfig;
pub use error::{PdfBuildError, StatementError};
pub use pipeline::{run, GeneratedStatement};
pub use statement::{AccountStatement, BalanceSummary, Transaction};
