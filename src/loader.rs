//! Reads account statements from JSON files.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::debug;

use crate::error::{Result, StatementError};
use crate::statement::AccountStatement;

/// Loads and deserializes the statement stored at `path`.
///
/// The whole document is decoded in one step, so a malformed record anywhere
/// in the file fails the load before any rendering starts.  The file handle is
/// released when this function returns.
pub fn load_statement(path: impl AsRef<Path>) -> Result<AccountStatement> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| StatementError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let statement: AccountStatement = serde_json::from_reader(BufReader::new(file))
        .map_err(|source| StatementError::Deserialization {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(
        "Loaded statement from {} ({} balance summaries, {} transactions)",
        path.display(),
        statement.balance_summary.len(),
        statement.transactions.len()
    );
    Ok(statement)
}

/// Deserializes a statement from an in-memory JSON document.
pub fn parse_statement(json: &str) -> serde_json::Result<AccountStatement> {
    serde_json::from_str(json)
}
