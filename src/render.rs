//! Lays out an [`AccountStatement`] as a [`StatementDocument`].
//!
//! Layout constants are fixed; text is neither measured nor truncated.

use std::path::Path;

use crate::amount::format_currency;
use crate::model::{
    Block, Cell, Column, HorizontalAlignment, LogoBlock, StatementDocument, Table, TextStyle,
};
use crate::statement::{AccountStatement, BalanceSummary, Transaction};

/// Rendered width of the logo in millimetres.
pub const LOGO_WIDTH_MM: f64 = 30.0;

/// Font size used for table headers and rows.
pub const TABLE_FONT_SIZE: u8 = 8;

pub const STATEMENT_TITLE: &str = "USD Statement";
pub const BALANCE_SUMMARY_TITLE: &str = "Balance Summary";
pub const TRANSACTIONS_TITLE: &str = "Account Statement For Transactions In The Month So Far";

const LINE_GAP_MM: f64 = 3.0;
const SECTION_GAP_MM: f64 = 8.0;
const BANNER_GAP_MM: f64 = 15.0;

const COMPANY_NAME_STYLE: TextStyle = TextStyle::bold(16);
const BODY_STYLE: TextStyle = TextStyle::regular(12);
const CUSTOMER_NAME_STYLE: TextStyle = TextStyle::bold(12);
const BANNER_STYLE: TextStyle = TextStyle::bold(14);
const NOTE_STYLE: TextStyle = TextStyle::italic(8);
const SECTION_TITLE_STYLE: TextStyle = TextStyle::bold(12);

const BALANCE_SUMMARY_COLUMNS: [(&str, f64, HorizontalAlignment); 5] = [
    ("Product", 40.0, HorizontalAlignment::Center),
    ("Opening balance", 40.0, HorizontalAlignment::Center),
    ("Money Out", 40.0, HorizontalAlignment::Center),
    ("Money In", 40.0, HorizontalAlignment::Center),
    ("Closing balance", 40.0, HorizontalAlignment::Center),
];

const TRANSACTION_COLUMNS: [(&str, f64, HorizontalAlignment); 5] = [
    ("Date", 40.0, HorizontalAlignment::Center),
    ("Description", 70.0, HorizontalAlignment::Left),
    ("Money out", 30.0, HorizontalAlignment::Left),
    ("Money in", 30.0, HorizontalAlignment::Left),
    ("Balance", 30.0, HorizontalAlignment::Left),
];

/// Builds the full statement layout in drawing order.
pub fn layout_statement(
    statement: &AccountStatement,
    logo: impl AsRef<Path>,
) -> StatementDocument {
    let title = format!("{} account statement", statement.company_name);
    let mut document = StatementDocument::new(title)
        .with_footer(Some(footer_text(statement)));

    push_header(&mut document, statement, logo.as_ref());
    push_customer(&mut document, statement);
    push_banner(&mut document, statement);

    document.push(Block::line(BALANCE_SUMMARY_TITLE, SECTION_TITLE_STYLE));
    document.push(Block::Table(balance_summary_table(&statement.balance_summary)));
    document.push(Block::Spacing(SECTION_GAP_MM));

    document.push(Block::line(TRANSACTIONS_TITLE, SECTION_TITLE_STYLE));
    document.push(Block::Table(transaction_table(&statement.transactions)));

    document
}

fn footer_text(statement: &AccountStatement) -> String {
    [statement.account_name.trim(), statement.account_number.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn push_header(document: &mut StatementDocument, statement: &AccountStatement, logo: &Path) {
    document.push(Block::Logo(LogoBlock::new(logo, LOGO_WIDTH_MM)));
    document.push(Block::Spacing(LINE_GAP_MM));
    document.push(Block::line(&statement.company_name, COMPANY_NAME_STYLE));
    document.push(Block::Spacing(LINE_GAP_MM));
    document.push(Block::wrapped(&statement.company_address, BODY_STYLE));
    document.push(Block::Spacing(SECTION_GAP_MM));
}

fn push_customer(document: &mut StatementDocument, statement: &AccountStatement) {
    document.push(Block::line(
        format!("Customer: {}", statement.customer_name),
        CUSTOMER_NAME_STYLE,
    ));
    document.push(Block::Spacing(LINE_GAP_MM));
    document.push(Block::wrapped(&statement.customer_address, BODY_STYLE));
    document.push(Block::Spacing(SECTION_GAP_MM));
}

fn push_banner(document: &mut StatementDocument, statement: &AccountStatement) {
    document.push(Block::line(STATEMENT_TITLE, BANNER_STYLE));
    document.push(Block::Spacing(LINE_GAP_MM));
    document.push(Block::line(
        format!("Generated on: {}", statement.report_generation_date),
        NOTE_STYLE,
    ));
    document.push(Block::line(
        format!("issued by: {}", statement.company_name),
        NOTE_STYLE,
    ));
    document.push(Block::line(
        format!(
            "Account: {} ({})",
            statement.account_name, statement.account_number
        ),
        NOTE_STYLE,
    ));
    document.push(Block::Spacing(BANNER_GAP_MM));
}

fn columns(definitions: &[(&str, f64, HorizontalAlignment)]) -> Vec<Column> {
    definitions
        .iter()
        .map(|(title, width, alignment)| Column::new(*title, *width, *alignment))
        .collect()
}

/// Balance summary table with one row per product, in input order.
pub fn balance_summary_table(summaries: &[BalanceSummary]) -> Table {
    let mut table = Table::new(columns(&BALANCE_SUMMARY_COLUMNS), TABLE_FONT_SIZE);
    for summary in summaries {
        table.push_row([
            Cell::new(&summary.product),
            Cell::right(format_currency(&summary.opening_balance)),
            Cell::right(format_currency(&summary.money_out)),
            Cell::right(format_currency(&summary.money_in)),
            Cell::right(format_currency(&summary.closing_balance)),
        ]);
    }
    table
}

/// Transaction table with one row per ledger line, in input order.
pub fn transaction_table(transactions: &[Transaction]) -> Table {
    let mut table = Table::new(columns(&TRANSACTION_COLUMNS), TABLE_FONT_SIZE);
    for transaction in transactions {
        table.push_row([
            Cell::new(&transaction.date),
            Cell::new(&transaction.description),
            Cell::right(format_currency(&transaction.money_out)),
            Cell::right(format_currency(&transaction.money_in)),
            Cell::right(format_currency(&transaction.balance)),
        ]);
    }
    table
}
