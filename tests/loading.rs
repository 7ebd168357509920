use account_statement_pdf::loader::parse_statement;
use account_statement_pdf::model::{Cell, HorizontalAlignment, Table};
use account_statement_pdf::render::layout_statement;
use account_statement_pdf::Amount;
use serde_json::{json, Value};

const SCENARIO: &str = r#"{
    "company_name": "Acme Bank",
    "company_address": "1 Finance Way\nLondon",
    "customer_name": "Jane Doe",
    "customer_address": "22 Acacia Avenue",
    "account_name": "Current",
    "account_number": "12345678",
    "report_generation_date": "2024-01-31 09:00",
    "balance_summary": [
        {"product": "Checking", "opening_balance": 1000.00, "closing_balance": 950.00,
         "money_in": 50.00, "money_out": 100.00}
    ],
    "transactions": [
        {"date": "2024-01-01", "description": "Coffee", "money_out": 5.00,
         "money_in": 0.0, "balance": 995.00}
    ]
}"#;

fn row_texts(table: &Table, index: usize) -> Vec<&str> {
    table.rows()[index].iter().map(Cell::text).collect()
}

#[test]
fn scenario_renders_documented_cells() {
    let statement = parse_statement(SCENARIO).expect("parse scenario");
    let document = layout_statement(&statement, "logo.png");
    let tables: Vec<_> = document.tables().collect();
    assert_eq!(tables.len(), 2);

    let summary = tables[0];
    assert_eq!(
        summary.header().iter().map(Cell::text).collect::<Vec<_>>(),
        vec!["Product", "Opening balance", "Money Out", "Money In", "Closing balance"]
    );
    assert_eq!(summary.rows().len(), 1);
    assert_eq!(
        row_texts(summary, 0),
        vec!["Checking", "$1000.00", "$100.00", "$50.00", "$950.00"]
    );

    let transactions = tables[1];
    assert_eq!(
        transactions.header().iter().map(Cell::text).collect::<Vec<_>>(),
        vec!["Date", "Description", "Money out", "Money in", "Balance"]
    );
    assert_eq!(transactions.rows().len(), 1);
    assert_eq!(
        row_texts(transactions, 0),
        vec!["2024-01-01", "Coffee", "$5.00", "$0.00", "$995.00"]
    );
    assert_eq!(
        transactions.rows()[0][2].alignment(),
        HorizontalAlignment::Right
    );
}

#[test]
fn rows_follow_input_order_and_length() {
    let transactions: Vec<Value> = (1..=25)
        .map(|day| {
            json!({
                "date": format!("2024-03-{:02}", day),
                "description": format!("Payment {}", day),
                "money_out": day as f64,
                "balance": 1000.0 - day as f64,
            })
        })
        .collect();
    let input = json!({
        "balance_summary": [{"product": "Checking"}, {"product": "Savings"}, {"product": "ISA"}],
        "transactions": transactions,
    });

    let statement = parse_statement(&input.to_string()).expect("parse statement");
    let document = layout_statement(&statement, "logo.png");
    let tables: Vec<_> = document.tables().collect();

    let products: Vec<_> = tables[0].rows().iter().map(|row| row[0].text()).collect();
    assert_eq!(products, vec!["Checking", "Savings", "ISA"]);

    assert_eq!(tables[1].rows().len(), 25);
    for (index, row) in tables[1].rows().iter().enumerate() {
        assert_eq!(row[0].text(), format!("2024-03-{:02}", index + 1));
    }
}

#[test]
fn round_trip_preserves_values() {
    let original: Value = serde_json::from_str(SCENARIO).unwrap();
    let statement = parse_statement(SCENARIO).unwrap();
    let reserialized = serde_json::to_value(&statement).unwrap();
    assert_eq!(reserialized, original);
}

#[test]
fn missing_fields_become_zero_values() {
    let statement = parse_statement(r#"{"company_name": "Acme Bank", "transactions": [{}]}"#)
        .expect("parse sparse statement");

    assert_eq!(statement.customer_name, "");
    assert!(statement.balance_summary.is_empty());
    assert_eq!(statement.transactions[0].money_in, Amount::default());

    let reserialized = serde_json::to_value(&statement).unwrap();
    assert_eq!(reserialized["account_number"], json!(""));
    assert_eq!(reserialized["balance_summary"], json!([]));
    assert_eq!(
        reserialized["transactions"][0],
        json!({
            "date": "",
            "description": "",
            "money_out": 0.0,
            "money_in": 0.0,
            "balance": 0.0,
        })
    );
}

#[test]
fn unknown_fields_are_ignored() {
    let statement = parse_statement(
        r#"{
            "company_name": "Acme Bank",
            "branch": {"code": 7},
            "transactions": [{"date": "2024-01-01", "category": "food"}]
        }"#,
    )
    .expect("parse statement with extra fields");
    assert_eq!(statement.company_name, "Acme Bank");
    assert_eq!(statement.transactions[0].date, "2024-01-01");
}

#[test]
fn empty_and_null_amounts_stay_empty() {
    let statement = parse_statement(
        r#"{"transactions": [
            {"date": "2024-01-02", "money_out": "", "money_in": null, "balance": 12}
        ]}"#,
    )
    .unwrap();
    let document = layout_statement(&statement, "logo.png");
    let transactions = document.tables().nth(1).unwrap();
    assert_eq!(
        row_texts(transactions, 0),
        vec!["2024-01-02", "", "", "", "$12.00"]
    );

    let reserialized = serde_json::to_value(&statement).unwrap();
    assert_eq!(reserialized["transactions"][0]["money_in"], Value::Null);
}

#[test]
fn malformed_record_fails_the_whole_statement() {
    let result = parse_statement(
        r#"{"transactions": [{"date": "2024-01-01"}, {"date": "2024-01-02", "balance": [1]}]}"#,
    );
    assert!(result.is_err());
}
