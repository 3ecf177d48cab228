//! Feature Row Builder
//!
//! Projects an arbitrary uploaded row onto exactly the feature set the remote
//! model declares. Numeric-looking text is parsed; anything else (categorical
//! fields such as `employment_type`) is kept verbatim, never zeroed.

use super::value::{parse_decorated, Cell, UserRow, USER_ID};

/// Build the model row for `row` given the model's required features.
///
/// - Output keys are exactly `required` (plus `user_id` when known).
/// - Extra input fields are dropped; missing ones stay absent.
pub fn build_model_row(row: &UserRow, required: &[String]) -> UserRow {
    let mut out = UserRow::new();

    for name in required {
        if let Some(value) = row.get(name).and_then(model_value) {
            out.insert(name.clone(), value);
        }
    }

    // Identifier rides along for traceability in the response
    if let Some(id) = row.user_id() {
        out.insert(USER_ID, Cell::Text(id));
    }

    out
}

fn model_value(cell: &Cell) -> Option<Cell> {
    match cell {
        Cell::Number(n) => n.is_finite().then_some(Cell::Number(*n)),
        Cell::Text(s) => Some(match parse_decorated(s) {
            Some(n) => Cell::Number(n),
            None => Cell::Text(s.clone()),
        }),
        Cell::Bool(b) => Some(Cell::Bool(*b)),
    }
}
