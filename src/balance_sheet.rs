//! Balance sheet exporter
//!
//! Renders a user's expenses and their computed per-participant shares
//! into CSV. Output goes into an in-memory buffer handed straight back to
//! the caller, so no transient file exists and there is nothing to clean
//! up if delivery fails mid-way.

use std::io::Write;

use crate::expense::{Expense, compute_shares};

/// Download name hint for the boundary layer.
pub const SUGGESTED_FILENAME: &str = "balance-sheet.csv";

/// Header: description,amount,split_type,shares
const HEADER: &str = "description,amount,split_type,shares";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("render failed: {0}")]
    Render(#[from] std::io::Error),
}

/// Render one CSV row per expense, in the order given.
///
/// The shares column lists `user:owed` pairs in participant order,
/// separated by `;`. Row and column order are deterministic: identical
/// ledgers produce identical bytes.
pub fn render(expenses: &[Expense]) -> Result<Vec<u8>, ExportError> {
    let mut buf: Vec<u8> = Vec::new();
    writeln!(buf, "{}", HEADER)?;

    for expense in expenses {
        let shares = compute_shares(expense)
            .iter()
            .map(|s| format!("{}:{}", s.user_id, s.owed))
            .collect::<Vec<_>>()
            .join(";");

        writeln!(
            buf,
            "{},{},{},{}",
            escape_field(&expense.description),
            expense.amount,
            expense.split,
            shares
        )?;
    }

    Ok(buf)
}

/// Quote a field if it contains a delimiter, quote, or newline.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::{Participant, SplitPolicy};
    use crate::money::Amount;
    use chrono::{TimeZone, Utc};

    fn lunch() -> Expense {
        Expense {
            expense_id: 1,
            description: "Lunch".to_string(),
            amount: Amount::from_minor(3000),
            split: SplitPolicy::Equal,
            participants: vec![
                Participant {
                    user_id: 1,
                    share: None,
                    percentage: None,
                },
                Participant {
                    user_id: 2,
                    share: None,
                    percentage: None,
                },
            ],
            created_by: 1,
            created_at: Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_render_header_and_row() {
        let bytes = render(&[lunch()]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("description,amount,split_type,shares"));
        assert_eq!(lines.next(), Some("Lunch,30.00,equal,1:15.00;2:15.00"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_render_empty_ledger_is_header_only() {
        let bytes = render(&[]).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "description,amount,split_type,shares\n"
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let expenses = [lunch(), lunch()];
        assert_eq!(render(&expenses).unwrap(), render(&expenses).unwrap());
    }

    #[test]
    fn test_description_with_comma_is_quoted() {
        let mut e = lunch();
        e.description = "Dinner, drinks \"etc\"".to_string();
        let text = String::from_utf8(render(std::slice::from_ref(&e)).unwrap()).unwrap();
        assert!(text.contains("\"Dinner, drinks \"\"etc\"\"\","));
    }
}
