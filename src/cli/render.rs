//! Turns result sets into the fixed-width text the CLI prints.
//!
//! Pure string building, nothing here touches stdout.

use crate::db::{Amount, Expense};

const SEPARATOR_WIDTH: usize = 50;
const TOTAL_WIDTH: usize = 25;

/// "There are no expenses." / "There is 1 expense." / "There are N expenses."
pub fn count_line(count: usize) -> String {
    match count {
        0 => "There are no expenses.".to_string(),
        1 => "There is 1 expense.".to_string(),
        n => format!("There are {} expenses.", n),
    }
}

/// id, date, amount right-justified, memo as-is
pub fn expense_row(expense: &Expense) -> String {
    let date = expense.created_on.format("%Y-%m-%d").to_string();
    format!(
        "{:>3} | {:>10} | {:>12} | {}",
        expense.id, date, expense.amount, expense.memo
    )
}

/// Rows, a dashed separator, and the total of just these rows
pub fn expense_table(expenses: &[Expense]) -> Vec<String> {
    let total: Amount = expenses.iter().map(|e| &e.amount).sum();

    let mut lines: Vec<String> = expenses.iter().map(expense_row).collect();
    lines.push("-".repeat(SEPARATOR_WIDTH));
    lines.push(format!("Total {:>width$}", total, width = TOTAL_WIDTH));
    lines
}

/// What `list` and `search` print
pub fn expense_report(expenses: &[Expense]) -> Vec<String> {
    let mut lines = vec![count_line(expenses.len())];
    if !expenses.is_empty() {
        lines.extend(expense_table(expenses));
    }
    lines
}

pub fn not_found(id: i64) -> String {
    format!("There is no expense with the id '{}'.", id)
}

/// Header plus the deleted row, rendered through the shared table routine
pub fn deleted(expense: &Expense) -> Vec<String> {
    let mut lines = vec!["The following expense has been deleted:".to_string()];
    lines.extend(expense_table(std::slice::from_ref(expense)));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(id: i64, cents: i64, memo: &str) -> Expense {
        Expense {
            id,
            amount: Amount::from_cents(cents),
            memo: memo.to_string(),
            created_on: NaiveDate::from_ymd_opt(2024, 5, 7).unwrap(),
        }
    }

    #[test]
    fn test_count_line_branches() {
        assert_eq!(count_line(0), "There are no expenses.");
        assert_eq!(count_line(1), "There is 1 expense.");
        assert_eq!(count_line(7), "There are 7 expenses.");
    }

    #[test]
    fn test_row_columns() {
        let row = expense_row(&expense(4, 2000, "train ticket"));
        assert_eq!(row, "  4 | 2024-05-07 |        20.00 | train ticket");
    }

    #[test]
    fn test_report_with_total() {
        let lines = expense_report(&[expense(1, 500, "coffee"), expense(2, 1525, "dinner")]);

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "There are 2 expenses.");
        assert_eq!(lines[1], "  1 | 2024-05-07 |         5.00 | coffee");
        assert_eq!(lines[2], "  2 | 2024-05-07 |        15.25 | dinner");
        assert_eq!(lines[3], "-".repeat(50));
        assert_eq!(lines[4], format!("Total {:>25}", "20.25"));
    }

    #[test]
    fn test_empty_report_has_no_total() {
        assert_eq!(expense_report(&[]), vec!["There are no expenses."]);
    }

    #[test]
    fn test_deleted_prints_single_row_total() {
        let lines = deleted(&expense(3, 1525, "dinner"));
        assert_eq!(
            lines,
            vec![
                "The following expense has been deleted:".to_string(),
                "  3 | 2024-05-07 |        15.25 | dinner".to_string(),
                "-".repeat(50),
                format!("Total {:>25}", "15.25"),
            ]
        );
    }

    #[test]
    fn test_not_found_names_id() {
        assert_eq!(not_found(999), "There is no expense with the id '999'.");
    }
}
