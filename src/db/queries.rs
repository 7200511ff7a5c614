//! SQL queries against the expenses table
//!
//! Every statement is parameterized; amounts are read back as whole cents.

use crate::db::models::*;
use crate::db::Database;
use crate::error::{ExpenseError, Result};
use chrono::{Local, NaiveDate};
use sqlx::Row;
use tracing::{info, warn};

const SELECT_EXPENSES: &str =
    "SELECT id, CAST(ROUND(amount * 100) AS INTEGER) AS amount_cents, memo, created_on FROM expenses";

impl Database {
    /// Record a new expense dated today
    ///
    /// # Arguments
    /// * `amount` - Parsed amount; the table rejects anything below 0.01
    /// * `memo` - Free-form description
    ///
    /// # Returns
    /// * `Ok(Expense)` - The stored row, including its new id
    /// * `Err(ExpenseError::ConstraintViolation)` - If the CHECK constraint fails
    pub async fn add(&mut self, amount: Amount, memo: &str) -> Result<Expense> {
        self.insert_on(amount, memo, Local::now().date_naive()).await
    }

    pub(crate) async fn insert_on(
        &mut self,
        amount: Amount,
        memo: &str,
        created_on: NaiveDate,
    ) -> Result<Expense> {
        let result = sqlx::query(
            r#"
            INSERT INTO expenses (amount, memo, created_on)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(amount.as_decimal())
        .bind(memo)
        .bind(created_on)
        .fetch_one(&mut self.conn)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_check_violation() => {
                warn!(%amount, "rejected expense");
                ExpenseError::ConstraintViolation(format!(
                    "amount {} must be between 0.01 and 9999.99",
                    amount
                ))
            }
            other => ExpenseError::Database(other),
        })?;

        let id: i64 = result.get(0);
        info!(id, %amount, "recorded expense");

        Ok(Expense {
            id,
            amount,
            memo: memo.to_string(),
            created_on,
        })
    }

    /// All expenses, oldest first
    pub async fn list(&mut self) -> Result<Vec<Expense>> {
        let expenses = sqlx::query_as::<_, Expense>(&format!(
            "{} ORDER BY created_on ASC, id ASC",
            SELECT_EXPENSES
        ))
        .fetch_all(&mut self.conn)
        .await?;

        Ok(expenses)
    }

    /// Expenses whose memo contains `query`, ignoring case
    ///
    /// An empty query matches every row. Case folding happens here rather than
    /// in SQL because SQLite's LOWER and LIKE only fold ASCII.
    pub async fn search(&mut self, query: &str) -> Result<Vec<Expense>> {
        let needle = query.to_lowercase();

        let expenses = self
            .list()
            .await?
            .into_iter()
            .filter(|e| e.memo.to_lowercase().contains(&needle))
            .collect();

        Ok(expenses)
    }

    /// Get expense by ID
    pub async fn get_by_id(&mut self, id: i64) -> Result<Option<Expense>> {
        let expense = sqlx::query_as::<_, Expense>(&format!("{} WHERE id = ?", SELECT_EXPENSES))
            .bind(id)
            .fetch_optional(&mut self.conn)
            .await?;

        Ok(expense)
    }

    /// Delete one expense, reporting what was removed
    ///
    /// A missing id is not an error: it comes back as `DeleteOutcome::NotFound`
    /// and nothing is touched.
    pub async fn delete(&mut self, id: i64) -> Result<DeleteOutcome> {
        let Some(expense) = self.get_by_id(id).await? else {
            return Ok(DeleteOutcome::NotFound(id));
        };

        sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id)
            .execute(&mut self.conn)
            .await?;

        info!(id, "deleted expense");
        Ok(DeleteOutcome::Deleted(expense))
    }

    /// Remove every expense; returns how many rows went away
    pub async fn delete_all(&mut self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM expenses")
            .execute(&mut self.conn)
            .await?;

        info!(rows = result.rows_affected(), "cleared expenses");
        Ok(result.rows_affected())
    }

    pub async fn count(&mut self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM expenses")
            .fetch_one(&mut self.conn)
            .await?;

        Ok(count)
    }
}
