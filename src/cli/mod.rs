//! Command interpreter: positional args in, store calls, text out.
//!
//! Parsing happens before the database is opened so bad input never touches it.

pub mod confirm;
pub mod render;

pub use confirm::{Confirm, LineConfirm, TerminalConfirm};

use crate::db::{Amount, Database, DeleteOutcome};
use crate::error::{ExpenseError, Result};
use std::io::Write;

pub const CONFIRM_PROMPT: &str = "Are you sure? (y/n)";

/// One parsed invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { amount: String, memo: String },
    Search { query: String },
    Delete { id: i64 },
    Clear,
    List,
    Help,
    Version,
}

impl Command {
    /// Parse the arguments that follow the program name
    ///
    /// Unknown commands and an empty argument list mean `Help`. Missing
    /// required arguments are a `Usage` error.
    pub fn parse(args: &[String]) -> Result<Self> {
        let Some(command) = args.first() else {
            return Ok(Command::Help);
        };
        let rest = &args[1..];

        match command.as_str() {
            "add" => {
                let (Some(amount), Some(_)) = (rest.first(), rest.get(1)) else {
                    return Err(usage("You must provide an amount and memo."));
                };
                let memo = rest[1..].join(" ");
                if memo.trim().is_empty() {
                    return Err(usage("You must provide an amount and memo."));
                }
                Ok(Command::Add {
                    amount: amount.clone(),
                    memo,
                })
            }
            "search" => {
                if rest.is_empty() {
                    return Err(usage("You must provide a search term."));
                }
                Ok(Command::Search {
                    query: rest.join(" "),
                })
            }
            "delete" => {
                let Some(raw) = rest.first() else {
                    return Err(usage("You must provide an id."));
                };
                let id = raw
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| usage(&format!("'{}' is not a valid expense id.", raw)))?;
                Ok(Command::Delete { id })
            }
            "clear" => Ok(Command::Clear),
            "list" => Ok(Command::List),
            "version" | "-v" | "--version" => Ok(Command::Version),
            _ => Ok(Command::Help),
        }
    }

    /// Help and version don't need the store
    pub fn needs_database(&self) -> bool {
        !matches!(self, Command::Help | Command::Version)
    }
}

fn usage(msg: &str) -> ExpenseError {
    ExpenseError::Usage(msg.to_string())
}

fn write_lines<W: Write>(out: &mut W, lines: &[String]) -> Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Execute a parsed command against the store, writing all output to `out`
pub async fn run<W: Write>(
    command: Command,
    db: &mut Database,
    confirm: &mut dyn Confirm,
    out: &mut W,
) -> Result<()> {
    match command {
        Command::Add { amount, memo } => {
            let amount: Amount = amount.parse()?;
            db.add(amount, &memo).await?;
        }
        Command::Search { query } => {
            let expenses = db.search(&query).await?;
            write_lines(out, &render::expense_report(&expenses))?;
        }
        Command::Delete { id } => match db.delete(id).await? {
            DeleteOutcome::NotFound(id) => writeln!(out, "{}", render::not_found(id))?,
            DeleteOutcome::Deleted(expense) => write_lines(out, &render::deleted(&expense))?,
        },
        Command::Clear => {
            write!(out, "{} ", CONFIRM_PROMPT)?;
            out.flush()?;
            if confirm.confirm()? {
                db.delete_all().await?;
                writeln!(out, "All expenses have been deleted.")?;
            }
        }
        Command::List => {
            let expenses = db.list().await?;
            write_lines(out, &render::expense_report(&expenses))?;
        }
        Command::Help => write_help(out)?,
        Command::Version => write_version(out)?,
    }

    Ok(())
}

pub fn write_help<W: Write>(out: &mut W) -> Result<()> {
    write!(out, "{}", usage_text())?;
    Ok(())
}

pub fn write_version<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "expense v{}", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}

pub fn usage_text() -> String {
    format!(
        r#"expense v{} - An expense recording system

USAGE:
    expense <COMMAND> [ARGS]

COMMANDS:
    add AMOUNT MEMO        Record a new expense
    clear                  Delete all expenses
    list                   List all expenses
    delete NUMBER          Remove expense with id NUMBER
    search QUERY           List expenses with a matching memo field

EXAMPLES:
    expense add 5.00 coffee
    expense search coffee
    expense delete 3

DATABASE:
    Stored in ~/.expenses/expenses.db unless EXPENSES_DATABASE points elsewhere.
"#,
        env!("CARGO_PKG_VERSION")
    )
}
