use thiserror::Error;

use crate::{
    storage::table::{InsertResult, Table},
    types::{
        EMAIL_MAX_LEN, USERNAME_MAX_LEN,
        error::Result,
        row::Row,
    },
};

/// A parsed command, ready to run against a table.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Insert(Row),
    Select,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrepareError {
    #[error("Unrecognized keyword at start of '{0}'")]
    Unrecognized(String),

    #[error("Syntax error. Could not parse statement.")]
    SyntaxError,

    #[error("String is too long.")]
    StringTooLong,

    #[error("ID must be positive.")]
    NegativeId,
}

/// What a successfully executed statement produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecuteResult {
    Inserted,
    TableFull,
    Rows(Vec<Row>),
}

/// Parses `insert <id> <username> <email>` or `select`.
pub fn prepare(input: &str) -> std::result::Result<Statement, PrepareError> {
    let mut tokens = input.split_whitespace();
    match tokens.next() {
        Some("insert") => prepare_insert(tokens),
        Some("select") => Ok(Statement::Select),
        _ => Err(PrepareError::Unrecognized(input.trim().to_string())),
    }
}

fn prepare_insert<'a>(
    mut tokens: impl Iterator<Item = &'a str>,
) -> std::result::Result<Statement, PrepareError> {
    let (id_token, username, email) = match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(id), Some(username), Some(email)) => (id, username, email),
        _ => return Err(PrepareError::SyntaxError),
    };

    let id: i64 = id_token.parse().map_err(|_| PrepareError::SyntaxError)?;
    if id < 0 {
        return Err(PrepareError::NegativeId);
    }
    let id = u32::try_from(id).map_err(|_| PrepareError::SyntaxError)?;

    if username.len() > USERNAME_MAX_LEN || email.len() > EMAIL_MAX_LEN {
        return Err(PrepareError::StringTooLong);
    }

    let row = Row::new(id, username, email).map_err(|_| PrepareError::StringTooLong)?;
    Ok(Statement::Insert(row))
}

/// Runs a prepared statement. Capacity exhaustion comes back as
/// `ExecuteResult::TableFull`; only environment failures are errors.
pub fn execute(statement: &Statement, table: &mut Table) -> Result<ExecuteResult> {
    match statement {
        Statement::Insert(row) => match table.insert(row)? {
            InsertResult::Inserted => Ok(ExecuteResult::Inserted),
            InsertResult::TableFull => Ok(ExecuteResult::TableFull),
        },
        Statement::Select => {
            let rows = table.select().collect::<Result<Vec<Row>>>()?;
            Ok(ExecuteResult::Rows(rows))
        }
    }
}
