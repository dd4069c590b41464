//! Loading a JSON recipe array into the store
//!
//! Each record is validated and inserted on its own through
//! [`rlp_api::db::create_recipe`], so one bad or duplicate record never undoes
//! the others.

use rlp_api::db::create_recipe;
use rlp_common::validation::validate_new_recipe;
use rlp_common::{Error, ValidationErrors};
use serde_json::Value;
use sqlx::AnyPool;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{ImportError, Result};

/// Why a record was not inserted
#[derive(Debug)]
pub enum RecordFailure {
    Invalid(ValidationErrors),
    /// A recipe with the same name and job is already stored
    Conflict,
    Store(String),
}

impl fmt::Display for RecordFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordFailure::Invalid(errors) => write!(f, "invalid: {}", errors),
            RecordFailure::Conflict => write!(f, "already exists"),
            RecordFailure::Store(text) => write!(f, "store error: {}", text),
        }
    }
}

/// A record that was not inserted
#[derive(Debug)]
pub struct FailedRecord {
    /// 1-indexed position in the input array
    pub index: usize,
    pub name: Option<String>,
    pub failure: RecordFailure,
}

/// Outcome of loading one input
#[derive(Debug, Default)]
pub struct LoadReport {
    pub inserted: usize,
    pub failed: Vec<FailedRecord>,
}

impl LoadReport {
    pub fn conflicts(&self) -> usize {
        self.failed
            .iter()
            .filter(|f| matches!(f.failure, RecordFailure::Conflict))
            .count()
    }

    /// True when every record was inserted or already present
    pub fn is_clean(&self) -> bool {
        self.failed
            .iter()
            .all(|f| matches!(f.failure, RecordFailure::Conflict))
    }
}

/// Parse a JSON array of recipe objects from any reader
pub fn read_records<R: Read>(input: R) -> Result<Vec<Value>> {
    match serde_json::from_reader(input)? {
        Value::Array(records) => Ok(records),
        other => Err(ImportError::InvalidInput(format!(
            "expected a JSON array of recipes, found {}",
            json_kind(&other)
        ))),
    }
}

/// Parse a JSON array file as written by the convert step
pub fn read_records_file(path: &Path) -> Result<Vec<Value>> {
    let file = File::open(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_records(BufReader::new(file))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

async fn load_record(db: &AnyPool, record: &Value) -> std::result::Result<i64, RecordFailure> {
    let object = record.as_object().ok_or_else(|| {
        RecordFailure::Invalid(ValidationErrors::single(
            "body",
            "must be a JSON object",
            rlp_common::FieldErrorKind::Type,
        ))
    })?;
    let recipe = validate_new_recipe(object).map_err(RecordFailure::Invalid)?;

    match create_recipe(db, &recipe).await {
        Ok(created) => Ok(created.recipe.id),
        Err(Error::Conflict(_)) => Err(RecordFailure::Conflict),
        Err(e) => Err(RecordFailure::Store(e.to_string())),
    }
}

/// Insert every record, collecting per-record failures
pub async fn load_records(db: &AnyPool, records: &[Value]) -> LoadReport {
    let mut report = LoadReport::default();

    for (i, record) in records.iter().enumerate() {
        let index = i + 1;
        match load_record(db, record).await {
            Ok(id) => {
                debug!(index, recipe_id = id, "Inserted record");
                report.inserted += 1;
            }
            Err(failure) => {
                let name = record
                    .get("name")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                warn!(index, name = name.as_deref().unwrap_or(""), "Skipped record: {}", failure);
                report.failed.push(FailedRecord {
                    index,
                    name,
                    failure,
                });
            }
        }
    }

    report
}
