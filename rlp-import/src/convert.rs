//! CSV row conversion
//!
//! Each data row is turned into a JSON object keyed by the header names and
//! run through [`validate_new_recipe`]. Valid rows become [`NewRecipe`]s;
//! invalid rows are collected with their line number and field errors.

use rlp_common::validation::validate_new_recipe;
use rlp_common::{FieldErrorKind, NewRecipe, ValidationErrors};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

use crate::error::{ImportError, Result};

/// A data row that failed validation
#[derive(Debug, Clone)]
pub struct RejectedRow {
    /// 1-indexed line in the input file (header is line 1)
    pub line: u64,
    pub errors: ValidationErrors,
}

/// Outcome of converting one CSV input
#[derive(Debug, Default)]
pub struct Conversion {
    pub recipes: Vec<NewRecipe>,
    pub rejected: Vec<RejectedRow>,
}

fn row_to_object(headers: &[String], record: &csv::StringRecord) -> Map<String, Value> {
    // Short rows leave trailing columns absent; extra cells are ignored
    headers
        .iter()
        .zip(record.iter())
        .map(|(header, cell)| (header.clone(), Value::String(cell.trim().to_string())))
        .collect()
}

/// Convert headered CSV from any reader
pub fn convert_reader<R: Read>(input: R) -> Result<Conversion> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|s| s.trim().to_string())
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(ImportError::EmptyData("No columns found".to_string()));
    }

    let mut conversion = Conversion::default();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                let errors = ValidationErrors::single("row", e.to_string(), FieldErrorKind::Parse);
                debug!(line, "Rejected row: {}", errors);
                conversion.rejected.push(RejectedRow { line, errors });
                continue;
            }
        };

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        match validate_new_recipe(&row_to_object(&headers, &record)) {
            Ok(recipe) => {
                debug!(line, name = %recipe.name, job = %recipe.job, "Accepted row");
                conversion.recipes.push(recipe);
            }
            Err(errors) => {
                debug!(line, "Rejected row: {}", errors);
                conversion.rejected.push(RejectedRow { line, errors });
            }
        }
    }

    Ok(conversion)
}

/// Convert a CSV file
pub fn convert_file(path: &Path) -> Result<Conversion> {
    let file = File::open(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    convert_reader(file)
}

/// Write recipes as a pretty-printed JSON array
pub fn write_json(path: &Path, recipes: &[NewRecipe]) -> Result<()> {
    let io_error = |source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, recipes)?;
    writer.write_all(b"\n").map_err(io_error)?;
    writer.flush().map_err(io_error)?;
    Ok(())
}
