//! SQL statement generation for the randomized workload
//!
//! Tables are named `table{t}` with an integer primary key `key` and integer
//! columns `field0..field{n-1}`. Statements are plain strings with inlined
//! literal values, so the text that reaches SQLite is exactly what is logged.

use rand::seq::index;
use rand::Rng;

use crate::config::BenchConfig;
use crate::errors::{BenchError, Result};

/// Column layout and value range shared by every generated statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementShape {
    pub fields: usize,
    pub update_fields: usize,
    pub value_bound: u32,
}

impl StatementShape {
    pub fn from_config(config: &BenchConfig) -> Self {
        Self {
            fields: config.fields,
            update_fields: config.update_fields,
            value_bound: config.value_bound,
        }
    }
}

pub fn table_name(table: usize) -> String {
    format!("table{}", table)
}

/// `create table table{t} (key integer primary key,field0 integer,...)`
pub fn create_table(table: usize, nfield: usize) -> String {
    let columns: Vec<String> = std::iter::once("key integer primary key".to_string())
        .chain((0..nfield).map(|f| format!("field{} integer", f)))
        .collect();
    format!("create table {} ({})", table_name(table), columns.join(","))
}

/// Uniform value in `[0, bound)`
pub fn random_value<R: Rng + ?Sized>(rng: &mut R, bound: u32) -> u32 {
    rng.random_range(0..bound)
}

/// Insert one row with a random value in every field
pub fn random_insert<R: Rng + ?Sized>(rng: &mut R, table: usize, shape: &StatementShape) -> String {
    let columns: Vec<String> = (0..shape.fields).map(|f| format!("field{}", f)).collect();
    let values: Vec<String> = (0..shape.fields)
        .map(|_| random_value(rng, shape.value_bound).to_string())
        .collect();
    format!(
        "insert into {} ({}) values ({})",
        table_name(table),
        columns.join(","),
        values.join(",")
    )
}

/// Rewrite `update_fields` distinct fields of a random existing row
///
/// Field indices are listed in ascending order. The key is drawn from
/// `[1, nrow]`, which are exactly the rowids SQLite assigns to the first
/// `nrow` inserts into an empty table.
///
/// # Errors
///
/// `NoRowsToUpdate` when `nrow == 0`; `TooFewFields` when the shape has
/// fewer fields than an update touches.
pub fn random_update<R: Rng + ?Sized>(
    rng: &mut R,
    table: usize,
    nrow: u64,
    shape: &StatementShape,
) -> Result<String> {
    if nrow == 0 {
        return Err(BenchError::NoRowsToUpdate { table });
    }
    if shape.fields < shape.update_fields {
        return Err(BenchError::TooFewFields {
            fields: shape.fields,
            required: shape.update_fields,
        });
    }

    let mut fields = index::sample(rng, shape.fields, shape.update_fields).into_vec();
    fields.sort_unstable();

    let assignments: Vec<String> = fields
        .iter()
        .map(|f| format!("field{}={}", f, random_value(rng, shape.value_bound)))
        .collect();
    let key = rng.random_range(1..=nrow);

    Ok(format!(
        "update {} set {} where key={}",
        table_name(table),
        assignments.join(","),
        key
    ))
}
