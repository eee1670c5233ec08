//! SQL text derivation for the downstream table.
//!
//! One column per distinct valid dot, typed by its kind. Connecting to a
//! database and executing these statements is the embedder's job; this module
//! only pins the storage contract the record stream is written against.

use crate::template::{Dot, DotKind};

fn sql_type(kind: DotKind) -> &'static str {
    match kind {
        DotKind::Digits => "INTEGER",
        DotKind::Float => "REAL",
        DotKind::Text => "TEXT",
    }
}

/// `CREATE TABLE` statement for the derived columns. A column literally named
/// `id` (case-insensitive) becomes the primary key.
pub fn create_table_sql(table: &str, columns: &[Dot]) -> String {
    let cols: Vec<String> = columns
        .iter()
        .map(|dot| {
            let mut col = format!("{} {}", dot.name, sql_type(dot.kind));
            if dot.name.eq_ignore_ascii_case("id") {
                col.push_str(" PRIMARY KEY");
            }
            col
        })
        .collect();
    format!("CREATE TABLE {table} ({})", cols.join(", "))
}

/// Parameterised `INSERT` statement matching [`create_table_sql`]'s column
/// order.
pub fn insert_sql(table: &str, columns: &[Dot]) -> String {
    let names: Vec<&str> = columns.iter().map(|d| d.name.as_str()).collect();
    let params = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT INTO {table} ({}) VALUES ({params})",
        names.join(", ")
    )
}
