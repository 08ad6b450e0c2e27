// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! SQL builders for the items table.
//!
//! Builders are pure: they turn a value object into SQL text with `$n`
//! placeholders plus the values to bind, in placeholder order. User input is
//! only ever bound, never spliced into the text; sort columns come from the
//! closed [`SortField`](crate::item::SortField) set.
//!
//! # Generated SQL
//!
//! ```sql
//! SELECT id, title, description, price FROM items
//! WHERE id = $1 AND title LIKE $2
//! ORDER BY title DESC, id ASC
//! LIMIT $3 OFFSET $4
//! ```

use crate::item::{COLUMNS, ColumnValue, ItemChanges, ItemQuery, SortField, TABLE};

/// A value to bind to the next placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Bind {
    /// `BIGINT` value.
    Int(i64),
    /// `DOUBLE PRECISION` value.
    Float(f64),
    /// `TEXT` value.
    Text(String)
}

/// SQL text plus its bind values.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// SQL text with `$n` placeholders.
    pub sql:   String,
    /// Values for `$1..$n`, in order.
    pub binds: Vec<Bind>
}

/// Placeholder for parameter at given index (1-based).
fn placeholder(index: usize) -> String {
    format!("${index}")
}

/// Escape `LIKE` metacharacters and wrap in `%...%` for substring matching.
///
/// PostgreSQL's default `LIKE` escape character is the backslash.
///
/// ```text
/// "50%_off" -> "%50\%\_off%"
/// ```
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Build the list query for `query`.
pub fn select_items(query: &ItemQuery) -> Statement {
    let mut conditions: Vec<String> = Vec::new();
    let mut binds: Vec<Bind> = Vec::new();
    let mut param_idx: usize = 1;

    if let Some(id) = query.id {
        conditions.push(format!("id = {}", placeholder(param_idx)));
        binds.push(Bind::Int(id));
        param_idx += 1;
    }
    if let Some(title) = &query.title {
        conditions.push(format!("title LIKE {}", placeholder(param_idx)));
        binds.push(Bind::Text(contains_pattern(title)));
        param_idx += 1;
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    let mut order_by = format!("{} {}", query.sort.column(), query.direction.as_sql());
    if query.sort != SortField::Id {
        order_by.push_str(", id ASC");
    }

    let limit_idx = param_idx;
    param_idx += 1;
    let offset_idx = param_idx;
    binds.push(Bind::Int(query.page.limit()));
    binds.push(Bind::Int(query.page.offset()));

    Statement {
        sql: format!(
            "SELECT {COLUMNS} FROM {TABLE}{where_clause} ORDER BY {order_by} LIMIT {} OFFSET {}",
            placeholder(limit_idx),
            placeholder(offset_idx)
        ),
        binds
    }
}

/// Build `UPDATE items SET ... WHERE id = $n`.
///
/// Returns `None` when `changes` is empty, since an empty `SET` list is not
/// valid SQL.
pub fn update_item(id: i64, changes: &ItemChanges) -> Option<Statement> {
    let columns = changes.columns();
    if columns.is_empty() {
        return None;
    }

    let set_clause = columns
        .iter()
        .enumerate()
        .map(|(i, (column, _))| format!("{} = {}", column, placeholder(i + 1)))
        .collect::<Vec<_>>()
        .join(", ");
    let where_placeholder = placeholder(columns.len() + 1);

    let mut binds: Vec<Bind> = columns
        .into_iter()
        .map(|(_, value)| match value {
            ColumnValue::Text(v) => Bind::Text(v.to_string()),
            ColumnValue::Float(v) => Bind::Float(v)
        })
        .collect();
    binds.push(Bind::Int(id));

    Some(Statement {
        sql: format!("UPDATE {TABLE} SET {set_clause} WHERE id = {where_placeholder}"),
        binds
    })
}

/// `INSERT ... RETURNING` with the full column list.
pub fn insert_item() -> String {
    format!(
        "INSERT INTO {TABLE} (title, description, price) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
    )
}

/// `SELECT` by primary key.
pub fn select_item_by_id() -> String {
    format!("SELECT {COLUMNS} FROM {TABLE} WHERE id = $1")
}

/// `DELETE` by primary key.
pub fn delete_item() -> String {
    format!("DELETE FROM {TABLE} WHERE id = $1")
}
