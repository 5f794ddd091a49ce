//! Table definitions loaded from a directory of SQL files.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, ToolError};

static TABLE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

// Optional ordering prefix such as `001_` in `001_users.sql`.
static ORDER_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+_").unwrap());

/// One table and the DDL that creates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDef {
    pub name: String,
    pub create_sql: String,
}

impl TableDef {
    pub fn new(name: impl Into<String>, create_sql: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if !TABLE_NAME.is_match(&name) {
            return Err(ToolError::Schema(format!("invalid table name '{name}'")));
        }
        Ok(Self {
            name,
            create_sql: create_sql.into(),
        })
    }

    /// Statement that removes this table and anything depending on it.
    pub fn drop_sql(&self) -> String {
        format!("DROP TABLE IF EXISTS \"{}\" CASCADE", self.name)
    }
}

/// Ordered set of tables: created first to last, dropped last to first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDefinition {
    tables: Vec<TableDef>,
}

impl SchemaDefinition {
    pub fn new(tables: Vec<TableDef>) -> Self {
        Self { tables }
    }

    /// Load every `*.sql` file in `dir`, ordered by file name.
    ///
    /// The table name is the file stem without a leading numeric prefix, so
    /// `010_posts.sql` defines `posts`.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|source| ToolError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|source| ToolError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?
                .path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "sql") {
                files.push(path);
            }
        }
        files.sort();

        let mut tables = Vec::with_capacity(files.len());
        for path in files {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let name = ORDER_PREFIX.replace(&stem, "").into_owned();
            let create_sql = fs::read_to_string(&path).map_err(|source| ToolError::Io {
                path: path.clone(),
                source,
            })?;
            if create_sql.trim().is_empty() {
                return Err(ToolError::Schema(format!(
                    "'{}' contains no SQL",
                    path.display()
                )));
            }
            tables.push(TableDef::new(name, create_sql)?);
        }

        if tables.is_empty() {
            return Err(ToolError::Schema(format!(
                "no table definitions (*.sql) found in '{}'",
                dir.display()
            )));
        }

        tracing::debug!(dir = %dir.display(), tables = tables.len(), "loaded schema definition");
        Ok(Self { tables })
    }

    /// Tables in creation order.
    pub fn tables(&self) -> &[TableDef] {
        &self.tables
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
