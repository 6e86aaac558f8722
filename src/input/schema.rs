use std::collections::BTreeMap;

use rusqlite::Connection;

use crate::error::{ReportError, Result};

pub const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("genomes", &["Accession"]),
    ("harley", &["Accession"]),
    (
        "summary",
        &[
            "sequence_accession",
            "sequence_src",
            "flag",
            "nter",
            "cter",
            "sequence",
        ],
    ),
    (
        "features",
        &[
            "sequence_id",
            "feature_id",
            "feature_start",
            "feature_end",
            "feature_src",
            "e-value",
        ],
    ),
    ("hits", &["sequence_id", "hit_src", "hit_e_value"]),
    ("ccya", &["sequence_id"]),
];

/// Auxiliary tables joined on a key column when present.
pub const OPTIONAL_TABLES: &[(&str, &str)] = &[("checkm", "Bin Id"), ("gtdbtk", "user_genome")];

/// Table and view columns as declared in the database, read once per run.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    tables: BTreeMap<String, Vec<String>>,
}

/// Qualified expressions for genome columns that may live in either
/// `genomes` or `harley`.
#[derive(Debug, Clone)]
pub struct GenomeColumns {
    pub organism: String,
    pub assembly_name: String,
    pub date: String,
}

impl Schema {
    pub fn load(conn: &Connection) -> Result<Self> {
        let mut stmt = conn.prepare(
            "SELECT name FROM sqlite_master WHERE type IN ('table', 'view') ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut tables = BTreeMap::new();
        for name in names {
            let mut info = conn.prepare(&format!("PRAGMA table_info({})", quote_ident(&name)))?;
            let columns = info
                .query_map([], |row| row.get::<_, String>(1))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            tables.insert(name, columns);
        }
        Ok(Self { tables })
    }

    #[cfg(test)]
    pub fn from_tables<I, T, C>(tables: I) -> Self
    where
        I: IntoIterator<Item = (T, Vec<C>)>,
        T: Into<String>,
        C: Into<String>,
    {
        Self {
            tables: tables
                .into_iter()
                .map(|(t, cols)| (t.into(), cols.into_iter().map(Into::into).collect()))
                .collect(),
        }
    }

    pub fn has_table(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    pub fn has_column(&self, table: &str, column: &str) -> bool {
        self.tables
            .get(table)
            .is_some_and(|cols| cols.iter().any(|c| c == column))
    }

    pub fn require_column(&self, table: &str, column: &str) -> Result<()> {
        if !self.has_table(table) {
            return Err(ReportError::MissingTable(table.to_string()));
        }
        if !self.has_column(table, column) {
            return Err(ReportError::MissingColumn(format!("{table}.{column}")));
        }
        Ok(())
    }

    /// Checks every table and column the report reads. Run before any query.
    pub fn validate(&self) -> Result<()> {
        for (table, columns) in REQUIRED_COLUMNS {
            for column in *columns {
                self.require_column(table, column)?;
            }
        }
        self.genome_columns()?;
        for (table, key) in OPTIONAL_TABLES {
            if !self.has_table(table) {
                tracing::warn!(table = %table, "optional table not found; its columns will be reported as NA");
            } else if !self.has_column(table, key) {
                return Err(ReportError::MissingColumn(format!("{table}.{key}")));
            }
        }
        Ok(())
    }

    /// First `alias."column"` among `(alias, table)` candidates that declares
    /// the column, in candidate order.
    pub fn resolve_optional(&self, candidates: &[(&str, &str)], column: &str) -> Option<String> {
        candidates
            .iter()
            .find(|(_, table)| self.has_column(table, column))
            .map(|(alias, _)| format!("{alias}.{}", quote_ident(column)))
    }

    pub fn resolve(&self, candidates: &[(&str, &str)], column: &str) -> Result<String> {
        self.resolve_optional(candidates, column).ok_or_else(|| {
            let tables = candidates
                .iter()
                .map(|(_, t)| *t)
                .collect::<Vec<_>>()
                .join("|");
            ReportError::MissingColumn(format!("{tables}.{column}"))
        })
    }

    pub fn genome_columns(&self) -> Result<GenomeColumns> {
        let candidates = [("g", "genomes"), ("h", "harley")];
        Ok(GenomeColumns {
            organism: self.resolve(&candidates, "Organism")?,
            assembly_name: self.resolve(&candidates, "Assembly name")?,
            date: self.resolve(&candidates, "Date")?,
        })
    }
}

pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
