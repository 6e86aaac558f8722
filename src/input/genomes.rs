use std::collections::BTreeMap;

use rusqlite::Connection;

use crate::error::Result;
use crate::input::rows::{NA, opt_text, read_dyn_row};
use crate::input::schema::{OPTIONAL_TABLES, Schema, quote_ident};
use crate::model::records::{DynRow, GenomeEntry};

/// Genome metadata surfaced in the nested report record, in display order.
pub const GENOME_METADATA_COLUMNS: &[&str] = &[
    "Accession",
    "Assembly name",
    "Date",
    "Submitter",
    "Submission date",
    "Isolate",
    "TaxID",
    "Organism",
    "Biosample",
    "Isolation source",
    "Environment (biome)",
    "Geographic location",
    "Culture collection",
    "Collection date",
    "Sample type",
    "Completeness",
    "Contamination",
    "Strain heterogeneity",
    "Genome size (bp)",
    "# scaffolds",
    "# contigs",
    "N50 (scaffolds)",
    "N50 (contigs)",
    "# predicted genes",
    "classification",
    "fastani_reference",
    "fastani_ani",
];

/// Every genome joined with its assembly row and, when present, its
/// sequences. `sequences_only` turns the summary join into an inner join.
pub fn load_genome_entries(
    conn: &Connection,
    schema: &Schema,
    sequences_only: bool,
) -> Result<Vec<GenomeEntry>> {
    let cols = schema.genome_columns()?;
    let join = if sequences_only { "JOIN" } else { "LEFT JOIN" };
    let sql = format!(
        "SELECT g.\"Accession\", {}, {}, {}, s.\"sequence_accession\", s.\"flag\", s.\"nter\" \
         FROM genomes AS g \
         JOIN harley AS h ON h.\"Accession\" = g.\"Accession\" \
         {join} summary AS s ON g.\"Accession\" = s.\"sequence_src\"",
        cols.organism, cols.assembly_name, cols.date
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(GenomeEntry {
                accession: opt_text(row, 0)?.unwrap_or_default(),
                organism: opt_text(row, 1)?,
                assembly_name: opt_text(row, 2)?,
                date: opt_text(row, 3)?,
                sequence_accession: opt_text(row, 4)?,
                flag: opt_text(row, 5)?,
                nter: opt_text(row, 6)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    tracing::debug!(rows = rows.len(), sequences_only, "loaded genome entries");
    Ok(rows)
}

fn genome_metadata_sql(schema: &Schema) -> String {
    let mut candidates = vec![("h", "harley"), ("g", "genomes")];
    let mut joins = String::new();
    for (alias, &(table, key)) in ["c", "t"].into_iter().zip(OPTIONAL_TABLES) {
        if schema.has_table(table) {
            candidates.push((alias, table));
            joins.push_str(&format!(
                " LEFT JOIN {} AS {alias} ON g.\"Accession\" = {alias}.{}",
                quote_ident(table),
                quote_ident(key)
            ));
        }
    }

    let select = GENOME_METADATA_COLUMNS
        .iter()
        .map(|column| match schema.resolve_optional(&candidates, column) {
            Some(expr) => format!("{expr} AS {}", quote_ident(column)),
            None => format!("NULL AS {}", quote_ident(column)),
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "SELECT {select} FROM harley AS h JOIN genomes AS g ON g.\"Accession\" = h.\"Accession\"{joins}"
    )
}

/// Metadata rows grouped by organism name (NULL organisms group under "NA").
pub fn load_genomes_by_organism(
    conn: &Connection,
    schema: &Schema,
) -> Result<BTreeMap<String, Vec<DynRow>>> {
    let sql = genome_metadata_sql(schema);
    let mut stmt = conn.prepare(&sql)?;
    let columns = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<_>>();
    let rows = stmt
        .query_map([], |row| read_dyn_row(row, &columns))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut out: BTreeMap<String, Vec<DynRow>> = BTreeMap::new();
    for row in rows {
        let organism = row
            .get("Organism")
            .and_then(|v| v.as_str())
            .unwrap_or(NA)
            .to_string();
        out.entry(organism).or_default().push(row);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/genomes.rs"]
mod tests;
