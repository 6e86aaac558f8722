use std::collections::{HashMap, HashSet};

use rusqlite::Connection;
use serde_json::Value;

use crate::error::Result;
use crate::input::rows::{compare_json, opt_int, opt_real, opt_text, read_dyn_row};
use crate::input::schema::Schema;
use crate::model::nter::NterType;
use crate::model::records::{DynRow, FeatureRecord, SequenceRecord};

/// Every summarized sequence with its source genome and feature list, in
/// query order. A sequence listed twice keeps its first row.
pub fn load_sequence_records(conn: &Connection, schema: &Schema) -> Result<Vec<SequenceRecord>> {
    let cols = schema.genome_columns()?;
    let neighbor = schema
        .resolve_optional(&[("s", "summary")], "nter_neighbor")
        .unwrap_or_else(|| "NULL".to_string());
    let sql = format!(
        "SELECT s.\"sequence_accession\", s.\"sequence_src\", {}, {}, \
         s.\"flag\", s.\"nter\", s.\"cter\", s.\"sequence\", {neighbor} \
         FROM summary AS s \
         JOIN genomes AS g ON g.\"Accession\" = s.\"sequence_src\" \
         LEFT JOIN harley AS h ON h.\"Accession\" = g.\"Accession\"",
        cols.organism, cols.date
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], |row| {
            let nter = opt_text(row, 5)?;
            let sequence = opt_text(row, 7)?.unwrap_or_default();
            Ok(SequenceRecord {
                accession: opt_text(row, 0)?.unwrap_or_default(),
                source: opt_text(row, 1)?.unwrap_or_default(),
                organism: opt_text(row, 2)?,
                date: opt_text(row, 3)?,
                flag: opt_text(row, 4)?,
                nter: NterType::from_stored(nter.as_deref()),
                cter: opt_text(row, 6)?,
                length: sequence.chars().count(),
                nter_neighbor: opt_text(row, 8)?,
                features: Vec::new(),
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut features = load_features(conn)?;
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(rows.len());
    for mut record in rows {
        if !seen.insert(record.accession.clone()) {
            tracing::debug!(sequence = %record.accession, "duplicate sequence row ignored");
            continue;
        }
        record.features = features.remove(&record.accession).unwrap_or_default();
        out.push(record);
    }
    tracing::debug!(sequences = out.len(), "loaded sequence records");
    Ok(out)
}

fn load_features(conn: &Connection) -> Result<HashMap<String, Vec<FeatureRecord>>> {
    let mut stmt = conn.prepare(
        "SELECT f.\"sequence_id\", f.\"feature_id\", f.\"feature_start\", f.\"feature_end\", \
         f.\"feature_src\", f.\"e-value\" \
         FROM features AS f JOIN summary AS s ON s.\"sequence_accession\" = f.\"sequence_id\"",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(FeatureRecord {
                sequence_id: opt_text(row, 0)?.unwrap_or_default(),
                feature_id: opt_text(row, 1)?.unwrap_or_default(),
                start: opt_int(row, 2)?,
                end: opt_int(row, 3)?,
                source: opt_text(row, 4)?,
                evalue: opt_real(row, 5)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut out: HashMap<String, Vec<FeatureRecord>> = HashMap::new();
    for feature in rows {
        out.entry(feature.sequence_id.clone())
            .or_default()
            .push(feature);
    }
    Ok(out)
}

/// Calcyanin rows (`summary` joined with `ccya`) of one genome accession,
/// keyed by sequence id. The key column is not repeated inside the row.
pub fn load_accession_sequences(
    conn: &Connection,
    accession: &str,
) -> Result<Vec<(String, DynRow)>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM summary AS s JOIN ccya AS c ON c.\"sequence_id\" = s.\"sequence_accession\" \
         WHERE s.\"sequence_src\" = ?1",
    )?;
    let columns = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<_>>();
    let key_idx = columns.iter().position(|c| c == "sequence_id");
    let rows = stmt
        .query_map([accession], |row| {
            let key = match key_idx {
                Some(idx) => opt_text(row, idx)?.unwrap_or_default(),
                None => String::new(),
            };
            let data = read_dyn_row(row, &columns)?
                .into_iter()
                .filter(|(name, _)| name != "sequence_id")
                .collect::<DynRow>();
            Ok((key, data))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut out: Vec<(String, DynRow)> = Vec::with_capacity(rows.len());
    for (key, data) in rows {
        match out.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = data,
            None => out.push((key, data)),
        }
    }
    Ok(out)
}

/// Rows of `features` or `hits` for one sequence, sorted by the two given
/// columns and keyed by their position in the unsorted result.
pub fn load_sorted_rows(
    conn: &Connection,
    table: SequenceTable,
    sequence_id: &str,
) -> Result<Vec<(String, DynRow)>> {
    let (sql, keys) = match table {
        SequenceTable::Features => (
            "SELECT * FROM features AS f WHERE f.\"sequence_id\" = ?1",
            ["feature_id", "e-value"],
        ),
        SequenceTable::Hits => (
            "SELECT * FROM hits AS f WHERE f.\"sequence_id\" = ?1",
            ["hit_src", "hit_e_value"],
        ),
    };
    let mut stmt = conn.prepare_cached(sql)?;
    let columns = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<_>>();
    let mut rows = stmt
        .query_map([sequence_id], |row| read_dyn_row(row, &columns))?
        .collect::<rusqlite::Result<Vec<_>>>()?
        .into_iter()
        .enumerate()
        .map(|(idx, row)| (idx.to_string(), row))
        .collect::<Vec<_>>();

    rows.sort_by(|(_, a), (_, b)| {
        compare_json(a.get(keys[0]), b.get(keys[0]))
            .then_with(|| compare_json(a.get(keys[1]), b.get(keys[1])))
    });
    Ok(rows)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceTable {
    Features,
    Hits,
}

pub fn rows_to_object(rows: Vec<(String, DynRow)>) -> Value {
    let mut map = serde_json::Map::new();
    for (key, row) in rows {
        map.insert(key, Value::Object(row));
    }
    Value::Object(map)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/sequences.rs"]
mod tests;
