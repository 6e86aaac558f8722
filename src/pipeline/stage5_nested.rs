use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::input::Database;
use crate::input::genomes::load_genomes_by_organism;
use crate::input::sequences::{
    SequenceTable, load_accession_sequences, load_sorted_rows, rows_to_object,
};

#[derive(Debug, Clone)]
pub struct Stage5Output {
    /// organism -> accession -> metadata + `sequences`.
    pub record: Value,
    /// Organisms with at least one calcyanin accession.
    pub ccya_plus: usize,
    /// Organisms with at least one accession lacking calcyanin.
    pub ccya_minus: usize,
}

pub fn run_stage5(db: &Database) -> Result<Stage5Output> {
    let genomes = load_genomes_by_organism(&db.conn, &db.schema)?;
    let mut ccya_plus: BTreeSet<&str> = BTreeSet::new();
    let mut ccya_minus: BTreeSet<&str> = BTreeSet::new();
    let mut organisms = Map::new();

    for (organism, rows) in &genomes {
        let mut accessions = Map::new();
        for row in rows {
            let Some(accession) = row.get("Accession").and_then(Value::as_str) else {
                continue;
            };
            let mut entry = row.clone();

            let sequences = load_accession_sequences(&db.conn, accession)?;
            if sequences.is_empty() {
                ccya_minus.insert(organism);
            } else {
                ccya_plus.insert(organism);
            }

            let mut seq_map = Map::new();
            for (seq_id, mut seq_row) in sequences {
                let features = load_sorted_rows(&db.conn, SequenceTable::Features, &seq_id)?;
                let hits = load_sorted_rows(&db.conn, SequenceTable::Hits, &seq_id)?;
                seq_row.insert("features".to_string(), rows_to_object(features));
                seq_row.insert("hits".to_string(), rows_to_object(hits));
                seq_map.insert(seq_id, Value::Object(seq_row));
            }
            entry.insert("sequences".to_string(), Value::Object(seq_map));
            accessions.insert(accession.to_string(), Value::Object(entry));
        }

        if ccya_plus.contains(organism.as_str()) || ccya_minus.contains(organism.as_str()) {
            organisms.insert(organism.clone(), Value::Object(accessions));
        }
    }

    Ok(Stage5Output {
        ccya_plus: ccya_plus.len(),
        ccya_minus: ccya_minus.len(),
        record: Value::Object(organisms),
    })
}

/// Pretty JSON with a four-space indent.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_nested.rs"]
mod tests;
