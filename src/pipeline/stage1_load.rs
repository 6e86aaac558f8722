use crate::error::Result;
use crate::input::Database;
use crate::input::genomes::load_genome_entries;
use crate::input::sequences::load_sequence_records;
use crate::model::records::{GenomeEntry, SequenceRecord};

/// Everything the chart builders read, materialized once per run.
#[derive(Debug, Clone)]
pub struct Stage1Output {
    /// Every genome, once per linked sequence or once when it has none.
    pub genomes: Vec<GenomeEntry>,
    /// Genome rows that carry a sequence.
    pub genome_sequences: Vec<GenomeEntry>,
    pub sequences: Vec<SequenceRecord>,
}

impl Stage1Output {
    /// Sequences whose flag marks a calcyanin (ccyA+).
    pub fn calcyanin_sequences(&self) -> usize {
        self.sequences
            .iter()
            .filter(|s| s.genotype().is_positive())
            .count()
    }
}

pub fn run_stage1(db: &Database) -> Result<Stage1Output> {
    let genomes = load_genome_entries(&db.conn, &db.schema, false)?;
    let genome_sequences = load_genome_entries(&db.conn, &db.schema, true)?;
    let sequences = load_sequence_records(&db.conn, &db.schema)?;
    let out = Stage1Output {
        genomes,
        genome_sequences,
        sequences,
    };
    tracing::info!(
        genomes = out.genomes.len(),
        sequences = out.sequences.len(),
        calcyanin = out.calcyanin_sequences(),
        "loaded report data"
    );
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_load.rs"]
mod tests;
