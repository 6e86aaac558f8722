use crate::model::genotype::{Genotype, ccya_genotype};
use crate::model::nter::NterType;

/// Display-only row: column name to JSON value, column order preserved.
pub type DynRow = serde_json::Map<String, serde_json::Value>;

/// One row of the genome/assembly/summary join. A genome with several
/// sequences appears once per sequence; a genome without one appears once
/// with the sequence fields empty.
#[derive(Debug, Clone, PartialEq)]
pub struct GenomeEntry {
    pub accession: String,
    pub organism: Option<String>,
    pub assembly_name: Option<String>,
    pub date: Option<String>,
    pub sequence_accession: Option<String>,
    pub flag: Option<String>,
    pub nter: Option<String>,
}

impl GenomeEntry {
    pub fn genotype(&self) -> Genotype {
        ccya_genotype(self.flag.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    pub sequence_id: String,
    pub feature_id: String,
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub source: Option<String>,
    pub evalue: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SequenceRecord {
    pub accession: String,
    pub source: String,
    pub organism: Option<String>,
    pub date: Option<String>,
    pub flag: Option<String>,
    pub nter: NterType,
    pub cter: Option<String>,
    pub length: usize,
    pub nter_neighbor: Option<String>,
    pub features: Vec<FeatureRecord>,
}

impl SequenceRecord {
    pub fn genotype(&self) -> Genotype {
        ccya_genotype(self.flag.as_deref())
    }
}
