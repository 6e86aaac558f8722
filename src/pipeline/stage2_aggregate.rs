use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::{ReportError, Result};
use crate::input::rows::NA;
use crate::model::genotype::{FLAG_KNOWN_NTER, assembly_uid, assembly_uid_version, db_genotype};
use crate::model::nter::NterType;
use crate::model::records::{GenomeEntry, SequenceRecord};

/// Granularity at which genome rows are collapsed before counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    Organism,
    Uid,
    Uidv,
    Accession,
    SequenceAccession,
}

impl GroupKey {
    pub fn from_column(name: &str) -> Result<Self> {
        match name {
            "Organism" => Ok(GroupKey::Organism),
            "uid" => Ok(GroupKey::Uid),
            "uidv" => Ok(GroupKey::Uidv),
            "Accession" => Ok(GroupKey::Accession),
            "sequence_accession" => Ok(GroupKey::SequenceAccession),
            other => Err(ReportError::MissingColumn(other.to_string())),
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            GroupKey::Organism => "Organism",
            GroupKey::Uid => "uid",
            GroupKey::Uidv => "uidv",
            GroupKey::Accession => "Accession",
            GroupKey::SequenceAccession => "sequence_accession",
        }
    }

    pub fn value(self, entry: &GenomeEntry) -> Option<&str> {
        match self {
            GroupKey::Organism => entry.organism.as_deref(),
            GroupKey::Uid => Some(assembly_uid(&entry.accession)),
            GroupKey::Uidv => Some(assembly_uid_version(&entry.accession)),
            GroupKey::Accession => Some(entry.accession.as_str()),
            GroupKey::SequenceAccession => entry.sequence_accession.as_deref(),
        }
    }
}

/// Redundancy levels shown side by side, with the legend label of each.
pub const REDUNDANCY_LEVELS: &[(&str, &str)] = &[
    ("Organism", "Strain<br>[i.e Microcystis aeruginosa PCC 9443]"),
    ("uid", "Assembly<br>[i.e XXX_<assembly>.N]"),
    ("uidv", "Version<br>[i.e XXX_<assembly>.<version>]"),
    (
        "Accession",
        "Entry<br>[i.e <ncbi db>_<assembly>.<version>]",
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenotypeCounts {
    pub positive: usize,
    pub negative: usize,
    pub distinct: usize,
}

/// A key value is ccyA+ as soon as one of its rows is.
pub fn count_genotypes(rows: &[GenomeEntry], column: &str) -> Result<GenotypeCounts> {
    let key = GroupKey::from_column(column)?;
    let mut by_key: HashMap<&str, bool> = HashMap::new();
    for row in rows {
        let Some(value) = key.value(row) else {
            continue;
        };
        let positive = row.genotype().is_positive();
        by_key
            .entry(value)
            .and_modify(|p| *p |= positive)
            .or_insert(positive);
    }
    let positive = by_key.values().filter(|p| **p).count();
    tracing::debug!(key = key.column(), distinct = by_key.len(), positive, "counted genotypes");
    Ok(GenotypeCounts {
        positive,
        negative: by_key.len() - positive,
        distinct: by_key.len(),
    })
}

/// Distinct accessions per GenBank/RefSeq genotype label. Accessions from
/// neither database are left out.
pub fn count_db_genotypes(rows: &[GenomeEntry]) -> BTreeMap<&'static str, usize> {
    let mut by_accession: HashMap<&str, bool> = HashMap::new();
    for row in rows {
        let positive = row.genotype().is_positive();
        by_accession
            .entry(row.accession.as_str())
            .and_modify(|p| *p |= positive)
            .or_insert(positive);
    }
    let mut out = BTreeMap::new();
    for (accession, positive) in by_accession {
        let flag = positive.then_some(FLAG_KNOWN_NTER);
        if let Some(genotype) = db_genotype(accession, flag) {
            *out.entry(genotype.label()).or_insert(0) += 1;
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePoint {
    pub date: String,
    pub count_by_date: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSeries {
    pub label: String,
    pub points: Vec<DatePoint>,
}

/// Row indices ordered by date, stable, undated rows last.
fn date_order<T>(rows: &[T], date: impl Fn(&T) -> Option<&str>) -> Vec<usize> {
    let mut order = (0..rows.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| match (date(&rows[a]), date(&rows[b])) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    order
}

fn cumulate(counts: impl IntoIterator<Item = (String, usize)>) -> Vec<DatePoint> {
    let mut total = 0usize;
    counts
        .into_iter()
        .map(|(date, count_by_date)| {
            total += count_by_date;
            DatePoint {
                date,
                count_by_date,
                total,
            }
        })
        .collect()
}

/// Earliest-dated row per key value, counted per date and summed over time.
/// Rows without a key value or a date are not counted.
pub fn cumulative_count_by_date(
    rows: &[GenomeEntry],
    column: &str,
    label: &str,
) -> Result<DateSeries> {
    let key = GroupKey::from_column(column)?;
    let mut seen: HashSet<&str> = HashSet::new();
    let mut per_date: BTreeMap<String, usize> = BTreeMap::new();

    for idx in date_order(rows, |r| r.date.as_deref()) {
        let row = &rows[idx];
        let Some(value) = key.value(row) else {
            continue;
        };
        if !seen.insert(value) {
            continue;
        }
        if let Some(date) = &row.date {
            *per_date.entry(date.clone()).or_insert(0) += 1;
        }
    }

    Ok(DateSeries {
        label: label.to_string(),
        points: cumulate(per_date),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceSeries {
    pub flag: String,
    pub nter: NterType,
    pub points: Vec<DatePoint>,
}

/// Distinct sequences per (date, flag, N-ter), one cumulative series per
/// (flag, N-ter) pair in order of first appearance along the date axis.
/// Pairs sharing a date are ordered by flag, then by N-ter label.
pub fn sequence_counts_by_date(rows: &[GenomeEntry]) -> Vec<SequenceSeries> {
    let key = GroupKey::SequenceAccession;
    let mut seen: HashSet<&str> = HashSet::new();
    let mut grouped: BTreeMap<(String, String, String), usize> = BTreeMap::new();

    for idx in date_order(rows, |r| r.date.as_deref()) {
        let row = &rows[idx];
        let Some(value) = key.value(row) else {
            continue;
        };
        if !seen.insert(value) {
            continue;
        }
        let Some(date) = &row.date else {
            continue;
        };
        let flag = row.flag.clone().unwrap_or_else(|| NA.to_string());
        let nter = NterType::from_stored(row.nter.as_deref()).as_str().to_string();
        *grouped.entry((date.clone(), flag, nter)).or_insert(0) += 1;
    }

    let mut pairs: Vec<(&str, &str)> = Vec::new();
    for (_, flag, nter) in grouped.keys() {
        if !pairs.iter().any(|(f, n)| f == flag && n == nter) {
            pairs.push((flag.as_str(), nter.as_str()));
        }
    }

    pairs
        .into_iter()
        .map(|(flag, nter)| {
            let counts = grouped
                .iter()
                .filter(|((_, f, n), _)| f == flag && n == nter)
                .map(|((date, _, _), count)| (date.clone(), *count))
                .collect::<Vec<_>>();
            SequenceSeries {
                flag: flag.to_string(),
                nter: NterType::from_stored(Some(nter)),
                points: cumulate(counts),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub path: Vec<String>,
    pub count: usize,
}

/// Sequence counts per N-ter / flag / C-ter path, optionally split by date.
pub fn category_counts(records: &[SequenceRecord], with_date: bool) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<Vec<String>, usize> = BTreeMap::new();
    for record in records {
        let mut path = vec![
            record.nter.as_str().to_string(),
            record.flag.clone().unwrap_or_else(|| NA.to_string()),
            record.cter.clone().unwrap_or_else(|| NA.to_string()),
        ];
        if with_date {
            path.push(record.date.clone().unwrap_or_else(|| NA.to_string()));
        }
        *counts.entry(path).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(path, count)| CategoryCount { path, count })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_aggregate.rs"]
mod tests;
