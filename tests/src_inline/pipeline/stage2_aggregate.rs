use super::*;
use crate::model::genotype::{FLAG_KNOWN_NTER, FLAG_NEW_NTER};

fn entry(
    accession: &str,
    organism: &str,
    date: Option<&str>,
    sequence: Option<&str>,
    flag: Option<&str>,
    nter: Option<&str>,
) -> GenomeEntry {
    GenomeEntry {
        accession: accession.to_string(),
        organism: Some(organism.to_string()),
        assembly_name: None,
        date: date.map(str::to_string),
        sequence_accession: sequence.map(str::to_string),
        flag: flag.map(str::to_string),
        nter: nter.map(str::to_string),
    }
}

fn sample_rows() -> Vec<GenomeEntry> {
    vec![
        entry("GCF_000001.2", "orgA", Some("2020-06-01"), Some("WP_1"), Some(FLAG_KNOWN_NTER), Some("Z-type")),
        entry("GCA_000001.1", "orgA", Some("2019-01-01"), None, None, None),
        entry("GCA_000002.1", "orgB", Some("2019-01-01"), Some("WP_2"), Some("Atypical gly region with new N-ter"), None),
        entry("GCA_000003.1", "orgC", Some("2021-03-01"), Some("WP_3"), Some(FLAG_NEW_NTER), Some("X-type")),
        entry("GCF_000003.1", "orgC", None, Some("WP_3"), Some(FLAG_NEW_NTER), Some("X-type")),
    ]
}

#[test]
fn test_group_key_rejects_unknown_column() {
    assert_eq!(GroupKey::from_column("uidv").unwrap(), GroupKey::Uidv);
    assert_eq!(GroupKey::Uidv.column(), "uidv");
    let err = GroupKey::from_column("Species").unwrap_err();
    assert!(matches!(err, ReportError::MissingColumn(c) if c == "Species"));
}

#[test]
fn test_count_genotypes_any_positive_row_wins() {
    let rows = sample_rows();
    let by_org = count_genotypes(&rows, "Organism").unwrap();
    assert_eq!(
        by_org,
        GenotypeCounts {
            positive: 2,
            negative: 1,
            distinct: 3
        }
    );

    let by_entry = count_genotypes(&rows, "Accession").unwrap();
    assert_eq!(by_entry.distinct, 5);
    assert_eq!(by_entry.positive, 3);

    // GCA_000003.1 and GCF_000003.1 collapse to the same assembly.
    let by_uid = count_genotypes(&rows, "uid").unwrap();
    assert_eq!(by_uid.distinct, 3);
}

#[test]
fn test_cumulative_series_is_monotone_and_ends_at_distinct_dated_keys() {
    let rows = sample_rows();
    for (column, label) in REDUNDANCY_LEVELS {
        let series = cumulative_count_by_date(&rows, column, label).unwrap();
        assert_eq!(series.label, *label);
        let totals = series.points.iter().map(|p| p.total).collect::<Vec<_>>();
        assert!(totals.windows(2).all(|w| w[0] <= w[1]));
        let dates = series.points.iter().map(|p| p.date.as_str()).collect::<Vec<_>>();
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }

    let strains = cumulative_count_by_date(&rows, "Organism", "Strain").unwrap();
    assert_eq!(
        strains.points,
        vec![
            DatePoint {
                date: "2019-01-01".to_string(),
                count_by_date: 2,
                total: 2
            },
            DatePoint {
                date: "2021-03-01".to_string(),
                count_by_date: 1,
                total: 3
            },
        ]
    );

    // The undated GCF_000003.1 entry is a distinct key but has no date to count on.
    let entries = cumulative_count_by_date(&rows, "Accession", "Entry").unwrap();
    assert_eq!(entries.points.last().map(|p| p.total), Some(4));
}

#[test]
fn test_sequence_series_split_by_flag_and_nter() {
    let rows = sample_rows()
        .into_iter()
        .filter(|r| r.sequence_accession.is_some())
        .collect::<Vec<_>>();
    let series = sequence_counts_by_date(&rows);
    let keys = series
        .iter()
        .map(|s| (s.flag.as_str(), s.nter.clone()))
        .collect::<Vec<_>>();
    assert_eq!(
        keys,
        vec![
            ("Atypical gly region with new N-ter", NterType::Unknown),
            (FLAG_KNOWN_NTER, NterType::Z),
            (FLAG_NEW_NTER, NterType::X),
        ]
    );
    // WP_3 is counted once, on its earliest date.
    assert_eq!(series[2].points.len(), 1);
    assert_eq!(series[2].points[0].date, "2021-03-01");
    assert_eq!(series[2].points[0].total, 1);
}

#[test]
fn test_sequence_series_on_same_date_sort_by_nter_label() {
    let rows = vec![
        entry("GCF_000010.1", "orgD", Some("2022-01-01"), Some("WP_10"), Some(FLAG_NEW_NTER), Some("X-type")),
        entry("GCF_000011.1", "orgE", Some("2022-01-01"), Some("WP_11"), Some(FLAG_NEW_NTER), Some("CoBaHMA-type")),
        entry("GCF_000012.1", "orgF", Some("2022-01-01"), Some("WP_12"), Some(FLAG_NEW_NTER), Some("Y-type")),
    ];
    let series = sequence_counts_by_date(&rows);
    let nters = series.iter().map(|s| s.nter.clone()).collect::<Vec<_>>();
    assert_eq!(nters, vec![NterType::CoBaHMA, NterType::X, NterType::Y]);
    assert!(series.iter().all(|s| s.points[0].total == 1));
}

#[test]
fn test_category_counts_fill_missing_with_na() {
    let record = |acc: &str, flag: Option<&str>, cter: Option<&str>, date: &str| SequenceRecord {
        accession: acc.to_string(),
        source: "GCA_000001.1".to_string(),
        organism: None,
        date: Some(date.to_string()),
        flag: flag.map(str::to_string),
        nter: NterType::Z,
        cter: cter.map(str::to_string),
        length: 10,
        nter_neighbor: None,
        features: Vec::new(),
    };
    let records = vec![
        record("a", Some(FLAG_KNOWN_NTER), Some("Gly1|Gly2|Gly3"), "2019"),
        record("b", Some(FLAG_KNOWN_NTER), Some("Gly1|Gly2|Gly3"), "2020"),
        record("c", None, None, "2020"),
    ];

    let flat = category_counts(&records, false);
    assert_eq!(flat.len(), 2);
    assert_eq!(flat[0].path, vec!["Z-type", FLAG_KNOWN_NTER, "Gly1|Gly2|Gly3"]);
    assert_eq!(flat[0].count, 2);
    assert_eq!(flat[1].path, vec!["Z-type", "NA", "NA"]);

    let dated = category_counts(&records, true);
    assert_eq!(dated.len(), 3);
    assert!(dated.iter().all(|c| c.path.len() == 4));
}

#[test]
fn test_db_genotypes_per_accession() {
    let mut rows = sample_rows();
    rows.push(entry("XYZ_000009.1", "orgD", None, None, None, None));
    let counts = count_db_genotypes(&rows);
    assert_eq!(counts.get("GCF+"), Some(&2));
    assert_eq!(counts.get("GCA+"), Some(&1));
    assert_eq!(counts.get("GCA-"), Some(&2));
    assert_eq!(counts.get("GCF-"), None);
    assert_eq!(counts.values().sum::<usize>(), 5);
}
