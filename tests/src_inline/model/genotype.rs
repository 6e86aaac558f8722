use super::*;

#[test]
fn test_ccya_positive_only_for_calcyanin_flags() {
    assert_eq!(ccya_genotype(Some(FLAG_KNOWN_NTER)), Genotype::Positive);
    assert_eq!(ccya_genotype(Some(FLAG_NEW_NTER)), Genotype::Positive);
    assert_eq!(
        ccya_genotype(Some("Atypical gly region with known N-ter")),
        Genotype::Negative
    );
    assert_eq!(ccya_genotype(Some("NA")), Genotype::Negative);
    assert_eq!(ccya_genotype(None), Genotype::Negative);
    assert_eq!(Genotype::Positive.label(), "ccyA+");
    assert_eq!(Genotype::Negative.label(), "ccyA-");
}

#[test]
fn test_db_genotype_by_prefix() {
    assert_eq!(
        db_genotype("GCA_000001.1", Some(FLAG_NEW_NTER)),
        Some(DbGenotype::GcaPositive)
    );
    assert_eq!(db_genotype("GCA_000001.1", None), Some(DbGenotype::GcaNegative));
    assert_eq!(
        db_genotype("GCF_000001.2", Some(FLAG_KNOWN_NTER)).map(DbGenotype::label),
        Some("GCF+")
    );
    assert_eq!(
        db_genotype("GCF_000001.2", Some("Atypical gly region with new N-ter")),
        Some(DbGenotype::GcfNegative)
    );
    assert_eq!(db_genotype("ABC_000001.1", Some(FLAG_KNOWN_NTER)), None);
}

#[test]
fn test_assembly_uid_strips_prefix_and_version() {
    assert_eq!(assembly_uid("GCA_000123.2"), "000123");
    assert_eq!(assembly_uid_version("GCA_000123.2"), "000123.2");
    assert_eq!(assembly_uid("GCF_000123.1"), assembly_uid("GCA_000123.2"));
    assert_eq!(assembly_uid("plain"), "plain");
}
