pub const FLAG_KNOWN_NTER: &str = "Calcyanin with known N-ter";
pub const FLAG_NEW_NTER: &str = "Calcyanin with new N-ter";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Genotype {
    Positive,
    Negative,
}

impl Genotype {
    pub fn label(self) -> &'static str {
        match self {
            Genotype::Positive => "ccyA+",
            Genotype::Negative => "ccyA-",
        }
    }

    pub fn is_positive(self) -> bool {
        self == Genotype::Positive
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbGenotype {
    GcaPositive,
    GcaNegative,
    GcfPositive,
    GcfNegative,
}

impl DbGenotype {
    pub fn label(self) -> &'static str {
        match self {
            DbGenotype::GcaPositive => "GCA+",
            DbGenotype::GcaNegative => "GCA-",
            DbGenotype::GcfPositive => "GCF+",
            DbGenotype::GcfNegative => "GCF-",
        }
    }
}

pub fn ccya_genotype(flag: Option<&str>) -> Genotype {
    match flag {
        Some(FLAG_KNOWN_NTER) | Some(FLAG_NEW_NTER) => Genotype::Positive,
        _ => Genotype::Negative,
    }
}

/// `None` when the accession comes from neither GenBank (GCA) nor RefSeq (GCF).
pub fn db_genotype(accession: &str, flag: Option<&str>) -> Option<DbGenotype> {
    let positive = ccya_genotype(flag).is_positive();
    if accession.starts_with("GCA") {
        Some(if positive {
            DbGenotype::GcaPositive
        } else {
            DbGenotype::GcaNegative
        })
    } else if accession.starts_with("GCF") {
        Some(if positive {
            DbGenotype::GcfPositive
        } else {
            DbGenotype::GcfNegative
        })
    } else {
        None
    }
}

/// Assembly identifier without database prefix or version: `GCA_000123.2` -> `000123`.
pub fn assembly_uid(accession: &str) -> &str {
    let tail = assembly_uid_version(accession);
    tail.split('.').next().unwrap_or(tail)
}

/// Assembly identifier with version: `GCA_000123.2` -> `000123.2`.
pub fn assembly_uid_version(accession: &str) -> &str {
    accession.rsplit('_').next().unwrap_or(accession)
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/genotype.rs"]
mod tests;
