pub mod genotype;
pub mod layout;
pub mod nter;
pub mod palette;
pub mod records;
