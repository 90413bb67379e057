pub mod fasta;
pub mod patterns;
pub mod report;
