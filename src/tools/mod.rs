pub mod generate;
pub mod mutations;
