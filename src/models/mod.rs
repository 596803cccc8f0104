pub mod prediction;
pub mod report;
