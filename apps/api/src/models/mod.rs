pub mod attempt;
pub mod resume;
