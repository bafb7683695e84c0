pub mod check;
pub mod movegen;
