pub mod audit;
pub mod filter;
pub mod reglementation;
pub mod user;
