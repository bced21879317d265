pub mod aggregators;
pub mod context;
pub mod dashboard;
pub mod fetch;
pub mod filter;
pub mod output;
pub mod parser;
pub mod record;

#[cfg(test)]
mod testing;
