pub mod extraction;
pub mod sections;
pub mod summarize;
pub mod report;
pub mod processor;

#[cfg(test)]
pub(crate) mod fixtures;
