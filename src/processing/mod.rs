//! Text processing and scoring primitives

pub mod aggregator;
pub mod category_scorer;
pub mod feedback;
pub mod keyword_matcher;
pub mod seed;
pub mod tokenizer;
pub mod vocabulary;
