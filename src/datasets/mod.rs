/// The grocery categorization corpus
pub mod grocery;

pub use grocery::Corpus;
