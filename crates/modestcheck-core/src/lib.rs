pub mod lexicon;
pub mod prediction;
pub mod score;

pub use lexicon::Lexicon;
pub use prediction::{Prediction, TOP_K};
pub use score::{Assessment, Verdict, assess, compliance_score};
