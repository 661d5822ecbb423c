pub mod lexical;
pub mod partial_ratio;
pub mod r#trait;

pub use lexical::{
    contains_all_of, contains_one_of, fuzzy_contains_all_of, fuzzy_contains_all_of_with,
    fuzzy_contains_one_of, fuzzy_contains_one_of_with,
};
pub use partial_ratio::PartialRatio;
pub use r#trait::Similarity;
