//! Word frequency counting on a separate-chaining hash table with a pluggable hash function.
//!
//! ```
//! use word_frequency::WordFrequency;
//!
//! let frequencies = WordFrequency::from_reader("the cat and the hat".as_bytes());
//! assert_eq!(frequencies.number_of_words(), 5);
//! assert_eq!(frequencies.word_count("the"), 2);
//! assert_eq!(frequencies.most_frequent_word(), "the");
//! ```

extern crate alloc;

pub mod chained_hash_table;
pub mod error;
pub mod hasher;
pub mod report;
pub mod tokenizer;
pub mod word_frequency;

pub use chained_hash_table::{BucketStats, HashTable, StrHashTable, TableConfig};
pub use error::WordFrequencyError;
pub use hasher::{FxWordHasher, NaiveWordHasher, WordHasher};
pub use report::FrequencyReport;
pub use word_frequency::WordFrequency;
