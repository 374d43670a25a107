//! Lazy Sequences
//!
//! A sequence describes how to produce elements without storing them:
//! - Sources (`sequence_of`, `generate_sequence`, one-shot iterators)
//! - Intermediate stages (`map`, `filter`, `take`, `flat_map`, ...) that compute nothing
//! - Terminal operations (`to_list`, `any`, `group_by`, ...) that pull one element at a
//!   time through every stage
//!
//! # Example
//!
//! ```
//! use sequences::{Sequence, sequence_of};
//!
//! let words = sequence_of("The quick brown fox jumps over the lazy dog".split(' '));
//! let lengths = words.filter(|w| w.len() > 3).map(|w| w.len()).take(4);
//! assert_eq!(lengths.to_list(), vec![5, 5, 5, 4]);
//! ```

// Modules
pub mod error; // Sequence errors
pub mod random; // Seeded generator for `shuffled`
pub mod sequence; // Sequence trait, terminal operations
pub mod source; // Sources
pub mod stages; // Intermediate stages

pub use error::{Result, SequenceError};
pub use sequence::{AsF64, Sequence, TrySequence};
pub use source::{
    EmptySequence, GenerateSequence, GenerateSequenceWith, OnceSequence, SequenceOf, as_sequence,
    empty_sequence, generate_sequence, generate_sequence_with, sequence_of,
};
pub use stages::IndexedValue;
