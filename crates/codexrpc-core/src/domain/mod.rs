//! Core domain types.
//!
//! These types represent the completion model independent of any transport
//! or vendor wire format.

mod completion;

pub use completion::{
    CompletionChoice, CompletionParams, CompletionResult, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE, Usage,
};
