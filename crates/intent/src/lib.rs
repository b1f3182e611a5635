//! User intent classification
//!
//! Cheap regexes catch the common phrases (balance, bills, greetings, quick
//! "gastei 50 pizza" entries); everything else goes to Gemini, which answers
//! with constrained JSON that is validated into an [`Intent`].

pub mod amount;
pub mod error;
pub mod extraction;
pub mod extractor;
pub mod gemini;
pub mod intent;
pub mod prompt;
pub mod router;

pub use error::{IntentError, Result};
pub use extractor::IntentExtractor;
pub use gemini::GeminiClient;
pub use intent::Intent;
pub use router::Router;
