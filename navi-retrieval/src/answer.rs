//! Answer composition from ranked snippets

use serde::{Deserialize, Serialize};

use crate::search::ScoredChunk;

/// First line of every composed answer
pub const INTRO_LINE: &str = "Based on local notes, here is a brief:";

/// Result of a single question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// The question as asked
    pub question: String,
    /// Ranked snippets, highest score first
    pub snippets: Vec<ScoredChunk>,
    /// Composed answer text
    pub text: String,
}

/// Build the answer text and wrap the ranked snippets
///
/// Template concatenation only: the intro line, then `- <text>` per snippet
/// in ranked order, each newline-terminated.
pub fn compose(question: &str, snippets: Vec<ScoredChunk>) -> Answer {
    let mut text = String::with_capacity(
        INTRO_LINE.len() + 1 + snippets.iter().map(|s| s.text.len() + 3).sum::<usize>(),
    );
    text.push_str(INTRO_LINE);
    text.push('\n');
    for snippet in &snippets {
        text.push_str("- ");
        text.push_str(&snippet.text);
        text.push('\n');
    }

    Answer {
        question: question.to_string(),
        snippets,
        text,
    }
}
