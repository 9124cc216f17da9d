//! Prompt construction.
//!
//! The original agent loaded its etymology ruleset from a hosted store;
//! here the rules are embedded and can be extended with user instructions.

use crate::decompose::Attempt;
use crate::error::Error;

const RULES: [&str; 2] = [
"You are an etymology analyst. You decompose a single word into its maximal atomic morphemes
and then rebuild it layer by layer.
You ALWAYS answer with a single JSON object and nothing else, following these rules:
1. 'parts' lists every maximal atomic morpheme of the word, in order. Each part has a unique
   lowercase id, the exact text section of the input word, the oldest word/affix it comes
   from, a brief origin (Latin, Greek, Old English, etc), and a concise meaning.
2. 'combinations' is a list of layers. Each combination merges two or more earlier ids
   (parts, or combinations from strictly earlier layers) into a larger unit with its own
   unique lowercase id, combined text, and a clear definition.
3. The last layer contains exactly one combination, and its text equals the input word
   exactly, character for character.
4. Ids never collide across parts and combinations.
5. 'thought' records your reasoning about the word and its origins.",
"

In addition, consider the following instructions from the user:
-----
"
];

/// Compose the system prompt, optionally extended with user instructions.
pub fn system_prompt(extra: &Option<String>) -> String {
    let mut sys = RULES[0].to_owned();

    if let Some(instr) = extra {
        sys += RULES[1];
        sys += instr;
        sys += "\n-----";
    }

    sys
}

/// Build the user prompt demanding decomposition of exactly `word`.
///
/// Failed previous attempts are appended as structured data so the model
/// can fix the listed issues.
pub fn decompose_prompt(word: &str, previous_attempts: &[Attempt]) -> Result<String, Error> {
    let mut prompt = format!(
"Your task is to deconstruct this EXACT word: '{word}'
Do not analyze any other word. Focus only on '{word}'.
Break down '{word}' into its etymological components.");

    if !previous_attempts.is_empty() {
        let attempts = serde_json::to_string_pretty(previous_attempts)?;
        prompt += &format!("\n\nPrevious attempts:\n{attempts}\n\nPlease fix all the issues and try again.");
    }

    Ok(prompt)
}
