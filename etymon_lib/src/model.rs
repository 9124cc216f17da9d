//! Decomposition data model and semantic validation.
//!
//! The JSON field names are the wire contract with the model and must not
//! change: `originalWord` and `sourceIds` keep their original casing.

use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A maximal atomic morpheme of the input word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordPart {
    /// Lowercase identifier, unique across parts and combinations.
    pub id: String,
    /// Exact section of the input word.
    pub text: String,
    /// Oldest word/affix this part comes from.
    #[serde(rename = "originalWord")]
    pub original_word: String,
    /// Brief origin (Latin, Greek, etc).
    pub origin: String,
    /// Concise meaning of this part.
    pub meaning: String,
}

/// A merge of two or more prior parts/combinations into a larger unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combination {
    /// Unique lowercase identifier.
    pub id: String,
    /// Combined text segments.
    pub text: String,
    /// Clear definition of the combined parts.
    pub definition: String,
    /// Ids of the parts/combinations merged here. References may only
    /// point at parts or at combinations in a strictly earlier layer.
    #[serde(rename = "sourceIds")]
    pub source_ids: Vec<String>,
}

/// Full etymological decomposition of one word.
///
/// `combinations` is an ordered sequence of layers forming a DAG that
/// terminates at the input word itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordOutput {
    /// Model's reasoning about the word and its origins.
    pub thought: String,
    /// Atomic parts that combine to form the word.
    pub parts: Vec<WordPart>,
    /// Layers of combinations leading to the full word.
    pub combinations: Vec<Vec<Combination>>,
}

impl WordOutput {

    /// The combination that reconstitutes the full word, if present.
    pub fn final_combination(&self) -> Option<&Combination> {
        self.combinations.last().and_then(|layer| layer.last())
    }

    /// Check the decomposition against the semantic rules for `word`.
    ///
    /// Collects every violation instead of stopping at the first one, so
    /// the whole list can be handed back to the model as feedback.
    pub fn validate(&self, word: &str) -> Result<(), Vec<String>> {
        let mut issues = Vec::new();

        if self.parts.is_empty() {
            issues.push("parts must not be empty".to_owned());
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for part in &self.parts {
            if !seen.insert(&part.id) {
                issues.push(format!("duplicate id '{}'", part.id));
            }
        }

        if self.combinations.is_empty() {
            issues.push("combinations must contain at least one layer".to_owned());
        }

        // Ids defined in layers before the one being checked.
        let mut known: HashSet<&str> = self.parts.iter().map(|p| p.id.as_str()).collect();

        for (n, layer) in self.combinations.iter().enumerate() {
            if layer.is_empty() {
                issues.push(format!("combination layer {} is empty", n + 1));
            }

            for combination in layer {
                if !seen.insert(&combination.id) {
                    issues.push(format!("duplicate id '{}'", combination.id));
                }
                if combination.source_ids.len() < 2 {
                    issues.push(format!(
                        "combination '{}' must merge at least two sources", combination.id));
                }
                for source in &combination.source_ids {
                    if !known.contains(source.as_str()) {
                        issues.push(format!(
                            "combination '{}' references unknown or later id '{}'",
                            combination.id, source));
                    }
                }
            }

            for combination in layer {
                known.insert(&combination.id);
            }
        }

        if let Some(layer) = self.combinations.last() {
            if layer.len() > 1 {
                issues.push(format!(
                    "final layer must hold exactly one combination, found {}", layer.len()));
            }
            if let Some(last) = layer.last() {
                if last.text != word {
                    issues.push(format!(
                        "final combination text '{}' does not equal the input word '{}'",
                        last.text, word));
                }
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}

/// JSON Schema of [`WordOutput`] for providers with native structured output.
///
/// Every field is required and additional properties are rejected, which is
/// what OpenAI strict mode demands.
pub fn output_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "thought": {
                "type": "string",
                "description": "Think about the word, its origins, and how it is put together"
            },
            "parts": {
                "type": "array",
                "description": "Word parts that combine to form the word",
                "items": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "description": "Lowercase identifier, unique across parts and combinations" },
                        "text": { "type": "string", "description": "Exact section of the input word" },
                        "originalWord": { "type": "string", "description": "Oldest word/affix this part comes from" },
                        "origin": { "type": "string", "description": "Brief origin (Latin, Greek, etc)" },
                        "meaning": { "type": "string", "description": "Concise meaning of this part" }
                    },
                    "required": ["id", "text", "originalWord", "origin", "meaning"],
                    "additionalProperties": false
                }
            },
            "combinations": {
                "type": "array",
                "description": "Layers of combinations forming a DAG to the final word",
                "items": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string", "description": "Unique lowercase identifier" },
                            "text": { "type": "string", "description": "Combined text segments" },
                            "definition": { "type": "string", "description": "Clear definition of the combined parts" },
                            "sourceIds": {
                                "type": "array",
                                "description": "Ids of the parts/combinations used",
                                "items": { "type": "string" }
                            }
                        },
                        "required": ["id", "text", "definition", "sourceIds"],
                        "additionalProperties": false
                    }
                }
            }
        },
        "required": ["thought", "parts", "combinations"],
        "additionalProperties": false
    })
}
