//! Record formatting for target training consumers
//!
//! Exactly one shape is produced per run, selected by configuration:
//! chat-message triples for instruction-tuned chat consumers,
//! fill-in-the-middle text blocks for causal infill consumers, or
//! tabular rows. Every record maps to exactly one output object.

use crate::dataset::Record;
use serde::{Deserialize, Serialize};

/// Sentinel markers for fill-in-the-middle encoding.
pub const FIM_PREFIX: &str = "<fim_prefix>";
pub const FIM_SUFFIX: &str = "<fim_suffix>";
pub const FIM_MIDDLE: &str = "<fim_middle>";

/// Output format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    /// Chat-message triples written as JSONL.
    #[default]
    Chat,
    /// Fill-in-the-middle blocks written as `(id, content)` CSV rows.
    Fim,
    /// Tabular rows: `(id, question, response)` CSV, or prompt-prefixed
    /// `{input, output}` JSONL pairs when prompt-prefixing is enabled.
    Tabular,
}

/// One message of a chat conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".into(),
            content: content.into(),
        }
    }
}

/// A formatted chat training example: system prompt, user input,
/// assistant output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRecord {
    pub id: String,
    pub messages: Vec<ChatMessage>,
}

/// A prompt-prefixed plain pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptedPair {
    pub input: String,
    pub output: String,
}

/// Render a record as a chat triple with the prompt as system message.
pub fn chat_record(record: &Record, prompt: &str) -> ChatRecord {
    ChatRecord {
        id: record.id_or_computed(),
        messages: vec![
            ChatMessage::system(prompt),
            ChatMessage::user(&record.input),
            ChatMessage::assistant(&record.output),
        ],
    }
}

/// Render a record as a fill-in-the-middle block.
pub fn fim_block(record: &Record) -> String {
    format!(
        "{FIM_PREFIX}{}{FIM_SUFFIX}{FIM_MIDDLE}{}",
        record.input, record.output
    )
}

/// Render a record as a `(id, question, response)` tabular row.
pub fn qa_row(record: &Record) -> Vec<String> {
    vec![
        record.id_or_computed(),
        record.input.clone(),
        record.output.clone(),
    ]
}

/// Prefix the prompt onto a record's input, separated by a blank line.
/// An empty prompt leaves the record unchanged.
pub fn apply_prompt(prompt: &str, record: Record) -> Record {
    if prompt.is_empty() {
        return record;
    }
    Record {
        id: record.id,
        input: format!("{prompt}\n\n{}", record.input),
        output: record.output,
    }
}

/// Render a record as a prompt-prefixed `{input, output}` pair.
pub fn prompted_pair(record: &Record, prompt: &str) -> PromptedPair {
    let input = if prompt.is_empty() {
        record.input.clone()
    } else {
        format!("{prompt}\n\n{}", record.input)
    };
    PromptedPair {
        input,
        output: record.output.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::content_id;

    fn record() -> Record {
        Record::with_content_id("Q1", "A1")
    }

    #[test]
    fn test_chat_record_role_order() {
        let chat = chat_record(&record(), "SYS");
        let roles: Vec<&str> = chat.messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, ["system", "user", "assistant"]);
        assert_eq!(chat.messages[0].content, "SYS");
        assert_eq!(chat.messages[1].content, "Q1");
        assert_eq!(chat.messages[2].content, "A1");
        assert_eq!(chat.id, content_id("Q1", "A1"));
    }

    #[test]
    fn test_fim_block_sentinels() {
        assert_eq!(
            fim_block(&record()),
            "<fim_prefix>Q1<fim_suffix><fim_middle>A1"
        );
    }

    #[test]
    fn test_qa_row() {
        let row = qa_row(&record());
        assert_eq!(row[0], content_id("Q1", "A1"));
        assert_eq!(row[1], "Q1");
        assert_eq!(row[2], "A1");
    }

    #[test]
    fn test_prompted_pair() {
        let pair = prompted_pair(&record(), "SYS");
        assert_eq!(pair.input, "SYS\n\nQ1");
        assert_eq!(pair.output, "A1");
    }

    #[test]
    fn test_prompted_pair_empty_prompt() {
        let pair = prompted_pair(&record(), "");
        assert_eq!(pair.input, "Q1");
    }

    #[test]
    fn test_apply_prompt_preserves_id() {
        let original = record();
        let id = original.id.clone();
        let prefixed = apply_prompt("SYS", original);
        assert_eq!(prefixed.input, "SYS\n\nQ1");
        assert_eq!(prefixed.id, id);
    }

    #[test]
    fn test_format_kind_serde_names() {
        assert_eq!(serde_json::to_string(&FormatKind::Fim).unwrap(), "\"fim\"");
        let kind: FormatKind = serde_json::from_str("\"tabular\"").unwrap();
        assert_eq!(kind, FormatKind::Tabular);
    }
}
