//! Prompt templates for each clinical use case.
//!
//! Every function is pure: typed arguments in, a system/user instruction
//! pair out. The JSON key lists in these templates are a textual contract
//! with the model; nothing here enforces them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::backend::traits::Message;

/// Preamble for the open-ended healthcare query endpoint.
pub const HEALTHCARE_ASSISTANT_PREAMBLE: &str = "\
You are a professional and empathetic Healthcare Support Assistant.

Your task:
- Understand the user's message.
- If the message is healthcare-related, respond accurately and compassionately.
- If it's unrelated to healthcare, politely redirect the user to ask a healthcare-related question.
- Maintain a warm, respectful tone as if you were a hospital support staff member assisting a patient.

Always provide clear, safe, and non-diagnostic information.
Include disclaimers when needed.

Example response if off-topic:
\"I'm here to help with healthcare questions or wellness advice. Could you please share something related to your health or medical care?\"";

/// Keys requested from entity extraction.
pub const ENTITY_KEYS: [&str; 7] = [
    "problems",
    "medications",
    "allergies",
    "procedures",
    "tests",
    "dates",
    "clinicians",
];

/// Summary style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryStyle {
    #[default]
    Abstractive,
    Extractive,
}

impl SummaryStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Abstractive => "abstractive",
            Self::Extractive => "extractive",
        }
    }
}

impl fmt::Display for SummaryStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl SummaryLength {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

impl fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A system instruction and a user instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

impl PromptPair {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }

    /// Two-message conversation: system first, then user.
    pub fn into_messages(self) -> Vec<Message> {
        vec![Message::system(self.system), Message::user(self.user)]
    }
}

/// Example schema for the introduction endpoint.
pub fn user_profile_schema() -> serde_json::Value {
    serde_json::json!({
        "name": "",
        "age": "",
        "gender": "",
        "profession": "",
        "place": "",
        "other_details": {}
    })
}

/// Builds prompts for each use case.
pub struct PromptFactory;

impl PromptFactory {
    pub fn summarize(text: &str, style: SummaryStyle, length: SummaryLength) -> PromptPair {
        PromptPair::new(
            "You are a careful summarizer for medical/technical text.",
            format!(
                "Summarize this text.\nStyle: {}\nLength: {}\n\n{}",
                style, length, text
            ),
        )
    }

    pub fn qa(question: &str, context: &str) -> PromptPair {
        PromptPair::new(
            "You are a precise QA assistant. Use only context given. \
             If the context does not contain the answer, say that the context is insufficient.",
            format!("Q: {}\nContext:\n{}", question, context),
        )
    }

    pub fn entities(text: &str) -> PromptPair {
        PromptPair::new(
            format!(
                "Extract entities as JSON with keys {}. Return a JSON object only.",
                ENTITY_KEYS.join(", ")
            ),
            format!("Extract entities from:\n{}", text),
        )
    }

    /// SOAP note from a visit transcript and optional prior chart.
    pub fn note(transcript: &str, chart: Option<&str>) -> PromptPair {
        let chart = chart.map(str::trim).filter(|c| !c.is_empty()).unwrap_or("(none)");
        PromptPair::new(
            "Generate a SOAP note JSON with keys subjective, objective, assessment[], plan[], \
             icd10_codes[], snomed_codes[], medications_to_start[], follow_up[]. \
             Return a JSON object only.",
            format!("Transcript:\n{}\n\nChart:\n{}", transcript, chart),
        )
    }

    pub fn introduction(user_input: &str, schema: &serde_json::Value) -> PromptPair {
        PromptPair::new(
            "Extract details and return valid JSON object only.",
            format!("Input: {}\nSchema:\n{}", user_input, schema),
        )
    }

    /// Search-augmented query. `links` may be empty.
    pub fn query(user_input: &str, links: &[String]) -> PromptPair {
        let links = serde_json::to_string(links).unwrap_or_else(|_| "[]".to_string());
        PromptPair::new(
            format!(
                "{}\n\nAnswer user query. If links are provided, cite them. \
                 Return JSON with keys response and support_links[].",
                HEALTHCARE_ASSISTANT_PREAMBLE
            ),
            format!("Question: {}\nLinks: {}", user_input, links),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::traits::MessageRole;

    #[test]
    fn test_summarize_prompt() {
        let prompt = PromptFactory::summarize(
            "Patient has mild fever.",
            SummaryStyle::Extractive,
            SummaryLength::Short,
        );

        assert!(prompt.system.contains("summarizer"));
        assert_eq!(
            prompt.user,
            "Summarize this text.\nStyle: extractive\nLength: short\n\nPatient has mild fever."
        );
    }

    #[test]
    fn test_summary_defaults() {
        assert_eq!(SummaryStyle::default(), SummaryStyle::Abstractive);
        assert_eq!(SummaryLength::default(), SummaryLength::Medium);
    }

    #[test]
    fn test_entities_lists_keys() {
        let prompt = PromptFactory::entities("Aspirin 81mg daily");
        for key in ENTITY_KEYS {
            assert!(prompt.system.contains(key), "missing {}", key);
        }
        assert!(prompt.user.ends_with("Aspirin 81mg daily"));
    }

    #[test]
    fn test_note_without_chart() {
        let prompt = PromptFactory::note("Cough for 3 days", None);
        assert!(prompt.system.contains("icd10_codes[]"));
        assert!(prompt.user.ends_with("Chart:\n(none)"));

        let blank = PromptFactory::note("Cough for 3 days", Some("   "));
        assert_eq!(blank, prompt);
    }

    #[test]
    fn test_note_with_chart() {
        let prompt = PromptFactory::note("Cough", Some("Hx asthma"));
        assert!(prompt.user.contains("Chart:\nHx asthma"));
    }

    #[test]
    fn test_introduction_embeds_schema() {
        let prompt = PromptFactory::introduction("I'm Ana, 34, a nurse", &user_profile_schema());
        assert!(prompt.user.contains(r#""other_details":{}"#));
        assert!(prompt.user.starts_with("Input: I'm Ana, 34, a nurse"));
    }

    #[test]
    fn test_query_includes_preamble_and_links() {
        let links = vec!["https://medlineplus.gov/fever.html".to_string()];
        let prompt = PromptFactory::query("Is 38C a fever?", &links);

        assert!(prompt.system.starts_with("You are a professional and empathetic"));
        assert!(prompt.system.contains("support_links[]"));
        assert_eq!(
            prompt.user,
            "Question: Is 38C a fever?\nLinks: [\"https://medlineplus.gov/fever.html\"]"
        );

        let empty = PromptFactory::query("Hi", &[]);
        assert!(empty.user.ends_with("Links: []"));
    }

    #[test]
    fn test_into_messages_order() {
        let messages = PromptPair::new("sys", "usr").into_messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[1].role, MessageRole::User);
    }
}
