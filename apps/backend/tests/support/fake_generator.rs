use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tarot_backend::llm::{LlmError, TextGenerator};

/// Answers interpretation prompts with a JSON object and per-card prompts
/// with a JSON array sized from the prompt's `length=` hint.
#[derive(Default)]
pub struct CannedGenerator {
    calls: AtomicUsize,
}

impl CannedGenerator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn requested_length(prompt: &str) -> usize {
    prompt
        .split("length=")
        .nth(1)
        .map(|rest| rest.chars().take_while(char::is_ascii_digit).collect::<String>())
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(0)
}

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if prompt.contains("JSON array") {
            let details: Vec<String> = (1..=requested_length(prompt))
                .map(|i| format!("detail {i} of call {n}"))
                .collect();
            return Ok(serde_json::json!(details).to_string());
        }
        Ok(serde_json::json!({
            "summary": format!("Steady progress is likely, call {n}."),
            "advices": [
                {"type": "solution", "text": "Take one concrete step this week."},
                {"type": "support", "text": "Lean on a trusted colleague."},
                {"type": "reflection", "text": "Write down what went well."}
            ]
        })
        .to_string())
    }

    fn name(&self) -> &str {
        "canned"
    }
}

/// Always fails like an unreachable provider.
pub struct DownGenerator;

#[async_trait]
impl TextGenerator for DownGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
        Err(LlmError::Transport("connection refused".to_string()))
    }

    fn name(&self) -> &str {
        "down"
    }
}
