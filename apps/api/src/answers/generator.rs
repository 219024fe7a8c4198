//! Answer Generator — drafts an answer for each application question from a
//! proposal document.

use serde::Serialize;
use tracing::debug;

use crate::answers::prompts::{ANSWER_PROMPT_TEMPLATE, ANSWER_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::LlmClient;

#[derive(Debug, Clone, Serialize)]
pub struct AnswerPair {
    pub question: String,
    pub answer: String,
}

/// One question per non-empty line, trimmed, order preserved.
pub fn split_questions(questions_text: &str) -> Vec<String> {
    questions_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Drafts an answer for every question, one sequential LLM round trip each.
/// Point-of-failure semantics: if any call fails, the whole batch fails and
/// no prior answers are surfaced.
pub async fn generate_answers(
    llm: &LlmClient,
    questions_text: &str,
    proposal_text: &str,
) -> Result<Vec<AnswerPair>, AppError> {
    let questions = split_questions(questions_text);
    debug!("Generating answers for {} questions", questions.len());

    let mut answers = Vec::with_capacity(questions.len());
    for question in questions {
        let answer = generate_one(llm, &question, proposal_text).await?;
        answers.push(AnswerPair { question, answer });
    }
    Ok(answers)
}

/// Drafts one answer for one question/proposal pair.
pub async fn generate_one(
    llm: &LlmClient,
    question: &str,
    proposal_text: &str,
) -> Result<String, AppError> {
    let prompt = ANSWER_PROMPT_TEMPLATE
        .replace("{proposal}", proposal_text)
        .replace("{question}", question);

    let response = llm.call(&prompt, ANSWER_SYSTEM).await?;
    let answer = response
        .text()
        .ok_or_else(|| AppError::Upstream("LLM returned empty content".to_string()))?;
    Ok(answer.trim().to_string())
}
