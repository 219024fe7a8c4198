// Answer generation prompt templates.

/// System prompt for drafting grant application answers.
pub const ANSWER_SYSTEM: &str = "You are a grant-writing assistant. \
    Answer grant application questions in a professional tone, \
    based strictly on the supplied project proposal. \
    Do not invent facts that the proposal does not support.";

/// Per-question prompt. Replace `{proposal}` and `{question}` before sending.
pub const ANSWER_PROMPT_TEMPLATE: &str = r#"The following is a project proposal:
{proposal}

Please answer the following grant application question in a professional tone, based on the proposal:

Question: {question}
Answer:"#;
