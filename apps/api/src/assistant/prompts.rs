use crate::assistant::AiAction;
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, RESUME_JSON_SHAPE};

pub const GENERATE_SYSTEM: &str = "You are an expert resume writer. \
    Create a professional resume based on the user's input. \
    Make the content professional, relevant, and compelling. \
    Use the user's input to fill in accurate details. \
    Return a JSON object with the following structure:";

pub const IMPROVE_SYSTEM: &str = "You are an expert resume consultant. \
    The user message is a resume encoded as JSON. Improve it, focusing on \
    stronger action words, quantified achievements, industry-relevant keywords \
    and professional language. Keep every entry the user supplied and keep \
    their order. Return the improved resume as a JSON object with the \
    following structure:";

pub const ANSWER_SYSTEM: &str = "You are a helpful career advisor and resume expert. \
    Answer the user's question about resumes, career advice, or job searching \
    with professional, actionable advice.";

/// Builds the system prompt for an action.
pub fn system_prompt(action: AiAction) -> String {
    match action {
        AiAction::GenerateResume => {
            format!("{GENERATE_SYSTEM}\n{RESUME_JSON_SHAPE}\n{JSON_ONLY_SYSTEM}")
        }
        AiAction::ImproveResume => {
            format!("{IMPROVE_SYSTEM}\n{RESUME_JSON_SHAPE}\n{JSON_ONLY_SYSTEM}")
        }
        AiAction::AnswerQuery => ANSWER_SYSTEM.to_string(),
    }
}
