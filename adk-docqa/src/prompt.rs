//! Prompt templates and fixed fallback strings.

/// Focus hints; one is picked at random per question attempt.
pub const FOCUS_HINTS: [&str; 7] = [
    "Focus on the main claims the document makes.",
    "Focus on how the document is structured and what each part contributes.",
    "Focus on cause and effect or the flow of the argument.",
    "Focus on how a reader would apply the content.",
    "Focus on specific features, methods, or mechanisms described.",
    "Focus on the reasoning behind conclusions or decisions.",
    "Focus on constraints, requirements, or limitations.",
];

/// Quality directives; one is picked at random per question attempt.
pub const QUALITY_DIRECTIVES: [&str; 4] = [
    "Be creative and avoid repetition.",
    "Make sure it differs from questions you might already have asked.",
    "Make it logical, not surface-level.",
    "Test reasoning or document understanding.",
];

/// Returned when question generation accepts nothing within its attempt budget.
pub const FALLBACK_QUESTION: &str =
    "What is the central idea of this document, and how do its sections support it?";

/// Reference answer used when the generative service fails during evaluation.
pub const REFERENCE_ERROR: &str = "Could not generate reference answer due to error.";

/// Answer used when the generative service fails while answering a question.
pub const ANSWER_APOLOGY: &str = "I'm sorry, I couldn't generate an answer.";

/// Prompt for one summarization pass.
pub fn summary_prompt(text: &str) -> String {
    format!(
        "Summarize the following text in a few clear sentences. \
         Keep the key facts and do not add information that is not in the text.\n\n\
         Text:\n\"\"\"\n{text}\n\"\"\""
    )
}

/// Prompt asking for one open-ended question about `context`.
pub fn question_prompt(context: &str, hint: &str, directive: &str) -> String {
    format!(
        "You are a helpful assistant. Based on the document below, generate one open-ended \
         question that requires logic, reasoning, or comprehension to answer.\n\
         Do NOT generate multiple-choice or yes/no questions.\n\
         Ask a deep, inferential question that tests understanding of the content.\n\
         HINT: {hint}\nGOAL: {directive}\n\n\
         Document:\n\"\"\"\n{context}\n\"\"\""
    )
}

/// Prompt asking for the best answer to `question` using only `context`.
pub fn reference_answer_prompt(context: &str, question: &str) -> String {
    format!(
        "Document:\n\"\"\"{context}\"\"\"\n\n\
         Question: {question}\n\n\
         What would be the best possible answer based only on the content above?\n\
         Make it complete and directly relevant."
    )
}

/// Prompt asking for an answer to `question` strictly from `context`.
pub fn grounded_answer_prompt(question: &str, context: &str) -> String {
    format!(
        "You are a helpful assistant. Use the provided context to answer the user's question.\n\n\
         Question: {question}\n\n\
         Context:\n\"\"\"\n{context}\n\"\"\"\n\n\
         Answer clearly and ONLY based on this context."
    )
}
