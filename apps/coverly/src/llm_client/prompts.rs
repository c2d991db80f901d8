// Cross-cutting prompt fragments added by the client to every request.
// Document-specific prompts live in generation::prompts.

/// Persona prepended to every prompt before it is sent to Gemini.
pub const ASSISTANT_PREAMBLE: &str =
    "You are Coverly, an expert writing assistant specializing in resumes and cover letters.";

pub fn with_preamble(prompt: &str) -> String {
    format!("{ASSISTANT_PREAMBLE}\n\n{prompt}")
}
