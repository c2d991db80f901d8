// Generation: form → prompt → backend → interpreted document.
// All backend calls go through llm_client::TextGenerator.

pub mod generator;
pub mod handlers;
pub mod interpreter;
pub mod prompts;
pub mod session;
