//! The interview core: stage sequencing, prompt construction, the
//! intent-classification answer gate, and LLM response recovery.

pub mod machine;
pub mod models;
pub mod prompts;
pub mod session;
pub mod stages;
pub mod validation;
