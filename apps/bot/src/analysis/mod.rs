// Resume vs job description analysis: prompt templates and the strict-JSON scorer.
// All model calls go through llm_client.

pub mod prompts;
pub mod score;
