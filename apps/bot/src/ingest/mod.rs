// Inbound document adapters: resume PDFs and job postings.
// Both are best-effort and report failure as empty text.

pub mod job_source;
pub mod pdf;
pub mod upload;
