// ABOUTME: AI service integration for Specforge
// ABOUTME: Structured JSON generation against an Ollama-compatible endpoint

pub mod service;

pub use service::{AiResponse, AiService, AiServiceError, AiServiceResult, Usage};
