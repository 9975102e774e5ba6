//! Integration test modules

mod gemini;
mod render;
mod session;
