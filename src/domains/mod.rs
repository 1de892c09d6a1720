//! Domains module containing business logic organized by bounded contexts.
//!
//! `market` owns the financial data model and every store read. The MCP
//! surfaces (`tools`, `resources`, `prompts`) sit on top of it.

pub mod market;
pub mod prompts;
pub mod resources;
pub mod tools;
