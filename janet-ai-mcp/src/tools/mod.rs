//! Tool implementations for the Janet MCP server
//!
//! This module contains the actual implementations of the search tools
//! that integrate with janet-ai-retriever, janet-ai-context, and janet-ai-embed.

pub mod regex_search;
pub mod semantic_search;
