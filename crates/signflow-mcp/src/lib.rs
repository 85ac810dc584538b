//! Signflow MCP Server
//!
//! Model Context Protocol server exposing the document-signing workflow
//! lifecycle to AI clients over stdio.
//!
//! Provides 6 MCP tools:
//! - `create_workflow` - CREATE → UPDATE → APPROVE with a complete body
//! - `update_and_approve` - UPDATE → APPROVE an existing draft
//! - `create_and_approve` - CREATE → APPROVE with template defaults
//! - `create_workflow_from_text` - rule-based extraction, then the full lifecycle
//! - `create_workflow_from_natural_language` - Gemini-composed body, then the full lifecycle
//! - `preview_workflow` - extraction and body assembly only, no remote calls
//!
//! Every tool except `preview_workflow` takes a `bearer_token` argument.
//!
//! # Example
//!
//! ```no_run
//! use signflow_mcp::{McpServer, ServerConfig};
//!
//! let server = McpServer::new(ServerConfig::from_env().unwrap()).unwrap();
//! server.run().unwrap();
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod protocol;
mod server;
mod tools;

pub use config::{ServerConfig, CONFIG_PATH_VAR};
pub use error::McpError;
pub use server::McpServer;
