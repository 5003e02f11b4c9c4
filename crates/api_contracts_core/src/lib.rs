//! # API Contracts Core
//!
//! Core data structures for verifying REST API traffic against declared
//! contracts during development.
//!
//! A contract states what a request payload and a response body for a given
//! `METHOD /path/pattern` must look like. This crate provides the building
//! blocks the registry and validator crates share:
//!
//! - **URL normalization**: canonical paths from raw request URLs
//! - **Pattern matching**: `:param` segments and parameter extraction
//! - **Contracts**: request/response schema pairs and list envelopes
//! - **Schemas**: the [`Schema`] capability and the declarative [`TypeSchema`]
//! - **Errors**: registry build errors and contract violations
//!
//! ## Example
//!
//! ```rust
//! use api_contracts_core::{ContractKey, normalize_url};
//!
//! let key: ContractKey = "PUT /invoices/:id".parse().unwrap();
//! let path = normalize_url("http://localhost:3000/api/invoices/123?status=draft");
//!
//! assert_eq!(path, "/invoices/123");
//! assert!(key.pattern.matches(&path));
//! ```

pub mod builder;
pub mod contract;
pub mod error;
pub mod key;
pub mod schema;
pub mod url;

pub use builder::*;
pub use contract::*;
pub use error::*;
pub use key::*;
pub use schema::*;
pub use url::*;
