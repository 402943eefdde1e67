//! Core domain concepts shared across all subdomains.
//!
//! - [`question::Question`]: validated user input bound for the backend
//! - [`error::DomainError`]: domain-level errors
//! - [`string`]: small text helpers used in log output

pub mod error;
pub mod question;
pub mod string;
