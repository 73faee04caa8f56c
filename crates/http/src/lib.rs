//! CRM.AI HTTP client

pub mod client;

pub use client::statuses::{Lookup, LookupKind};
pub use client::{ApiClient, ApiClientBuilder, DEFAULT_API_PREFIX, error::ClientError};
pub use reqwest::{self, Method};
