//! Client core for the Microsoft Graph / Outlook REST API.
//!
//! # Overview
//! A logical call (`RequestSpec`: verb, resource path, query options, extra
//! headers, payload) goes through three stages:
//! `OutlookClient::build_request` composes the URL, header set and body,
//! a `Transport` executes it, and `classify` turns the response into parsed
//! JSON, `None` for an empty body, or a typed `ApiError`.
//! `OutlookClient::perform_request` runs all three, once.
//!
//! # Design
//! - The stages exchange plain data (`HttpRequest`, `HttpResponse`), so each
//!   can be tested without a network.
//! - There are no retries. Each call yields one result or one error.
//! - Query values pass through unquoted; OData syntax is the caller's job.
//! - The per-resource calls in `apis` are thin wrappers over
//!   `perform_request`.

pub mod apis;
pub mod casing;
pub mod classify;
pub mod client;
pub mod config;
mod default_client;
pub mod error;
pub mod http;
pub mod query;
pub mod request;
pub mod transport;

pub use apis::EventResponse;
pub use classify::classify;
pub use client::OutlookClient;
pub use config::{ApiFamily, ClientConfiguration};
pub use default_client::{default_client, TOKEN_ENV};
pub use error::{ApiError, ErrorKind, ResponseError};
pub use http::{HttpBody, HttpMethod, HttpRequest, HttpResponse};
pub use query::{ExtendedPropertyFilter, OrderBy, QueryOptions, Select};
pub use request::{Payload, RequestSpec};
pub use transport::{Transport, TransportError, UreqTransport};
