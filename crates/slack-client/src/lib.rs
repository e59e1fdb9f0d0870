//! # slack-client
//!
//! HTTP client for the Slack Web API implementing the `SlackApi` port.
//!
//! Methods are invoked as `POST {api_url}/{method}` with form-encoded
//! parameters and a bearer token. The decoded body is returned whatever its
//! `ok` value; interpreting `ok`, `error` and `warning` is left to the caller.

mod web_client;

pub use web_client::{ClientError, SlackClientConfig, WebClient, DEFAULT_API_URL};
