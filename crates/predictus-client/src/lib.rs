//! Client layer: talks to the Predictus server over HTTP.

pub mod http;

pub use http::{ClientConfig, ClientError, LookupBackend, LookupClient};
