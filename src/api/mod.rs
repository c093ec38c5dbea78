//! Client for the RapidAPI IMDb metadata service

pub mod client;
pub mod decode;
pub mod request;
mod wire;

pub use client::MovieApi;
pub use decode::{decode, extract_id, unwrap_envelope, ID_SEGMENT};
pub use request::{build_request, ApiRequest, Endpoint};
