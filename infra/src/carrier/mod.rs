//! Carrier lookup API integration
//!
//! HTTP client for the carrier's "format" endpoint and the decoder that
//! turns its JSON reply into a [`pv_core::CarrierReply`].

mod client;
mod response;


pub use client::TmtCarrierClient;
pub use response::decode_reply;
