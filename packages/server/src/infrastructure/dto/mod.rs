//! Data Transfer Objects (DTOs) for the chat relay.
//!
//! DTOs are organized by protocol:
//! - `websocket`: inbound client events and outbound server events
//! - `http`: HTTP API response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
