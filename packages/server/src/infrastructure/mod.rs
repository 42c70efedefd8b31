//! Infrastructure layer: concrete implementations of the domain interfaces and DTOs.

pub mod dto;
pub mod message_pusher;
pub mod registry;
pub mod storage;
