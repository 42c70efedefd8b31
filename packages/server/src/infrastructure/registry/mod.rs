//! RoomRegistry の実装
//!
//! - `inmemory`: 単一の Mutex で保護したインメモリ実装

pub mod inmemory;

pub use inmemory::InMemoryRoomRegistry;
