//! ChatStorage の実装
//!
//! - `inmemory`: HashMap をインメモリ DB として使う実装
//! - 将来的に: PostgreSQL などの DBMS

pub mod inmemory;

pub use inmemory::InMemoryChatStorage;
