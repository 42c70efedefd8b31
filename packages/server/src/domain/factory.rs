//! Identifier factories.

use std::sync::atomic::{AtomicU64, Ordering};

use super::value_object::SessionId;

/// SessionId 生成器
///
/// 1 から始まる単調増加カウンタ。プロセス内で一意な SessionId を払い出す。
#[derive(Debug)]
pub struct SessionIdFactory {
    next: AtomicU64,
}

impl SessionIdFactory {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// 次の SessionId を払い出す
    pub fn generate(&self) -> SessionId {
        SessionId::new(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for SessionIdFactory {
    fn default() -> Self {
        Self::new()
    }
}
