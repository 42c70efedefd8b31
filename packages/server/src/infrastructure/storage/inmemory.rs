//! InMemory ChatStorage 実装
//!
//! ドメイン層が定義する ChatStorage trait の具体的な実装。
//! ルームのユーザー集合とメッセージ履歴を HashMap に保持します。
//!
//! ルーム ID とメッセージ ID は 1 から順に採番し、メッセージのタイムスタンプは
//! 注入された [`Clock`] から取得します。

use std::{
    collections::{BTreeSet, HashMap},
    sync::Arc,
};

use async_trait::async_trait;
use chatrelay_shared::time::{Clock, SystemClock};
use tokio::sync::Mutex;

use crate::domain::{
    ChatStorage, Message, MessageContent, MessageId, RoomId, StorageError, Timestamp, UserId,
};

#[derive(Debug, Default)]
struct StoredRoom {
    users: BTreeSet<UserId>,
    // 履歴は書き込みのみ（読み出しはテストから）
    #[cfg_attr(not(test), allow(dead_code))]
    messages: Vec<Message>,
}

#[derive(Debug)]
struct Tables {
    rooms: HashMap<RoomId, StoredRoom>,
    next_room_id: i64,
    next_message_id: i64,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            rooms: HashMap::new(),
            next_room_id: 1,
            next_message_id: 1,
        }
    }
}

/// インメモリ ChatStorage 実装
pub struct InMemoryChatStorage {
    tables: Mutex<Tables>,
    clock: Arc<dyn Clock>,
}

impl InMemoryChatStorage {
    /// システム時計を使う InMemoryChatStorage を作成
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// 任意の時計を使う InMemoryChatStorage を作成
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            clock,
        }
    }

    /// ルームに所属するユーザーの一覧（ユーザー ID 昇順）
    #[cfg(test)]
    pub(crate) async fn users_of(&self, room_id: RoomId) -> Option<Vec<UserId>> {
        let tables = self.tables.lock().await;
        tables
            .rooms
            .get(&room_id)
            .map(|room| room.users.iter().copied().collect())
    }

    /// ルームのメッセージ履歴（作成順）
    #[cfg(test)]
    pub(crate) async fn messages_of(&self, room_id: RoomId) -> Option<Vec<Message>> {
        let tables = self.tables.lock().await;
        tables.rooms.get(&room_id).map(|room| room.messages.clone())
    }
}

impl Default for InMemoryChatStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatStorage for InMemoryChatStorage {
    async fn create_room(&self, user_ids: [UserId; 2]) -> Result<RoomId, StorageError> {
        let mut tables = self.tables.lock().await;
        let room_id = RoomId::new(tables.next_room_id);
        tables.next_room_id += 1;

        let room = StoredRoom {
            users: user_ids.into_iter().collect(),
            messages: Vec::new(),
        };
        tables.rooms.insert(room_id, room);

        tracing::debug!(
            "Room {} stored with users {} and {}",
            room_id,
            user_ids[0],
            user_ids[1]
        );
        Ok(room_id)
    }

    async fn add_user_to_room(
        &self,
        room_id: RoomId,
        user_id: UserId,
    ) -> Result<(), StorageError> {
        let mut tables = self.tables.lock().await;
        let room = tables
            .rooms
            .get_mut(&room_id)
            .ok_or(StorageError::RoomNotFound(room_id))?;

        room.users.insert(user_id);
        Ok(())
    }

    async fn create_message(
        &self,
        room_id: RoomId,
        sender_id: UserId,
        content: MessageContent,
    ) -> Result<Message, StorageError> {
        let mut tables = self.tables.lock().await;
        let message_id = MessageId::new(tables.next_message_id);

        let room = tables
            .rooms
            .get_mut(&room_id)
            .ok_or(StorageError::RoomNotFound(room_id))?;
        if !room.users.contains(&sender_id) {
            return Err(StorageError::NotRoomMember {
                room_id,
                user_id: sender_id,
            });
        }

        let message = Message::new(
            message_id,
            room_id,
            sender_id,
            content,
            Timestamp::new(self.clock.now_millis()),
        );
        room.messages.push(message.clone());
        tables.next_message_id += 1;

        Ok(message)
    }
}
