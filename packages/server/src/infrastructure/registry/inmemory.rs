//! InMemory RoomRegistry 実装
//!
//! session → rooms と room → sessions の 2 つの HashMap を 1 つの `std::sync::Mutex` で
//! まとめて保護します。片方だけが更新された状態はロックの外から観測できません。
//!
//! ロックは同期的な区間でのみ保持し、`.await` をまたいで保持することはありません。

use std::{
    collections::{BTreeSet, HashMap},
    sync::{Mutex, MutexGuard, PoisonError},
};

use crate::domain::{RoomId, RoomRegistry, SessionId};

#[derive(Debug, Default)]
struct Memberships {
    rooms_by_session: HashMap<SessionId, BTreeSet<RoomId>>,
    sessions_by_room: HashMap<RoomId, BTreeSet<SessionId>>,
}

impl Memberships {
    /// room 側から session を外し、空になったルームのエントリを解放する
    fn detach_from_room(&mut self, session: SessionId, room_id: RoomId) {
        if let Some(members) = self.sessions_by_room.get_mut(&room_id) {
            members.remove(&session);
            if members.is_empty() {
                self.sessions_by_room.remove(&room_id);
                tracing::debug!("Room {} released from registry", room_id);
            }
        }
    }
}

/// インメモリ RoomRegistry 実装
#[derive(Debug, Default)]
pub struct InMemoryRoomRegistry {
    memberships: Mutex<Memberships>,
}

impl InMemoryRoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Memberships> {
        // 各操作は途中で panic し得ないため、poison されても内容は整合している
        self.memberships
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl RoomRegistry for InMemoryRoomRegistry {
    fn register(&self, session: SessionId) {
        let mut memberships = self.lock();
        if memberships.rooms_by_session.contains_key(&session) {
            tracing::warn!("Session '{}' is already registered, ignoring", session);
            return;
        }
        memberships.rooms_by_session.insert(session, BTreeSet::new());
    }

    fn join(&self, session: SessionId, room_id: RoomId) -> bool {
        let mut memberships = self.lock();
        let Some(rooms) = memberships.rooms_by_session.get_mut(&session) else {
            tracing::warn!(
                "Session '{}' is not registered, refusing to join room {}",
                session,
                room_id
            );
            return false;
        };

        rooms.insert(room_id);
        memberships
            .sessions_by_room
            .entry(room_id)
            .or_default()
            .insert(session);
        true
    }

    fn leave(&self, session: SessionId, room_id: RoomId) -> bool {
        let mut memberships = self.lock();
        let removed = memberships
            .rooms_by_session
            .get_mut(&session)
            .is_some_and(|rooms| rooms.remove(&room_id));

        if removed {
            memberships.detach_from_room(session, room_id);
        }
        removed
    }

    fn unregister(&self, session: SessionId) -> Vec<RoomId> {
        let mut memberships = self.lock();
        let Some(rooms) = memberships.rooms_by_session.remove(&session) else {
            return Vec::new();
        };

        for room_id in &rooms {
            memberships.detach_from_room(session, *room_id);
        }
        rooms.into_iter().collect()
    }

    fn members_of(&self, room_id: RoomId) -> Vec<SessionId> {
        self.lock()
            .sessions_by_room
            .get(&room_id)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    fn rooms_of(&self, session: SessionId) -> Vec<RoomId> {
        self.lock()
            .rooms_by_session
            .get(&session)
            .map(|rooms| rooms.iter().copied().collect())
            .unwrap_or_default()
    }

    fn snapshot(&self) -> Vec<(RoomId, Vec<SessionId>)> {
        let memberships = self.lock();
        let mut rooms: Vec<(RoomId, Vec<SessionId>)> = memberships
            .sessions_by_room
            .iter()
            .map(|(room_id, members)| (*room_id, members.iter().copied().collect()))
            .collect();
        rooms.sort_by_key(|(room_id, _)| *room_id);
        rooms
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use super::*;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - join / leave / unregister / members_of / rooms_of の基本動作
    // - session → rooms と room → sessions が常に逆写像であること
    // - 並行アクセス下でも逆写像の不変条件が崩れないこと
    //
    // 【なぜこのテストが必要か】
    // - RoomRegistry は全セッションが共有する唯一の可変状態
    // - ブロードキャスト先はこの所属情報から決まるため、不整合は誤配送に直結する
    // ========================================

    fn session(n: u64) -> SessionId {
        SessionId::new(n)
    }

    fn room(n: i64) -> RoomId {
        RoomId::new(n)
    }

    /// 2 つの対応が互いの逆写像になっていることを検証する
    fn assert_inverse(registry: &InMemoryRoomRegistry) {
        let memberships = registry.lock();
        for (session, rooms) in &memberships.rooms_by_session {
            for room_id in rooms {
                assert!(
                    memberships
                        .sessions_by_room
                        .get(room_id)
                        .is_some_and(|members| members.contains(session)),
                    "room {room_id} does not list session {session}"
                );
            }
        }
        for (room_id, members) in &memberships.sessions_by_room {
            assert!(!members.is_empty(), "room {room_id} kept with no members");
            for session in members {
                assert!(
                    memberships
                        .rooms_by_session
                        .get(session)
                        .is_some_and(|rooms| rooms.contains(room_id)),
                    "session {session} does not list room {room_id}"
                );
            }
        }
    }

    #[test]
    fn test_join_records_both_directions() {
        // テスト項目: join で session → rooms と room → sessions の両方が更新される
        // given (前提条件):
        let registry = InMemoryRoomRegistry::new();
        registry.register(session(1));

        // when (操作):
        let joined = registry.join(session(1), room(7));

        // then (期待する結果):
        assert!(joined);
        assert_eq!(registry.members_of(room(7)), vec![session(1)]);
        assert_eq!(registry.rooms_of(session(1)), vec![room(7)]);
        assert_inverse(&registry);
    }

    #[test]
    fn test_join_is_idempotent() {
        // テスト項目: 同じルームに 2 回 join しても所属は 1 つのまま
        // given (前提条件):
        let registry = InMemoryRoomRegistry::new();
        registry.register(session(1));
        registry.join(session(1), room(7));

        // when (操作):
        let joined_again = registry.join(session(1), room(7));

        // then (期待する結果):
        assert!(joined_again);
        assert_eq!(registry.members_of(room(7)), vec![session(1)]);
        assert_eq!(registry.rooms_of(session(1)), vec![room(7)]);
        assert_inverse(&registry);
    }

    #[test]
    fn test_join_unregistered_session_is_refused() {
        // テスト項目: 未登録（切断済み）のセッションはルームに参加できない
        // given (前提条件):
        let registry = InMemoryRoomRegistry::new();

        // when (操作):
        let joined = registry.join(session(9), room(7));

        // then (期待する結果):
        assert!(!joined);
        assert!(registry.members_of(room(7)).is_empty());
        assert!(registry.snapshot().is_empty());
    }

    #[test]
    fn test_register_twice_keeps_existing_rooms() {
        // テスト項目: 登録済みセッションの再登録は無視され、所属が消えない
        // given (前提条件):
        let registry = InMemoryRoomRegistry::new();
        registry.register(session(1));
        registry.join(session(1), room(7));

        // when (操作):
        registry.register(session(1));

        // then (期待する結果):
        assert_eq!(registry.rooms_of(session(1)), vec![room(7)]);
        assert_inverse(&registry);
    }

    #[test]
    fn test_leave_removes_membership_pair() {
        // テスト項目: leave で両方向の所属が削除される
        // given (前提条件):
        let registry = InMemoryRoomRegistry::new();
        registry.register(session(1));
        registry.register(session(2));
        registry.join(session(1), room(7));
        registry.join(session(2), room(7));

        // when (操作):
        let left = registry.leave(session(1), room(7));

        // then (期待する結果):
        assert!(left);
        assert_eq!(registry.members_of(room(7)), vec![session(2)]);
        assert!(registry.rooms_of(session(1)).is_empty());
        assert_inverse(&registry);
    }

    #[test]
    fn test_leave_non_member_is_noop() {
        // テスト項目: 参加していないルームからの leave はエラーにならず何も変えない
        // given (前提条件):
        let registry = InMemoryRoomRegistry::new();
        registry.register(session(1));
        registry.register(session(2));
        registry.join(session(2), room(7));
        let before = registry.snapshot();

        // when (操作):
        let left = registry.leave(session(1), room(7));
        let left_unknown = registry.leave(session(3), room(8));

        // then (期待する結果):
        assert!(!left);
        assert!(!left_unknown);
        assert_eq!(registry.snapshot(), before);
        assert_inverse(&registry);
    }

    #[test]
    fn test_leave_last_member_releases_room() {
        // テスト項目: 最後のメンバーが抜けたルームのエントリは解放される
        // given (前提条件):
        let registry = InMemoryRoomRegistry::new();
        registry.register(session(1));
        registry.join(session(1), room(7));

        // when (操作):
        registry.leave(session(1), room(7));

        // then (期待する結果):
        assert!(registry.snapshot().is_empty());
        assert!(registry.members_of(room(7)).is_empty());
        assert_inverse(&registry);
    }

    #[test]
    fn test_unregister_removes_session_from_every_room() {
        // テスト項目: unregister でセッションが全てのルームから外れ、退出したルーム一覧が返る
        // given (前提条件):
        let registry = InMemoryRoomRegistry::new();
        registry.register(session(1));
        registry.register(session(2));
        registry.join(session(1), room(7));
        registry.join(session(1), room(8));
        registry.join(session(2), room(7));

        // when (操作):
        let left_rooms = registry.unregister(session(1));

        // then (期待する結果):
        assert_eq!(left_rooms, vec![room(7), room(8)]);
        assert_eq!(registry.members_of(room(7)), vec![session(2)]);
        assert!(registry.members_of(room(8)).is_empty());
        assert!(registry.rooms_of(session(1)).is_empty());
        assert!(!registry.join(session(1), room(9)));
        assert_inverse(&registry);
    }

    #[test]
    fn test_unregister_unknown_session_is_noop() {
        // テスト項目: 未登録セッションの unregister は空のリストを返す
        // given (前提条件):
        let registry = InMemoryRoomRegistry::new();

        // when (操作):
        let left_rooms = registry.unregister(session(1));

        // then (期待する結果):
        assert!(left_rooms.is_empty());
    }

    #[test]
    fn test_snapshot_is_sorted_by_room_id() {
        // テスト項目: snapshot はルーム ID 昇順、メンバーはセッション ID 昇順で返る
        // given (前提条件):
        let registry = InMemoryRoomRegistry::new();
        for n in 1..=3 {
            registry.register(session(n));
        }
        registry.join(session(3), room(9));
        registry.join(session(2), room(4));
        registry.join(session(1), room(9));

        // when (操作):
        let snapshot = registry.snapshot();

        // then (期待する結果):
        assert_eq!(
            snapshot,
            vec![
                (room(4), vec![session(2)]),
                (room(9), vec![session(1), session(3)]),
            ]
        );
    }

    #[test]
    fn test_concurrent_join_and_unregister_keep_inverse_mapping() {
        // テスト項目: 複数スレッドから join / leave / unregister を並行に呼んでも逆写像が保たれる
        // given (前提条件):
        let registry = Arc::new(InMemoryRoomRegistry::new());

        // when (操作):
        let handles: Vec<_> = (1..=8u64)
            .map(|n| {
                let registry = registry.clone();
                thread::spawn(move || {
                    for round in 0..200i64 {
                        let id = session(n * 1_000 + round as u64);
                        registry.register(id);
                        registry.join(id, room(round % 5));
                        registry.join(id, room((round + n as i64) % 5));
                        let _ = registry.members_of(room(round % 5));
                        if round % 3 == 0 {
                            registry.leave(id, room(round % 5));
                        }
                        if round % 2 == 0 {
                            registry.unregister(id);
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // then (期待する結果):
        assert_inverse(&registry);
        let memberships = registry.lock();
        // 偶数ラウンドのセッションは全て unregister 済み
        assert!(
            memberships
                .rooms_by_session
                .keys()
                .all(|id| (id.value() % 1_000) % 2 == 1)
        );
    }
}
