//! RoomRegistry trait 定義
//!
//! ライブなセッションとルームの双方向の所属関係（session → rooms, room → sessions）を
//! 管理するインデックス。2 つの対応は常に互いの逆写像であり、どの呼び出し元からも
//! 食い違った状態は観測できない。
//!
//! 全ての操作は同期的で、単一の排他スコープの中でアトミックに実行される。

use super::{RoomId, SessionId};

/// Live membership index shared by every session
pub trait RoomRegistry: Send + Sync {
    /// 新しいセッションを空のルーム集合で登録する
    ///
    /// 登録済みのセッションに対する 2 回目の呼び出しは無視される。
    fn register(&self, session: SessionId);

    /// セッションをルームに参加させる
    ///
    /// 既に参加済みなら何もしない（冪等）。未登録（切断済み）のセッションは
    /// 参加させず `false` を返す。
    fn join(&self, session: SessionId, room_id: RoomId) -> bool;

    /// セッションをルームから退出させる
    ///
    /// 参加していなければ何もしない。メンバーが 0 人になったルームのエントリは解放される。
    /// 実際に退出した場合のみ `true` を返す。
    fn leave(&self, session: SessionId, room_id: RoomId) -> bool;

    /// セッションを全てのルームから退出させた上で登録を破棄する
    ///
    /// 退出したルームの一覧を返す。
    fn unregister(&self, session: SessionId) -> Vec<RoomId>;

    /// ルームに現在参加しているセッションの一覧（送信者も含む）
    fn members_of(&self, room_id: RoomId) -> Vec<SessionId>;

    /// セッションが現在参加しているルームの一覧
    fn rooms_of(&self, session: SessionId) -> Vec<RoomId>;

    /// 全ルームの所属状況のスナップショット（ルーム ID 昇順）
    fn snapshot(&self) -> Vec<(RoomId, Vec<SessionId>)>;
}
