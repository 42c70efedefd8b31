//! UseCase layer
//!
//! ストレージ（永続化）と RoomRegistry（ライブな所属）を組み合わせて、
//! セッションからの操作を実行します。送信（ブロードキャスト）内容の組み立ては UI 層が担います。

pub mod connect_session;
pub mod create_room;
pub mod disconnect_session;
pub mod error;
pub mod get_room_members;
pub mod join_room;
pub mod send_message;

pub use connect_session::ConnectSessionUseCase;
pub use create_room::CreateRoomUseCase;
pub use disconnect_session::{DisconnectSessionUseCase, RoomNotifyTargets};
pub use error::{CreateRoomError, JoinRoomError, SendMessageError};
pub use get_room_members::GetRoomMembersUseCase;
pub use join_room::JoinRoomUseCase;
pub use send_message::{SendMessageUseCase, SentMessage};
