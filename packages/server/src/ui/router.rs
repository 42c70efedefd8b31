//! Session router: turns inbound events of one session into usecase calls,
//! replies and room broadcasts.
//!
//! Replies go to the calling session only. Broadcasts go to a snapshot of the
//! room's members taken from the registry; a failed delivery to one member is
//! logged by the pusher and never reported back to the caller.

use std::sync::Arc;

use crate::{
    domain::{
        ChatStorage, MessageContent, MessagePusher, PusherChannel, RoomId, RoomRegistry,
        SessionId, UserId,
    },
    infrastructure::dto::websocket::{
        ClientEvent, CreateRoomPayload, EventParseError, JoinRoomPayload, RoomNotice, RoomRef,
        SendMessagePayload, ServerEvent,
    },
    usecase::{
        ConnectSessionUseCase, CreateRoomError, CreateRoomUseCase, DisconnectSessionUseCase,
        JoinRoomError, JoinRoomUseCase, SendMessageUseCase,
    },
};

const CREATE_ROOM_FAILED: &str = "Failed to create or join chat room";
const JOIN_ROOM_FAILED: &str = "Failed to join chat room";
const SEND_MESSAGE_FAILED: &str = "Failed to send message";

/// Routes the events of every live session
pub struct SessionRouter {
    connect_session_usecase: Arc<ConnectSessionUseCase>,
    create_room_usecase: Arc<CreateRoomUseCase>,
    join_room_usecase: Arc<JoinRoomUseCase>,
    send_message_usecase: Arc<SendMessageUseCase>,
    disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl SessionRouter {
    pub fn new(
        connect_session_usecase: Arc<ConnectSessionUseCase>,
        create_room_usecase: Arc<CreateRoomUseCase>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            connect_session_usecase,
            create_room_usecase,
            join_room_usecase,
            send_message_usecase,
            disconnect_session_usecase,
            message_pusher,
        }
    }

    /// Wire every usecase from the three collaborators
    pub fn with_components(
        storage: Arc<dyn ChatStorage>,
        registry: Arc<dyn RoomRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self::new(
            Arc::new(ConnectSessionUseCase::new(
                registry.clone(),
                message_pusher.clone(),
            )),
            Arc::new(CreateRoomUseCase::new(storage.clone(), registry.clone())),
            Arc::new(JoinRoomUseCase::new(storage.clone(), registry.clone())),
            Arc::new(SendMessageUseCase::new(storage, registry.clone())),
            Arc::new(DisconnectSessionUseCase::new(
                registry,
                message_pusher.clone(),
            )),
            message_pusher,
        )
    }

    /// Open a session whose outbound events are queued on `sender`
    pub async fn connect(&self, sender: PusherChannel) -> SessionId {
        self.connect_session_usecase.execute(sender).await
    }

    /// Handle one inbound text frame
    pub async fn handle_text(&self, session: SessionId, text: &str) {
        match ClientEvent::parse(text) {
            Ok(event) => self.handle_event(session, event).await,
            Err(e) => self.reject(session, e).await,
        }
    }

    /// Reply to a frame that could not be read as text
    pub async fn reject_frame(&self, session: SessionId, reason: String) {
        let error = EventParseError::MalformedFrame(reason);
        self.reject(session, error).await;
    }

    pub async fn handle_event(&self, session: SessionId, event: ClientEvent) {
        tracing::debug!("{} -> {}", session, event.type_name());
        match event {
            ClientEvent::CreateRoom(payload) => self.create_room(session, payload).await,
            ClientEvent::JoinRoom(payload) => self.join_room(session, payload).await,
            ClientEvent::SendMessage(payload) => self.send_message(session, payload).await,
        }
    }

    /// Tear a session down
    ///
    /// Every other member of each room the session was in is told about the
    /// disconnect before the session is removed from the registry.
    pub async fn disconnect(&self, session: SessionId) {
        let rooms = self.disconnect_session_usecase.notify_targets(session);
        for room in &rooms {
            let event = ServerEvent::ClientDisconnected(RoomNotice {
                room_id: room.room_id.value(),
                message: format!("{} disconnected", session),
            });
            self.broadcast(&room.targets, &event).await;
        }

        let left_rooms = self.disconnect_session_usecase.execute(session).await;
        tracing::debug!("{} left {} room(s)", session, left_rooms.len());
    }

    async fn create_room(&self, session: SessionId, payload: CreateRoomPayload) {
        let result = self
            .create_room_usecase
            .execute(
                session,
                UserId::new(payload.user_id),
                UserId::new(payload.target_user_id),
            )
            .await;

        match result {
            Ok(room_id) => {
                tracing::info!("{} created room {}", session, room_id);
                let created = ServerEvent::RoomCreated(room_ref(room_id));
                self.reply(session, &created).await;
            }
            Err(CreateRoomError::SessionClosed(_)) => {
                tracing::debug!("{} closed while creating a room", session);
            }
            Err(e) => {
                tracing::warn!("{} failed to create room: {}", session, e);
                let error = ServerEvent::error(CREATE_ROOM_FAILED);
                self.reply(session, &error).await;
            }
        }
    }

    async fn join_room(&self, session: SessionId, payload: JoinRoomPayload) {
        let room_id = RoomId::new(payload.room_id);
        let result = self
            .join_room_usecase
            .execute(session, UserId::new(payload.user_id), room_id)
            .await;

        match result {
            Ok(targets) => {
                tracing::info!("{} joined room {}", session, room_id);
                let joined = ServerEvent::RoomJoined(room_ref(room_id));
                self.reply(session, &joined).await;

                let notice = ServerEvent::NewClientJoined(RoomNotice {
                    room_id: room_id.value(),
                    message: format!("{} joined", session),
                });
                self.broadcast(&targets, &notice).await;
            }
            Err(JoinRoomError::SessionClosed(_)) => {
                tracing::debug!("{} closed while joining room {}", session, room_id);
            }
            Err(e) => {
                tracing::warn!("{} failed to join room {}: {}", session, room_id, e);
                let error = ServerEvent::error(JOIN_ROOM_FAILED);
                self.reply(session, &error).await;
            }
        }
    }

    async fn send_message(&self, session: SessionId, payload: SendMessagePayload) {
        let room_id = RoomId::new(payload.room_id);
        let content = MessageContent::new(payload.message);
        let result = self
            .send_message_usecase
            .execute(UserId::new(payload.user_id), room_id, content)
            .await;

        match result {
            Ok(sent) => {
                let event = ServerEvent::from(&sent.message);
                let delivered = self.broadcast(&sent.recipients, &event).await;
                tracing::debug!(
                    "Message {} in room {} delivered to {}/{} session(s)",
                    sent.message.id.value(),
                    room_id,
                    delivered,
                    sent.recipients.len()
                );
            }
            Err(e) => {
                tracing::warn!("{} failed to send to room {}: {}", session, room_id, e);
                let error = ServerEvent::error(SEND_MESSAGE_FAILED);
                self.reply(session, &error).await;
            }
        }
    }

    async fn reject(&self, session: SessionId, error: EventParseError) {
        tracing::warn!("Invalid event from {}: {}", session, error);
        let reply = ServerEvent::error(error.client_message());
        self.reply(session, &reply).await;
    }

    async fn reply(&self, session: SessionId, event: &ServerEvent) {
        let Some(json) = encode(event) else {
            return;
        };
        if let Err(e) = self.message_pusher.push_to(session, &json).await {
            tracing::warn!("Failed to reply to {}: {}", session, e);
        }
    }

    async fn broadcast(&self, targets: &[SessionId], event: &ServerEvent) -> usize {
        match encode(event) {
            Some(json) => self.message_pusher.broadcast(targets, &json).await,
            None => 0,
        }
    }
}

fn room_ref(room_id: RoomId) -> RoomRef {
    RoomRef {
        room_id: room_id.value(),
    }
}

fn encode(event: &ServerEvent) -> Option<String> {
    match event.to_json() {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::error!("Failed to serialize event: {}", e);
            None
        }
    }
}
