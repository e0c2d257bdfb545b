//! UseCase layer
//!
//! 各ユースケースはドメインの trait (PresenceRegistry / RoomRepository / MessagePusher)
//! にのみ依存する。Room 単位の順序は [`sequencer::RoomSequencer`] で保証する。

pub mod clear_board;
pub mod connect;
pub mod disconnect;
pub mod draw;
pub mod error;
pub mod get_rooms;
pub mod join_room;
pub mod register_user;
pub mod send_chat;
pub mod send_invite;
pub mod sequencer;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use clear_board::ClearBoardUseCase;
pub use connect::ConnectUseCase;
pub use disconnect::DisconnectUseCase;
pub use draw::DrawUseCase;
pub use error::{GetRoomDetailError, JoinRoomError, RegisterError};
pub use get_rooms::{GetRoomDetailUseCase, GetRoomsUseCase, RoomDetail, RoomOverview};
pub use join_room::JoinRoomUseCase;
pub use register_user::RegisterUserUseCase;
pub use send_chat::SendChatUseCase;
pub use send_invite::{InviteDelivery, SendInviteUseCase};
pub use sequencer::RoomSequencer;
pub use session::{SessionGateway, SessionState, SessionUseCases};
