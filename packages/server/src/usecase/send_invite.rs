//! UseCase: 招待の送信
//!
//! 招待先の名前を Presence Registry で解決し、その 1 接続にだけ届ける。
//! 招待先がオフラインなら何もせず、送信者にも何も返さない（fire-and-forget）。

use std::sync::Arc;

use crate::domain::{Invite, MessagePusher, PresenceRegistry, RoomId, ServerEvent, UserName};

/// 招待の配信結果（ログとテストのためだけに使う）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InviteDelivery {
    Delivered,
    Dropped,
}

pub struct SendInviteUseCase {
    presence: Arc<dyn PresenceRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl SendInviteUseCase {
    pub fn new(presence: Arc<dyn PresenceRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            presence,
            message_pusher,
        }
    }

    pub async fn execute(&self, from: UserName, to: UserName, room_id: RoomId) -> InviteDelivery {
        let Some(target) = self.presence.lookup(&to).await else {
            tracing::debug!("Invite from '{}' to offline user '{}' dropped", from, to);
            return InviteDelivery::Dropped;
        };

        let invite = Invite { from, to, room_id };
        tracing::info!(
            "Relaying invite from '{}' to '{}' for room '{}'",
            invite.from,
            invite.to,
            invite.room_id
        );
        match self
            .message_pusher
            .push_to(&target, ServerEvent::ReceiveInvite(invite))
            .await
        {
            Ok(()) => InviteDelivery::Delivered,
            Err(e) => {
                tracing::debug!("Invite dropped: {}", e);
                InviteDelivery::Dropped
            }
        }
    }
}
