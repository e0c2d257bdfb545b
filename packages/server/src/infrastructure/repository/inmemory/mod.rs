//! In-memory implementations of the domain repositories.

pub mod presence;
pub mod room;

pub use presence::InMemoryPresenceRegistry;
pub use room::InMemoryRoomRepository;
