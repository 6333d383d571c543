//! Booking Domain Ports

use async_trait::async_trait;

use core_kernel::{PortError, SessionId, TicketId, UserId};
use domain_catalog::SeatPosition;

use crate::ticket::{Ticket, TicketStatus};

/// Persistence operations for tickets
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Persists a new ticket
    async fn insert(&self, ticket: Ticket) -> Result<(), PortError>;

    /// Fetches a ticket by id
    async fn find(&self, id: TicketId) -> Result<Ticket, PortError>;

    /// Updates only the status field
    async fn set_status(&self, id: TicketId, status: TicketStatus) -> Result<(), PortError>;

    /// Returns true when an active ticket already occupies the seat
    async fn is_seat_taken(
        &self,
        session_id: SessionId,
        position: SeatPosition,
    ) -> Result<bool, PortError>;

    /// Active tickets of a session
    async fn active_for_session(&self, session_id: SessionId) -> Result<Vec<Ticket>, PortError>;

    /// All tickets of a user, cancelled ones included
    async fn for_user(&self, user_id: UserId) -> Result<Vec<Ticket>, PortError>;
}
