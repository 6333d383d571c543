//! In-memory port adapters
//!
//! Each store keeps its entities in a `tokio::sync::RwLock<HashMap>`.
//! `MemoryUserStore::adjust_balance` performs its read-modify-write under
//! the write lock, giving the atomicity the port contract requires.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use core_kernel::{CardId, HallId, Money, MovieId, PaymentId, PortError, SessionId, TicketId, UserId};
use domain_booking::{Ticket, TicketStatus, TicketStore};
use domain_catalog::{Hall, HallStore, Movie, MovieStore, RatingSource, SeatPosition};
use domain_ledger::{CardStore, Payment, PaymentCard, PaymentStatus, PaymentStore, User, UserStore};
use domain_scheduling::{Session, SessionStore, Showtime};

// ============================================================================
// Catalog
// ============================================================================

#[derive(Default)]
pub struct MemoryHallStore {
    halls: RwLock<HashMap<HallId, Hall>>,
}

impl MemoryHallStore {
    pub async fn add(&self, hall: Hall) -> HallId {
        let id = hall.id;
        self.halls.write().await.insert(id, hall);
        id
    }
}

#[async_trait]
impl HallStore for MemoryHallStore {
    async fn find(&self, id: HallId) -> Result<Hall, PortError> {
        self.halls
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Hall", id))
    }
}

#[derive(Default)]
pub struct MemoryMovieStore {
    movies: RwLock<HashMap<MovieId, Movie>>,
}

impl MemoryMovieStore {
    pub async fn add(&self, movie: Movie) -> MovieId {
        let id = movie.id;
        self.movies.write().await.insert(id, movie);
        id
    }
}

#[async_trait]
impl MovieStore for MemoryMovieStore {
    async fn find(&self, id: MovieId) -> Result<Movie, PortError> {
        self.movies
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Movie", id))
    }

    async fn update_rating(&self, id: MovieId, rating: Decimal) -> Result<(), PortError> {
        let mut movies = self.movies.write().await;
        let movie = movies
            .get_mut(&id)
            .ok_or_else(|| PortError::not_found("Movie", id))?;
        movie.rating = Some(rating);
        Ok(())
    }
}

/// Review averages keyed by movie
#[derive(Default)]
pub struct MemoryRatingSource {
    averages: RwLock<HashMap<MovieId, Decimal>>,
}

impl MemoryRatingSource {
    pub async fn set(&self, movie_id: MovieId, average: Decimal) {
        self.averages.write().await.insert(movie_id, average);
    }
}

#[async_trait]
impl RatingSource for MemoryRatingSource {
    async fn average_rating(&self, id: MovieId) -> Result<Option<Decimal>, PortError> {
        Ok(self.averages.read().await.get(&id).copied())
    }
}

// ============================================================================
// Scheduling
// ============================================================================

#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl MemorySessionStore {
    /// Seeds a session directly, bypassing the scheduler's rules
    pub async fn add(&self, session: Session) -> SessionId {
        let id = session.id;
        self.sessions.write().await.insert(id, session);
        id
    }

    /// Overwrites the price of a stored session
    pub async fn set_price(&self, id: SessionId, price: Money) {
        if let Some(session) = self.sessions.write().await.get_mut(&id) {
            session.price = price;
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, session: Session) -> Result<(), PortError> {
        self.sessions.write().await.insert(session.id, session);
        Ok(())
    }

    async fn update(&self, session: Session) -> Result<(), PortError> {
        let mut sessions = self.sessions.write().await;
        if !sessions.contains_key(&session.id) {
            return Err(PortError::not_found("Session", session.id));
        }
        sessions.insert(session.id, session);
        Ok(())
    }

    async fn delete(&self, id: SessionId) -> Result<(), PortError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| PortError::not_found("Session", id))
    }

    async fn find(&self, id: SessionId) -> Result<Session, PortError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Session", id))
    }

    async fn overlapping_in_hall(
        &self,
        hall_id: HallId,
        showtime: Showtime,
    ) -> Result<Vec<Session>, PortError> {
        Ok(self
            .sessions
            .read()
            .await
            .values()
            .filter(|s| s.hall_id == hall_id && s.showtime.overlaps(&showtime))
            .cloned()
            .collect())
    }

    async fn upcoming(&self) -> Result<Vec<Session>, PortError> {
        let now = Utc::now();
        Ok(self
            .sessions
            .read()
            .await
            .values()
            .filter(|s| s.showtime.start() >= now)
            .cloned()
            .collect())
    }

    async fn by_movie(&self, movie_id: MovieId) -> Result<Vec<Session>, PortError> {
        Ok(self
            .sessions
            .read()
            .await
            .values()
            .filter(|s| s.movie_id == movie_id)
            .cloned()
            .collect())
    }
}

// ============================================================================
// Ledger
// ============================================================================

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<UserId, User>>,
}

impl MemoryUserStore {
    pub async fn add(&self, user: User) -> UserId {
        let id = user.id;
        self.users.write().await.insert(id, user);
        id
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find(&self, id: UserId) -> Result<User, PortError> {
        self.users
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("User", id))
    }

    async fn adjust_balance(&self, id: UserId, delta: Money) -> Result<Money, PortError> {
        // Holding the write lock across the read-modify-write is what makes
        // this atomic
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&id)
            .ok_or_else(|| PortError::not_found("User", id))?;
        let new_balance = user
            .balance
            .checked_add(&delta)
            .map_err(|e| PortError::validation(e.to_string()))?;
        if new_balance.is_negative() {
            return Err(PortError::conflict("balance would go negative"));
        }
        user.balance = new_balance;
        Ok(new_balance)
    }
}

#[derive(Default)]
pub struct MemoryPaymentStore {
    payments: RwLock<HashMap<PaymentId, Payment>>,
}

#[async_trait]
impl PaymentStore for MemoryPaymentStore {
    async fn insert(&self, payment: Payment) -> Result<(), PortError> {
        self.payments.write().await.insert(payment.id, payment);
        Ok(())
    }

    async fn find(&self, id: PaymentId) -> Result<Payment, PortError> {
        self.payments
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Payment", id))
    }

    async fn transition(
        &self,
        id: PaymentId,
        from: PaymentStatus,
        to: PaymentStatus,
    ) -> Result<(), PortError> {
        // Compare-and-swap under the write lock
        let mut payments = self.payments.write().await;
        let payment = payments
            .get_mut(&id)
            .ok_or_else(|| PortError::not_found("Payment", id))?;
        if payment.status != from {
            return Err(PortError::conflict(format!(
                "payment is {:?}, expected {:?}",
                payment.status, from
            )));
        }
        payment.status = to;
        Ok(())
    }

    async fn for_user(&self, user_id: UserId) -> Result<Vec<Payment>, PortError> {
        let mut payments: Vec<Payment> = self
            .payments
            .read()
            .await
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        payments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(payments)
    }
}

#[derive(Default)]
pub struct MemoryCardStore {
    cards: RwLock<HashMap<CardId, PaymentCard>>,
}

#[async_trait]
impl CardStore for MemoryCardStore {
    async fn insert(&self, card: PaymentCard) -> Result<(), PortError> {
        self.cards.write().await.insert(card.id, card);
        Ok(())
    }

    async fn find(&self, id: CardId) -> Result<PaymentCard, PortError> {
        self.cards
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("PaymentCard", id))
    }

    async fn for_user(&self, user_id: UserId) -> Result<Vec<PaymentCard>, PortError> {
        Ok(self
            .cards
            .read()
            .await
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }
}

// ============================================================================
// Booking
// ============================================================================

#[derive(Default)]
pub struct MemoryTicketStore {
    tickets: RwLock<HashMap<TicketId, Ticket>>,
}

#[async_trait]
impl TicketStore for MemoryTicketStore {
    async fn insert(&self, ticket: Ticket) -> Result<(), PortError> {
        self.tickets.write().await.insert(ticket.id, ticket);
        Ok(())
    }

    async fn find(&self, id: TicketId) -> Result<Ticket, PortError> {
        self.tickets
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Ticket", id))
    }

    async fn set_status(&self, id: TicketId, status: TicketStatus) -> Result<(), PortError> {
        let mut tickets = self.tickets.write().await;
        let ticket = tickets
            .get_mut(&id)
            .ok_or_else(|| PortError::not_found("Ticket", id))?;
        ticket.status = status;
        Ok(())
    }

    async fn is_seat_taken(
        &self,
        session_id: SessionId,
        position: SeatPosition,
    ) -> Result<bool, PortError> {
        Ok(self
            .tickets
            .read()
            .await
            .values()
            .any(|t| t.session_id == session_id && t.position == position && t.is_active()))
    }

    async fn active_for_session(&self, session_id: SessionId) -> Result<Vec<Ticket>, PortError> {
        Ok(self
            .tickets
            .read()
            .await
            .values()
            .filter(|t| t.session_id == session_id && t.is_active())
            .cloned()
            .collect())
    }

    async fn for_user(&self, user_id: UserId) -> Result<Vec<Ticket>, PortError> {
        let mut tickets: Vec<Ticket> = self
            .tickets
            .read()
            .await
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tickets)
    }
}
