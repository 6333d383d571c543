//! The booking workflow
//!
//! `book_seats` is the only path that creates tickets, and `cancel_ticket`
//! the only path that mutates one. The whole multi-seat booking runs under
//! the session's lock: every check (bounds, availability, fare policy,
//! balance) happens before any write, so a failed request leaves no trace.
//!
//! Cancellation runs under the same per-session lock and re-reads the
//! ticket there, so racing cancellations of one ticket cannot both credit
//! the refund. A crash between the balance credit and the status writes
//! still leaves an observable intermediate state; the balance step itself
//! is atomic.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use core_kernel::{Money, PortError, SessionId, TicketId, UserId};
use domain_catalog::{HallStore, MovieStore, SeatPosition};
use domain_ledger::{LedgerError, Payment, PaymentStatus, PaymentStore, UserStore};
use domain_scheduling::SessionStore;

use crate::error::BookingError;
use crate::locks::SessionLocks;
use crate::ports::TicketStore;
use crate::ticket::{SeatRequest, Ticket, TicketClass, TicketStatus};

/// Seat booking and cancellation
pub struct BookingService {
    tickets: Arc<dyn TicketStore>,
    sessions: Arc<dyn SessionStore>,
    users: Arc<dyn UserStore>,
    halls: Arc<dyn HallStore>,
    movies: Arc<dyn MovieStore>,
    payments: Arc<dyn PaymentStore>,
    locks: SessionLocks,
}

impl BookingService {
    pub fn new(
        tickets: Arc<dyn TicketStore>,
        sessions: Arc<dyn SessionStore>,
        users: Arc<dyn UserStore>,
        halls: Arc<dyn HallStore>,
        movies: Arc<dyn MovieStore>,
        payments: Arc<dyn PaymentStore>,
    ) -> Self {
        Self {
            tickets,
            sessions,
            users,
            halls,
            movies,
            payments,
            locks: SessionLocks::new(),
        }
    }

    /// Books one ticket per requested seat, all-or-nothing
    ///
    /// Exactly one of two conflicting requests for the same seat succeeds;
    /// the loser sees `SeatTaken`. On success one completed payment covers
    /// all seats and the caller's balance drops by the class-adjusted sum.
    pub async fn book_seats(
        &self,
        user_id: UserId,
        session_id: SessionId,
        requests: Vec<SeatRequest>,
    ) -> Result<Vec<Ticket>, BookingError> {
        if requests.is_empty() {
            return Err(BookingError::NoSeatsRequested);
        }

        // Serializes bookings for this session; other sessions are unaffected
        let lock = self.locks.lock_for(session_id);
        let _guard = lock.lock().await;

        let session = self.sessions.find(session_id).await.map_err(|err| {
            not_found_or_port(err, BookingError::SessionNotFound(session_id))
        })?;
        let movie = self.movies.find(session.movie_id).await.map_err(|err| {
            not_found_or_port(err, BookingError::MovieNotFound(session.movie_id))
        })?;
        let hall = self.halls.find(session.hall_id).await.map_err(|err| {
            not_found_or_port(err, BookingError::HallNotFound(session.hall_id))
        })?;
        let user = self
            .users
            .find(user_id)
            .await
            .map_err(|err| not_found_or_port(err, BookingError::UserNotFound(user_id)))?;

        // Validate every seat before writing anything
        let mut seen = HashSet::new();
        let mut total = Money::zero(session.price.currency());
        let mut priced: Vec<(SeatRequest, Money)> = Vec::with_capacity(requests.len());

        for request in requests {
            let position = request.position;
            if !hall.contains(position) {
                return Err(BookingError::SeatOutOfBounds(position));
            }
            if !seen.insert(position) {
                return Err(BookingError::DuplicateSeatInRequest(position));
            }
            if self.tickets.is_seat_taken(session_id, position).await? {
                return Err(BookingError::SeatTaken(position));
            }
            if request.class == TicketClass::Child && movie.age_rating.restricts_minors() {
                return Err(BookingError::ChildTicketRestricted);
            }

            let price = session.price.multiply(request.class.multiplier());
            total = total.checked_add(&price)?;
            priced.push((request, price));
        }

        if user.balance.checked_sub(&total)?.is_negative() {
            return Err(BookingError::InsufficientFunds {
                needed: total,
                available: user.balance,
            });
        }

        // Money side: one completed payment, one atomic debit
        let payment = Payment::completed(user_id, total);
        self.payments.insert(payment.clone()).await?;
        self.users
            .adjust_balance(user_id, -total)
            .await
            .map_err(|err| match err {
                // Lost a concurrent debit on another session
                PortError::Conflict { .. } => BookingError::InsufficientFunds {
                    needed: total,
                    available: user.balance,
                },
                other => BookingError::Port(other),
            })?;

        // A failure partway through this loop leaves the earlier tickets in
        // place; there is no multi-record transaction to roll back under.
        let now = Utc::now();
        let mut tickets = Vec::with_capacity(priced.len());
        for (request, price) in priced {
            let ticket = Ticket {
                id: TicketId::new(),
                user_id,
                session_id,
                payment_id: payment.id,
                position: request.position,
                class: request.class,
                price,
                movie_title: movie.title.clone(),
                status: TicketStatus::Paid,
                created_at: now,
            };
            self.tickets.insert(ticket.clone()).await?;
            tickets.push(ticket);
        }

        info!(
            user_id = %user_id,
            session_id = %session_id,
            payment_id = %payment.id,
            seats = tickets.len(),
            %total,
            "seats booked"
        );
        Ok(tickets)
    }

    /// Cancels a ticket and refunds the session's current price
    ///
    /// Ownership is checked through the payment, which is the
    /// authoritative owner record. The refund amount is deliberately the
    /// session's price at cancellation time, not the price originally
    /// paid. The `Completed -> Refunded` transition is validated before
    /// the credit, so a payment can never be refunded twice.
    pub async fn cancel_ticket(
        &self,
        ticket_id: TicketId,
        user_id: UserId,
    ) -> Result<(), BookingError> {
        let ticket = self
            .tickets
            .find(ticket_id)
            .await
            .map_err(|err| not_found_or_port(err, BookingError::TicketNotFound(ticket_id)))?;

        // Same lock as booking: a cancelled seat is freed atomically with
        // respect to new bookings, and two racing cancellations of one
        // ticket cannot both observe it as active.
        let lock = self.locks.lock_for(ticket.session_id);
        let _guard = lock.lock().await;

        let ticket = self
            .tickets
            .find(ticket_id)
            .await
            .map_err(|err| not_found_or_port(err, BookingError::TicketNotFound(ticket_id)))?;
        let mut payment = self.payments.find(ticket.payment_id).await.map_err(|err| {
            not_found_or_port(err, BookingError::PaymentNotFound(ticket.payment_id))
        })?;

        if payment.user_id != user_id {
            return Err(BookingError::NotTicketOwner);
        }
        if ticket.status == TicketStatus::Cancelled {
            return Err(BookingError::AlreadyCancelled(ticket_id));
        }

        // Catches a stale payment cheaply; the store transition below is
        // the binding check
        payment.refund().map_err(BookingError::Ledger)?;

        let session = self.sessions.find(ticket.session_id).await.map_err(|err| {
            not_found_or_port(err, BookingError::SessionNotFound(ticket.session_id))
        })?;

        // Compare-and-swap at the store, before the credit: a refund that
        // already landed elsewhere makes this the losing call, with no
        // second credit
        match self
            .payments
            .transition(payment.id, PaymentStatus::Completed, PaymentStatus::Refunded)
            .await
        {
            Ok(()) => {}
            Err(PortError::Conflict { .. }) => {
                let current = self.payments.find(payment.id).await?;
                return Err(BookingError::Ledger(LedgerError::InvalidTransition {
                    from: current.status,
                    to: PaymentStatus::Refunded,
                }));
            }
            Err(other) => return Err(BookingError::Port(other)),
        }

        self.users.adjust_balance(user_id, session.price).await?;
        self.tickets
            .set_status(ticket_id, TicketStatus::Cancelled)
            .await?;

        info!(
            user_id = %user_id,
            ticket_id = %ticket_id,
            refunded = %session.price,
            "ticket cancelled"
        );
        Ok(())
    }

    /// Seat positions of the session's active tickets
    ///
    /// Carries no user-identifying data; intended for public seat maps.
    pub async fn booked_seats(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<SeatPosition>, BookingError> {
        let tickets = self.tickets.active_for_session(session_id).await?;
        debug!(session_id = %session_id, seats = tickets.len(), "seat map read");
        Ok(tickets.into_iter().map(|t| t.position).collect())
    }

    /// All tickets the user has ever bought, cancelled ones included
    pub async fn tickets_for_user(&self, user_id: UserId) -> Result<Vec<Ticket>, BookingError> {
        Ok(self.tickets.for_user(user_id).await?)
    }

    /// Active tickets of a session
    pub async fn tickets_for_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<Ticket>, BookingError> {
        Ok(self.tickets.active_for_session(session_id).await?)
    }
}

fn not_found_or_port(err: PortError, not_found: BookingError) -> BookingError {
    if err.is_not_found() {
        not_found
    } else {
        BookingError::Port(err)
    }
}
