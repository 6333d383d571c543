//! Behavioral tests for the booking workflow
//!
//! Covers the seat-uniqueness invariant, all-or-nothing validation, the
//! fare table, balance conservation, and the deliberately preserved
//! current-price refund rule.

use std::sync::Arc;

use core_kernel::{Money, SessionId, TicketId, UserId};
use domain_booking::{
    BookingError, BookingService, SeatRequest, TicketClass, TicketStatus, TicketStore,
};
use domain_catalog::{AgeRating, MovieStore, SeatPosition};
use domain_ledger::{LedgerError, PaymentStatus, PaymentStore, UserStore};
use domain_scheduling::SessionStore;
use test_utils::{
    kzt, HallBuilder, MemoryHallStore, MemoryMovieStore, MemoryPaymentStore, MemorySessionStore,
    MemoryTicketStore, MemoryUserStore, MovieBuilder, SessionBuilder, UserBuilder,
};

// ============================================================================
// Fixture
// ============================================================================

struct Fixture {
    booking: Arc<BookingService>,
    users: Arc<MemoryUserStore>,
    payments: Arc<MemoryPaymentStore>,
    sessions: Arc<MemorySessionStore>,
    tickets: Arc<MemoryTicketStore>,
    movies: Arc<MemoryMovieStore>,
    halls: Arc<MemoryHallStore>,
    user_id: UserId,
    session_id: SessionId,
}

/// Hall(rows=5, seats=10), Session(price=1000, duration=90), user with 10000
async fn fixture() -> Fixture {
    fixture_with_rating(AgeRating::General).await
}

async fn fixture_with_rating(age_rating: AgeRating) -> Fixture {
    let halls = Arc::new(MemoryHallStore::default());
    let movies = Arc::new(MemoryMovieStore::default());
    let sessions = Arc::new(MemorySessionStore::default());
    let users = Arc::new(MemoryUserStore::default());
    let payments = Arc::new(MemoryPaymentStore::default());
    let tickets = Arc::new(MemoryTicketStore::default());

    let hall_id = halls.add(HallBuilder::new().build()).await;
    let movie_id = movies
        .add(MovieBuilder::new().with_age_rating(age_rating).build())
        .await;
    let session_id = sessions
        .add(SessionBuilder::new(movie_id, hall_id).build())
        .await;
    let user_id = users.add(UserBuilder::new().build()).await;

    let booking = Arc::new(BookingService::new(
        tickets.clone(),
        sessions.clone(),
        users.clone(),
        halls.clone(),
        movies.clone(),
        payments.clone(),
    ));

    Fixture {
        booking,
        users,
        payments,
        sessions,
        tickets,
        movies,
        halls,
        user_id,
        session_id,
    }
}

fn seat(row: u32, seat: u32) -> SeatRequest {
    SeatRequest {
        position: SeatPosition::new(row, seat),
        class: TicketClass::Adult,
    }
}

fn seat_as(row: u32, seat_no: u32, class: TicketClass) -> SeatRequest {
    SeatRequest {
        position: SeatPosition::new(row, seat_no),
        class,
    }
}

async fn balance(f: &Fixture) -> Money {
    f.users.find(f.user_id).await.unwrap().balance
}

// ============================================================================
// Booking
// ============================================================================

#[tokio::test]
async fn adult_ticket_costs_base_price_and_debits_balance() {
    let f = fixture().await;

    let tickets = f
        .booking
        .book_seats(f.user_id, f.session_id, vec![seat(1, 1)])
        .await
        .unwrap();

    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].price, kzt(1000));
    assert_eq!(tickets[0].status, TicketStatus::Paid);
    assert_eq!(balance(&f).await, kzt(9000));

    let payment = f.payments.find(tickets[0].payment_id).await.unwrap();
    assert_eq!(payment.status, PaymentStatus::Completed);
    assert_eq!(payment.amount, kzt(1000));
    assert_eq!(payment.card_id, None);
}

#[tokio::test]
async fn fare_classes_apply_multipliers_to_one_payment() {
    let f = fixture().await;

    let tickets = f
        .booking
        .book_seats(
            f.user_id,
            f.session_id,
            vec![
                seat_as(1, 1, TicketClass::Adult),
                seat_as(1, 2, TicketClass::Student),
                seat_as(1, 3, TicketClass::Senior),
                seat_as(1, 4, TicketClass::Child),
            ],
        )
        .await
        .unwrap();

    let prices: Vec<Money> = tickets.iter().map(|t| t.price).collect();
    assert_eq!(prices, vec![kzt(1000), kzt(800), kzt(700), kzt(500)]);

    // One payment covers all four seats
    let payment_id = tickets[0].payment_id;
    assert!(tickets.iter().all(|t| t.payment_id == payment_id));
    assert_eq!(f.payments.find(payment_id).await.unwrap().amount, kzt(3000));
    assert_eq!(balance(&f).await, kzt(7000));
}

#[tokio::test]
async fn double_booking_the_same_seat_is_a_conflict() {
    let f = fixture().await;
    let rival = f.users.add(UserBuilder::new().build()).await;

    f.booking
        .book_seats(f.user_id, f.session_id, vec![seat(1, 1)])
        .await
        .unwrap();

    let err = f
        .booking
        .book_seats(rival, f.session_id, vec![seat(1, 1)])
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::SeatTaken(p) if p == SeatPosition::new(1, 1)));
    assert_eq!(f.booking.booked_seats(f.session_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn out_of_bounds_seat_creates_nothing() {
    let f = fixture().await;

    let err = f
        .booking
        .book_seats(f.user_id, f.session_id, vec![seat(6, 1)])
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::SeatOutOfBounds(_)));
    assert!(f.booking.booked_seats(f.session_id).await.unwrap().is_empty());
    assert_eq!(balance(&f).await, kzt(10_000));
}

#[tokio::test]
async fn one_bad_seat_fails_the_whole_request() {
    let f = fixture().await;

    // (1,1) is valid; (1,11) exceeds seats-per-row
    let err = f
        .booking
        .book_seats(f.user_id, f.session_id, vec![seat(1, 1), seat(1, 11)])
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::SeatOutOfBounds(_)));
    assert!(f.booking.booked_seats(f.session_id).await.unwrap().is_empty());
    assert_eq!(balance(&f).await, kzt(10_000));
}

#[tokio::test]
async fn empty_request_is_rejected() {
    let f = fixture().await;
    let err = f
        .booking
        .book_seats(f.user_id, f.session_id, vec![])
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::NoSeatsRequested));
}

#[tokio::test]
async fn requesting_the_same_seat_twice_in_one_request_fails() {
    let f = fixture().await;

    let err = f
        .booking
        .book_seats(f.user_id, f.session_id, vec![seat(2, 2), seat(2, 2)])
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::DuplicateSeatInRequest(_)));
    assert!(f.booking.booked_seats(f.session_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn child_tickets_are_refused_for_adult_movies() {
    let f = fixture_with_rating(AgeRating::EighteenPlus).await;

    let err = f
        .booking
        .book_seats(
            f.user_id,
            f.session_id,
            vec![seat_as(1, 1, TicketClass::Child)],
        )
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::ChildTicketRestricted));
    assert_eq!(balance(&f).await, kzt(10_000));
}

#[tokio::test]
async fn child_tickets_are_fine_for_general_movies() {
    let f = fixture().await;
    let tickets = f
        .booking
        .book_seats(
            f.user_id,
            f.session_id,
            vec![seat_as(1, 1, TicketClass::Child)],
        )
        .await
        .unwrap();
    assert_eq!(tickets[0].price, kzt(500));
}

#[tokio::test]
async fn insufficient_balance_has_no_side_effects() {
    let f = fixture().await;
    let poor = f
        .users
        .add(UserBuilder::new().with_balance(kzt(999)).build())
        .await;

    let err = f
        .booking
        .book_seats(poor, f.session_id, vec![seat(1, 1)])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BookingError::InsufficientFunds { needed, .. } if needed == kzt(1000)
    ));
    assert!(f.booking.booked_seats(f.session_id).await.unwrap().is_empty());
    assert_eq!(f.users.find(poor).await.unwrap().balance, kzt(999));
}

#[tokio::test]
async fn unknown_entities_give_specific_errors() {
    let f = fixture().await;

    assert!(matches!(
        f.booking
            .book_seats(f.user_id, SessionId::new(), vec![seat(1, 1)])
            .await
            .unwrap_err(),
        BookingError::SessionNotFound(_)
    ));
    assert!(matches!(
        f.booking
            .book_seats(UserId::new(), f.session_id, vec![seat(1, 1)])
            .await
            .unwrap_err(),
        BookingError::UserNotFound(_)
    ));
}

#[tokio::test]
async fn tickets_carry_the_movie_title() {
    let f = fixture().await;
    let movie = f.movies.find(f.sessions.find(f.session_id).await.unwrap().movie_id).await;
    let title = movie.unwrap().title;

    let tickets = f
        .booking
        .book_seats(f.user_id, f.session_id, vec![seat(3, 3)])
        .await
        .unwrap();
    assert_eq!(tickets[0].movie_title, title);
}

// ============================================================================
// Cancellation
// ============================================================================

#[tokio::test]
async fn cancel_refunds_and_frees_the_seat() {
    let f = fixture().await;

    let tickets = f
        .booking
        .book_seats(f.user_id, f.session_id, vec![seat(1, 1)])
        .await
        .unwrap();
    let ticket_id = tickets[0].id;

    f.booking.cancel_ticket(ticket_id, f.user_id).await.unwrap();

    assert_eq!(balance(&f).await, kzt(10_000));
    assert!(f.booking.booked_seats(f.session_id).await.unwrap().is_empty());
    let payment = f.payments.find(tickets[0].payment_id).await.unwrap();
    assert_eq!(payment.status, PaymentStatus::Refunded);

    // The freed seat can be booked again
    f.booking
        .book_seats(f.user_id, f.session_id, vec![seat(1, 1)])
        .await
        .unwrap();
}

#[tokio::test]
async fn cancel_refunds_the_sessions_current_price_not_the_paid_price() {
    // Deliberate policy: the refund follows the session's price at
    // cancellation time, even when it changed after purchase.
    let f = fixture().await;

    let tickets = f
        .booking
        .book_seats(f.user_id, f.session_id, vec![seat(1, 1)])
        .await
        .unwrap();
    assert_eq!(balance(&f).await, kzt(9000));

    f.sessions.set_price(f.session_id, kzt(1500)).await;
    f.booking.cancel_ticket(tickets[0].id, f.user_id).await.unwrap();

    // Paid 1000, refunded 1500
    assert_eq!(balance(&f).await, kzt(10_500));
}

#[tokio::test]
async fn cancelling_twice_is_a_conflict() {
    let f = fixture().await;

    let tickets = f
        .booking
        .book_seats(f.user_id, f.session_id, vec![seat(1, 1)])
        .await
        .unwrap();
    f.booking.cancel_ticket(tickets[0].id, f.user_id).await.unwrap();

    let err = f
        .booking
        .cancel_ticket(tickets[0].id, f.user_id)
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::AlreadyCancelled(_)));
    assert_eq!(balance(&f).await, kzt(10_000));
}

#[tokio::test]
async fn refunded_payment_blocks_cancellation_without_double_credit() {
    // A still-active ticket whose payment was already refunded elsewhere:
    // the state machine refuses the second refund.
    let f = fixture().await;

    let tickets = f
        .booking
        .book_seats(f.user_id, f.session_id, vec![seat(1, 1)])
        .await
        .unwrap();
    f.payments
        .transition(
            tickets[0].payment_id,
            PaymentStatus::Completed,
            PaymentStatus::Refunded,
        )
        .await
        .unwrap();

    let err = f
        .booking
        .cancel_ticket(tickets[0].id, f.user_id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BookingError::Ledger(LedgerError::InvalidTransition { .. })
    ));
    assert_eq!(balance(&f).await, kzt(9000));
}

#[tokio::test]
async fn only_the_payments_owner_may_cancel() {
    let f = fixture().await;
    let stranger = f.users.add(UserBuilder::new().build()).await;

    let tickets = f
        .booking
        .book_seats(f.user_id, f.session_id, vec![seat(1, 1)])
        .await
        .unwrap();

    let err = f
        .booking
        .cancel_ticket(tickets[0].id, stranger)
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::NotTicketOwner));
    assert_eq!(f.tickets.find(tickets[0].id).await.unwrap().status, TicketStatus::Paid);
}

#[tokio::test]
async fn cancelling_an_unknown_ticket_is_not_found() {
    let f = fixture().await;
    let err = f
        .booking
        .cancel_ticket(TicketId::new(), f.user_id)
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::TicketNotFound(_)));
}

// ============================================================================
// Queries
// ============================================================================

#[tokio::test]
async fn seat_map_lists_active_positions_only() {
    let f = fixture().await;

    let tickets = f
        .booking
        .book_seats(f.user_id, f.session_id, vec![seat(1, 1), seat(2, 5)])
        .await
        .unwrap();
    f.booking.cancel_ticket(tickets[0].id, f.user_id).await.unwrap();

    let map = f.booking.booked_seats(f.session_id).await.unwrap();
    assert_eq!(map, vec![SeatPosition::new(2, 5)]);
}

#[tokio::test]
async fn user_listing_includes_cancelled_tickets() {
    let f = fixture().await;

    let tickets = f
        .booking
        .book_seats(f.user_id, f.session_id, vec![seat(1, 1), seat(1, 2)])
        .await
        .unwrap();
    f.booking.cancel_ticket(tickets[0].id, f.user_id).await.unwrap();

    let mine = f.booking.tickets_for_user(f.user_id).await.unwrap();
    assert_eq!(mine.len(), 2);

    let active = f.booking.tickets_for_session(f.session_id).await.unwrap();
    assert_eq!(active.len(), 1);
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test]
async fn exactly_one_of_two_concurrent_requests_for_a_seat_wins() {
    let f = fixture().await;
    let rival = f.users.add(UserBuilder::new().build()).await;

    let a = {
        let booking = f.booking.clone();
        let (user, session) = (f.user_id, f.session_id);
        tokio::spawn(async move { booking.book_seats(user, session, vec![seat(3, 3)]).await })
    };
    let b = {
        let booking = f.booking.clone();
        let session = f.session_id;
        tokio::spawn(async move { booking.book_seats(rival, session, vec![seat(3, 3)]).await })
    };

    let results = [a.await.unwrap(), b.await.unwrap()];
    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| matches!(e, BookingError::SeatTaken(_))));
    assert_eq!(f.booking.booked_seats(f.session_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn concurrent_bookings_never_duplicate_seats() {
    let f = fixture().await;

    // 20 workers race for 10 distinct seats, two workers per seat
    let mut handles = Vec::new();
    for i in 0..20u32 {
        let booking = f.booking.clone();
        let session = f.session_id;
        let user = f.users.add(UserBuilder::new().build()).await;
        let position = seat(1 + i % 5, 1 + i % 2);
        handles.push(tokio::spawn(async move {
            booking.book_seats(user, session, vec![position]).await
        }));
    }

    let mut won = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            won += 1;
        }
    }

    let map = f.booking.booked_seats(f.session_id).await.unwrap();
    let distinct: std::collections::HashSet<_> = map.iter().copied().collect();
    assert_eq!(map.len(), distinct.len(), "duplicate seats issued");
    assert_eq!(won, map.len());
}

#[tokio::test]
async fn concurrent_cancellations_of_one_ticket_credit_once() {
    let f = fixture().await;

    let tickets = f
        .booking
        .book_seats(f.user_id, f.session_id, vec![seat(4, 4)])
        .await
        .unwrap();
    let ticket_id = tickets[0].id;

    let a = {
        let booking = f.booking.clone();
        let user = f.user_id;
        tokio::spawn(async move { booking.cancel_ticket(ticket_id, user).await })
    };
    let b = {
        let booking = f.booking.clone();
        let user = f.user_id;
        tokio::spawn(async move { booking.cancel_ticket(ticket_id, user).await })
    };

    let results = [a.await.unwrap(), b.await.unwrap()];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);

    // Exactly one refund landed: 10000 - 1000 + 1000
    assert_eq!(balance(&f).await, kzt(10_000));
    let payment = f.payments.find(tickets[0].payment_id).await.unwrap();
    assert_eq!(payment.status, PaymentStatus::Refunded);
}

#[tokio::test]
async fn cancellation_racing_a_direct_refund_never_credits_twice() {
    // The payment can also be refunded through the ledger path, which does
    // not hold the session lock; the store's compare-and-swap is what
    // keeps the two paths exclusive.
    let f = fixture().await;

    let tickets = f
        .booking
        .book_seats(f.user_id, f.session_id, vec![seat(4, 5)])
        .await
        .unwrap();
    let payment_id = tickets[0].payment_id;

    let direct = {
        let payments = f.payments.clone();
        tokio::spawn(async move {
            payments
                .transition(payment_id, PaymentStatus::Completed, PaymentStatus::Refunded)
                .await
        })
    };
    let cancel = {
        let booking = f.booking.clone();
        let (ticket_id, user) = (tickets[0].id, f.user_id);
        tokio::spawn(async move { booking.cancel_ticket(ticket_id, user).await })
    };

    let direct_won = direct.await.unwrap().is_ok();
    let cancel_won = cancel.await.unwrap().is_ok();
    assert!(direct_won != cancel_won, "exactly one refund path must win");

    let expected = if cancel_won { kzt(10_000) } else { kzt(9000) };
    assert_eq!(balance(&f).await, expected);
}

#[tokio::test]
async fn bookings_for_different_sessions_run_independently() {
    let f = fixture().await;
    let hall_id = f.halls.add(HallBuilder::new().with_name("Blue Hall").build()).await;
    let movie_id = f.movies.add(MovieBuilder::new().build()).await;
    let other_session = f
        .sessions
        .add(SessionBuilder::new(movie_id, hall_id).build())
        .await;

    let a = {
        let booking = f.booking.clone();
        let (user, session) = (f.user_id, f.session_id);
        tokio::spawn(async move { booking.book_seats(user, session, vec![seat(1, 1)]).await })
    };
    let b = {
        let booking = f.booking.clone();
        let user = f.user_id;
        tokio::spawn(async move { booking.book_seats(user, other_session, vec![seat(1, 1)]).await })
    };

    a.await.unwrap().unwrap();
    b.await.unwrap().unwrap();
    assert_eq!(balance(&f).await, kzt(8000));
}
