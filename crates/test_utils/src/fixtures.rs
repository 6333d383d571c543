//! Common fixtures

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use core_kernel::{Currency, Money};
use domain_ledger::NewCard;

/// Money in the primary operating currency
pub fn kzt(major_units: i64) -> Money {
    Money::new(Decimal::from(major_units), Currency::KZT)
}

/// Default session base price
pub fn standard_price() -> Money {
    kzt(1000)
}

/// A timestamp safely in the future: tomorrow at the given hour (UTC)
pub fn tomorrow_at(hour: i64) -> DateTime<Utc> {
    (Utc::now() + Duration::days(1))
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always valid")
        .and_utc()
        + Duration::hours(hour)
}

/// A card that passes every validation rule
pub fn valid_card() -> NewCard {
    NewCard {
        holder_name: "AIGERIM SERIKOVA".into(),
        number: "4400430112345678".into(),
        expiry: "12/39".into(),
        cvv: "123".into(),
    }
}
