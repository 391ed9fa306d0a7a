//! Driver pay for a single delivery.
//!
//! `payment = BASE_PAY + round(km * PER_KM) + round(minutes * PER_MINUTE)`, in the
//! smallest currency unit. Each term is rounded on its own before summing; payouts
//! must stay reproducible, so do not fold this into a single rounded total.

/// Flat amount paid for every delivery.
pub const BASE_PAY: i64 = 300;
/// Paid per kilometer of the whole route.
pub const PER_KM: f64 = 30.0;
/// Paid per minute of the whole route.
pub const PER_MINUTE: f64 = 20.0;

pub fn calculate_payment_amount(distance_meters: u64, duration_seconds: u64) -> i64 {
    let distance_km = distance_meters as f64 / 1000.0;
    let duration_minutes = duration_seconds as f64 / 60.0;

    let distance_pay = (distance_km * PER_KM).round() as i64;
    let duration_pay = (duration_minutes * PER_MINUTE).round() as i64;

    BASE_PAY + distance_pay + duration_pay
}
