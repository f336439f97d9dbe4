//! Booking ids and human-readable booking references.

use chrono::{DateTime, Utc};
use rand::distributions::{Alphanumeric, Distribution, Uniform};
use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const REFERENCE_SUFFIX_LEN: usize = 6;
const ID_SUFFIX_LEN: usize = 9;

/// Unique booking id: `booking-<unix millis>-<9 base36 chars>`
pub fn generate_booking_id<R: Rng + ?Sized>(created_at: DateTime<Utc>, rng: &mut R) -> String {
    let digits = Uniform::from(0..BASE36.len());
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| BASE36[digits.sample(rng)] as char)
        .collect();
    format!("booking-{}-{}", created_at.timestamp_millis(), suffix)
}

/// Reference printed on vouchers: `<PREFIX>-<YYMMDD>-<6 uppercase alphanumerics>`
pub fn generate_booking_reference<R: Rng + ?Sized>(
    prefix: &str,
    created_at: DateTime<Utc>,
    rng: &mut R,
) -> String {
    let suffix: String = Alphanumeric
        .sample_iter(rng)
        .take(REFERENCE_SUFFIX_LEN)
        .map(|b| (b as char).to_ascii_uppercase())
        .collect();
    format!("{}-{}-{}", prefix, created_at.format("%y%m%d"), suffix)
}
