//! Deterministic card-of-the-day selection.
//!
//! The seed is the day label followed by the user id. It is hashed with the
//! classic `h = h * 31 + c` rolling hash over UTF-16 code units in wrapping
//! 32-bit signed arithmetic, and the index is `|h| mod n`.

use chrono::NaiveDate;

/// Day-granular label used in the seed, e.g. `Mon Oct 19 2026`.
pub fn date_label(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

/// Long label for display, e.g. `Monday, October 19, 2026`.
pub fn long_date_label(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// The seed string for a day and user.
pub fn daily_seed(date: NaiveDate, user_id: &str) -> String {
    format!("{}{user_id}", date_label(date))
}

/// Rolling hash of `seed` in wrapping `i32` arithmetic.
pub fn seed_hash(seed: &str) -> i32 {
    seed.encode_utf16().fold(0i32, |h, unit| {
        h.wrapping_mul(31).wrapping_add(i32::from(unit))
    })
}

/// Map a hash onto `0..catalog_size`. `None` for an empty catalog.
pub fn index_for_hash(hash: i32, catalog_size: usize) -> Option<usize> {
    if catalog_size == 0 {
        return None;
    }
    // |i32::MIN| does not fit an i32; widen first.
    let magnitude = u64::from(hash.unsigned_abs());
    usize::try_from(magnitude % catalog_size as u64).ok()
}

/// Select the card index for `user_id` on `date`.
pub fn select_daily(date: NaiveDate, user_id: &str, catalog_size: usize) -> Option<usize> {
    index_for_hash(seed_hash(&daily_seed(date, user_id)), catalog_size)
}
