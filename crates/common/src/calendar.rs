//! Gregorian calendar helpers.

/// Gregorian leap-year rule: divisible by 4, except centuries not divisible by 400.
///
/// Any year is accepted, including zero and negative (proleptic) years.
pub fn is_leap_year(year: i32) -> bool {
    if year % 4 != 0 {
        false
    } else if year % 100 != 0 {
        true
    } else {
        year % 400 == 0
    }
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}
