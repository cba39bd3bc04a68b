//! Display formatting helpers.
//!
//! Pure functions turning raw numeric/date values into the strings the
//! presentation layer shows. Unparsable input gets a placeholder string,
//! never an error.

use chrono::Utc;

use crate::model::parse_date;

/// Whole-dollar USD with thousands separators: `$1,234,567`.
pub fn format_price(price: f64) -> String {
    format!("${}", group_thousands(price.round() as i64))
}

/// Monthly lease amount: `$2,400/month`.
pub fn format_lease_amount(amount: f64) -> String {
    format!("{}/month", format_price(amount))
}

/// Relative date for recent listings, absolute beyond a month:
/// "Yesterday", "3 days ago", "2 weeks ago", "Mar 4, 2024".
pub fn format_date(text: &str) -> String {
    let Some(date) = parse_date(text) else {
        return "Date not available".to_string();
    };

    let days = (Utc::now() - date).num_days().abs();
    match days {
        0..=1 => "Yesterday".to_string(),
        2..=6 => format!("{} days ago", days),
        7..=29 => {
            let weeks = days / 7;
            format!("{} week{} ago", weeks, if weeks > 1 { "s" } else { "" })
        }
        _ => date.format("%b %-d, %Y").to_string(),
    }
}

/// Square footage with thousands separators.
pub fn format_square_feet(square_feet: u32) -> String {
    group_thousands(i64::from(square_feet))
}

/// "2 beds, 1 bath" with singular handling. Bathroom counts print without a
/// trailing `.0` but keep half baths ("2.5 baths").
pub fn format_beds_baths(bedrooms: u32, bathrooms: f64) -> String {
    let bed_word = if bedrooms == 1 { "bed" } else { "beds" };
    let bath_word = if bathrooms == 1.0 { "bath" } else { "baths" };
    let baths = if bathrooms.fract() == 0.0 {
        format!("{}", bathrooms as i64)
    } else {
        format!("{}", bathrooms)
    };
    format!("{} {}, {} {}", bedrooms, bed_word, baths, bath_word)
}

fn group_thousands(value: i64) -> String {
    let negative = value < 0;
    let digits = value.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
