//! Formatting for money amounts.
//!
//! Amounts are kept as `f64` and only rounded to whole cents for display, so
//! sums like 1.10 + 2.20 + 4.40 that land a hair away from 7.70 still read as
//! $7.70.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

/// numfmt switches to scientific notation from here on.
const MAX_GROUPED_DOLLARS: f64 = 1e15;

/// Round `amount` to the nearest cent, halves away from zero.
pub(crate) fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Format `amount` as dollars and cents with thousands separators, e.g.
/// "$1,234.50" or "-$50.00".
///
/// The amount is rounded to the nearest cent first, so 999.999 is
/// "$1,000.00" and anything that rounds to zero is "$0.00" without a sign.
pub fn format_currency(amount: f64) -> String {
    let total_cents = (amount.abs() * 100.0).round();
    let dollars = (total_cents / 100.0).trunc();
    let cents = total_cents - dollars * 100.0;

    let sign = if amount < 0.0 && total_cents > 0.0 {
        "-"
    } else {
        ""
    };

    format!("{sign}{}.{:02}", format_dollars(dollars), cents as u8)
}

/// Format a whole, non-negative number of dollars, e.g. "$1,234".
fn format_dollars(dollars: f64) -> String {
    static DOLLAR_FMT: OnceLock<Formatter> = OnceLock::new();

    if dollars == 0.0 {
        // numfmt writes zero as a bare "0" without the prefix.
        return "$0".to_owned();
    }

    if dollars >= MAX_GROUPED_DOLLARS {
        return format!("${dollars:.0}");
    }

    DOLLAR_FMT
        .get_or_init(|| {
            Formatter::currency("$")
                .expect("\"$\" is a valid currency prefix")
                .precision(Precision::Decimals(0))
        })
        .fmt_string(dollars)
}
