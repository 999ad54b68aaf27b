//! Receipt
//!
//! Console rendering of evaluation results.

use std::io;

use rusty_money::MoneyError;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    coupons::CouponId,
    pricing::TotalPriceError,
    strategies::{AppliedCart, ApplicabilityResult},
};

/// Errors that can occur when rendering a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error calculating a line total.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Writes a cart priced with `coupon` as a table of lines followed by the totals.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if a line total cannot be calculated or the output cannot be written.
pub fn write_applied_cart(
    mut out: impl io::Write,
    coupon: CouponId,
    applied: &AppliedCart<'_>,
) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["Product", "Qty", "Unit Price", "Line Total", "Discount", "Final"]);

    for line in applied.lines() {
        let line_total = line.line_total()?;

        builder.push_record([
            line.product.to_string(),
            line.quantity.to_string(),
            line.unit_price.to_string(),
            line_total.to_string(),
            line.discount.to_string(),
            line_total.sub(line.discount)?.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(theme());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(1..), Alignment::right());

    writeln!(out, "\nCoupon {coupon}\n{table}").map_err(|_err| ReceiptError::IO)?;

    write_summary(&mut out, applied)
}

/// Writes applicable coupons as a table of id, type and discount.
///
/// # Errors
///
/// Returns [`ReceiptError::IO`] if the output cannot be written.
pub fn write_applicable(
    mut out: impl io::Write,
    results: &[ApplicabilityResult<'_>],
) -> Result<(), ReceiptError> {
    if results.is_empty() {
        return writeln!(out, "\nNo applicable coupons\n").map_err(|_err| ReceiptError::IO);
    }

    let mut builder = Builder::default();

    builder.push_record(["Coupon", "Type", "Discount"]);

    for result in results {
        builder.push_record([
            result.coupon.to_string(),
            result.kind.to_string(),
            result.discount.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(theme());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..), Alignment::right());

    writeln!(out, "\n{table}\n").map_err(|_err| ReceiptError::IO)
}

fn theme() -> Theme {
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    theme
}

fn write_summary(out: &mut impl io::Write, applied: &AppliedCart<'_>) -> Result<(), ReceiptError> {
    let rows = [
        ("Total:", applied.total_price().to_string()),
        ("Discount:", applied.total_discount().to_string()),
        ("Final:", applied.final_price().to_string()),
    ];

    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

    for (label, value) in rows {
        writeln!(out, " {label:<label_width$} {value:>value_width$}")
            .map_err(|_err| ReceiptError::IO)?;
    }

    writeln!(out).map_err(|_err| ReceiptError::IO)
}
