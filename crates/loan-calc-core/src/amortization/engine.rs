//! Fixed-rate amortization: level payment, totals, the period-by-period
//! schedule and side-by-side comparison of two loans.
//!
//! Every operation is a pure function of its [`LoanTerms`]. All math is done
//! in `rust_decimal::Decimal` with no intermediate rounding.
//!
//! Schedule dates advance by a fixed [`PAYMENT_INTERVAL_DAYS`] per period, not
//! by calendar month. Emitted dates must stay compatible with existing
//! schedules, so this known simplification stays: the last payment of a
//! 360-month loan falls 10770 days after the first, about six months short of
//! 30 calendar years.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LoanError;
use crate::types::{AlternativeTerms, LoanTerms, Money};
use crate::LoanResult;

/// Days between consecutive schedule dates.
pub const PAYMENT_INTERVAL_DAYS: u64 = 30;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Level payment and lifetime totals for a loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub monthly_payment: Money,
    /// `monthly_payment * term_months`
    pub total_payment: Money,
    /// `total_payment - principal`
    pub total_interest: Money,
}

/// One payment period of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-based period number.
    pub period: i32,
    pub payment_date: NaiveDate,
    pub payment: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    /// Balance after this payment, never below zero.
    pub remaining_balance: Money,
}

/// A fully materialised amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub rows: Vec<ScheduleRow>,
    pub total_principal: Money,
    pub total_interest: Money,
    pub final_balance: Money,
}

/// Current loan against an alternative. Deltas are alternative minus current.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub current: PaymentSummary,
    pub alternative: PaymentSummary,
    pub monthly_payment_delta: Money,
    pub total_payment_delta: Money,
    pub total_interest_delta: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Check loan terms. Principal is checked first, then rate, then term; the
/// first failure wins.
pub fn validate(terms: &LoanTerms) -> LoanResult<()> {
    if terms.principal <= Decimal::ZERO {
        return Err(LoanError::InvalidPrincipal);
    }
    if terms.annual_rate_percent < Decimal::ZERO {
        return Err(LoanError::InvalidRate);
    }
    if terms.term_months <= 0 {
        return Err(LoanError::InvalidTerm);
    }
    Ok(())
}

/// Level monthly payment that retires the loan over its term.
///
/// `P * r / (1 - (1 + r)^-n)` with `r` the monthly rate, or `P / n` when the
/// rate is zero.
pub fn monthly_payment(terms: &LoanTerms) -> LoanResult<Money> {
    validate(terms)?;
    level_payment(terms.principal, terms.monthly_rate(), terms.term_months)
}

/// Monthly payment plus total paid and total interest over the full term.
pub fn summarize(terms: &LoanTerms) -> LoanResult<PaymentSummary> {
    let payment = monthly_payment(terms)?;

    let total_payment = payment
        .checked_mul(Decimal::from(terms.term_months))
        .ok_or_else(|| overflow("total payment"))?;
    let total_interest = total_payment
        .checked_sub(terms.principal)
        .ok_or_else(|| overflow("total interest"))?;

    Ok(PaymentSummary {
        monthly_payment: payment,
        total_payment,
        total_interest,
    })
}

/// Lazily walk the schedule one period at a time.
///
/// Terms are validated up front; calling again restarts from period 1.
pub fn schedule_rows(terms: &LoanTerms) -> LoanResult<ScheduleRows> {
    let payment = monthly_payment(terms)?;
    Ok(ScheduleRows {
        payment,
        monthly_rate: terms.monthly_rate(),
        balance: terms.principal,
        next_date: Some(terms.start_date),
        period: 0,
        term_months: terms.term_months,
        finished: false,
    })
}

/// Build the full schedule with its aggregates.
pub fn generate_schedule(terms: &LoanTerms) -> LoanResult<AmortizationSchedule> {
    let rows = schedule_rows(terms)?.collect::<LoanResult<Vec<_>>>()?;

    let total_principal =
        checked_sum(rows.iter().map(|r| r.principal_portion), "total principal")?;
    let total_interest =
        checked_sum(rows.iter().map(|r| r.interest_portion), "total interest")?;
    let final_balance = rows
        .last()
        .map(|r| r.remaining_balance)
        .unwrap_or(terms.principal);

    Ok(AmortizationSchedule {
        rows,
        total_principal,
        total_interest,
        final_balance,
    })
}

/// Compare two loans. The current loan is validated first, so its errors
/// take priority.
pub fn compare(current: &LoanTerms, alternative: &LoanTerms) -> LoanResult<ComparisonResult> {
    let current = summarize(current)?;
    let alternative = summarize(alternative)?;

    let delta = |alt: Money, cur: Money, what: &str| {
        alt.checked_sub(cur).ok_or_else(|| overflow(what))
    };

    Ok(ComparisonResult {
        monthly_payment_delta: delta(
            alternative.monthly_payment,
            current.monthly_payment,
            "monthly payment delta",
        )?,
        total_payment_delta: delta(
            alternative.total_payment,
            current.total_payment,
            "total payment delta",
        )?,
        total_interest_delta: delta(
            alternative.total_interest,
            current.total_interest,
            "total interest delta",
        )?,
        current,
        alternative,
    })
}

/// Compare against an alternative whose unset fields inherit from `current`.
pub fn compare_with_overrides(
    current: &LoanTerms,
    overrides: &AlternativeTerms,
) -> LoanResult<ComparisonResult> {
    compare(current, &overrides.resolve(current))
}

// ---------------------------------------------------------------------------
// Lazy schedule
// ---------------------------------------------------------------------------

/// Iterator over schedule rows. Arithmetic or calendar overflow is yielded
/// once as an error, after which the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct ScheduleRows {
    payment: Money,
    monthly_rate: Decimal,
    balance: Money,
    next_date: Option<NaiveDate>,
    period: i32,
    term_months: i32,
    finished: bool,
}

impl ScheduleRows {
    /// The level payment every row carries.
    pub fn payment(&self) -> Money {
        self.payment
    }

    fn step(&mut self) -> LoanResult<ScheduleRow> {
        let period = self.period;
        let payment_date = self
            .next_date
            .ok_or(LoanError::DateOutOfRange { period })?;

        let interest_portion = self
            .balance
            .checked_mul(self.monthly_rate)
            .ok_or_else(|| overflow("period interest"))?;
        // Negative when interest exceeds the payment; not guarded.
        let principal_portion = self
            .payment
            .checked_sub(interest_portion)
            .ok_or_else(|| overflow("period principal"))?;

        let mut balance = self
            .balance
            .checked_sub(principal_portion)
            .ok_or_else(|| overflow("remaining balance"))?;
        if balance < Decimal::ZERO {
            balance = Decimal::ZERO;
        }

        self.balance = balance;
        self.next_date = payment_date.checked_add_days(Days::new(PAYMENT_INTERVAL_DAYS));

        Ok(ScheduleRow {
            period,
            payment_date,
            payment: self.payment,
            principal_portion,
            interest_portion,
            remaining_balance: balance,
        })
    }
}

impl Iterator for ScheduleRows {
    type Item = LoanResult<ScheduleRow>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.period >= self.term_months {
            return None;
        }
        self.period += 1;

        let row = self.step();
        if row.is_err() {
            self.finished = true;
        }
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            return (0, Some(0));
        }
        let remaining = (self.term_months - self.period).max(0) as usize;
        // An overflow error may end the walk early.
        (remaining.min(1), Some(remaining))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn level_payment(principal: Money, monthly_rate: Decimal, term_months: i32) -> LoanResult<Money> {
    let periods = Decimal::from(term_months);
    if monthly_rate.is_zero() {
        return Ok(principal / periods);
    }

    let denom = Decimal::ONE - discount_factor(monthly_rate, term_months.unsigned_abs());
    if denom.is_zero() {
        // Rate is below decimal resolution: 1 + r rounds to 1.
        return Ok(principal / periods);
    }

    principal
        .checked_mul(monthly_rate)
        .and_then(|interest| interest.checked_div(denom))
        .ok_or_else(|| overflow("monthly payment"))
}

/// `(1 + r)^-n`. When `(1 + r)^n` leaves the decimal range the factor is
/// below decimal resolution and is returned as zero.
fn discount_factor(rate: Decimal, periods: u32) -> Decimal {
    match Decimal::ONE
        .checked_add(rate)
        .and_then(|base| checked_pow(base, periods))
    {
        Some(growth) if !growth.is_zero() => Decimal::ONE / growth,
        _ => Decimal::ZERO,
    }
}

/// Square-and-multiply integer power that reports overflow.
fn checked_pow(base: Decimal, mut exp: u32) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    let mut square = base;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result.checked_mul(square)?;
        }
        exp >>= 1;
        if exp > 0 {
            square = square.checked_mul(square)?;
        }
    }
    Some(result)
}

fn checked_sum(mut values: impl Iterator<Item = Money>, context: &str) -> LoanResult<Money> {
    values.try_fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(v).ok_or_else(|| overflow(context))
    })
}

fn overflow(context: &str) -> LoanError {
    LoanError::ArithmeticOverflow {
        context: context.into(),
    }
}
