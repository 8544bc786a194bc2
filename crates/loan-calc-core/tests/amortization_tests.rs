use chrono::NaiveDate;
use loan_calc_core::amortization::{self, report};
use loan_calc_core::{AlternativeTerms, LoanError, LoanTerms};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

fn loan(principal: Decimal, rate: Decimal, months: i32) -> LoanTerms {
    LoanTerms::new(principal, rate, months, start())
}

/// A spread of realistic loans: car loans through jumbo mortgages.
fn sample_loans() -> Vec<LoanTerms> {
    vec![
        loan(dec!(18_500), dec!(6.9), 60),
        loan(dec!(250_000), dec!(5.0), 360),
        loan(dec!(250_000), dec!(4.0), 360),
        loan(dec!(400_000), dec!(7.25), 180),
        loan(dec!(1_250_000), dec!(3.125), 480),
        loan(dec!(999.99), dec!(19.99), 12),
        loan(dec!(5_000), dec!(0.01), 24),
    ]
}

// ===========================================================================
// Known answers
// ===========================================================================

#[test]
fn test_thirty_year_mortgage_known_answer() {
    let summary = amortization::summarize(&loan(dec!(250_000), dec!(5.0), 360)).unwrap();

    assert!(
        (summary.monthly_payment - dec!(1342.05)).abs() < dec!(0.01),
        "Expected payment ~1342.05, got {}",
        summary.monthly_payment
    );
    assert!((summary.total_payment - dec!(483_138.98)).abs() < dec!(1));
    assert!((summary.total_interest - dec!(233_138.98)).abs() < dec!(1));
}

#[test]
fn test_zero_rate_known_answer() {
    let terms = loan(dec!(100_000), Decimal::ZERO, 120);
    let summary = amortization::summarize(&terms).unwrap();

    assert_eq!(summary.monthly_payment, dec!(100_000) / dec!(120));
    assert!(summary.monthly_payment > dec!(833.33));
    assert!(summary.monthly_payment < dec!(833.34));
    assert!(
        summary.total_interest.abs() < dec!(0.000000001),
        "Expected zero interest, got {}",
        summary.total_interest
    );
}

#[test]
fn test_comparison_lower_rate_known_answer() {
    let current = loan(dec!(250_000), dec!(5.0), 360);
    let alternative = loan(dec!(250_000), dec!(4.0), 360);
    let result = amortization::compare(&current, &alternative).unwrap();

    assert!(result.alternative.monthly_payment < result.current.monthly_payment);
    assert!(result.total_interest_delta < Decimal::ZERO);
    // 1193.54 vs 1342.05 per month
    assert!((result.monthly_payment_delta - dec!(-148.52)).abs() < dec!(0.01));
    // Same principal: interest saving equals total payment saving.
    assert_eq!(result.total_interest_delta, result.total_payment_delta);
}

// ===========================================================================
// Properties across sample loans
// ===========================================================================

#[test]
fn test_total_interest_identity() {
    for terms in sample_loans() {
        let s = amortization::summarize(&terms).unwrap();
        assert_eq!(s.total_interest, s.total_payment - terms.principal);
        assert_eq!(
            s.total_payment,
            s.monthly_payment * Decimal::from(terms.term_months)
        );
    }
}

#[test]
fn test_schedule_converges_to_zero() {
    for terms in sample_loans() {
        let schedule = amortization::generate_schedule(&terms).unwrap();
        assert_eq!(schedule.rows.len(), terms.term_months as usize);
        assert!(
            schedule.final_balance < dec!(0.0000001),
            "Loan {:?} left balance {}",
            terms,
            schedule.final_balance
        );
    }
}

#[test]
fn test_schedule_balances_monotonic_and_non_negative() {
    for terms in sample_loans() {
        let schedule = amortization::generate_schedule(&terms).unwrap();
        let mut previous = terms.principal;
        for row in &schedule.rows {
            assert!(row.remaining_balance <= previous, "period {}", row.period);
            assert!(row.remaining_balance >= Decimal::ZERO);
            previous = row.remaining_balance;
        }
    }
}

#[test]
fn test_schedule_rows_split_payment() {
    for terms in sample_loans() {
        let schedule = amortization::generate_schedule(&terms).unwrap();
        for row in &schedule.rows {
            let recombined = row.principal_portion + row.interest_portion;
            assert!((recombined - row.payment).abs() < dec!(0.000000000001));
        }
        // Interest share falls as the balance is paid down.
        let first = &schedule.rows[0];
        let last = schedule.rows.last().unwrap();
        assert!(last.interest_portion <= first.interest_portion);
    }
}

#[test]
fn test_schedule_periods_and_dates() {
    let terms = loan(dec!(18_500), dec!(6.9), 60);
    let schedule = amortization::generate_schedule(&terms).unwrap();

    for (idx, row) in schedule.rows.iter().enumerate() {
        assert_eq!(row.period, idx as i32 + 1);
        assert_eq!((row.payment_date - start()).num_days(), idx as i64 * 30);
    }
    // 30-day steps drift away from the calendar: period 13 is not a year later.
    assert_eq!(
        schedule.rows[12].payment_date,
        NaiveDate::from_ymd_opt(2026, 2, 24).unwrap()
    );
}

#[test]
fn test_zero_rate_schedule() {
    let terms = loan(dec!(12_000), Decimal::ZERO, 12);
    let schedule = amortization::generate_schedule(&terms).unwrap();

    assert!(schedule.rows.iter().all(|r| r.interest_portion == Decimal::ZERO));
    assert!(schedule.rows.iter().all(|r| r.principal_portion == dec!(1000)));
    assert_eq!(schedule.rows[5].remaining_balance, dec!(6000));
    assert_eq!(schedule.final_balance, Decimal::ZERO);
}

// ===========================================================================
// Validation
// ===========================================================================

#[test]
fn test_validation_priority() {
    let all_bad = loan(dec!(-1), dec!(-1), -1);
    assert_eq!(amortization::validate(&all_bad), Err(LoanError::InvalidPrincipal));

    let rate_and_term_bad = loan(dec!(1), dec!(-1), -1);
    assert_eq!(
        amortization::validate(&rate_and_term_bad),
        Err(LoanError::InvalidRate)
    );

    let term_bad = loan(dec!(1), dec!(0), -1);
    assert_eq!(amortization::validate(&term_bad), Err(LoanError::InvalidTerm));
}

#[test]
fn test_every_operation_rejects_invalid_terms() {
    let bad = loan(Decimal::ZERO, dec!(5), 360);
    let good = loan(dec!(250_000), dec!(5), 360);

    assert_eq!(amortization::summarize(&bad), Err(LoanError::InvalidPrincipal));
    assert_eq!(
        amortization::generate_schedule(&bad),
        Err(LoanError::InvalidPrincipal)
    );
    assert!(amortization::schedule_rows(&bad).is_err());
    assert_eq!(
        amortization::compare(&good, &bad),
        Err(LoanError::InvalidPrincipal)
    );
    assert!(report::payment_report(&bad).is_err());
}

#[test]
fn test_validation_error_messages() {
    assert_eq!(
        LoanError::InvalidPrincipal.to_string(),
        "Loan amount must be greater than zero"
    );
    assert_eq!(
        LoanError::InvalidRate.to_string(),
        "Interest rate cannot be negative"
    );
    assert_eq!(
        LoanError::InvalidTerm.to_string(),
        "Loan term must be greater than zero"
    );
    assert!(LoanError::InvalidTerm.is_validation());
    assert!(!LoanError::InvalidDate { value: "x".into() }.is_validation());
}

// ===========================================================================
// Comparison overrides and serialization
// ===========================================================================

#[test]
fn test_compare_with_overrides_uses_current_for_blanks() {
    let current = loan(dec!(250_000), dec!(5.0), 360);
    let same = amortization::compare_with_overrides(&current, &AlternativeTerms::default())
        .unwrap();
    assert_eq!(same.current, same.alternative);
    assert_eq!(same.total_payment_delta, Decimal::ZERO);

    let bigger = AlternativeTerms {
        principal: Some(dec!(300_000)),
        ..Default::default()
    };
    let result = amortization::compare_with_overrides(&current, &bigger).unwrap();
    assert!(result.monthly_payment_delta > Decimal::ZERO);
    assert!(result.total_interest_delta > Decimal::ZERO);
}

#[test]
fn test_schedule_row_json_shape() {
    let terms = loan(dec!(1200), dec!(0), 2);
    let schedule = amortization::generate_schedule(&terms).unwrap();
    let json = serde_json::to_value(&schedule.rows[1]).unwrap();

    let amount = |key: &str| -> Decimal { json[key].as_str().unwrap().parse().unwrap() };

    assert_eq!(json["period"], 2);
    assert_eq!(json["payment_date"], "2025-03-31");
    assert_eq!(amount("payment"), dec!(600));
    assert_eq!(amount("interest_portion"), Decimal::ZERO);
    assert_eq!(amount("remaining_balance"), Decimal::ZERO);
}

#[test]
fn test_loan_terms_json_round_trip_from_front_end() {
    let json = r#"{
        "principal": "250000",
        "annual_rate_percent": "5.0",
        "term_months": 360,
        "start_date": "2025-03-01"
    }"#;
    let terms: LoanTerms = serde_json::from_str(json).unwrap();
    assert_eq!(terms, loan(dec!(250000), dec!(5.0), 360));
}
