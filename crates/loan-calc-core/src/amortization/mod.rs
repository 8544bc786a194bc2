pub mod engine;
pub mod report;

pub use engine::{
    compare, compare_with_overrides, generate_schedule, monthly_payment, schedule_rows,
    summarize, validate, AmortizationSchedule, ComparisonResult, PaymentSummary, ScheduleRow,
    ScheduleRows, PAYMENT_INTERVAL_DAYS,
};
