use chrono::NaiveDate;

use gymdesk_domain::{Payment, PaymentStatus, PlanType};

use crate::{datetime::add_interval, Error, Result};

/// Next due date for a plan, one plan interval after `from`.
pub fn compute_next_due_date(plan: PlanType, from: NaiveDate) -> Result<NaiveDate> {
    add_interval(from, plan)
}

/// Move a payment to a new status.
///
/// Paying stamps the payment with `today`, any other status
/// clears the payment date. Every transition is permitted.
pub fn transition(payment: Payment, status: PaymentStatus, today: NaiveDate) -> Payment {
    let payment_date = match status {
        PaymentStatus::Paid => Some(today),
        PaymentStatus::Pending | PaymentStatus::Overdue => None,
    };
    Payment {
        status,
        payment_date,
        ..payment
    }
}

/// Parse a payment amount. Amounts must be finite and not negative.
pub fn validate_amount(raw: &str) -> Result<f64> {
    let amount: f64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::InvalidAmount(raw.to_string()))?;
    check_amount(amount).map_err(|_| Error::InvalidAmount(raw.to_string()))
}

/// Check an already numeric amount
pub fn check_amount(amount: f64) -> Result<f64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidAmount(amount.to_string()));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_compute_next_due_date() {
        let from = date(2024, 5, 31);
        assert_eq!(compute_next_due_date(PlanType::Monthly, from).unwrap(), date(2024, 6, 30));
        assert_eq!(compute_next_due_date(PlanType::Quarterly, from).unwrap(), date(2024, 8, 31));
        assert_eq!(compute_next_due_date(PlanType::Yearly, from).unwrap(), date(2025, 5, 31));
    }

    #[test]
    fn test_transition_to_paid() {
        let today = date(2024, 2, 12);
        for status in [PaymentStatus::Pending, PaymentStatus::Overdue, PaymentStatus::Paid] {
            let payment = Payment {
                status,
                payment_date: (status == PaymentStatus::Paid).then(|| date(2024, 1, 1)),
                amount: 50.0,
                ..Default::default()
            };
            let paid = transition(payment, PaymentStatus::Paid, today);
            assert_eq!(paid.status, PaymentStatus::Paid);
            assert_eq!(paid.payment_date, Some(today));
            assert_eq!(paid.amount, 50.0);
        }
    }

    #[test]
    fn test_transition_clears_payment_date() {
        let today = date(2024, 2, 12);
        let paid = Payment {
            status: PaymentStatus::Paid,
            payment_date: Some(date(2024, 2, 1)),
            ..Default::default()
        };
        for status in [PaymentStatus::Pending, PaymentStatus::Overdue] {
            let once = transition(paid.clone(), status, today);
            assert_eq!(once.status, status);
            assert_eq!(once.payment_date, None);

            // Repeating the same transition changes nothing
            let twice = transition(once.clone(), status, today);
            assert_eq!(twice, once);
        }
    }

    #[test]
    fn test_validate_amount() {
        assert_eq!(validate_amount("49.99").unwrap(), 49.99);
        assert_eq!(validate_amount(" 0 ").unwrap(), 0.0);
        assert_eq!(validate_amount("120").unwrap(), 120.0);

        for raw in ["-5", "", "abc", "NaN", "inf", "-0.01"] {
            match validate_amount(raw) {
                Err(Error::InvalidAmount(value)) => assert_eq!(value, raw),
                other => panic!("{:?} should be invalid, got {:?}", raw, other),
            }
        }
    }

    #[test]
    fn test_check_amount() {
        assert_eq!(check_amount(12.5).unwrap(), 12.5);
        assert!(matches!(check_amount(-1.0), Err(Error::InvalidAmount(_))));
        assert!(matches!(check_amount(f64::INFINITY), Err(Error::InvalidAmount(_))));
    }
}
