use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};

use gymdesk_domain::{
    Insert, Member, MemberFilter, Payment, PaymentFilter, PaymentStatus, Query, Retrieve, Update,
};

use crate::{
    billing::{compute_next_due_date, transition, validate_amount},
    datetime::parse_date,
    Result,
};

/// Shown in place of the member name when the
/// member of a payment no longer exists.
pub const UNKNOWN_MEMBER: &str = "Unknown";

/// A payment as entered by staff.
#[derive(Debug, Clone, Default)]
pub struct PaymentForm {
    pub member_id: u32,
    pub amount: String,
    /// Defaults to the next due date of the member's plan
    pub due_date: Option<String>,
    /// Defaults to pending
    pub status: Option<String>,
}

/// Validated values of a [`PaymentForm`]
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentInput {
    pub amount: f64,
    pub status: PaymentStatus,
    pub due_date: Option<NaiveDate>,
}

impl PaymentForm {
    /// Validate amount, status and due date without touching the store.
    pub fn parse(&self) -> Result<PaymentInput> {
        let amount = validate_amount(&self.amount)?;
        let status = match &self.status {
            Some(status) => status.parse()?,
            None => PaymentStatus::default(),
        };
        let due_date = self.due_date.as_deref().map(parse_date).transpose()?;
        Ok(PaymentInput {
            amount,
            status,
            due_date,
        })
    }
}

/// A payment joined with its member, if the member still exists.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentOverview {
    pub payment: Payment,
    pub member: Option<Member>,
}

impl PaymentOverview {
    pub fn member_name(&self) -> &str {
        self.member
            .as_ref()
            .map_or(UNKNOWN_MEMBER, |m| m.name.as_str())
    }

    /// Case insensitive match on member name, or match on contact.
    /// Payments without a member only match an empty search.
    pub fn matches_search(&self, search: &str) -> bool {
        let search = search.trim();
        if search.is_empty() {
            return true;
        }
        match &self.member {
            Some(member) => {
                member.name.to_lowercase().contains(&search.to_lowercase())
                    || member.contact.contains(search)
            }
            None => false,
        }
    }
}

/// A pending payment whose due date has passed
pub fn is_past_due(payment: &Payment, today: NaiveDate) -> bool {
    payment.status == PaymentStatus::Pending && payment.due_date < today
}

/// Filter payment overviews by search term and status.
pub fn filter_payments(
    payments: Vec<PaymentOverview>,
    search: Option<&str>,
    status: Option<PaymentStatus>,
) -> Vec<PaymentOverview> {
    payments
        .into_iter()
        .filter(|p| search.map_or(true, |s| p.matches_search(s)))
        .filter(|p| status.map_or(true, |s| p.payment.status == s))
        .collect()
}

/// Record a new payment for a member.
///
/// The form is validated and the member resolved before
/// anything is written. `today` stamps paid payments and
/// anchors the default due date; `now` becomes the creation time.
pub async fn record_payment<DB>(
    db: &DB,
    form: PaymentForm,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Result<Payment>
where
    DB: Insert<Payment> + Retrieve<Member, Key = u32> + Sync,
{
    let PaymentInput {
        amount,
        status,
        due_date,
    } = form.parse()?;

    let member = <DB as Retrieve<Member>>::retrieve(db, form.member_id).await?;
    let due_date = match due_date {
        Some(date) => date,
        None => compute_next_due_date(member.plan_type, today)?,
    };

    let payment = Payment {
        member_id: member.id,
        amount,
        due_date,
        created_at: now,
        ..Default::default()
    };
    let payment = transition(payment, status, today);

    let payment = db.insert(payment).await?;
    log::info!(
        "recorded payment {} of {} for member {} ({})",
        payment.id,
        payment.amount,
        member.id,
        payment.status
    );
    Ok(payment)
}

/// Change the status of a payment and return the stored result.
pub async fn set_payment_status<DB>(
    db: &DB,
    payment_id: u32,
    status: PaymentStatus,
    today: NaiveDate,
) -> Result<Payment>
where
    DB: Update<Payment> + Retrieve<Payment, Key = u32> + Sync,
{
    let payment = <DB as Retrieve<Payment>>::retrieve(db, payment_id).await?;
    let previous = payment.status;
    db.update(transition(payment, status, today)).await?;

    let payment = <DB as Retrieve<Payment>>::retrieve(db, payment_id).await?;
    log::info!(
        "payment {} changed from {} to {}",
        payment.id,
        previous,
        payment.status
    );
    Ok(payment)
}

/// List payments newest first, joined with their members and
/// filtered by search term and status.
pub async fn list_payments<DB>(
    db: &DB,
    search: Option<&str>,
    status: Option<PaymentStatus>,
) -> Result<Vec<PaymentOverview>>
where
    DB: Query<Payment, Filter = PaymentFilter> + Query<Member, Filter = MemberFilter> + Sync,
{
    let filter = PaymentFilter {
        status,
        ..Default::default()
    };
    let payments = <DB as Query<Payment>>::query(db, &filter).await?;
    let members: HashMap<u32, Member> =
        <DB as Query<Member>>::query(db, &MemberFilter::default())
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

    let overview = payments
        .into_iter()
        .map(|payment| PaymentOverview {
            member: members.get(&payment.member_id).cloned(),
            payment,
        })
        .collect();

    Ok(filter_payments(overview, search, status))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    use gymdesk_db::MemoryStore;
    use gymdesk_domain::{Delete, PlanType};

    use crate::Error;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn member(db: &MemoryStore, name: &str, contact: &str, plan: PlanType) -> Member {
        db.insert(Member {
            name: name.to_string(),
            contact: contact.to_string(),
            age: 30,
            plan_type: plan,
            ..Default::default()
        })
        .await
        .unwrap()
    }

    fn form(member_id: u32, amount: &str) -> PaymentForm {
        PaymentForm {
            member_id,
            amount: amount.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_record_payment_defaults() {
        let db = MemoryStore::new();
        let m = member(&db, "Ada", "555-0100", PlanType::Quarterly).await;
        let today = date(2024, 1, 31);
        let now = Utc.with_ymd_and_hms(2024, 1, 31, 17, 0, 0).unwrap();

        let payment = record_payment(&db, form(m.id, "49.99"), today, now)
            .await
            .unwrap();
        assert_eq!(payment.member_id, m.id);
        assert_eq!(payment.amount, 49.99);
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert_eq!(payment.payment_date, None);
        assert_eq!(payment.due_date, date(2024, 4, 30));
        assert_eq!(payment.created_at, now);
    }

    #[tokio::test]
    async fn test_record_paid_payment() {
        let db = MemoryStore::new();
        let m = member(&db, "Ada", "555-0100", PlanType::Monthly).await;
        let today = date(2024, 2, 12);

        let payment = record_payment(
            &db,
            PaymentForm {
                due_date: Some("2024-02-15".to_string()),
                status: Some("paid".to_string()),
                ..form(m.id, "50")
            },
            today,
            Utc::now(),
        )
        .await
        .unwrap();
        assert_eq!(payment.status, PaymentStatus::Paid);
        assert_eq!(payment.payment_date, Some(today));
        assert_eq!(payment.due_date, date(2024, 2, 15));
    }

    #[tokio::test]
    async fn test_record_payment_validation() {
        let db = MemoryStore::new();
        let m = member(&db, "Ada", "555-0100", PlanType::Monthly).await;
        let today = date(2024, 2, 12);

        let result = record_payment(&db, form(m.id, "-5"), today, Utc::now()).await;
        assert!(matches!(result, Err(Error::InvalidAmount(_))));

        let result = record_payment(
            &db,
            PaymentForm {
                status: Some("refunded".to_string()),
                ..form(m.id, "5")
            },
            today,
            Utc::now(),
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidStatus(_))));

        let result = record_payment(
            &db,
            PaymentForm {
                due_date: Some("tomorrow".to_string()),
                ..form(m.id, "5")
            },
            today,
            Utc::now(),
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidDate(_))));

        // Unknown member
        let result = record_payment(&db, form(99, "5"), today, Utc::now()).await;
        assert!(result.unwrap_err().is_store());

        // Nothing was written
        let payments: Vec<Payment> = db.query(&PaymentFilter::default()).await.unwrap();
        assert!(payments.is_empty());
    }

    #[test]
    fn test_payment_form_parse() {
        let input = PaymentForm {
            due_date: Some("2024-03-01".to_string()),
            status: Some("Paid".to_string()),
            ..form(1, " 25.50 ")
        }
        .parse()
        .unwrap();
        assert_eq!(
            input,
            PaymentInput {
                amount: 25.5,
                status: PaymentStatus::Paid,
                due_date: Some(date(2024, 3, 1)),
            }
        );

        let input = form(1, "0").parse().unwrap();
        assert_eq!(input.status, PaymentStatus::Pending);
        assert_eq!(input.due_date, None);

        assert!(matches!(form(1, "-5").parse(), Err(Error::InvalidAmount(_))));
    }

    #[tokio::test]
    async fn test_set_payment_status() {
        let db = MemoryStore::new();
        let m = member(&db, "Ada", "555-0100", PlanType::Monthly).await;
        let payment = record_payment(&db, form(m.id, "30"), date(2024, 2, 1), Utc::now())
            .await
            .unwrap();

        let today = date(2024, 2, 12);
        let paid = set_payment_status(&db, payment.id, PaymentStatus::Paid, today)
            .await
            .unwrap();
        assert_eq!(paid.status, PaymentStatus::Paid);
        assert_eq!(paid.payment_date, Some(today));

        // Paid payments may go back to pending
        let pending = set_payment_status(&db, payment.id, PaymentStatus::Pending, today)
            .await
            .unwrap();
        assert_eq!(pending.status, PaymentStatus::Pending);
        assert_eq!(pending.payment_date, None);

        let overdue = set_payment_status(&db, payment.id, PaymentStatus::Overdue, today)
            .await
            .unwrap();
        assert_eq!(overdue.status, PaymentStatus::Overdue);
        assert_eq!(overdue.payment_date, None);
        assert_eq!(overdue.created_at, payment.created_at);
    }

    #[tokio::test]
    async fn test_set_payment_status_missing() {
        let db = MemoryStore::new();
        let result = set_payment_status(&db, 7, PaymentStatus::Paid, date(2024, 2, 1)).await;
        assert!(result.unwrap_err().is_store());
    }

    #[tokio::test]
    async fn test_list_payments() {
        let db = MemoryStore::new();
        let ada = member(&db, "Ada Lovelace", "555-0100", PlanType::Monthly).await;
        let bob = member(&db, "Bob", "555-0200", PlanType::Yearly).await;
        let gone = member(&db, "Gone", "555-0300", PlanType::Monthly).await;

        for (m, day, status) in [
            (&ada, 1, "paid"),
            (&bob, 2, "pending"),
            (&gone, 3, "overdue"),
        ] {
            record_payment(
                &db,
                PaymentForm {
                    status: Some(status.to_string()),
                    ..form(m.id, "10")
                },
                date(2024, 2, day),
                Utc.with_ymd_and_hms(2024, 2, day, 9, 0, 0).unwrap(),
            )
            .await
            .unwrap();
        }
        db.delete(gone).await.unwrap();

        let all = list_payments(&db, None, None).await.unwrap();
        assert_eq!(all.len(), 3);
        // Newest first, deleted member shows as unknown
        assert_eq!(all[0].member_name(), UNKNOWN_MEMBER);
        assert_eq!(all[1].member_name(), "Bob");
        assert_eq!(all[2].member_name(), "Ada Lovelace");

        let search = list_payments(&db, Some("lovelace"), None).await.unwrap();
        assert_eq!(search.len(), 1);
        assert_eq!(search[0].payment.member_id, ada.id);

        let search = list_payments(&db, Some("0200"), None).await.unwrap();
        assert_eq!(search.len(), 1);
        assert_eq!(search[0].payment.member_id, bob.id);

        let pending = list_payments(&db, None, Some(PaymentStatus::Pending))
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].member_name(), "Bob");

        let none = list_payments(&db, Some("Ada"), Some(PaymentStatus::Overdue))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_is_past_due() {
        let payment = Payment {
            due_date: date(2024, 2, 10),
            status: PaymentStatus::Pending,
            ..Default::default()
        };
        assert!(!is_past_due(&payment, date(2024, 2, 10)));
        assert!(is_past_due(&payment, date(2024, 2, 11)));

        let paid = transition(payment, PaymentStatus::Paid, date(2024, 2, 11));
        assert!(!is_past_due(&paid, date(2024, 3, 1)));
    }
}
