use chrono::NaiveDate;

use gymdesk_domain::{Member, MemberFilter, Payment, PaymentFilter, PaymentStatus, Query};

use crate::{
    datetime::{local_date, month_start},
    Result,
};

/// Summary figures shown on the dashboard
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    pub total_members: usize,
    pub new_members_this_month: usize,
    pub fees_this_month: f64,
    pub pending_payments: usize,
}

/// Summarize a snapshot of members and payments. The current
/// month is the calendar month of `today`; member creation times
/// are compared by their local date.
pub fn summarize(members: &[Member], payments: &[Payment], today: NaiveDate) -> DashboardSummary {
    let start = month_start(today);

    let new_members_this_month = members
        .iter()
        .filter(|m| local_date(m.created_at) >= start)
        .count();
    let fees_this_month = payments
        .iter()
        .filter(|p| p.status == PaymentStatus::Paid)
        .filter(|p| p.payment_date.map_or(false, |date| date >= start))
        .map(|p| p.amount)
        .sum::<f64>();
    let pending_payments = payments
        .iter()
        .filter(|p| p.status == PaymentStatus::Pending)
        .count();

    DashboardSummary {
        total_members: members.len(),
        new_members_this_month,
        fees_this_month,
        pending_payments,
    }
}

/// Load all members and payments from the store and summarize them.
pub async fn fetch_summary<DB>(db: &DB, today: NaiveDate) -> Result<DashboardSummary>
where
    DB: Query<Member, Filter = MemberFilter> + Query<Payment, Filter = PaymentFilter> + Sync,
{
    let members = <DB as Query<Member>>::query(db, &MemberFilter::default()).await?;
    let payments = <DB as Query<Payment>>::query(db, &PaymentFilter::default()).await?;
    log::debug!(
        "summarizing {} members and {} payments",
        members.len(),
        payments.len()
    );
    Ok(summarize(&members, &payments, today))
}
