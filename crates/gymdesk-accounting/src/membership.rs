use std::fmt;

use chrono::NaiveDate;

use gymdesk_domain::{Member, PlanType};

use crate::{
    datetime::{add_interval, days_between},
    Error, Result,
};

/// Days before the end date during which a membership
/// counts as expiring soon. The end date itself is included.
pub const EXPIRY_WARNING_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipStatus {
    Active,
    ExpiringSoon,
    Expired,
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MembershipStatus::Active => "Active",
            MembershipStatus::ExpiringSoon => "Expiring soon",
            MembershipStatus::Expired => "Expired",
        };
        f.pad(label)
    }
}

/// End date of a membership starting at `start` on `plan`.
pub fn compute_end_date(start: NaiveDate, plan: PlanType) -> Result<NaiveDate> {
    add_interval(start, plan)
}

/// Classify a membership by its end date relative to `today`.
pub fn classify(end_date: NaiveDate, today: NaiveDate) -> MembershipStatus {
    let days_left = days_between(today, end_date);
    if days_left < 0 {
        MembershipStatus::Expired
    } else if days_left <= EXPIRY_WARNING_DAYS {
        MembershipStatus::ExpiringSoon
    } else {
        MembershipStatus::Active
    }
}

pub trait MembershipState {
    /// Membership status on a given day
    fn status(&self, today: NaiveDate) -> MembershipStatus;

    /// Recalculate the end date from start date and plan.
    fn apply_plan(&mut self) -> Result<()>;
}

impl MembershipState for Member {
    fn status(&self, today: NaiveDate) -> MembershipStatus {
        classify(self.membership_end_date, today)
    }

    fn apply_plan(&mut self) -> Result<()> {
        self.membership_end_date =
            compute_end_date(self.membership_start_date, self.plan_type)?;
        Ok(())
    }
}

/// Check the member fields which have to be present
/// before a member is stored.
pub fn validate_member(member: &Member) -> Result<()> {
    if member.name.trim().is_empty() {
        return Err(Error::MissingField("name"));
    }
    if !(1..=120).contains(&member.age) {
        return Err(Error::InvalidAge(member.age.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Days;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_compute_end_date_is_after_start() {
        let starts = [
            date(2024, 1, 15),
            date(2024, 1, 31),
            date(2024, 2, 29),
            date(2023, 12, 31),
        ];
        for start in starts {
            for plan in [PlanType::Monthly, PlanType::Quarterly, PlanType::Yearly] {
                let end = compute_end_date(start, plan).unwrap();
                assert!(end > start, "{} + {} = {}", start, plan, end);
            }
        }
    }

    #[test]
    fn test_classify_boundaries() {
        let today = date(2024, 2, 10);
        assert_eq!(classify(today, today), MembershipStatus::ExpiringSoon);
        assert_eq!(
            classify(today + Days::new(7), today),
            MembershipStatus::ExpiringSoon
        );
        assert_eq!(
            classify(today + Days::new(8), today),
            MembershipStatus::Active
        );
        assert_eq!(
            classify(today - Days::new(1), today),
            MembershipStatus::Expired
        );
    }

    #[test]
    fn test_monthly_member_lifecycle() {
        let start = date(2024, 1, 15);
        let end = compute_end_date(start, PlanType::Monthly).unwrap();
        assert_eq!(end, date(2024, 2, 15));

        assert_eq!(classify(end, date(2024, 1, 20)), MembershipStatus::Active);
        // 5 days left
        assert_eq!(classify(end, date(2024, 2, 10)), MembershipStatus::ExpiringSoon);
        assert_eq!(classify(end, date(2024, 2, 16)), MembershipStatus::Expired);
    }

    #[test]
    fn test_member_apply_plan() {
        let mut member = Member {
            membership_start_date: date(2024, 3, 31),
            plan_type: PlanType::Quarterly,
            ..Default::default()
        };
        member.apply_plan().unwrap();
        assert_eq!(member.membership_end_date, date(2024, 6, 30));
        assert_eq!(member.status(date(2024, 6, 25)), MembershipStatus::ExpiringSoon);

        member.plan_type = PlanType::Yearly;
        member.apply_plan().unwrap();
        assert_eq!(member.membership_end_date, date(2025, 3, 31));
    }

    #[test]
    fn test_validate_member() {
        let member = Member {
            name: "Grace".to_string(),
            age: 23,
            ..Default::default()
        };
        assert!(validate_member(&member).is_ok());

        let nameless = Member {
            name: "  ".to_string(),
            ..member.clone()
        };
        assert!(matches!(
            validate_member(&nameless),
            Err(Error::MissingField("name"))
        ));

        for age in [0, 121] {
            let result = validate_member(&Member {
                age,
                ..member.clone()
            });
            assert!(matches!(result, Err(Error::InvalidAge(a)) if a == age.to_string()));
        }
        assert!(validate_member(&Member { age: 120, ..member.clone() }).is_ok());
        assert!(validate_member(&Member { age: 1, ..member }).is_ok());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(MembershipStatus::ExpiringSoon.to_string(), "Expiring soon");
    }
}
