use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::Error;

/// Billing cadence of a membership
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
pub enum PlanType {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl PlanType {
    /// Length of the plan in calendar months.
    pub fn months(&self) -> u32 {
        match self {
            PlanType::Monthly => 1,
            PlanType::Quarterly => 3,
            PlanType::Yearly => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Monthly => "Monthly",
            PlanType::Quarterly => "Quarterly",
            PlanType::Yearly => "Yearly",
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PlanType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Ok(PlanType::Monthly),
            "quarterly" => Ok(PlanType::Quarterly),
            "yearly" => Ok(PlanType::Yearly),
            _ => Err(Error::InvalidPlan(s.to_string())),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemberFilter {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub contact: Option<String>,
    /// Matches either the name or the contact
    pub search: Option<String>,
    pub plan_type: Option<PlanType>,
}

impl MemberFilter {
    /// Check a member against the filter. Text matches are
    /// case insensitive substring matches.
    pub fn matches(&self, member: &Member) -> bool {
        let contains = |haystack: &str, needle: &str| {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        };
        if let Some(id) = self.id {
            if member.id != id {
                return false;
            }
        }
        if let Some(name) = &self.name {
            if !contains(&member.name, name) {
                return false;
            }
        }
        if let Some(contact) = &self.contact {
            if !contains(&member.contact, contact) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !contains(&member.name, search) && !contains(&member.contact, search) {
                return false;
            }
        }
        if let Some(plan_type) = self.plan_type {
            if member.plan_type != plan_type {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Member {
    pub id: u32,
    pub name: String,
    pub age: u8,
    pub contact: String,
    pub address: String,
    pub emergency_contact: String,
    pub membership_start_date: NaiveDate,
    pub membership_end_date: NaiveDate,
    pub plan_type: PlanType,
    pub created_at: DateTime<Utc>,
}
