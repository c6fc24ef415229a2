use chrono::{DateTime, NaiveDate, Utc};

use gymdesk_domain::{Delete, Insert, Member, MemberFilter, PlanType, Query, Retrieve, Update};

use crate::{
    datetime::parse_date,
    membership::{validate_member, MembershipState, MembershipStatus},
    Error, Result,
};

/// Member details as entered by staff. All values are raw
/// text and get validated by [`MemberForm::parse`].
#[derive(Debug, Clone, Default)]
pub struct MemberForm {
    pub name: String,
    pub age: String,
    pub contact: String,
    pub address: String,
    pub emergency_contact: String,
    pub membership_start_date: String,
    pub plan_type: String,
}

impl MemberForm {
    /// Validate the form and build a member with the
    /// end date derived from start date and plan.
    pub fn parse(&self) -> Result<Member> {
        let age = self
            .age
            .trim()
            .parse::<u8>()
            .map_err(|_| Error::InvalidAge(self.age.clone()))?;
        let membership_start_date = parse_date(&self.membership_start_date)?;
        let plan_type: PlanType = self.plan_type.parse()?;

        let mut member = Member {
            name: self.name.trim().to_string(),
            age,
            contact: self.contact.trim().to_string(),
            address: self.address.trim().to_string(),
            emergency_contact: self.emergency_contact.trim().to_string(),
            membership_start_date,
            plan_type,
            ..Default::default()
        };
        validate_member(&member)?;
        member.apply_plan()?;
        Ok(member)
    }
}

/// A member together with its membership status
#[derive(Debug, Clone, PartialEq)]
pub struct MemberOverview {
    pub member: Member,
    pub status: MembershipStatus,
}

/// Validate and store a new member. The creation
/// timestamp is set to `now`.
pub async fn add_member<DB>(db: &DB, member: Member, now: DateTime<Utc>) -> Result<Member>
where
    DB: Insert<Member> + Sync,
{
    let mut member = member;
    validate_member(&member)?;
    member.apply_plan()?;
    member.created_at = now;

    let member = db.insert(member).await?;
    log::info!("added member {} ({})", member.id, member.name);
    Ok(member)
}

/// Validate and store changes to a member. The end date
/// follows start date and plan on every edit.
pub async fn update_member<DB>(db: &DB, member: Member) -> Result<Member>
where
    DB: Update<Member> + Retrieve<Member, Key = u32> + Sync,
{
    let mut member = member;
    validate_member(&member)?;
    member.apply_plan()?;

    let id = member.id;
    db.update(member).await?;
    let member = <DB as Retrieve<Member>>::retrieve(db, id).await?;
    log::info!("updated member {} ({})", member.id, member.name);
    Ok(member)
}

/// Delete a member. Payments of the member are kept.
pub async fn delete_member<DB>(db: &DB, member_id: u32) -> Result<Member>
where
    DB: Delete<Member> + Retrieve<Member, Key = u32> + Sync,
{
    let member = <DB as Retrieve<Member>>::retrieve(db, member_id).await?;
    db.delete(member.clone()).await?;
    log::info!("deleted member {} ({})", member.id, member.name);
    Ok(member)
}

/// List members with their membership status on `today`.
pub async fn list_members<DB>(
    db: &DB,
    filter: &MemberFilter,
    today: NaiveDate,
) -> Result<Vec<MemberOverview>>
where
    DB: Query<Member, Filter = MemberFilter> + Sync,
{
    let members = <DB as Query<Member>>::query(db, filter).await?;
    let overview = members
        .into_iter()
        .map(|member| MemberOverview {
            status: member.status(today),
            member,
        })
        .collect();
    Ok(overview)
}
