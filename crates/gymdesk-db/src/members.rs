use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use gymdesk_domain::{Delete, Insert, Member, MemberFilter, Query, Retrieve, Update};

use crate::{
    results::{Id, QueryError},
    Connection,
};

#[async_trait]
impl Query<Member> for Connection {
    type Filter = MemberFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Member>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT
                id,
                name,
                age,
                contact,
                address,
                emergency_contact,
                membership_start_date,
                membership_end_date,
                plan_type,
                created_at
            FROM members
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(plan_type) = filter.plan_type {
            qry.push(" AND plan_type = ").push_bind(plan_type);
        }
        qry.push(" ORDER BY name, id");

        let mut members: Vec<Member> = qry.build_query_as().fetch_all(&mut *conn).await?;

        // Text filters are literal, Unicode case insensitive matches,
        // which SQLite's LIKE can not express.
        members.retain(|m| filter.matches(m));
        Ok(members)
    }
}

#[async_trait]
impl Retrieve<Member> for Connection {
    type Key = u32;
    async fn retrieve(&self, member_id: Self::Key) -> Result<Member> {
        let filter = MemberFilter {
            id: Some(member_id),
            ..Default::default()
        };
        let mut members: Vec<Member> = self.query(&filter).await?;
        let member = members.pop().ok_or(QueryError::NotFound)?;
        Ok(member)
    }
}

#[async_trait]
impl Insert<Member> for Connection {
    async fn insert(&self, member: Member) -> Result<Member> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO members (
                    name,
                    age,
                    contact,
                    address,
                    emergency_contact,
                    membership_start_date,
                    membership_end_date,
                    plan_type,
                    created_at
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(&member.name)
                .push_bind(member.age)
                .push_bind(&member.contact)
                .push_bind(&member.address)
                .push_bind(&member.emergency_contact)
                .push_bind(member.membership_start_date)
                .push_bind(member.membership_end_date)
                .push_bind(member.plan_type)
                .push_bind(member.created_at);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        log::debug!("inserted member {}", insert.id);
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Update<Member> for Connection {
    /// Update member. The creation timestamp is never written.
    async fn update(&self, member: Member) -> Result<Member> {
        {
            let mut conn = self.lock().await;
            let result = QueryBuilder::<Sqlite>::new("UPDATE members SET")
                .push(" name = ")
                .push_bind(&member.name)
                .push(", age = ")
                .push_bind(member.age)
                .push(", contact = ")
                .push_bind(&member.contact)
                .push(", address = ")
                .push_bind(&member.address)
                .push(", emergency_contact = ")
                .push_bind(&member.emergency_contact)
                .push(", membership_start_date = ")
                .push_bind(member.membership_start_date)
                .push(", membership_end_date = ")
                .push_bind(member.membership_end_date)
                .push(", plan_type = ")
                .push_bind(member.plan_type)
                .push(" WHERE id = ")
                .push_bind(member.id)
                .build()
                .execute(&mut *conn)
                .await?;
            if result.rows_affected() == 0 {
                return Err(QueryError::NotFound.into());
            }
        }
        log::debug!("updated member {}", member.id);
        self.retrieve(member.id).await
    }
}

#[async_trait]
impl Delete<Member> for Connection {
    /// Delete member
    async fn delete(&self, member: Member) -> Result<()> {
        let mut conn = self.lock().await;
        let result = QueryBuilder::<Sqlite>::new("DELETE FROM members WHERE id = ")
            .push_bind(member.id)
            .build()
            .execute(&mut *conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(QueryError::NotFound.into());
        }
        log::debug!("deleted member {}", member.id);
        Ok(())
    }
}
