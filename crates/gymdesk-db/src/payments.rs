use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use gymdesk_domain::{Delete, Insert, Payment, PaymentFilter, Query, Retrieve, Update};

use crate::{
    results::{Id, QueryError},
    Connection,
};

#[async_trait]
impl Query<Payment> for Connection {
    type Filter = PaymentFilter;

    /// Payments are returned newest first
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Payment>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT
                id,
                member_id,
                amount,
                due_date,
                payment_date,
                status,
                created_at
            FROM payments
            WHERE 1
            "#,
        );
        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(member_id) = filter.member_id {
            qry.push(" AND member_id = ").push_bind(member_id);
        }
        if let Some(status) = filter.status {
            qry.push(" AND status = ").push_bind(status);
        }
        qry.push(" ORDER BY created_at DESC, id DESC");

        let payments: Vec<Payment> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(payments)
    }
}

#[async_trait]
impl Retrieve<Payment> for Connection {
    type Key = u32;
    async fn retrieve(&self, payment_id: Self::Key) -> Result<Payment> {
        let filter = PaymentFilter {
            id: Some(payment_id),
            ..Default::default()
        };
        let mut payments: Vec<Payment> = self.query(&filter).await?;
        let payment = payments.pop().ok_or(QueryError::NotFound)?;
        Ok(payment)
    }
}

#[async_trait]
impl Insert<Payment> for Connection {
    async fn insert(&self, payment: Payment) -> Result<Payment> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO payments (
                    member_id,
                    amount,
                    due_date,
                    payment_date,
                    status,
                    created_at
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(payment.member_id)
                .push_bind(payment.amount)
                .push_bind(payment.due_date)
                .push_bind(payment.payment_date)
                .push_bind(payment.status)
                .push_bind(payment.created_at);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        log::debug!("inserted payment {}", insert.id);
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Update<Payment> for Connection {
    /// Update a payment. Member and creation timestamp are never written.
    async fn update(&self, payment: Payment) -> Result<Payment> {
        {
            let mut conn = self.lock().await;
            let result = QueryBuilder::<Sqlite>::new("UPDATE payments SET")
                .push(" amount = ")
                .push_bind(payment.amount)
                .push(", due_date = ")
                .push_bind(payment.due_date)
                .push(", payment_date = ")
                .push_bind(payment.payment_date)
                .push(", status = ")
                .push_bind(payment.status)
                .push(" WHERE id = ")
                .push_bind(payment.id)
                .build()
                .execute(&mut *conn)
                .await?;
            if result.rows_affected() == 0 {
                return Err(QueryError::NotFound.into());
            }
        }
        log::debug!("updated payment {} to {}", payment.id, payment.status);
        self.retrieve(payment.id).await
    }
}

#[async_trait]
impl Delete<Payment> for Connection {
    async fn delete(&self, payment: Payment) -> Result<()> {
        let mut conn = self.lock().await;
        let result = QueryBuilder::<Sqlite>::new("DELETE FROM payments WHERE id = ")
            .push_bind(payment.id)
            .build()
            .execute(&mut *conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(QueryError::NotFound.into());
        }
        Ok(())
    }
}
