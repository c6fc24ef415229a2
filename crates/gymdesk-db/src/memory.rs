//! In-memory record store.
//!
//! Implements the same operations as the SQLite [`Connection`](crate::Connection)
//! on plain maps. Ids are assigned sequentially starting at 1 and listing
//! order follows the SQLite store: members by name, payments newest first.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

use gymdesk_domain::{
    Delete, Insert, Member, MemberFilter, Payment, PaymentFilter, Query, Retrieve, Update,
};

use crate::results::QueryError;

#[derive(Debug, Default)]
struct Tables {
    members: BTreeMap<u32, Member>,
    payments: BTreeMap<u32, Payment>,
    last_member_id: u32,
    last_payment_id: u32,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following operation fail with
    /// [`QueryError::Unavailable`] until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(QueryError::Unavailable.into());
        }
        Ok(())
    }
}

#[async_trait]
impl Query<Member> for MemoryStore {
    type Filter = MemberFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Member>> {
        self.check_available()?;
        let tables = self.tables.lock().await;
        let mut members: Vec<Member> = tables
            .members
            .values()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect();
        members.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(members)
    }
}

#[async_trait]
impl Retrieve<Member> for MemoryStore {
    type Key = u32;
    async fn retrieve(&self, member_id: Self::Key) -> Result<Member> {
        self.check_available()?;
        let tables = self.tables.lock().await;
        let member = tables
            .members
            .get(&member_id)
            .cloned()
            .ok_or(QueryError::NotFound)?;
        Ok(member)
    }
}

#[async_trait]
impl Insert<Member> for MemoryStore {
    async fn insert(&self, member: Member) -> Result<Member> {
        self.check_available()?;
        let mut tables = self.tables.lock().await;
        tables.last_member_id += 1;
        let member = Member {
            id: tables.last_member_id,
            ..member
        };
        tables.members.insert(member.id, member.clone());
        Ok(member)
    }
}

#[async_trait]
impl Update<Member> for MemoryStore {
    async fn update(&self, member: Member) -> Result<Member> {
        self.check_available()?;
        let mut tables = self.tables.lock().await;
        let stored = tables
            .members
            .get_mut(&member.id)
            .ok_or(QueryError::NotFound)?;
        *stored = Member {
            created_at: stored.created_at,
            ..member
        };
        Ok(stored.clone())
    }
}

#[async_trait]
impl Delete<Member> for MemoryStore {
    async fn delete(&self, member: Member) -> Result<()> {
        self.check_available()?;
        let mut tables = self.tables.lock().await;
        tables
            .members
            .remove(&member.id)
            .ok_or(QueryError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl Query<Payment> for MemoryStore {
    type Filter = PaymentFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Payment>> {
        self.check_available()?;
        let tables = self.tables.lock().await;
        let mut payments: Vec<Payment> = tables
            .payments
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        payments.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.id.cmp(&a.id))
        });
        Ok(payments)
    }
}

#[async_trait]
impl Retrieve<Payment> for MemoryStore {
    type Key = u32;
    async fn retrieve(&self, payment_id: Self::Key) -> Result<Payment> {
        self.check_available()?;
        let tables = self.tables.lock().await;
        let payment = tables
            .payments
            .get(&payment_id)
            .cloned()
            .ok_or(QueryError::NotFound)?;
        Ok(payment)
    }
}

#[async_trait]
impl Insert<Payment> for MemoryStore {
    async fn insert(&self, payment: Payment) -> Result<Payment> {
        self.check_available()?;
        let mut tables = self.tables.lock().await;
        tables.last_payment_id += 1;
        let payment = Payment {
            id: tables.last_payment_id,
            ..payment
        };
        tables.payments.insert(payment.id, payment.clone());
        Ok(payment)
    }
}

#[async_trait]
impl Update<Payment> for MemoryStore {
    async fn update(&self, payment: Payment) -> Result<Payment> {
        self.check_available()?;
        let mut tables = self.tables.lock().await;
        let stored = tables
            .payments
            .get_mut(&payment.id)
            .ok_or(QueryError::NotFound)?;
        *stored = Payment {
            member_id: stored.member_id,
            created_at: stored.created_at,
            ..payment
        };
        Ok(stored.clone())
    }
}

#[async_trait]
impl Delete<Payment> for MemoryStore {
    async fn delete(&self, payment: Payment) -> Result<()> {
        self.check_available()?;
        let mut tables = self.tables.lock().await;
        tables
            .payments
            .remove(&payment.id)
            .ok_or(QueryError::NotFound)?;
        Ok(())
    }
}
