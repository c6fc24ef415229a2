use anyhow::Result;
use chrono::Utc;
use clap::{Args, Subcommand};

use gymdesk_accounting::{
    billing::compute_next_due_date,
    datetime,
    ledger::{self, PaymentForm},
    Error,
};
use gymdesk_db::Connection;
use gymdesk_domain::{Member, PaymentStatus, Retrieve};

use crate::commands::confirm;
use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Payments {
    /// List payments
    #[clap(name = "list")]
    List(ListPayments),
    /// Record a payment for a member
    #[clap(name = "record")]
    Record(RecordPayment),
    /// Change the status of a payment
    #[clap(name = "mark")]
    Mark(MarkPayment),
}

impl Payments {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Payments::List(cmd) => cmd.run(db).await,
            Payments::Record(cmd) => cmd.run(db).await,
            Payments::Mark(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ListPayments {
    /// Match member name or contact
    #[clap(short, long)]
    pub search: Option<String>,
    #[clap(long)]
    pub status: Option<PaymentStatus>,
}

impl ListPayments {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let payments = ledger::list_payments(db, self.search.as_deref(), self.status).await?;
        if payments.is_empty() {
            println!("No payments found.");
            return Ok(());
        }
        payments.print_formatted();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct RecordPayment {
    #[clap(short, long)]
    pub member_id: u32,
    #[clap(short, long, allow_hyphen_values = true)]
    pub amount: String,
    /// Defaults to the next due date of the member's plan
    #[clap(short, long)]
    pub due_date: Option<String>,
    /// pending, paid or overdue
    #[clap(short, long)]
    pub status: Option<String>,
    /// Do not ask for confirmation
    #[clap(short, long)]
    pub yes: bool,
}

impl RecordPayment {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let today = datetime::today();
        let form = PaymentForm {
            member_id: self.member_id,
            amount: self.amount,
            due_date: self.due_date,
            status: self.status,
        };
        let input = form.parse()?;
        let member: Member = db.retrieve(form.member_id).await.map_err(Error::Store)?;

        println!();
        println!("Member:\t\t\t{}", member.name);
        println!("Plan:\t\t\t{}", member.plan_type);
        println!("Contact:\t\t{}", member.contact);
        println!("Membership Expires:\t{}", member.membership_end_date);
        let due = match input.due_date {
            Some(due) => due,
            None => compute_next_due_date(member.plan_type, today)?,
        };
        println!("Amount:\t\t\t{:.2}", input.amount);
        println!("Due Date:\t\t{}", due);
        println!("Status:\t\t\t{}", input.status);
        println!();

        if !confirm("Record payment?", self.yes)? {
            return Ok(());
        }

        let payment = ledger::record_payment(db, form, today, Utc::now()).await?;
        println!("Payment recorded with id {}.", payment.id);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct MarkPayment {
    #[clap(short, long)]
    pub id: u32,
    /// pending, paid or overdue
    #[clap(short, long)]
    pub status: PaymentStatus,
}

impl MarkPayment {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let payment =
            ledger::set_payment_status(db, self.id, self.status, datetime::today()).await?;
        println!();
        payment.print_formatted();
        println!();
        Ok(())
    }
}
