use gymdesk_accounting::{
    dashboard::DashboardSummary,
    datetime,
    enrollment::MemberOverview,
    ledger::{is_past_due, PaymentOverview},
};
use gymdesk_domain::{Member, Payment};

macro_rules! next_attr {
    ($old:ident, $new:ident, $attr:ident) => {
        if $old.$attr != $new.$attr {
            format!(" -> {}", $new.$attr)
        } else {
            "".to_string()
        }
    };
}

pub trait PrintFormatted {
    fn print_formatted(&self);
}

/// Payment date column, empty while unpaid
fn format_payment_date(payment: &Payment) -> String {
    match payment.payment_date {
        Some(date) => date.to_string(),
        None => "-".to_string(),
    }
}

impl PrintFormatted for Member {
    fn print_formatted(&self) {
        println!("Name:\t\t\t{}", self.name);
        println!("Age:\t\t\t{}", self.age);
        println!("Contact:\t\t{}", self.contact);
        println!("Address:\t\t{}", self.address);
        println!("Emergency Contact:\t{}", self.emergency_contact);
        println!("Plan:\t\t\t{}", self.plan_type);
        println!("Start:\t\t\t{}", self.membership_start_date);
        println!("End:\t\t\t{}", self.membership_end_date);
    }
}

impl PrintFormatted for (Member, Member) {
    fn print_formatted(&self) {
        let (old, new) = self;

        let next_name = next_attr!(old, new, name);
        println!("Name:\t\t\t{}{}", old.name, next_name);
        let next_age = next_attr!(old, new, age);
        println!("Age:\t\t\t{}{}", old.age, next_age);
        let next_contact = next_attr!(old, new, contact);
        println!("Contact:\t\t{}{}", old.contact, next_contact);
        let next_address = next_attr!(old, new, address);
        println!("Address:\t\t{}{}", old.address, next_address);
        let next_emergency_contact = next_attr!(old, new, emergency_contact);
        println!(
            "Emergency Contact:\t{}{}",
            old.emergency_contact, next_emergency_contact
        );
        let next_plan_type = next_attr!(old, new, plan_type);
        println!("Plan:\t\t\t{}{}", old.plan_type, next_plan_type);
        let next_start = next_attr!(old, new, membership_start_date);
        println!("Start:\t\t\t{}{}", old.membership_start_date, next_start);
        let next_end = next_attr!(old, new, membership_end_date);
        println!("End:\t\t\t{}{}", old.membership_end_date, next_end);
    }
}

impl PrintFormatted for Vec<MemberOverview> {
    fn print_formatted(&self) {
        println!(
            "{:>4}\t{:<24}\t{:>3}\t{:<16}\t{:<10}\t{:<10}\t{:<10}\t{}",
            "ID", "Name", "Age", "Contact", "Plan", "Start", "End", "Status"
        );
        println!("{:-<120}", "-");

        for MemberOverview { member, status } in self {
            println!(
                "{:>4}\t{:<24}\t{:>3}\t{:<16}\t{:<10}\t{:<10}\t{:<10}\t{}",
                member.id,
                member.name,
                member.age,
                member.contact,
                member.plan_type,
                member.membership_start_date.to_string(),
                member.membership_end_date.to_string(),
                status
            );
        }
    }
}

impl PrintFormatted for Payment {
    fn print_formatted(&self) {
        println!("Payment:\t\t{}", self.id);
        println!("Member:\t\t\t{}", self.member_id);
        println!("Amount:\t\t\t{:.2}", self.amount);
        println!("Due:\t\t\t{}", self.due_date);
        println!("Paid:\t\t\t{}", format_payment_date(self));
        println!("Status:\t\t\t{}", self.status);
    }
}

impl PrintFormatted for Vec<PaymentOverview> {
    fn print_formatted(&self) {
        let today = datetime::today();
        println!(
            "{:>4}\t{:<24}\t{:<16}\t{:<10}\t{:>10}\t{:<10}\t{:<10}\t{}",
            "ID", "Member", "Contact", "Plan", "Amount", "Due", "Paid", "Status"
        );
        println!("{:-<120}", "-");

        for overview in self {
            let payment = &overview.payment;
            let (contact, plan) = match &overview.member {
                Some(m) => (m.contact.clone(), m.plan_type.to_string()),
                None => ("N/A".to_string(), "N/A".to_string()),
            };
            let past_due = if is_past_due(payment, today) { " (past due)" } else { "" };
            println!(
                "{:>4}\t{:<24}\t{:<16}\t{:<10}\t{:>10.2}\t{:<10}\t{:<10}\t{}{}",
                payment.id,
                overview.member_name(),
                contact,
                plan,
                payment.amount,
                payment.due_date.to_string(),
                format_payment_date(payment),
                payment.status,
                past_due
            );
        }
    }
}

impl PrintFormatted for DashboardSummary {
    fn print_formatted(&self) {
        println!("Total Members:\t\t{}", self.total_members);
        println!("New This Month:\t\t{}", self.new_members_this_month);
        println!("Fees This Month:\t{:.2}", self.fees_this_month);
        println!("Pending Payments:\t{}", self.pending_payments);
    }
}
