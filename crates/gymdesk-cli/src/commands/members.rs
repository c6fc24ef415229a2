
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::{Args, Subcommand};

use gymdesk_accounting::{
    datetime,
    enrollment::{self, MemberForm},
    membership::MembershipState,
    Error,
};
use gymdesk_db::Connection;
use gymdesk_domain::{Member, MemberFilter, PlanType, Retrieve};

use crate::commands::confirm;
use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Members {
    /// Show a member
    #[clap(name="show")]
    Show(ShowMember),
    /// List members
    #[clap(name="list")]
    List(ListMembers),
    /// Add a member
    #[clap(name="add")]
    Add(AddMember),
    /// Update a member
    #[clap(name="set")]
    Update(UpdateMember),
    /// Delete a member
    #[clap(name="delete")]
    Delete(DeleteMember),
}

impl Members {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Members::Show(cmd) => cmd.run(db).await,
            Members::List(cmd) => cmd.run(db).await,
            Members::Add(cmd) => cmd.run(db).await,
            Members::Update(cmd) => cmd.run(db).await,
            Members::Delete(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ShowMember {
    #[clap(short, long)]
    pub id: u32,
}

impl ShowMember {
    /// Run the command and show a member
    pub async fn run(self, db: &Connection) -> Result<()> {
        let member: Member = db.retrieve(self.id).await.map_err(Error::Store)?;
        println!();
        member.print_formatted();
        println!("Status:\t\t\t{}", member.status(datetime::today()));
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListMembers {
    #[clap(short, long)]
    pub name: Option<String>,
    #[clap(short, long)]
    pub contact: Option<String>,
    /// Match name or contact
    #[clap(short, long)]
    pub search: Option<String>,
    #[clap(short, long)]
    pub plan: Option<PlanType>,
}

impl ListMembers {
    /// Run the command and list members
    pub async fn run(self, db: &Connection) -> Result<()> {
        let filter = MemberFilter {
            name: self.name,
            contact: self.contact,
            search: self.search,
            plan_type: self.plan,
            ..Default::default()
        };

        let members = enrollment::list_members(db, &filter, datetime::today()).await?;
        println!("{} members.", members.len());
        members.print_formatted();

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddMember {
    #[clap(short, long)]
    pub name: String,
    #[clap(short, long)]
    pub age: String,
    #[clap(short, long, default_value = "")]
    pub contact: String,
    #[clap(long, default_value = "")]
    pub address: String,
    #[clap(short, long, default_value = "")]
    pub emergency_contact: String,
    /// Start of the membership, defaults to today
    #[clap(long)]
    pub start: Option<String>,
    /// Monthly, Quarterly or Yearly
    #[clap(short, long, default_value = "Monthly")]
    pub plan: String,
    /// Do not ask for confirmation
    #[clap(short, long)]
    pub yes: bool,
}

impl AddMember {
    /// Run the command and add a member to the database
    pub async fn run(self, db: &Connection) -> Result<()> {
        let start = self
            .start
            .unwrap_or_else(|| datetime::today().format("%Y-%m-%d").to_string());
        let form = MemberForm {
            name: self.name,
            age: self.age,
            contact: self.contact,
            address: self.address,
            emergency_contact: self.emergency_contact,
            membership_start_date: start,
            plan_type: self.plan,
        };
        let member = form.parse()?;

        println!();
        member.print_formatted();
        println!();

        if !confirm("Add member?", self.yes)? {
            return Ok(());
        }

        let member = enrollment::add_member(db, member, Utc::now()).await?;
        println!("Member added with id {}.", member.id);

        Ok(())
    }
}


#[derive(Args, Debug)]
pub struct UpdateMember {
    #[clap(short, long)]
    pub id: u32,
    #[clap(short, long)]
    pub name: Option<String>,
    #[clap(short, long)]
    pub age: Option<u8>,
    #[clap(short, long)]
    pub contact: Option<String>,
    #[clap(long)]
    pub address: Option<String>,
    #[clap(short, long)]
    pub emergency_contact: Option<String>,
    #[clap(long)]
    pub start: Option<NaiveDate>,
    #[clap(short, long)]
    pub plan: Option<PlanType>,
    /// Do not ask for confirmation
    #[clap(short, long)]
    pub yes: bool,
}

impl UpdateMember {
    /// Run command and update a member
    pub async fn run(self, db: &Connection) -> Result<()> {
        let member: Member = db.retrieve(self.id).await.map_err(Error::Store)?;
        let mut update = member.clone();

        if let Some(name) = self.name {
            update.name = name;
        }
        if let Some(age) = self.age {
            update.age = age;
        }
        if let Some(contact) = self.contact {
            update.contact = contact;
        }
        if let Some(address) = self.address {
            update.address = address;
        }
        if let Some(emergency_contact) = self.emergency_contact {
            update.emergency_contact = emergency_contact;
        }
        if let Some(start) = self.start {
            update.membership_start_date = start;
        }
        if let Some(plan) = self.plan {
            update.plan_type = plan;
        }
        // Preview the end date
        update.apply_plan()?;

        println!();
        (member, update.clone()).print_formatted();
        println!();
        if !confirm("Update member?", self.yes)? {
            return Ok(());
        }

        enrollment::update_member(db, update).await?;
        Ok(())
    }
}


#[derive(Args, Debug)]
pub struct DeleteMember {
    #[clap(short, long)]
    pub id: u32,
    /// Do not ask for confirmation
    #[clap(short, long)]
    pub yes: bool,
}


impl DeleteMember {
    pub async fn run(&self, db: &Connection) -> Result<()> {
        let member: Member = db.retrieve(self.id).await.map_err(Error::Store)?;
        println!();
        member.print_formatted();
        println!();
        if !confirm("Delete member from database?", self.yes)? {
            return Ok(());
        }
        enrollment::delete_member(db, member.id).await?;
        println!("Member {} deleted, payments are kept.", member.id);
        Ok(())
    }
}
