pub mod datetime;
pub mod membership;
pub mod billing;
pub mod dashboard;

pub mod enrollment;
pub mod ledger;

pub use gymdesk_domain::Error;
pub type Result<T, E = Error> = std::result::Result<T, E>;
