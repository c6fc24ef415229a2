pub mod connection;
pub use connection::Connection;

pub mod results;
pub use results::QueryError;
pub mod schema;

pub mod members;
pub mod payments;

pub mod memory;
pub use memory::MemoryStore;
