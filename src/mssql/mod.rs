// MSSQL module - the SQL Server side of the pipeline
//
// - config: connection descriptor and driver configuration
// - client: opening the connection
// - query: running the statement and reading the result set
// - executor: one query per connection, then close

pub mod client;
pub mod config;
pub mod executor;
pub mod query;

pub use client::create_mssql_client;
pub use config::{ConnectionDescriptor, MssqlClient};
pub use executor::execute_select;
pub use query::build_result_set;
