pub mod cli;
pub mod error;
pub mod lab;
pub mod ledger;
pub mod metadata;
pub mod ranking;
pub mod seed;
pub mod server;
pub mod storage;
pub mod transport;
pub mod types;
