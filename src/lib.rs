pub mod config;
pub mod error;
pub mod middleware;
pub mod navigate;
pub mod server;
pub mod storage;
pub mod tree;

pub use server::Server;
