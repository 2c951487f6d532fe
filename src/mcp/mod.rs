pub mod server;

pub use server::{ParseQueryParams, YueziMcpServer, run_server};
