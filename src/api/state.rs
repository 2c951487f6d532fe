//! Shared handler state

use std::sync::Arc;
use std::time::Instant;

use crate::query_processor::QueryParser;

#[derive(Clone)]
pub struct AppState {
    pub parser: Arc<QueryParser>,
    /// Server start time for uptime reporting
    pub start_time: Instant,
}

impl AppState {
    pub fn new(parser: Arc<QueryParser>) -> Self {
        Self {
            parser,
            start_time: Instant::now(),
        }
    }
}
