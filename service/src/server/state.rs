//! Server state

use std::sync::Arc;

use crate::workflow::Simulator;

/// Server state shared across handlers
pub struct ServerState {
    pub simulator: Arc<Simulator>,
}

impl ServerState {
    pub fn new(simulator: Arc<Simulator>) -> Self {
        Self { simulator }
    }
}
