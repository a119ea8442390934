//! Handler types and dependencies

use crate::download::lifecycle::RequestCoordinator;
use crate::telegram::callback::CallbackCodec;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub coordinator: RequestCoordinator,
    /// Same codec the transport encodes buttons with
    pub codec: CallbackCodec,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(coordinator: RequestCoordinator, codec: CallbackCodec) -> Self {
        Self { coordinator, codec }
    }
}
