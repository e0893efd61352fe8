//! Schema-diff push: hands the resolved database to an external
//! synchronization tool and reports whether it succeeded.

mod error;
mod pusher;

pub use error::PushError;
pub use pusher::{SchemaPusher, ACCEPT_DATA_LOSS_FLAG, DEFAULT_TOOL, DEFAULT_TOOL_ARGS};
