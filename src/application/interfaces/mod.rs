mod answer_source;
mod completion_client;
mod state_store;

pub use answer_source::*;
pub use completion_client::*;
pub use state_store::*;
