mod file_state_store;
mod memory_state_store;
mod mock_completion;
mod openai_client;
mod relay_client;

pub use file_state_store::*;
pub use memory_state_store::*;
pub use mock_completion::*;
pub use openai_client::*;
pub use relay_client::*;
