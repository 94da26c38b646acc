pub mod connectivity_request;
pub mod connectivity_store;
pub mod realizing_link;
pub mod scenario;
pub mod state;
pub mod state_listener;
