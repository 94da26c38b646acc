pub mod connectivity;
pub mod network;
pub mod utils;
