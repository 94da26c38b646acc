pub mod bandwidth;
pub mod connect_point;
pub mod link;
