pub mod contract;
pub mod helpers;
pub mod msg;
pub mod state;
