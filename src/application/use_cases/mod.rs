pub mod credentials;
pub mod renewal;
pub mod session;
