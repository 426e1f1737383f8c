pub mod pool;
pub mod session_store;
