pub mod batch;
pub mod codec;
pub mod inventory;
