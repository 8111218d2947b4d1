pub mod retail_store;

pub use retail_store::{RetailStore, StoreConfig};
