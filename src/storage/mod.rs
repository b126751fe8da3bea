//! Storage backends for the repository traits

pub mod in_memory;

pub use in_memory::{
    InMemoryCredentialStore, InMemoryCustomerStore, InMemoryOrderStore, InMemoryTrackingStore,
    InMemoryVendorStore,
};
