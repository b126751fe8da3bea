//! Core traits and types: auth, errors, repository seams

pub mod auth;
pub mod error;
pub mod repository;

pub use auth::{AuthProvider, Principal, Role, StaticTokenAuthProvider};
pub use error::{DispatchError, DispatchResult, ErrorResponse};
pub use repository::{
    CredentialRepository, CustomerRepository, OrderRepository, TrackingRepository,
    VendorRepository,
};
