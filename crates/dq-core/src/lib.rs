pub mod collaborators;
pub mod pipeline;

pub use collaborators::{
    AddressLookup, AddressMatch, CollaboratorError, ContactVerifier, Verification,
};
pub use pipeline::Pipeline;
