//! Value objects - immutable values exchanged with the remote API and the store

mod api_response;
mod member;
mod profile;

pub use api_response::{ApiParams, ApiResponse};
pub use member::{Member, Presence};
pub use profile::Profile;
