//! Wire types for the goose-tap game API.
//!
//! Every request and response body exchanged with the remote API is
//! defined here so the client, the derivations in `goose-core` and the
//! terminal front-end agree on one shape. Field names follow the API's
//! camelCase JSON.
//!
//! # Modules
//!
//! - [`ids`] -- String newtypes for round identifiers and user roles
//! - [`structs`] -- Request/response bodies (auth, rounds, taps)

pub mod ids;
pub mod structs;

pub use ids::{Role, RoundId};
pub use structs::{
    LoginRequest, LoginResponse, MyStats, Round, RoundDetail, RoundList, TapResult, TopStat,
    TopStatUser, UserIdentity,
};
