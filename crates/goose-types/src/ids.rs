//! Strongly-typed string wrappers.
//!
//! The API hands out opaque string identifiers. Wrapping them keeps a round
//! id from being passed where a role or a username is expected.

use serde::{Deserialize, Serialize};

/// Generates a transparent newtype wrapper around [`String`].
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Borrow the inner string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }
    };
}

define_string_id! {
    /// Identifier of a round as issued by the server.
    RoundId
}

define_string_id! {
    /// Role attached to a user account (`ADMIN` or a player role).
    Role
}

impl Role {
    /// Wire value of the administrator role.
    pub const ADMIN: &'static str = "ADMIN";

    /// Whether this role grants administrator rights.
    pub fn is_admin(&self) -> bool {
        self.0 == Self::ADMIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_admin_is_case_sensitive() {
        assert!(Role::from("ADMIN").is_admin());
        assert!(!Role::from("admin").is_admin());
        assert!(!Role::from("SURVIVOR").is_admin());
    }

    #[test]
    fn round_id_serializes_as_plain_string() {
        let id = RoundId::from("r-42");
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, "\"r-42\"");
        assert_eq!(id.to_string(), "r-42");
    }
}
