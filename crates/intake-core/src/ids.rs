use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn parse(s: &str) -> Result<Self, DomainError> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|_| DomainError::InvalidId(stringify!($name).into()))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

define_id!(EventId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_uuid_succeeds() {
        let id = EventId::new();
        let parsed = EventId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_invalid_uuid_fails() {
        let result = EventId::parse("not-a-uuid");
        assert_eq!(result, Err(DomainError::InvalidId("EventId".into())));
    }

    #[test]
    fn ids_order_deterministically() {
        let a = EventId::new();
        let b = EventId::new();
        // Total order: exactly one of the two comparisons holds
        assert_ne!(a < b, b < a);
    }
}
