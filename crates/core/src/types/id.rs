//! Typed entity ids.
//!
//! `define_id!` wraps a [`uuid::Uuid`] in a distinct type per entity, so a
//! `ClientId` can never stand in for an `OrderId` at a call site.

/// Defines a transparent `Uuid` newtype.
///
/// The generated type is `Copy`, hashes and compares by value, serializes
/// as a bare UUID string, converts to and from `Uuid`, and parses from the
/// canonical hyphenated form. `short()` gives the 8-character reference
/// used in invoice filenames and order tables.
///
/// # Example
///
/// ```rust
/// # use shopdesk_core::define_id;
/// define_id!(ClientId);
/// define_id!(OrderId);
///
/// let client_id = ClientId::new(uuid::Uuid::new_v4());
/// let order_id = OrderId::new(uuid::Uuid::new_v4());
///
/// // Mixing them up is a compile error:
/// // let _: ClientId = order_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Create a new ID from a UUID value.
            #[must_use]
            pub const fn new(id: ::uuid::Uuid) -> Self {
                Self(id)
            }

            /// Get the underlying UUID value.
            #[must_use]
            pub const fn as_uuid(&self) -> ::uuid::Uuid {
                self.0
            }

            /// Short human-facing reference: the first 8 hex characters.
            ///
            /// Matches what invoices and order tables display.
            #[must_use]
            pub fn short(&self) -> ::std::string::String {
                self.0.simple().to_string().chars().take(8).collect()
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<::uuid::Uuid> for $name {
            fn from(id: ::uuid::Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for ::uuid::Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::uuid::Error;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                ::uuid::Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_id!(UserId);
define_id!(ClientId);
define_id!(OrderId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_short_matches_hyphenated_prefix() {
        let id: OrderId = "c56a4180-65aa-42ec-a945-5fd21dec0538".parse().unwrap();
        assert_eq!(id.short(), "c56a4180");
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!("not-a-uuid".parse::<ClientId>().is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let id: ClientId = "c56a4180-65aa-42ec-a945-5fd21dec0538".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"c56a4180-65aa-42ec-a945-5fd21dec0538\"");
    }
}
