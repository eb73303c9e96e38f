// src/domain/ids.rs
//
// Store-assigned identifiers.
//
// Every identifier is an SQLite rowid handed out by the persistence layer.
// Newtypes keep a film id from being passed where a user id is expected.

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl rusqlite::ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput<'_>> {
                Ok(rusqlite::types::ToSqlOutput::from(self.0))
            }
        }

        impl rusqlite::types::FromSql for $name {
            fn column_result(value: rusqlite::types::ValueRef<'_>) -> rusqlite::types::FromSqlResult<Self> {
                <i64 as rusqlite::types::FromSql>::column_result(value).map(Self)
            }
        }
    };
}

entity_id!(
    /// Film identifier
    FilmId
);
entity_id!(
    /// User identifier
    UserId
);
entity_id!(
    /// Director identifier
    DirectorId
);
entity_id!(
    /// Review identifier
    ReviewId
);
entity_id!(
    /// Genre identifier (seeded reference data)
    GenreId
);
entity_id!(
    /// MPA rating identifier (seeded reference data)
    MpaId
);
entity_id!(
    /// Activity feed event identifier
    EventId
);
