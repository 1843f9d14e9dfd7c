#![forbid(unsafe_code)]

//! Family tree data model (headless).
//!
//! Members and typed relationships are explicit fixed-field records; the relationship type is a
//! closed enum so every consumer downstream of ingestion can match on it exhaustively. Request
//! types in [`requests`] are the single place where client input is validated.

pub mod error;
pub mod models;
pub mod requests;
pub mod time;

pub use error::{Error, Result};
pub use models::{Member, MemberId, Relationship, RelationshipId, RelationshipKind, TreeSnapshot};
pub use requests::{MemberDraft, MemberPatch, NewMember, NewRelationship, RelationshipDraft};
