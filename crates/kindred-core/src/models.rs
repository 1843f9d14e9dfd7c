use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

macro_rules! opaque_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Mints a fresh random identifier.
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

opaque_id!(MemberId);
opaque_id!(RelationshipId);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(rename = "birthDate")]
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "deathDate")]
    #[serde(default)]
    pub death_date: Option<NaiveDate>,
    #[serde(rename = "photoUrl")]
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(rename = "createdAt")]
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Member {
    pub fn new(
        id: impl Into<MemberId>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_date: None,
            death_date: None,
            photo_url: None,
            bio: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_deceased(&self) -> bool {
        self.death_date.is_some()
    }
}

/// The closed set of relationship types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipKind {
    /// Directed: source is the parent, target is the child.
    ParentChild,
    /// Undirected; source/target order carries no meaning.
    Spouse,
}

impl RelationshipKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ParentChild => "PARENT_CHILD",
            Self::Spouse => "SPOUSE",
        }
    }

    pub fn is_hierarchical(self) -> bool {
        matches!(self, Self::ParentChild)
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationshipKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PARENT_CHILD" => Ok(Self::ParentChild),
            "SPOUSE" => Ok(Self::Spouse),
            other => Err(Error::InvalidRelationshipKind {
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: RelationshipId,
    /// Parent for `PARENT_CHILD`.
    #[serde(rename = "memberId")]
    pub source: MemberId,
    /// Child for `PARENT_CHILD`.
    #[serde(rename = "relatedMemberId")]
    pub target: MemberId,
    #[serde(rename = "type")]
    pub kind: RelationshipKind,
}

impl Relationship {
    pub fn new(
        id: impl Into<RelationshipId>,
        source: impl Into<MemberId>,
        target: impl Into<MemberId>,
        kind: RelationshipKind,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            kind,
        }
    }

    pub fn parent_child(
        id: impl Into<RelationshipId>,
        parent: impl Into<MemberId>,
        child: impl Into<MemberId>,
    ) -> Self {
        Self::new(id, parent, child, RelationshipKind::ParentChild)
    }

    pub fn spouse(
        id: impl Into<RelationshipId>,
        a: impl Into<MemberId>,
        b: impl Into<MemberId>,
    ) -> Self {
        Self::new(id, a, b, RelationshipKind::Spouse)
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    pub fn touches(&self, member: &str) -> bool {
        self.source.as_str() == member || self.target.as_str() == member
    }
}

/// A point-in-time copy of the whole tree, owned by whoever asked for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl TreeSnapshot {
    pub fn new(members: Vec<Member>, relationships: Vec<Relationship>) -> Self {
        Self {
            members,
            relationships,
        }
    }

    pub fn member(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id.as_str() == id)
    }

    /// Relationships with at least one endpoint outside the member set.
    pub fn dangling_relationships(&self) -> Vec<&RelationshipId> {
        let known: FxHashSet<&str> = self.members.iter().map(|m| m.id.as_str()).collect();
        self.relationships
            .iter()
            .filter(|r| !known.contains(r.source.as_str()) || !known.contains(r.target.as_str()))
            .map(|r| &r.id)
            .collect()
    }
}
