//! Client request bodies and their validation.
//!
//! Every field is optional at the serde level so that missing values surface as a
//! [`Error::MissingField`] with a readable message instead of a deserializer error.

use crate::models::{Member, MemberId, Relationship, RelationshipId, RelationshipKind};
use crate::time::parse_calendar_date;
use crate::{Error, Result};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

/// Distinguishes "field absent" (`None`) from "field set to null" (`Some(None)`).
fn double_option<'de, T, D>(de: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn optional_text(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewMember {
    #[serde(rename = "firstName")]
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(rename = "birthDate")]
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(rename = "deathDate")]
    #[serde(default)]
    pub death_date: Option<String>,
    #[serde(rename = "photoUrl")]
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// A validated [`NewMember`], ready to be given an id.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberDraft {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<NaiveDate>,
    pub photo_url: Option<String>,
    pub bio: Option<String>,
}

impl NewMember {
    pub fn validate(self) -> Result<MemberDraft> {
        let (Some(first_name), Some(last_name)) = (
            non_blank(self.first_name.as_deref()),
            non_blank(self.last_name.as_deref()),
        ) else {
            return Err(Error::MissingField {
                fields: "firstName and lastName",
            });
        };
        let birth_date = match self.birth_date.as_deref() {
            Some(raw) => parse_calendar_date("birthDate", raw)?,
            None => None,
        };
        let death_date = match self.death_date.as_deref() {
            Some(raw) => parse_calendar_date("deathDate", raw)?,
            None => None,
        };
        Ok(MemberDraft {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            birth_date,
            death_date,
            photo_url: optional_text(self.photo_url),
            bio: optional_text(self.bio),
        })
    }
}

impl MemberDraft {
    pub fn into_member(self, id: MemberId) -> Member {
        let mut member = Member::new(id, self.first_name, self.last_name);
        member.birth_date = self.birth_date;
        member.death_date = self.death_date;
        member.photo_url = self.photo_url;
        member.bio = self.bio;
        member
    }
}

/// Partial update. Absent fields keep their current value, `null` clears optional ones.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberPatch {
    #[serde(rename = "firstName")]
    #[serde(default, deserialize_with = "double_option")]
    pub first_name: Option<Option<String>>,
    #[serde(rename = "lastName")]
    #[serde(default, deserialize_with = "double_option")]
    pub last_name: Option<Option<String>>,
    #[serde(rename = "birthDate")]
    #[serde(default, deserialize_with = "double_option")]
    pub birth_date: Option<Option<String>>,
    #[serde(rename = "deathDate")]
    #[serde(default, deserialize_with = "double_option")]
    pub death_date: Option<Option<String>>,
    #[serde(rename = "photoUrl")]
    #[serde(default, deserialize_with = "double_option")]
    pub photo_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub bio: Option<Option<String>>,
}

impl MemberPatch {
    /// Applies the patch atomically: on error `member` is left untouched.
    pub fn apply(self, member: &mut Member) -> Result<()> {
        let first_name = patched_name("firstName", self.first_name, &member.first_name)?;
        let last_name = patched_name("lastName", self.last_name, &member.last_name)?;
        let birth_date = patched_date("birthDate", self.birth_date, member.birth_date)?;
        let death_date = patched_date("deathDate", self.death_date, member.death_date)?;

        member.first_name = first_name;
        member.last_name = last_name;
        member.birth_date = birth_date;
        member.death_date = death_date;
        if let Some(photo_url) = self.photo_url {
            member.photo_url = optional_text(photo_url);
        }
        if let Some(bio) = self.bio {
            member.bio = optional_text(bio);
        }
        member.updated_at = Utc::now();
        Ok(())
    }
}

fn patched_name(
    field: &'static str,
    patch: Option<Option<String>>,
    current: &str,
) -> Result<String> {
    match patch.flatten() {
        None => Ok(current.to_string()),
        Some(value) => non_blank(Some(value.as_str()))
            .map(str::to_string)
            .ok_or(Error::BlankField { field }),
    }
}

fn patched_date(
    field: &'static str,
    patch: Option<Option<String>>,
    current: Option<NaiveDate>,
) -> Result<Option<NaiveDate>> {
    match patch {
        None => Ok(current),
        Some(None) => Ok(None),
        Some(Some(raw)) => parse_calendar_date(field, &raw),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewRelationship {
    #[serde(rename = "memberId")]
    #[serde(default)]
    pub member_id: Option<String>,
    #[serde(rename = "relatedMemberId")]
    #[serde(default)]
    pub related_member_id: Option<String>,
    #[serde(rename = "type")]
    #[serde(default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipDraft {
    pub source: MemberId,
    pub target: MemberId,
    pub kind: RelationshipKind,
}

impl NewRelationship {
    pub fn validate(self) -> Result<RelationshipDraft> {
        let (Some(source), Some(target), Some(kind)) = (
            non_blank(self.member_id.as_deref()),
            non_blank(self.related_member_id.as_deref()),
            non_blank(self.kind.as_deref()),
        ) else {
            return Err(Error::MissingField {
                fields: "memberId, relatedMemberId, and type",
            });
        };
        let kind: RelationshipKind = kind.parse()?;
        if source == target {
            return Err(Error::SelfRelationship);
        }
        Ok(RelationshipDraft {
            source: MemberId::from(source),
            target: MemberId::from(target),
            kind,
        })
    }
}

impl RelationshipDraft {
    pub fn into_relationship(self, id: RelationshipId) -> Relationship {
        Relationship::new(id, self.source, self.target, self.kind)
    }
}
