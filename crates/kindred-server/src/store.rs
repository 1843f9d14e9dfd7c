//! Tree persistence.
//!
//! Handlers only talk to [`TreeStore`]. [`MemoryStore`] keeps everything in process memory;
//! ordering follows creation order, which is also the order the layout engine sees.

use async_trait::async_trait;
use indexmap::IndexMap;
use kindred_core::{
    Member, MemberDraft, MemberId, MemberPatch, Relationship, RelationshipDraft, RelationshipId,
    TreeSnapshot,
};
use tokio::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Not found")]
    NotFound,

    #[error("Unknown member: {0}")]
    UnknownMember(MemberId),

    #[error(transparent)]
    Invalid(#[from] kindred_core::Error),
}

#[async_trait]
pub trait TreeStore: Send + Sync {
    async fn snapshot(&self) -> TreeSnapshot;

    async fn member(&self, id: &str) -> Option<Member>;

    async fn create_member(&self, draft: MemberDraft) -> Member;

    async fn update_member(&self, id: &str, patch: MemberPatch) -> Result<Member, StoreError>;

    /// Removes the member and every relationship touching it. Returns how many relationships
    /// went with it.
    async fn delete_member(&self, id: &str) -> Result<usize, StoreError>;

    /// Both endpoints must already exist.
    async fn create_relationship(
        &self,
        draft: RelationshipDraft,
    ) -> Result<Relationship, StoreError>;

    async fn delete_relationship(&self, id: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
struct Tree {
    members: IndexMap<MemberId, Member>,
    relationships: IndexMap<RelationshipId, Relationship>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tree: RwLock<Tree>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TreeStore for MemoryStore {
    async fn snapshot(&self) -> TreeSnapshot {
        let tree = self.tree.read().await;
        TreeSnapshot::new(
            tree.members.values().cloned().collect(),
            tree.relationships.values().cloned().collect(),
        )
    }

    async fn member(&self, id: &str) -> Option<Member> {
        self.tree.read().await.members.get(id).cloned()
    }

    async fn create_member(&self, draft: MemberDraft) -> Member {
        let member = draft.into_member(MemberId::generate());
        self.tree
            .write()
            .await
            .members
            .insert(member.id.clone(), member.clone());
        member
    }

    async fn update_member(&self, id: &str, patch: MemberPatch) -> Result<Member, StoreError> {
        let mut tree = self.tree.write().await;
        let member = tree.members.get_mut(id).ok_or(StoreError::NotFound)?;
        patch.apply(member)?;
        Ok(member.clone())
    }

    async fn delete_member(&self, id: &str) -> Result<usize, StoreError> {
        let mut tree = self.tree.write().await;
        if tree.members.shift_remove(id).is_none() {
            return Err(StoreError::NotFound);
        }
        let before = tree.relationships.len();
        tree.relationships.retain(|_, r| !r.touches(id));
        Ok(before - tree.relationships.len())
    }

    async fn create_relationship(
        &self,
        draft: RelationshipDraft,
    ) -> Result<Relationship, StoreError> {
        let mut tree = self.tree.write().await;
        for endpoint in [&draft.source, &draft.target] {
            if !tree.members.contains_key(endpoint) {
                return Err(StoreError::UnknownMember(endpoint.clone()));
            }
        }
        let relationship = draft.into_relationship(RelationshipId::generate());
        tree.relationships
            .insert(relationship.id.clone(), relationship.clone());
        Ok(relationship)
    }

    async fn delete_relationship(&self, id: &str) -> Result<(), StoreError> {
        let mut tree = self.tree.write().await;
        tree.relationships
            .shift_remove(id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}
