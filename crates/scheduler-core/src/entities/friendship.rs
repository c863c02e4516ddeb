//! Friendship entity - the accepted relationship between two children
//!
//! Side 1 is always the child who sent the invitation, side 2 the child who
//! accepted it. Each parent owns the pause flag on their child's side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::invitation::{Invitation, InvitationStatus};
use crate::error::DomainError;
use crate::value_objects::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FriendshipStatus {
    Active,
    Suspended,
    Blocked,
}

impl FriendshipStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
            Self::Blocked => "blocked",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "suspended" => Some(Self::Suspended),
            "blocked" => Some(Self::Blocked),
            _ => None,
        }
    }
}

impl fmt::Display for FriendshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which parent of the friendship acted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendshipSide {
    Parent1,
    Parent2,
}

/// Friendship entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Friendship {
    pub id: RecordId,
    pub child1_id: RecordId,
    pub child1_name: String,
    pub child2_id: RecordId,
    pub child2_name: String,
    pub parent1_id: RecordId,
    pub parent2_id: RecordId,
    pub status: FriendshipStatus,
    pub is_paused_by_parent1: bool,
    pub is_paused_by_parent2: bool,
    pub invitation_id: RecordId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Friendship {
    /// Materialize the friendship of an accepted invitation
    pub fn from_invitation(
        id: RecordId,
        invitation: &Invitation,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if invitation.status != InvitationStatus::Accepted {
            return Err(DomainError::InvalidInvitationState {
                expected: InvitationStatus::Accepted,
                actual: invitation.status,
            });
        }
        let recipient = invitation
            .recipient
            .as_ref()
            .ok_or(DomainError::MissingRecipientInfo)?;
        let sender = &invitation.sender;

        Ok(Self {
            id,
            child1_id: sender.child_id.clone(),
            child1_name: sender.child_name.clone(),
            child2_id: recipient.child_id.clone(),
            child2_name: recipient.child_name.clone(),
            parent1_id: sender.parent_id.clone(),
            parent2_id: recipient.parent_id.clone(),
            status: FriendshipStatus::Active,
            is_paused_by_parent1: false,
            is_paused_by_parent2: false,
            invitation_id: invitation.id.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Active status and no pause on either side
    pub fn is_active(&self) -> bool {
        self.status == FriendshipStatus::Active
            && !self.is_paused_by_parent1
            && !self.is_paused_by_parent2
    }

    /// Which side a parent is on, if any
    pub fn side_of(&self, parent_id: &RecordId) -> Option<FriendshipSide> {
        if &self.parent1_id == parent_id {
            Some(FriendshipSide::Parent1)
        } else if &self.parent2_id == parent_id {
            Some(FriendshipSide::Parent2)
        } else {
            None
        }
    }

    fn require_side(&self, parent_id: &RecordId) -> Result<FriendshipSide, DomainError> {
        self.side_of(parent_id)
            .ok_or(DomainError::NotFriendshipParent)
    }

    fn set_paused(&mut self, side: FriendshipSide, paused: bool, now: DateTime<Utc>) {
        match side {
            FriendshipSide::Parent1 => self.is_paused_by_parent1 = paused,
            FriendshipSide::Parent2 => self.is_paused_by_parent2 = paused,
        }
        self.updated_at = now;
    }

    /// Set the caller's pause flag
    pub fn pause(
        &mut self,
        parent_id: &RecordId,
        now: DateTime<Utc>,
    ) -> Result<FriendshipSide, DomainError> {
        let side = self.require_side(parent_id)?;
        self.set_paused(side, true, now);
        Ok(side)
    }

    /// Clear the caller's pause flag
    pub fn resume(
        &mut self,
        parent_id: &RecordId,
        now: DateTime<Utc>,
    ) -> Result<FriendshipSide, DomainError> {
        let side = self.require_side(parent_id)?;
        self.set_paused(side, false, now);
        Ok(side)
    }

    /// Block the friendship; pause flags are left as they are
    pub fn block(
        &mut self,
        parent_id: &RecordId,
        now: DateTime<Utc>,
    ) -> Result<FriendshipSide, DomainError> {
        let side = self.require_side(parent_id)?;
        self.status = FriendshipStatus::Blocked;
        self.updated_at = now;
        Ok(side)
    }

    pub fn involves_child(&self, child_id: &RecordId) -> bool {
        &self.child1_id == child_id || &self.child2_id == child_id
    }

    /// The other child's id, seen from `child_id`
    pub fn counterpart_of(&self, child_id: &RecordId) -> Option<&RecordId> {
        if &self.child1_id == child_id {
            Some(&self.child2_id)
        } else if &self.child2_id == child_id {
            Some(&self.child1_id)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> RecordId {
        RecordId::parse(s).unwrap()
    }

    fn friendship() -> Friendship {
        let now = Utc::now();
        Friendship {
            id: id("f1"),
            child1_id: id("childA"),
            child1_name: "Alex".into(),
            child2_id: id("childB"),
            child2_name: "Blair".into(),
            parent1_id: id("parentA"),
            parent2_id: id("parentB"),
            status: FriendshipStatus::Active,
            is_paused_by_parent1: false,
            is_paused_by_parent2: false,
            invitation_id: id("inv1"),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_pause_and_resume_own_side() {
        let mut f = friendship();
        let now = Utc::now();

        assert_eq!(f.pause(&id("parentB"), now).unwrap(), FriendshipSide::Parent2);
        assert!(f.is_paused_by_parent2);
        assert!(!f.is_paused_by_parent1);
        assert!(!f.is_active());

        f.resume(&id("parentB"), now).unwrap();
        assert!(f.is_active());
    }

    #[test]
    fn test_stranger_is_rejected() {
        let mut f = friendship();
        let now = Utc::now();
        let stranger = id("parentZ");

        assert!(matches!(
            f.pause(&stranger, now),
            Err(DomainError::NotFriendshipParent)
        ));
        assert!(matches!(
            f.block(&stranger, now),
            Err(DomainError::NotFriendshipParent)
        ));
        assert_eq!(f.status, FriendshipStatus::Active);
        assert!(f.is_active());
    }

    #[test]
    fn test_block_overrides_pause_flags() {
        let mut f = friendship();
        let now = Utc::now();

        f.pause(&id("parentA"), now).unwrap();
        f.block(&id("parentB"), now).unwrap();

        assert_eq!(f.status, FriendshipStatus::Blocked);
        assert!(f.is_paused_by_parent1);
        assert!(!f.is_active());

        f.resume(&id("parentA"), now).unwrap();
        assert!(!f.is_active());
    }

    #[test]
    fn test_counterpart() {
        let f = friendship();
        assert_eq!(f.counterpart_of(&id("childA")), Some(&id("childB")));
        assert_eq!(f.counterpart_of(&id("childB")), Some(&id("childA")));
        assert_eq!(f.counterpart_of(&id("childC")), None);
    }
}
