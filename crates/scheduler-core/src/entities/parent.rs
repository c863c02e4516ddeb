//! Parent entity - the account holder who approves their children's friendships

use chrono::{DateTime, Utc};

use crate::value_objects::RecordId;

/// Parent entity. The id is the identity provider's subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parent {
    pub id: RecordId,
    pub email: String,
    pub parent_name: String,
    pub linked_children: Vec<RecordId>,
    /// Push token of the parent's device, if registered
    pub device_token: Option<String>,
    /// Badge count: pending approval requests addressed to this parent
    pub pending_approval_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Parent {
    pub fn new(id: RecordId, email: String, parent_name: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            email,
            parent_name,
            linked_children: Vec::new(),
            device_token: None,
            pending_approval_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Link a child profile, ignoring duplicates
    pub fn link_child(&mut self, child_id: RecordId, now: DateTime<Utc>) {
        if !self.linked_children.contains(&child_id) {
            self.linked_children.push(child_id);
            self.updated_at = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_child_once() {
        let now = Utc::now();
        let mut parent = Parent::new(
            RecordId::parse("p1").unwrap(),
            "pat@example.com".into(),
            "Pat".into(),
            now,
        );
        let child = RecordId::parse("c1").unwrap();

        parent.link_child(child.clone(), now);
        parent.link_child(child, now);
        assert_eq!(parent.linked_children.len(), 1);
    }
}
