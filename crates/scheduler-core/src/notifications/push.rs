//! Push notification payloads
//!
//! The `data` map carries a `type` discriminator plus the identifiers the
//! app needs to open the right record.

use serde::Serialize;

use crate::entities::ApprovalRequestType;
use crate::value_objects::RecordId;

/// An approval request is waiting for a parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalNotice {
    pub parent_id: RecordId,
    pub device_token: Option<String>,
    pub request_id: RecordId,
    pub request_type: ApprovalRequestType,
    pub child_name: String,
    pub other_child_name: Option<String>,
    /// Pending request count to show on the app icon
    pub badge: i64,
}

/// A child of this parent has a new friend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendshipNotice {
    pub parent_id: RecordId,
    pub device_token: Option<String>,
    pub child_id: RecordId,
    pub friend_name: String,
    pub invitation_id: RecordId,
    pub friendship_id: RecordId,
}

/// Push message as published to the delivery channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushNotification {
    pub parent_id: RecordId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<i64>,
    pub data: PushData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PushData {
    #[serde(rename_all = "camelCase")]
    ParentApproval {
        request_id: RecordId,
        request_type: ApprovalRequestType,
        child_name: String,
        other_child_name: String,
    },
    #[serde(rename_all = "camelCase")]
    FriendshipApproved {
        invitation_id: RecordId,
        friendship_id: RecordId,
    },
}

const UNKNOWN_FRIEND: &str = "a new friend";

impl ApprovalNotice {
    pub fn to_push(&self) -> PushNotification {
        let other = self.other_child_name.as_deref().unwrap_or(UNKNOWN_FRIEND);
        let (title, body) = match self.request_type {
            ApprovalRequestType::Outgoing => (
                "Approval Needed",
                format!("{} wants to invite {other} to be friends", self.child_name),
            ),
            ApprovalRequestType::Incoming => (
                "New Friend Request",
                format!("{other} wants to be friends with {}", self.child_name),
            ),
        };

        PushNotification {
            parent_id: self.parent_id.clone(),
            token: self.device_token.clone(),
            title: title.to_string(),
            body,
            badge: Some(self.badge),
            data: PushData::ParentApproval {
                request_id: self.request_id.clone(),
                request_type: self.request_type,
                child_name: self.child_name.clone(),
                other_child_name: other.to_string(),
            },
        }
    }
}

impl FriendshipNotice {
    pub fn to_push(&self) -> PushNotification {
        PushNotification {
            parent_id: self.parent_id.clone(),
            token: self.device_token.clone(),
            title: "New Friend! 🎉".to_string(),
            body: format!("You're now friends with {}! 🎉", self.friend_name),
            badge: None,
            data: PushData::FriendshipApproved {
                invitation_id: self.invitation_id.clone(),
                friendship_id: self.friendship_id.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id(s: &str) -> RecordId {
        RecordId::parse(s).unwrap()
    }

    #[test]
    fn test_outgoing_approval_push() {
        let notice = ApprovalNotice {
            parent_id: id("parentA"),
            device_token: Some("tok".into()),
            request_id: id("req1"),
            request_type: ApprovalRequestType::Outgoing,
            child_name: "Alex".into(),
            other_child_name: None,
            badge: 2,
        };
        let push = notice.to_push();

        assert_eq!(push.title, "Approval Needed");
        assert_eq!(push.body, "Alex wants to invite a new friend to be friends");
        assert_eq!(
            serde_json::to_value(&push.data).unwrap(),
            json!({
                "type": "parent_approval",
                "requestId": "req1",
                "requestType": "outgoing",
                "childName": "Alex",
                "otherChildName": "a new friend",
            })
        );
    }

    #[test]
    fn test_incoming_approval_push() {
        let notice = ApprovalNotice {
            parent_id: id("parentB"),
            device_token: None,
            request_id: id("req2"),
            request_type: ApprovalRequestType::Incoming,
            child_name: "Blair".into(),
            other_child_name: Some("Alex".into()),
            badge: 1,
        };
        let push = notice.to_push();

        assert_eq!(push.title, "New Friend Request");
        assert_eq!(push.body, "Alex wants to be friends with Blair");
        let value = serde_json::to_value(&push).unwrap();
        assert!(value.get("token").is_none());
        assert_eq!(value["badge"], 1);
    }

    #[test]
    fn test_friendship_push() {
        let notice = FriendshipNotice {
            parent_id: id("parentA"),
            device_token: Some("tok".into()),
            child_id: id("childA"),
            friend_name: "Blair".into(),
            invitation_id: id("inv1"),
            friendship_id: id("f1"),
        };
        let value = serde_json::to_value(notice.to_push()).unwrap();

        assert_eq!(value["title"], "New Friend! 🎉");
        assert_eq!(value["body"], "You're now friends with Blair! 🎉");
        assert_eq!(value["data"]["type"], "friendship_approved");
        assert_eq!(value["data"]["invitationId"], "inv1");
    }
}
