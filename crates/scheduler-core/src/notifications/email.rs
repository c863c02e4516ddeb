//! Invitation email rendered when the sender's parent approves

use serde::Serialize;
use std::fmt::Write as _;

use super::MessageSettings;
use crate::entities::Invitation;
use crate::value_objects::RecordId;

/// Email inviting the recipient's family to connect
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationEmail {
    pub invitation_id: RecordId,
    pub from: String,
    pub to: String,
    pub subject: String,
    pub deep_link: String,
    pub text_body: String,
    pub html_body: String,
}

impl InvitationEmail {
    pub fn render(invitation: &Invitation, settings: &MessageSettings) -> Self {
        let sender = &invitation.sender;
        let app = &settings.app_name;
        let deep_link = format!(
            "{}/accept-invitation?code={}",
            settings.app_url.trim_end_matches('/'),
            invitation.id
        );

        let mut text = format!(
            "Hello!\n\n{child} wants to connect with your child on {app}!\n\n",
            child = sender.child_name,
        );
        if let Some(message) = &invitation.message {
            let _ = write!(text, "Message from {}:\n\"{message}\"\n\n", sender.child_name);
        }
        let _ = write!(
            text,
            "Parent contact:\n- Name: {}\n- Email: {}\n\n\
             To accept this invitation, sign up or log in to {app}:\n{deep_link}\n\n\
             This invitation will expire in {} days.\n",
            sender.parent_name, sender.parent_email, settings.invitation_ttl_days,
        );

        let child = escape_html(&sender.child_name);
        let mut html = format!(
            "<!DOCTYPE html>\n<html>\n<body>\n<h1>Friend Request!</h1>\n\
             <p>Hello!</p>\n<p><strong>{child}</strong> wants to connect with your child on {app}!</p>\n",
            app = escape_html(app),
        );
        if let Some(message) = &invitation.message {
            let _ = write!(
                html,
                "<blockquote><p><strong>Message from {child}:</strong></p><p><em>\"{}\"</em></p></blockquote>\n",
                escape_html(message)
            );
        }
        let _ = write!(
            html,
            "<p><strong>Parent Contact:</strong></p>\n<ul>\n<li>Name: {}</li>\n<li>Email: {}</li>\n</ul>\n\
             <p><a href=\"{}\">View Invitation</a></p>\n\
             <p><small>This invitation will expire in {} days.</small></p>\n</body>\n</html>\n",
            escape_html(&sender.parent_name),
            escape_html(&sender.parent_email),
            escape_html(&deep_link),
            settings.invitation_ttl_days,
        );

        Self {
            invitation_id: invitation.id.clone(),
            from: format!("{app} <noreply@{}>", host_of(&settings.app_url)),
            to: invitation.recipient_email.to_string(),
            subject: format!("{} wants to be friends on {app}!", sender.child_name),
            deep_link,
            text_body: text,
            html_body: html,
        }
    }
}

fn host_of(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    rest.split(['/', ':']).next().unwrap_or(rest)
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
