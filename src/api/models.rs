use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub domain: String,
}

/// Mailbox descriptor returned on account creation. Unused beyond confirming
/// that creation succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountView {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sender {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
}

impl Sender {
    pub fn label(&self) -> &str {
        if !self.name.trim().is_empty() {
            self.name.trim()
        } else if !self.address.trim().is_empty() {
            self.address.trim()
        } else {
            "Unknown"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSummary {
    pub id: String,
    #[serde(default)]
    pub from: Option<Sender>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl MessageSummary {
    pub fn sender_label(&self) -> &str {
        self.from.as_ref().map(Sender::label).unwrap_or("Unknown")
    }

    pub fn subject_label(&self) -> &str {
        self.subject
            .as_deref()
            .map(str::trim)
            .filter(|subject| !subject.is_empty())
            .unwrap_or("(no subject)")
    }
}

/// Full message content, fetched lazily when a message is opened. The
/// provider returns the html body as a list of fragments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDetail {
    pub id: String,
    #[serde(default)]
    pub from: Option<Sender>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub html: Vec<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    Html(String),
    Text(String),
}

impl MessageDetail {
    pub fn sender_label(&self) -> &str {
        self.from.as_ref().map(Sender::label).unwrap_or("Unknown")
    }

    pub fn subject_label(&self) -> &str {
        self.subject
            .as_deref()
            .map(str::trim)
            .filter(|subject| !subject.is_empty())
            .unwrap_or("(no subject)")
    }

    /// HTML is preferred whenever any non-empty fragment is present;
    /// otherwise the plain-text body is used.
    pub fn body(&self) -> MessageBody {
        let html = self
            .html
            .iter()
            .map(String::as_str)
            .filter(|fragment| !fragment.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        if !html.is_empty() {
            return MessageBody::Html(html);
        }

        MessageBody::Text(
            self.text
                .as_deref()
                .filter(|text| !text.trim().is_empty())
                .unwrap_or("No content")
                .to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(html: Vec<&str>, text: Option<&str>) -> MessageDetail {
        MessageDetail {
            id: "m1".to_string(),
            from: None,
            subject: None,
            created_at: None,
            html: html.into_iter().map(str::to_string).collect(),
            text: text.map(str::to_string),
        }
    }

    #[test]
    fn prefers_html_when_present() {
        let body = detail(vec!["<p>hi</p>"], Some("plain")).body();
        assert_eq!(body, MessageBody::Html("<p>hi</p>".to_string()));
    }

    #[test]
    fn falls_back_to_text_when_html_fragments_are_blank() {
        let body = detail(vec!["  ", ""], Some("plain")).body();
        assert_eq!(body, MessageBody::Text("plain".to_string()));
    }

    #[test]
    fn empty_message_renders_placeholder_text() {
        let body = detail(vec![], None).body();
        assert_eq!(body, MessageBody::Text("No content".to_string()));
    }

    #[test]
    fn sender_label_prefers_name_over_address() {
        let sender = Sender {
            name: "Alice".to_string(),
            address: "alice@example.com".to_string(),
        };
        assert_eq!(sender.label(), "Alice");

        let bare = Sender {
            name: String::new(),
            address: "alice@example.com".to_string(),
        };
        assert_eq!(bare.label(), "alice@example.com");
    }
}
