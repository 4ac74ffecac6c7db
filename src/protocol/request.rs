use serde::Serialize;

/// Submission payload for `save_chat_request`.
///
/// `from_username` and `to_username` are non-empty at submission time by
/// contract: both come from configuration, not free-form input.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChatMessageRequest {
    pub to_username: String,
    pub from_username: String,
    pub text: String,
    pub sticker: Option<String>,
    pub media_url: Option<String>,
}

/// The form state a submission is built from: bound usernames, the
/// input's current text, and any attached file references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeForm {
    pub to_username: String,
    pub from_username: String,
    pub text: String,
    pub attachments: Vec<String>,
}

impl ChatMessageRequest {
    /// Builds the request from form state. The sticker and media fields
    /// default to empty and are both populated from the first attached
    /// file reference when one is present.
    pub fn from_form(form: &ComposeForm) -> Self {
        let file_ref = form.attachments.first().cloned();

        Self {
            to_username: form.to_username.clone(),
            from_username: form.from_username.clone(),
            text: form.text.clone(),
            sticker: file_ref.clone(),
            media_url: file_ref,
        }
    }
}
