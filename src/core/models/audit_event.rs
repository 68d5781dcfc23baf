/// Where an audit event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSource {
    RemoteCommit,
    RemoteBranch,
    RemoteMergeRequest,
    LocalCommit,
    LocalReflogEntry,
}

impl EventSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventSource::RemoteCommit => "remote-commit",
            EventSource::RemoteBranch => "remote-branch",
            EventSource::RemoteMergeRequest => "remote-merge-request",
            EventSource::LocalCommit => "local-commit",
            EventSource::LocalReflogEntry => "local-reflog-entry",
        }
    }
}

impl std::fmt::Display for EventSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column names in canonical order.
pub const FIELD_NAMES: [&str; 9] = [
    "source",
    "action_type",
    "user_name",
    "user_email",
    "timestamp",
    "ref",
    "commit_sha",
    "message",
    "url",
];

/// One row of the audit report, whatever its origin.
///
/// Unknown values are empty strings, so every event always carries all
/// nine fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    pub source: EventSource,
    pub action_type: String,
    pub user_name: String,
    pub user_email: String,
    pub timestamp: String,
    pub reference: String,
    pub commit_sha: String,
    pub message: String,
    pub url: String,
}

impl AuditEvent {
    /// Start an event with only its source and action filled in.
    pub fn new(source: EventSource, action_type: impl Into<String>) -> Self {
        Self {
            source,
            action_type: action_type.into(),
            user_name: String::new(),
            user_email: String::new(),
            timestamp: String::new(),
            reference: String::new(),
            commit_sha: String::new(),
            message: String::new(),
            url: String::new(),
        }
    }

    pub fn with_user(mut self, name: Option<&str>, email: Option<&str>) -> Self {
        self.user_name = name.unwrap_or_default().to_string();
        self.user_email = email.unwrap_or_default().to_string();
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    pub fn with_ref(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn with_commit(mut self, sha: Option<&str>) -> Self {
        self.commit_sha = sha.unwrap_or_default().to_string();
        self
    }

    /// Set the message, collapsing line breaks into single spaces.
    pub fn with_message(mut self, message: Option<&str>) -> Self {
        self.message = collapse_newlines(message.unwrap_or_default());
        self
    }

    pub fn with_url(mut self, url: Option<&str>) -> Self {
        self.url = url.unwrap_or_default().to_string();
        self
    }

    /// `(name, value)` pairs in canonical field order.
    pub fn fields(&self) -> [(&'static str, &str); 9] {
        [
            (FIELD_NAMES[0], self.source.as_str()),
            (FIELD_NAMES[1], &self.action_type),
            (FIELD_NAMES[2], &self.user_name),
            (FIELD_NAMES[3], &self.user_email),
            (FIELD_NAMES[4], &self.timestamp),
            (FIELD_NAMES[5], &self.reference),
            (FIELD_NAMES[6], &self.commit_sha),
            (FIELD_NAMES[7], &self.message),
            (FIELD_NAMES[8], &self.url),
        ]
    }

    /// Look up a field value by column name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields()
            .into_iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }
}

fn collapse_newlines(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
