use serde::Deserialize;

/// The parts of `GET /projects/:id` the collector needs.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub id: u64,
    #[serde(default)]
    pub path_with_namespace: Option<String>,
}

/// An item of `GET /projects/:id/repository/commits`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Commit {
    pub id: Option<String>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub created_at: Option<String>,
    pub committed_date: Option<String>,
    pub message: Option<String>,
    pub web_url: Option<String>,
}

/// An item of `GET /projects/:id/repository/branches`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Branch {
    pub name: Option<String>,
    pub web_url: Option<String>,
    pub commit: Option<BranchCommit>,
}

/// The tip commit embedded in a branch listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BranchCommit {
    pub id: Option<String>,
    pub committed_date: Option<String>,
    pub message: Option<String>,
}

/// An item of `GET /projects/:id/merge_requests`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MergeRequest {
    pub state: Option<String>,
    pub author: Option<MergeRequestAuthor>,
    pub updated_at: Option<String>,
    pub source_branch: Option<String>,
    pub target_branch: Option<String>,
    pub sha: Option<String>,
    pub title: Option<String>,
    pub web_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MergeRequestAuthor {
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_tolerates_missing_and_null_fields() {
        let json = r#"{"id": "abc123", "author_name": null, "message": "init"}"#;
        let commit: Commit = serde_json::from_str(json).unwrap();
        assert_eq!(commit.id.as_deref(), Some("abc123"));
        assert!(commit.author_name.is_none());
        assert!(commit.created_at.is_none());
    }

    #[test]
    fn branch_deserializes_tip_commit() {
        let json = r#"{
            "name": "main",
            "web_url": "https://gitlab.example.com/g/p/-/tree/main",
            "commit": {"id": "f00d", "committed_date": "2025-10-01T12:00:00.000+02:00", "message": "tip"}
        }"#;
        let branch: Branch = serde_json::from_str(json).unwrap();
        let tip = branch.commit.unwrap();
        assert_eq!(branch.name.as_deref(), Some("main"));
        assert_eq!(tip.id.as_deref(), Some("f00d"));
    }

    #[test]
    fn merge_request_deserializes_author() {
        let json = r#"{"state": "merged", "author": {"name": "Dana", "username": "dana"},
                       "source_branch": "feat", "target_branch": "main"}"#;
        let mr: MergeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(mr.state.as_deref(), Some("merged"));
        assert_eq!(mr.author.unwrap().name.as_deref(), Some("Dana"));
    }

    #[test]
    fn project_requires_numeric_id() {
        let project: Project =
            serde_json::from_str(r#"{"id": 42, "path_with_namespace": "g/p"}"#).unwrap();
        assert_eq!(project.id, 42);
        assert!(serde_json::from_str::<Project>(r#"{"name": "p"}"#).is_err());
    }
}
