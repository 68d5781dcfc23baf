use crate::core::errors::Result;
use crate::core::models::gitlab::{Branch, Commit, MergeRequest, Project};

/// Port for the project-scoped remote API.
///
/// Every listing hides pagination and returns the complete collection,
/// or fails as a whole.
pub trait RemoteSource {
    /// Look up a project by `group/project` path or numeric id.
    fn resolve_project(&self, path_or_id: &str) -> Result<Project>;

    fn list_commits(&self, project: &str) -> Result<Vec<Commit>>;

    fn list_branches(&self, project: &str) -> Result<Vec<Branch>>;

    /// Merge requests in every state.
    fn list_merge_requests(&self, project: &str) -> Result<Vec<MergeRequest>>;
}
