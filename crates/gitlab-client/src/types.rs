//! Request bodies sent to the GitLab API.

use serde::Serialize;

/// Body of `POST /projects/:id/issues`.
#[derive(Debug, Clone, Serialize)]
pub struct NewIssue<'a> {
    pub title: &'a str,
    pub description: &'a str,
}

/// Body of `POST /projects/:id/issues/:iid/notes`.
#[derive(Debug, Clone, Serialize)]
pub struct NewNote<'a> {
    pub body: &'a str,
}
