//! Git reference resolution

use git2::{Commit, Oid, Repository};

use crate::error::{Result, git_failed};

/// Resolve a git ref (branch, tag, or SHA) to a full SHA
///
/// If no ref is provided, defaults to HEAD, i.e. the remote's default branch
/// right after a clone.
pub fn resolve_ref(repo: &Repository, git_ref: Option<&str>) -> Result<String> {
    let commit = match git_ref {
        Some(r) => resolve_reference(repo, r)?,
        None => repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(|e| git_failed(format!("Could not resolve HEAD: {}", e.message())))?,
    };

    Ok(commit.id().to_string())
}

/// Resolve a reference name to a commit
fn resolve_reference<'a>(repo: &'a Repository, refname: &str) -> Result<Commit<'a>> {
    let ref_candidates = [
        refname.to_string(),
        format!("refs/heads/{refname}"),
        format!("refs/tags/{refname}"),
        format!("refs/remotes/origin/{refname}"),
    ];

    for candidate in &ref_candidates {
        if let Ok(reference) = repo.find_reference(candidate) {
            if let Ok(commit) = reference.peel_to_commit() {
                return Ok(commit);
            }
        }
    }

    if let Ok(oid) = Oid::from_str(refname) {
        if let Ok(commit) = repo.find_commit(oid) {
            return Ok(commit);
        }
    }

    if let Ok(obj) = repo.revparse_single(refname) {
        if let Ok(commit) = obj.peel_to_commit() {
            return Ok(commit);
        }
    }

    Err(git_failed(format!(
        "Could not resolve reference '{refname}'"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{commit_file, create_git_repo};

    #[test]
    fn test_resolve_ref_head() {
        let (_temp, repo) = create_git_repo();
        let commit = commit_file(&repo, "README.md", "hello", "Initial commit");

        let sha = resolve_ref(&repo, None).unwrap();
        assert_eq!(sha, commit.to_string());
    }

    #[test]
    fn test_resolve_ref_branch_and_tag() {
        let (_temp, repo) = create_git_repo();
        let first = commit_file(&repo, "a.txt", "a", "first");
        let head = repo.find_commit(first).unwrap();
        repo.branch("release", &head, false).unwrap();
        repo.tag_lightweight("v1.0", head.as_object(), false).unwrap();
        commit_file(&repo, "b.txt", "b", "second");

        assert_eq!(resolve_ref(&repo, Some("release")).unwrap(), first.to_string());
        assert_eq!(resolve_ref(&repo, Some("v1.0")).unwrap(), first.to_string());
        assert_eq!(
            resolve_ref(&repo, Some(&first.to_string())).unwrap(),
            first.to_string()
        );
    }

    #[test]
    fn test_resolve_ref_unknown() {
        let (_temp, repo) = create_git_repo();
        commit_file(&repo, "a.txt", "a", "first");

        let err = resolve_ref(&repo, Some("does-not-exist")).unwrap_err();
        assert!(err.to_string().contains("does-not-exist"));
    }
}
