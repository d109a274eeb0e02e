//! Git authentication configuration
//!
//! This module handles:
//! - Offering credentials embedded in the source URL
//! - Setting up SSH authentication
//! - Setting up username/password authentication
//! - Credential helper integration
//!
//! URL credentials are offered once. After that, authentication falls back
//! to git's native credential system:
//! - SSH agent and keys from ~/.ssh/
//! - Git credential helpers
//! - Environment variables (`GIT_SSH_COMMAND`, etc.)

use git2::{Cred, CredentialType, Error, ErrorClass, RemoteCallbacks};

use crate::source::Credentials;

fn auth_failed(message: &str) -> Error {
    Error::new(git2::ErrorCode::Auth, ErrorClass::Http, message)
}

fn try_default_credentials() -> Option<Cred> {
    for username in &["git", "anonymous"] {
        if let Ok(cred) = Cred::userpass_plaintext(username, "") {
            return Some(cred);
        }
    }
    None
}

fn try_ssh_credentials(username: &str) -> std::result::Result<Cred, Error> {
    let home = dirs::home_dir().unwrap_or_default();
    let ssh_dir = home.join(".ssh");

    for key_name in &["id_ed25519", "id_rsa", "id_ecdsa"] {
        let private_key = ssh_dir.join(key_name);
        let public_key = ssh_dir.join(format!("{key_name}.pub"));

        if !private_key.exists() {
            continue;
        }

        let public_key_path = public_key.exists().then_some(public_key.as_path());

        if let Ok(cred) = Cred::ssh_key(username, public_key_path, &private_key, None) {
            return Ok(cred);
        }
    }

    Err(auth_failed("SSH key not found"))
}

fn try_user_pass_credentials(
    url: &str,
    username: Option<&str>,
) -> std::result::Result<Cred, Error> {
    let config = match git2::Config::open_default() {
        Ok(cfg) => cfg,
        Err(_) => git2::Config::new().map_err(|e| {
            Error::new(
                git2::ErrorCode::GenericError,
                ErrorClass::Config,
                format!("Failed to create default git config: {e}"),
            )
        })?,
    };

    if let Ok(cred) = Cred::credential_helper(&config, url, username) {
        return Ok(cred);
    }

    if let Some(username) = username {
        if let Ok(cred) = Cred::userpass_plaintext(username, "") {
            return Ok(cred);
        }
    }

    try_default_credentials().ok_or_else(|| auth_failed("authentication failed"))
}

/// Set up authentication callbacks for git operations
///
/// `credentials` come from the source URL userinfo. They are tried first
/// for username/password transports and name the SSH user when the URL
/// itself carries none.
pub fn setup_auth_callbacks(callbacks: &mut RemoteCallbacks<'_>, credentials: Option<Credentials>) {
    let mut offered = false;

    callbacks.credentials(move |url, username_from_url, allowed_types| {
        let username = username_from_url.or(credentials.as_ref().map(|c| c.username.as_str()));

        if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) && !offered {
            if let Some(creds) = &credentials {
                offered = true;
                return Cred::userpass_plaintext(
                    &creds.username,
                    creds.password.as_deref().unwrap_or_default(),
                );
            }
        }

        if allowed_types.contains(CredentialType::DEFAULT) {
            return Cred::default();
        }

        if allowed_types.contains(CredentialType::USERNAME) {
            if let Some(username) = username {
                return Cred::username(username);
            }
        }

        if allowed_types.contains(CredentialType::SSH_KEY) {
            return match username {
                Some(username) => {
                    Cred::ssh_key_from_agent(username).or_else(|_| try_ssh_credentials(username))
                }
                None => try_default_credentials().ok_or_else(|| auth_failed("authentication failed")),
            };
        }

        if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
            return try_user_pass_credentials(url, username);
        }

        Err(auth_failed("authentication failed"))
    });
}
