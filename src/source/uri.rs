//! Canonical source URIs
//!
//! A [`SourceUri`] is the single normalized location every legacy source
//! descriptor resolves to. It keeps the components separately (rather than
//! holding a `url::Url`) because local path references have no scheme and
//! because an absent path must stay distinguishable from `/` when deriving
//! archive names. Host and path keep the text they were written with; the
//! `url` crate only validates, so a URI prints back the way it came in.

use std::borrow::Cow;
use std::fmt;

use percent_encoding::{
    AsciiSet, CONTROLS, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode,
};
use url::Url;

use crate::error::{Result, invalid_url};

/// Placeholder shown instead of a password in logs and command output
const REDACTED_PASSWORD: &str = "xxxxx";

/// Bytes escaped in userinfo: everything but unreserved and sub-delims
const USERINFO: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=');

/// Bytes escaped when printing a path; existing `%xx` escapes pass through
const PATH: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>').add(b'`');

/// Literal filesystem paths only need `%` escaped to decode back unchanged
const LITERAL_PATH: &AsciiSet = &CONTROLS.add(b'%');

/// Userinfo credentials attached to a URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: Option<String>,
}

impl Credentials {
    /// Username and password pair; an empty password is kept as such
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Some(password.into()),
        }
    }
}

/// A fully split source location
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceUri {
    scheme: String,
    credentials: Option<Credentials>,
    host: String,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl SourceUri {
    /// Parse a generic URI or a scheme-less local path reference.
    pub fn parse(input: &str) -> Result<Self> {
        if input.chars().any(|c| c.is_ascii_control()) {
            return Err(invalid_url(input, "invalid control character in URL"));
        }

        match split_scheme(input)? {
            Some(scheme) if !is_drive_path(input, scheme) => Self::parse_absolute(input, scheme),
            _ => Self::parse_reference(input),
        }
    }

    /// A local filesystem location as produced by git URL parsing
    pub fn local(path: &str) -> Self {
        Self {
            scheme: "file".to_string(),
            path: utf8_percent_encode(path, LITERAL_PATH).to_string(),
            ..Self::default()
        }
    }

    fn parse_absolute(input: &str, scheme: &str) -> Result<Self> {
        let url = Url::parse(input).map_err(|e| invalid_url(input, e.to_string()))?;

        let rest = &input[scheme.len() + 1..];
        Ok(Self {
            scheme: url.scheme().to_string(),
            ..Self::split_components(input, rest)?
        })
    }

    fn parse_reference(input: &str) -> Result<Self> {
        let uri = Self::split_components(input, input)?;

        let first_segment = uri.path.split(['/', '\\']).next().unwrap_or_default();
        if !uri.has_host() && first_segment.contains(':') && !is_drive_segment(first_segment) {
            return Err(invalid_url(
                input,
                "first path segment in URL cannot contain colon",
            ));
        }
        Ok(uri)
    }

    /// Split what follows the scheme into authority, path, query and
    /// fragment, keeping each part as written.
    fn split_components(input: &str, rest: &str) -> Result<Self> {
        let (rest, fragment) = split_off(rest, '#');
        let (rest, query) = split_off(rest, '?');

        if !has_valid_escapes(rest) || !fragment.is_none_or(has_valid_escapes) {
            return Err(invalid_url(input, "invalid URL escape"));
        }

        let (credentials, host, path) = match rest.strip_prefix("//") {
            Some(authority_and_path) => {
                let (authority, path) = match authority_and_path.find('/') {
                    Some(pos) => authority_and_path.split_at(pos),
                    None => (authority_and_path, ""),
                };
                let (credentials, host) = split_userinfo(authority);
                (credentials, host, path)
            }
            None => (None, "", rest),
        };

        Ok(Self {
            scheme: String::new(),
            credentials,
            host: host.to_string(),
            path: path.to_string(),
            query: query.map(str::to_string),
            fragment: fragment.map(str::to_string),
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn has_host(&self) -> bool {
        !self.host.is_empty()
    }

    /// Path as written, percent escapes included
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path with percent escapes decoded, for use on the filesystem
    pub fn decoded_path(&self) -> Cow<'_, str> {
        percent_decode_str(&self.path).decode_utf8_lossy()
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Extension of the last path segment, including the dot
    pub fn extension(&self) -> &str {
        path_extension(&self.path)
    }

    /// Last non-empty path segment, decoded
    pub fn file_name(&self) -> Option<String> {
        self.path
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .map(decode)
    }

    #[must_use]
    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = Some(fragment.into());
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Copy of this URI without userinfo or fragment, suitable for handing
    /// to a transport that takes credentials and refs separately.
    #[must_use]
    pub fn transport_location(&self) -> Self {
        Self {
            credentials: None,
            fragment: None,
            ..self.clone()
        }
    }

    /// String form with the password masked
    pub fn redacted(&self) -> String {
        match &self.credentials {
            Some(Credentials {
                username,
                password: Some(_),
            }) => Self {
                credentials: Some(Credentials::new(username.clone(), REDACTED_PASSWORD)),
                ..self.clone()
            }
            .to_string(),
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for SourceUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.scheme.is_empty() {
            write!(f, "{}:", self.scheme)?;
        }

        let has_authority = !self.host.is_empty()
            || self.credentials.is_some()
            || (self.scheme == "file" && self.path.starts_with('/'));
        if has_authority {
            f.write_str("//")?;
            if let Some(credentials) = &self.credentials {
                write!(f, "{}", utf8_percent_encode(&credentials.username, USERINFO))?;
                if let Some(password) = &credentials.password {
                    write!(f, ":{}", utf8_percent_encode(password, USERINFO))?;
                }
                f.write_str("@")?;
            }
            f.write_str(&self.host)?;
            if !self.host.is_empty() && !self.path.is_empty() && !self.path.starts_with('/') {
                f.write_str("/")?;
            }
        }

        write!(f, "{}", utf8_percent_encode(&self.path, PATH))?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

/// Extension of the last segment of a slash-separated path, including the
/// dot, or an empty string when the segment has none.
pub fn path_extension(path: &str) -> &str {
    let segment_start = path.rfind('/').map_or(0, |pos| pos + 1);
    match path[segment_start..].rfind('.') {
        Some(dot) => &path[segment_start + dot..],
        None => "",
    }
}

/// Return the scheme when `input` starts with one (`scheme:`).
fn split_scheme(input: &str) -> Result<Option<&str>> {
    for (i, c) in input.char_indices() {
        match c {
            'a'..='z' | 'A'..='Z' => {}
            '0'..='9' | '+' | '-' | '.' if i > 0 => {}
            ':' if i == 0 => return Err(invalid_url(input, "missing protocol scheme")),
            ':' => return Ok(Some(&input[..i])),
            _ => return Ok(None),
        }
    }
    Ok(None)
}

/// `C:/dir` and `C:\dir` are Windows paths, not a `c` scheme
fn is_drive_path(input: &str, scheme: &str) -> bool {
    scheme.len() == 1
        && input[2..]
            .chars()
            .next()
            .is_none_or(|c| c == '/' || c == '\\')
}

fn is_drive_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(letter), Some(':'), None) if letter.is_ascii_alphabetic()
    )
}

fn split_off(input: &str, separator: char) -> (&str, Option<&str>) {
    match input.split_once(separator) {
        Some((head, tail)) => (head, Some(tail)),
        None => (input, None),
    }
}

fn split_userinfo(authority: &str) -> (Option<Credentials>, &str) {
    let Some((userinfo, host)) = authority.rsplit_once('@') else {
        return (None, authority);
    };
    let credentials = match userinfo.split_once(':') {
        Some((username, password)) => Credentials {
            username: decode(username),
            password: Some(decode(password)),
        },
        None => Credentials {
            username: decode(userinfo),
            password: None,
        },
    };
    (Some(credentials), host)
}

/// Every `%` must start a two-digit hex escape
fn has_valid_escapes(input: &str) -> bool {
    input.split('%').skip(1).all(|chunk| {
        chunk
            .get(..2)
            .is_some_and(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
    })
}

fn decode(input: &str) -> String {
    percent_decode_str(input).decode_utf8_lossy().into_owned()
}
