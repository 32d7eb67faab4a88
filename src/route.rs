use std::{fmt::Display, str::FromStr};

use percent_encoding::{
    AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode,
};

use crate::error::IiError;

/// Characters left as-is in a path segment, the same set `encodeURIComponent` keeps.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Search,

    /// `/company/{name}`
    Company(String),
}

impl Route {
    /// Matches a path against the route table; query strings and fragments are ignored.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Some(Route::Search),
            ["company", name] => {
                let name = decode_segment(name);
                if name.trim().is_empty() {
                    None
                } else {
                    Some(Route::Company(name))
                }
            }
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Search => "/".to_string(),
            Route::Company(name) => format!(
                "/company/{}",
                utf8_percent_encode(name, SEGMENT)
            ),
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

impl FromStr for Route {
    type Err = IiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s).ok_or_else(|| IiError::NotExists {
            code: "ROUTE_NOT_EXISTS",
            message: format!("No page at '{s}'"),
        })
    }
}

fn decode_segment(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}
