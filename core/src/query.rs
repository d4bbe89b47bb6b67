//! Query arguments for the listing endpoints.
//!
//! Arguments are kept in a `BTreeMap`, so the encoded query string always
//! lists keys in ascending order. The server does not care about order; the
//! request URLs built from it are deterministic.

use std::collections::BTreeMap;

use url::form_urlencoded;

/// Optional filter and paging parameters, serialized into a URL query string.
///
/// An empty set means "use the server defaults" and encodes to nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    params: BTreeMap<String, String>,
}

/// The empty argument set.
pub fn defaults() -> Arguments {
    Arguments::default()
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.params.insert(key.into(), value.into())
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn page(self, page: u32) -> Self {
        self.with("page", page.to_string())
    }

    pub fn per_page(self, per_page: u32) -> Self {
        self.with("per_page", per_page.to_string())
    }

    pub fn tag(self, tag: impl Into<String>) -> Self {
        self.with("tag", tag)
    }

    /// Comma-joined list of tags; articles must carry at least one of them.
    pub fn tags<I, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = tags
            .into_iter()
            .map(|t| t.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.with("tags", joined)
    }

    pub fn username(self, username: impl Into<String>) -> Self {
        self.with("username", username)
    }

    /// `fresh`, `rising` or `all`.
    pub fn state(self, state: impl Into<String>) -> Self {
        self.with("state", state)
    }

    /// Most popular articles of the last `days` days.
    pub fn top(self, days: u32) -> Self {
        self.with("top", days.to_string())
    }

    pub fn collection_id(self, id: u32) -> Self {
        self.with("collection_id", id.to_string())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Form-urlencode the arguments in ascending key order.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish()
    }
}

impl<K, V> FromIterator<(K, V)> for Arguments
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Arguments::new();
        for (k, v) in iter {
            args.insert(k, v);
        }
        args
    }
}

impl<K, V> Extend<(K, V)> for Arguments
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}
