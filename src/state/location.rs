//! Shareable intake link

use url::Url;

/// The session's current shareable link.
///
/// Query updates replace the link in place; there is no history to push to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
}

impl Location {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        Url::parse(raw).map(Self::new)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Current query string without the leading `?`
    pub fn query(&self) -> Option<&str> {
        self.url.query()
    }

    /// Replace the query string, dropping it entirely when `query` is empty
    pub fn replace_query(&mut self, query: &str) {
        if query.is_empty() {
            self.url.set_query(None);
        } else {
            self.url.set_query(Some(query));
        }
    }

    /// Strip the query back to the bare link
    pub fn clear_query(&mut self) {
        self.url.set_query(None);
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_and_clear_query() {
        let mut location = Location::parse("http://localhost:3000/onboarding").unwrap();
        location.replace_query("fullName=Ada");
        assert_eq!(
            location.as_str(),
            "http://localhost:3000/onboarding?fullName=Ada"
        );
        location.replace_query("email=a%40b.io");
        assert_eq!(location.query(), Some("email=a%40b.io"));
        location.clear_query();
        assert_eq!(location.as_str(), "http://localhost:3000/onboarding");
    }

    #[test]
    fn test_empty_query_removes_question_mark() {
        let mut location = Location::parse("http://localhost:3000/onboarding?x=1").unwrap();
        location.replace_query("");
        assert_eq!(location.query(), None);
        assert!(!location.as_str().contains('?'));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Location::parse("not a link").is_err());
    }
}
