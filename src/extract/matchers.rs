//! Configurable class-keyword matchers
//!
//! Documentation sites tag their markup with wildly different class names, so
//! section detection works by case-insensitive substring search over the
//! `class` attribute. The keyword sets live here, separate from the traversal
//! logic, so the matching policy can be swapped without touching extraction.

/// Matches a CSS class attribute against a set of keywords
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keywords: Vec<String>,
}

impl KeywordMatcher {
    /// Creates a matcher from keyword substrings (stored lowercased)
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// True when any keyword occurs as a substring of the class attribute
    pub fn matches(&self, class_attr: &str) -> bool {
        let lower = class_attr.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k.as_str()))
    }
}

/// The per-field matchers used by the extraction pipeline
#[derive(Debug, Clone)]
pub struct MatcherSet {
    /// Sections documenting an API operation
    pub endpoint: KeywordMatcher,

    /// Sections documenting a data model
    pub schema: KeywordMatcher,

    /// Parameter blocks nested inside an endpoint section
    pub parameter: KeywordMatcher,

    /// Response blocks nested inside an endpoint section
    pub response: KeywordMatcher,

    /// Property blocks nested inside a schema section
    pub property: KeywordMatcher,

    /// Free-text description elements
    pub description: KeywordMatcher,
}

impl Default for MatcherSet {
    fn default() -> Self {
        Self {
            endpoint: KeywordMatcher::new(["endpoint", "api", "method", "operation"]),
            schema: KeywordMatcher::new(["schema", "model", "type", "object"]),
            parameter: KeywordMatcher::new(["parameter"]),
            response: KeywordMatcher::new(["response"]),
            property: KeywordMatcher::new(["property"]),
            description: KeywordMatcher::new(["description"]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_substring() {
        let matcher = KeywordMatcher::new(["endpoint", "api"]);
        assert!(matcher.matches("endpoint-get-users"));
        assert!(matcher.matches("rest-api-section"));
        assert!(!matcher.matches("sidebar"));
    }

    #[test]
    fn test_matches_case_insensitive() {
        let matcher = KeywordMatcher::new(["endpoint"]);
        assert!(matcher.matches("EndPoint"));
        assert!(matcher.matches("API-ENDPOINT"));
    }

    #[test]
    fn test_empty_class_never_matches() {
        let matcher = KeywordMatcher::new(["endpoint"]);
        assert!(!matcher.matches(""));
    }

    #[test]
    fn test_default_set_covers_common_keywords() {
        let set = MatcherSet::default();
        for class in ["endpoint", "api", "method", "operation"] {
            assert!(set.endpoint.matches(class));
        }
        for class in ["schema", "model", "type", "object"] {
            assert!(set.schema.matches(class));
        }
        assert!(set.parameter.matches("parameters-table"));
        assert!(set.response.matches("responses"));
        assert!(set.property.matches("property-row"));
        assert!(set.description.matches("method-description"));
    }
}
