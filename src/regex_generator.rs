use crate::helpers::normalise_path;
use crate::types::RouteParams;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PARAM_TOKEN: Regex = Regex::new(r"\{([^}]+)\}/").unwrap();
    static ref PLACEHOLDER: Regex = Regex::new(r"\{[^}]+\}").unwrap();
}

const REQUIRED_CAPTURE: &str = "([^/]+)/";
const OPTIONAL_CAPTURE: &str = "([^/]*)(?:/?)";
const OPTIONAL_MARKER: char = '?';

/// A compiled route pattern: an anchored regex over the normalised request path plus the parameter names in the
/// order of their capture groups.
#[derive(Debug)]
pub(crate) struct ParamMatcher {
    regex: Regex,
    names: Vec<String>,
}

impl ParamMatcher {
    /// Applies the matcher to an already normalised path.
    pub(crate) fn captures(&self, target_path: &str) -> Option<RouteParams> {
        let caps = self.regex.captures(target_path)?;

        // Group 0 is the whole path, a matcher without any parameter group never matches.
        if caps.len() < 2 {
            return None;
        }

        let mut values: Vec<Option<String>> = caps
            .iter()
            .skip(1)
            .map(|group| group.map(|m| m.as_str()).filter(|val| !val.is_empty()).map(str::to_owned))
            .collect();

        if values.len() < self.names.len() {
            values.resize(self.names.len(), None);
        }

        let mut params = RouteParams::with_capacity(self.names.len());
        for (name, val) in self.names.iter().zip(values) {
            params.set(name.clone(), val);
        }

        Some(params)
    }

    pub(crate) fn names(&self) -> &[String] {
        &self.names
    }
}

/// Rewrites a normalised route pattern into regex source, replacing every `{name}/` token with a required capture and
/// every `{name?}/` token with an optional one. Literal text is escaped.
pub(crate) fn translate_pattern(normalised: &str) -> (String, Vec<String>) {
    let mut source = String::with_capacity(normalised.len() * 2);
    let mut names = Vec::new();
    let mut last_end = 0;

    for caps in PARAM_TOKEN.captures_iter(normalised) {
        let (whole, token) = match (caps.get(0), caps.get(1)) {
            (Some(whole), Some(token)) => (whole, token.as_str()),
            _ => continue,
        };

        source.push_str(&regex::escape(&normalised[last_end..whole.start()]));
        if token.ends_with(OPTIONAL_MARKER) {
            source.push_str(OPTIONAL_CAPTURE);
        } else {
            source.push_str(REQUIRED_CAPTURE);
        }

        names.push(token.trim_end_matches(OPTIONAL_MARKER).to_owned());
        last_end = whole.end();
    }

    source.push_str(&regex::escape(&normalised[last_end..]));

    (source, names)
}

/// Compiles a raw route path into a [`ParamMatcher`].
///
/// Returns `Ok(None)` when the translated source holds neither a `+` nor a `*`. Only the capture templates put those
/// characters there, so a path without any `{...}` token (and without a literal `+`/`*`) is never given a matcher and
/// can only match through exact equality.
pub(crate) fn generate_param_match_regex(path: &str) -> Result<Option<ParamMatcher>, regex::Error> {
    let (source, names) = translate_pattern(&normalise_path(path));

    // FIXME: drop this quantifier check once token-free paths are meant to match after normalisation.
    if !source.contains('+') && !source.contains('*') {
        return Ok(None);
    }

    let regex = Regex::new(&format!("^{}$", source))?;

    Ok(Some(ParamMatcher { regex, names }))
}

/// Removes every `{...}` placeholder left in a path.
pub(crate) fn strip_placeholders(path: &str) -> String {
    PLACEHOLDER.replace_all(path, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_translate_required_and_optional_tokens() {
        let (source, names) = translate_pattern("/users/{id}/posts/{page?}/");
        assert_eq!(source, "/users/([^/]+)/posts/([^/]*)(?:/?)");
        assert_eq!(names, vec!["id".to_owned(), "page".to_owned()]);
    }

    #[test]
    fn should_escape_literal_segments() {
        let (source, names) = translate_pattern("/files/v1.0/{name}/");
        assert_eq!(source, r"/files/v1\.0/([^/]+)/");
        assert_eq!(names, vec!["name".to_owned()]);
    }

    #[test]
    fn should_not_generate_matcher_without_tokens() {
        assert!(generate_param_match_regex("/about").unwrap().is_none());
        assert!(generate_param_match_regex("/").unwrap().is_none());
    }

    #[test]
    fn should_generate_matcher_with_tokens() {
        let matcher = generate_param_match_regex("/users/{id}").unwrap().unwrap();
        assert_eq!(matcher.names(), &["id".to_owned()]);

        let params = matcher.captures("/users/42/").unwrap();
        assert_eq!(params.get("id"), Some("42"));
        assert!(matcher.captures("/users/42/edit/").is_none());
        assert!(matcher.captures("/users/").is_none());
    }

    #[test]
    fn should_mark_empty_optional_capture_as_absent() {
        let matcher = generate_param_match_regex("/users/{id?}").unwrap().unwrap();

        let params = matcher.captures("/users/").unwrap();
        assert!(params.contains("id"));
        assert_eq!(params.get("id"), None);

        let params = matcher.captures("/users/7/").unwrap();
        assert_eq!(params.get("id"), Some("7"));
    }

    #[test]
    fn should_keep_positions_with_mixed_tokens() {
        let matcher = generate_param_match_regex("/a/{x?}/b/{y}").unwrap().unwrap();

        let params = matcher.captures("/a/b/3/").unwrap();
        assert_eq!(params.get("x"), None);
        assert_eq!(params.get("y"), Some("3"));

        let params = matcher.captures("/a/1/b/3/").unwrap();
        assert_eq!(params.get("x"), Some("1"));
        assert_eq!(params.get("y"), Some("3"));
    }

    #[test]
    fn should_never_match_quantified_literal_without_groups() {
        let matcher = generate_param_match_regex("/c++").unwrap().unwrap();
        assert!(matcher.names().is_empty());
        assert!(matcher.captures("/c++/").is_none());
    }

    #[test]
    fn should_strip_placeholders() {
        assert_eq!(strip_placeholders("/users/{id}/profile"), "/users//profile");
        assert_eq!(strip_placeholders("/posts/{page?}"), "/posts/");
        assert_eq!(strip_placeholders("/about"), "/about");
    }
}
