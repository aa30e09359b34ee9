//! Allow-list cleaning of administrator-authored ad markup.
//!
//! `script` and `iframe` are allowed on purpose: the slots host third-party ad
//! network snippets. The cleaner only removes tags and attributes nobody asked
//! for (inline handlers, `object`, `embed`, ...). It is not a boundary against a
//! malicious administrator.
//!
//! The parser keeps the children of a few elements as raw text. Inline `script`
//! text is passed through untouched since that is what ad tags consist of.
//! Anything written inside an `iframe` is dropped: browsers never render it, and
//! the cleaner cannot see the tags hidden in it.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

pub const DEFAULT_ALLOWED_TAGS: [&str; 6] = ["div", "span", "img", "a", "iframe", "script"];

pub const DEFAULT_ALLOWED_ATTRIBUTES: [&str; 10] = [
    "src",
    "href",
    "alt",
    "class",
    "id",
    "style",
    "width",
    "height",
    "frameborder",
    "async",
];

/// Tags whose text is dropped along with the element when they are not allowed.
const CONTENT_STRIPPED_TAGS: [&str; 2] = ["script", "style"];

/// Elements serialized with raw-text children.
const RAW_TEXT_TAGS: [&str; 7] = [
    "script",
    "style",
    "xmp",
    "iframe",
    "noembed",
    "noframes",
    "plaintext",
];

/// Allow-list configuration for ad markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdMarkupPolicy {
    pub allowed_tags: BTreeSet<String>,
    pub allowed_attributes: BTreeSet<String>,
    pub allow_data_attributes: bool,
}

impl AdMarkupPolicy {
    pub fn new<T, A>(tags: T, attributes: A) -> Self
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        Self {
            allowed_tags: normalize_names(tags),
            allowed_attributes: normalize_names(attributes),
            allow_data_attributes: true,
        }
    }

    pub fn with_data_attributes(mut self, allowed: bool) -> Self {
        self.allow_data_attributes = allowed;
        self
    }
}

impl Default for AdMarkupPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_TAGS, DEFAULT_ALLOWED_ATTRIBUTES)
    }
}

fn normalize_names<I>(names: I) -> BTreeSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| name.as_ref().trim().to_ascii_lowercase())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Stateless cleaner applying an [`AdMarkupPolicy`].
#[derive(Debug, Clone, Default)]
pub struct AdContentSanitizer {
    policy: AdMarkupPolicy,
}

impl AdContentSanitizer {
    pub fn new(policy: AdMarkupPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &AdMarkupPolicy {
        &self.policy
    }

    /// Strip everything outside the allow-list. Never fails.
    pub fn sanitize(&self, raw_markup: &str) -> String {
        if raw_markup.trim().is_empty() {
            return String::new();
        }

        let cleaned = self.builder().clean(raw_markup).to_string();
        drop_iframe_text(&cleaned)
    }

    fn builder(&self) -> ammonia::Builder<'_> {
        let tags: HashSet<&str> = self
            .policy
            .allowed_tags
            .iter()
            .map(String::as_str)
            .collect();
        let attributes: HashSet<&str> = self
            .policy
            .allowed_attributes
            .iter()
            .map(String::as_str)
            .collect();
        // ammonia refuses a tag that is both allowed and content-stripped.
        let content_stripped: HashSet<&str> = CONTENT_STRIPPED_TAGS
            .into_iter()
            .filter(|tag| !tags.contains(tag))
            .collect();

        let mut builder = ammonia::Builder::default();
        builder
            .tags(tags)
            .tag_attributes(HashMap::new())
            .generic_attributes(attributes)
            .clean_content_tags(content_stripped)
            .link_rel(None)
            .strip_comments(true);
        if self.policy.allow_data_attributes {
            builder.generic_attribute_prefixes(HashSet::from(["data-"]));
        }
        builder
    }
}

/// Empty every `iframe` in cleaned markup, copying other raw-text bodies verbatim.
///
/// Works on serializer output only: text there has `<` escaped and attribute
/// values are always double-quoted, so every literal `<` opens a tag.
fn drop_iframe_text(cleaned: &str) -> String {
    let mut output = String::with_capacity(cleaned.len());
    let mut rest = cleaned;

    while let Some(open) = rest.find('<') {
        output.push_str(&rest[..open]);
        rest = &rest[open..];

        let Some(tag_len) = tag_len(rest) else {
            break;
        };
        let (tag, after) = rest.split_at(tag_len);
        output.push_str(tag);
        rest = after;

        if let Some(name) = start_tag_name(tag).filter(|name| RAW_TEXT_TAGS.contains(name)) {
            let body_len = rest.find(&format!("</{name}>")).unwrap_or(rest.len());
            if name != "iframe" {
                output.push_str(&rest[..body_len]);
            }
            rest = &rest[body_len..];
        }
    }

    output.push_str(rest);
    output
}

/// Length of the tag at the start of `markup`, up to and including its `>`.
fn tag_len(markup: &str) -> Option<usize> {
    let mut quoted = false;
    for (index, byte) in markup.bytes().enumerate() {
        match byte {
            b'"' => quoted = !quoted,
            b'>' if !quoted => return Some(index + 1),
            _ => {}
        }
    }
    None
}

fn start_tag_name(tag: &str) -> Option<&str> {
    let name = tag.strip_prefix('<')?;
    let len = name
        .bytes()
        .take_while(|byte| byte.is_ascii_alphanumeric())
        .count();
    (len > 0).then(|| &name[..len])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_names_are_normalized() {
        let policy = AdMarkupPolicy::new([" DIV ", "span", ""], ["SRC"]);

        assert_eq!(
            policy.allowed_tags.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["div", "span"]
        );
        assert!(policy.allowed_attributes.contains("src"));
        assert!(policy.allow_data_attributes);
    }

    #[test]
    fn blank_input_yields_empty_output() {
        let sanitizer = AdContentSanitizer::default();

        assert_eq!(sanitizer.sanitize(""), "");
        assert_eq!(sanitizer.sanitize("   \n"), "");
    }

    #[test]
    fn iframe_bodies_are_emptied() {
        assert_eq!(
            drop_iframe_text(r#"<iframe src="a" width="1"><object data=x></object></iframe><span>b</span>"#),
            r#"<iframe src="a" width="1"></iframe><span>b</span>"#
        );
    }

    #[test]
    fn raw_text_that_mentions_an_iframe_is_left_alone() {
        let script = r#"<script>document.write("<iframe>x</iframe>")</script><img alt="a>b" src="c">"#;

        assert_eq!(drop_iframe_text(script), script);
    }
}
