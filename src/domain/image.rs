//! Leading inline image convention.
//!
//! Note content may start with one markdown image token, `![alt](url)`,
//! optionally preceded by whitespace and followed by whitespace and a single
//! newline. The editor shows that token as a preview and the rest as text;
//! list views show the image as a thumbnail next to the title and strip the
//! token from the content preview. Image markdown anywhere else in the content
//! is ordinary text.

use regex::Regex;
use std::sync::LazyLock;

/// Alt text used when a new image is attached.
pub const DEFAULT_ALT: &str = "image";

static LEADING_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(!\[[^\]]*\]\(([^)]+)\))\s*\n?").expect("leading image pattern is valid")
});

static ANY_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("image pattern is valid")
});

/// Content split into its optional leading image token and the remaining text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadingImage<'a> {
    /// The `![alt](url)` token, without surrounding whitespace.
    pub token: Option<&'a str>,
    /// The URL inside the token.
    pub url: Option<&'a str>,
    /// Everything after the token (or the whole content when there is none).
    pub text: &'a str,
}

/// Splits content into the leading image token and the remaining text.
///
/// # Examples
///
/// ```
/// use jot::domain::image::split_leading_image;
///
/// let split = split_leading_image("![x](data:abc)\nHello");
/// assert_eq!(split.token, Some("![x](data:abc)"));
/// assert_eq!(split.text, "Hello");
///
/// let split = split_leading_image("Hello ![x](abc)");
/// assert_eq!(split.token, None);
/// assert_eq!(split.text, "Hello ![x](abc)");
/// ```
pub fn split_leading_image(content: &str) -> LeadingImage<'_> {
    match LEADING_IMAGE.captures(content) {
        Some(caps) => {
            let whole = caps.get(0).map_or(0, |m| m.end());
            LeadingImage {
                token: caps.get(1).map(|m| m.as_str()),
                url: caps.get(2).map(|m| m.as_str()),
                text: &content[whole..],
            }
        }
        None => LeadingImage {
            token: None,
            url: None,
            text: content,
        },
    }
}

/// Returns the URL of the leading image, if any.
pub fn leading_image_url(content: &str) -> Option<&str> {
    split_leading_image(content).url
}

/// Returns the content with the leading image token removed.
pub fn strip_leading_image(content: &str) -> &str {
    split_leading_image(content).text
}

/// Returns `content` with its leading image replaced by (or prepended with) an
/// image pointing at `url`. The remaining text is kept unchanged.
pub fn with_image(content: &str, url: &str) -> String {
    let text = strip_leading_image(content);
    format!("![{DEFAULT_ALT}]({url})\n{text}")
}

/// Returns `content` with the text after the leading image replaced by `text`.
/// The leading image token, if any, is kept.
pub fn with_text(content: &str, text: &str) -> String {
    match split_leading_image(content).token {
        Some(token) => format!("{token}\n{text}"),
        None => text.to_string(),
    }
}

/// An image reference found anywhere in content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageRef<'a> {
    pub alt: &'a str,
    pub url: &'a str,
}

/// Returns every `![alt](url)` reference in the content, in order.
pub fn image_refs(content: &str) -> Vec<ImageRef<'_>> {
    ANY_IMAGE
        .captures_iter(content)
        .filter_map(|caps| {
            Some(ImageRef {
                alt: caps.get(1)?.as_str(),
                url: caps.get(2)?.as_str(),
            })
        })
        .collect()
}
