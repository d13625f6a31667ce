//! Pattern dispatch table.
//!
//! Every content classification the feed understands is one [`PatternKind`];
//! each kind owns one compiled regex and one capture rule.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// Tag body: anything up to whitespace, another `#`, markup or punctuation.
const TAG_BODY: &str = r#"[^\s#<>,;!?()\[\]{}"']+"#;

static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\s#({TAG_BODY})")).expect("valid tag regex"));
static LEADING_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?m)^#({TAG_BODY})")).expect("valid leading tag regex"));
static BREAK_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(<p>|<br>)#({TAG_BODY})")).expect("valid break tag regex")
});
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:https?|ftp)://[^\s<>\\*']+").expect("valid link regex"));
static IMAGE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([^\s<>\\*'()\[\]|]+\.(?:jpeg|jpg|gif|png|svg|webp))\b(?:\]\])?(?:\))?")
        .expect("valid image url regex")
});
static WEB_IMAGE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(https?://[^\s<>\\*'()]+\.(?:jpeg|jpg|gif|png|svg|webp))(?:\]\])?(?:\))?")
        .expect("valid web image url regex")
});
static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]*)\)").expect("valid markdown image regex"));
static MARKDOWN_WEB_IMAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)!\[[^\]]*\]\((https?://[^\s<>\\*')]+)\)").expect("valid web image regex")
});
static WIKI_EMBED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[\[([^\]|]+?)(?:\|([^\]]*))?\]\]").expect("valid wiki regex"));
static MEMO_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[@([^\]]+?)\]\(([^)\s]+?)\)").expect("valid memo link regex"));

/// One content pattern the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// `#tag` preceded by whitespace.
    Tag,
    /// `#tag` at the start of a line.
    LeadingTag,
    /// `#tag` directly after a `<br>`/`<p>` marker.
    BreakTag,
    /// Any `http(s)`/`ftp` URL.
    Link,
    /// Any path or URL ending in an image extension, embeds included.
    ImageUrl,
    /// `http(s)` URL ending in an image extension; a subset of `ImageUrl`.
    WebImageUrl,
    /// `![alt](target)` with any target.
    MarkdownImage,
    /// `![alt](http(s)://...)`.
    MarkdownWebImage,
    /// `![[name|alt]]`.
    WikiEmbed,
    /// `[@text](memo-id)` cross-memo link.
    MemoLink,
}

impl PatternKind {
    pub const ALL: [PatternKind; 10] = [
        Self::Tag,
        Self::LeadingTag,
        Self::BreakTag,
        Self::Link,
        Self::ImageUrl,
        Self::WebImageUrl,
        Self::MarkdownImage,
        Self::MarkdownWebImage,
        Self::WikiEmbed,
        Self::MemoLink,
    ];

    pub fn regex(self) -> &'static Regex {
        match self {
            Self::Tag => &TAG_RE,
            Self::LeadingTag => &LEADING_TAG_RE,
            Self::BreakTag => &BREAK_TAG_RE,
            Self::Link => &LINK_RE,
            Self::ImageUrl => &IMAGE_URL_RE,
            Self::WebImageUrl => &WEB_IMAGE_URL_RE,
            Self::MarkdownImage => &MARKDOWN_IMAGE_RE,
            Self::MarkdownWebImage => &MARKDOWN_WEB_IMAGE_RE,
            Self::WikiEmbed => &WIKI_EMBED_RE,
            Self::MemoLink => &MEMO_LINK_RE,
        }
    }

    /// Capture group holding the interesting value for this kind.
    pub fn value_group(self) -> usize {
        match self {
            Self::BreakTag | Self::MarkdownImage => 2,
            Self::Link => 0,
            _ => 1,
        }
    }

    pub fn is_match(self, content: &str) -> bool {
        self.regex().is_match(content)
    }

    fn to_match(self, caps: &Captures<'_>) -> Option<ContentMatch> {
        let value = caps.get(self.value_group())?.as_str().to_string();
        let matched = match self {
            Self::Tag | Self::LeadingTag | Self::BreakTag => ContentMatch::Tag(value),
            Self::Link => ContentMatch::Link(value),
            Self::ImageUrl
            | Self::WebImageUrl
            | Self::MarkdownImage
            | Self::MarkdownWebImage
            | Self::WikiEmbed => ContentMatch::Image(value),
            Self::MemoLink => ContentMatch::MemoLink {
                text: value,
                target: caps.get(2)?.as_str().to_string(),
            },
        };
        Some(matched)
    }
}

/// Tagged view of one pattern hit inside memo content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentMatch {
    /// Raw tag text, not prefix-expanded.
    Tag(String),
    Link(String),
    /// Image reference (URL, markdown target or wiki embed name).
    Image(String),
    MemoLink { text: String, target: String },
}

/// Runs every pattern over `content`, grouped by kind in table order.
///
/// `WebImageUrl` is skipped since `ImageUrl` already reports its hits.
pub fn classify(content: &str) -> Vec<ContentMatch> {
    PatternKind::ALL
        .into_iter()
        .filter(|kind| *kind != PatternKind::WebImageUrl)
        .flat_map(|kind| {
            kind.regex()
                .captures_iter(content)
                .filter_map(move |caps| kind.to_match(&caps))
        })
        .collect()
}

/// Necessary condition for embeds, markdown images and web image URLs.
///
/// Bare local paths (`cat.png`) only count through `ImageUrl` and are not
/// covered by this guard.
pub fn may_contain_image(content: &str) -> bool {
    content.contains("![") || content.contains("://")
}

#[cfg(test)]
mod tests {
    use super::{classify, may_contain_image, ContentMatch, PatternKind};

    #[test]
    fn classify_reports_each_kind() {
        let matches = classify("see https://x.io/a.png and [@ref](20240101000000 3) #todo");
        assert!(matches.contains(&ContentMatch::Tag("todo".to_string())));
        assert!(matches.contains(&ContentMatch::Link("https://x.io/a.png".to_string())));
        assert!(matches.contains(&ContentMatch::Image("https://x.io/a.png".to_string())));
        assert!(!matches
            .iter()
            .any(|m| matches!(m, ContentMatch::MemoLink { .. })));
    }

    #[test]
    fn local_embeds_count_as_image_urls() {
        assert!(PatternKind::ImageUrl.is_match("look ![[cat.png]]"));
        assert!(PatternKind::ImageUrl.is_match("![alt](assets/cat.JPG)"));
        assert!(!PatternKind::WebImageUrl.is_match("look ![[cat.png]]"));
        assert!(!PatternKind::ImageUrl.is_match("notes.md and cat.pngx"));

        let matches = classify("look ![[cat.png]]");
        assert!(matches.contains(&ContentMatch::Image("cat.png".to_string())));
    }

    #[test]
    fn memo_link_captures_text_and_target() {
        let matches = classify("ping [@yesterday](202401010000003)");
        assert!(matches.contains(&ContentMatch::MemoLink {
            text: "yesterday".to_string(),
            target: "202401010000003".to_string(),
        }));
    }

    #[test]
    fn headings_are_not_tags() {
        assert!(!PatternKind::LeadingTag.is_match("# Journal"));
        assert!(PatternKind::LeadingTag.is_match("#journal entry"));
        assert!(!PatternKind::Tag.is_match("a ## b"));
    }

    #[test]
    fn image_guard_is_necessary_for_every_image_pattern() {
        for sample in ["![a](b.png)", "![[c.png]]", "https://x/y.gif", "![](https://x/y)"] {
            assert!(may_contain_image(sample), "guard rejected `{sample}`");
        }
        assert!(!may_contain_image("plain text only"));
    }
}
