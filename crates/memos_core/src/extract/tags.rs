//! Hashtag extraction.
//!
//! Three syntaxes feed one set: `#tag` after whitespace, `#tag` at line
//! start, and `#tag` right after a `<br>`/`<p>` marker.

use super::patterns::PatternKind;
use std::collections::BTreeSet;

const TAG_PATTERNS: [PatternKind; 3] = [
    PatternKind::Tag,
    PatternKind::LeadingTag,
    PatternKind::BreakTag,
];

/// Returns every tag in `content` plus all hierarchical ancestors.
///
/// `#a/b/c` contributes `a`, `a/b` and `a/b/c`.
pub fn extract_tags(content: &str) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();
    for tag in raw_tags(content) {
        expand_into(&mut tags, &tag);
    }
    tags
}

/// Returns tags exactly as written, without ancestor expansion.
pub fn extract_tag_names(content: &str) -> BTreeSet<String> {
    raw_tags(content).collect()
}

/// `NOT_TAGGED` predicate: no plain tag and no line-start tag.
///
/// Tags after a break marker are deliberately not consulted here.
pub fn is_untagged(content: &str) -> bool {
    !PatternKind::Tag.is_match(content) && !PatternKind::LeadingTag.is_match(content)
}

fn raw_tags(content: &str) -> impl Iterator<Item = String> + '_ {
    TAG_PATTERNS.into_iter().flat_map(move |kind| {
        kind.regex().captures_iter(content).filter_map(move |caps| {
            let tag = normalize_tag(caps.get(kind.value_group())?.as_str());
            (!tag.is_empty()).then_some(tag)
        })
    })
}

fn normalize_tag(raw: &str) -> String {
    raw.trim().trim_end_matches(['/', '.', ':']).to_string()
}

fn expand_into(tags: &mut BTreeSet<String>, tag: &str) {
    let mut prefix = String::with_capacity(tag.len());
    for segment in tag.split('/').filter(|segment| !segment.is_empty()) {
        if !prefix.is_empty() {
            prefix.push('/');
        }
        prefix.push_str(segment);
        tags.insert(prefix.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::{extract_tag_names, extract_tags, is_untagged};

    #[test]
    fn trailing_punctuation_is_not_part_of_tag() {
        let tags = extract_tag_names("done with #work. next #home/");
        assert!(tags.contains("work"));
        assert!(tags.contains("home"));
    }

    #[test]
    fn break_marker_tags_are_expanded() {
        let tags = extract_tags("first<br>#proj/alpha");
        assert!(tags.contains("proj"));
        assert!(tags.contains("proj/alpha"));
    }

    #[test]
    fn break_marker_tag_alone_still_counts_as_untagged() {
        assert!(is_untagged("first<br>#proj"));
        assert!(!is_untagged("#proj first"));
        assert!(!is_untagged("first #proj"));
    }
}
