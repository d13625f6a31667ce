//! Image link extraction and resolution.
//!
//! # Responsibility
//! - Collect wiki embeds and non-web markdown images as internal links,
//!   resolved through the host.
//! - Collect web image URLs for direct rendering.
//!
//! # Invariants
//! - An unresolvable internal link is returned as [`LinkTarget::Unresolved`],
//!   never dropped and never an error.

use super::patterns::{may_contain_image, PatternKind};
use crate::host::FileStore;
use std::ops::Range;

/// Where an internal link points after host resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    Resolved {
        /// Loadable resource path for rendering.
        display_path: String,
        /// Vault-relative file path.
        file_path: String,
    },
    /// Dangling link, rendered as a broken placeholder.
    Unresolved { original_name: String },
}

/// One internal image reference found in memo content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMatch {
    /// Decoded link target as written.
    pub link_text: String,
    /// Alt text, empty when absent.
    pub alt_text: String,
    pub target: LinkTarget,
}

impl LinkMatch {
    pub fn is_resolved(&self) -> bool {
        matches!(self.target, LinkTarget::Resolved { .. })
    }

    pub fn display_path(&self) -> &str {
        match &self.target {
            LinkTarget::Resolved { display_path, .. } => display_path,
            LinkTarget::Unresolved { .. } => "",
        }
    }

    pub fn file_path(&self) -> &str {
        match &self.target {
            LinkTarget::Resolved { file_path, .. } => file_path,
            LinkTarget::Unresolved { .. } => "",
        }
    }
}

/// Resolves every wiki embed, then every non-web markdown image.
pub fn extract_internal_links<F: FileStore + ?Sized>(content: &str, files: &F) -> Vec<LinkMatch> {
    if !may_contain_image(content) {
        return Vec::new();
    }

    let wiki = PatternKind::WikiEmbed
        .regex()
        .captures_iter(content)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str();
            let alt = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            Some((name, alt))
        });
    let markdown = PatternKind::MarkdownImage
        .regex()
        .captures_iter(content)
        .filter_map(|caps| {
            let target = caps.get(2)?.as_str();
            let alt = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            (!is_web_url(target)).then_some((target, alt))
        });

    wiki.chain(markdown)
        .map(|(name, alt)| resolve_link(name, alt, files))
        .collect()
}

/// Web image URLs: markdown web images first, then remaining web markdown
/// targets, then bare image URLs outside any markdown image.
///
/// `![x](https://...)` matches both markdown patterns but is reported once.
/// A URL written twice in the text yields two entries.
pub fn extract_external_image_urls(content: &str) -> Vec<String> {
    if !may_contain_image(content) {
        return Vec::new();
    }

    let mut urls = Vec::new();
    let mut covered: Vec<Range<usize>> = Vec::new();

    for caps in PatternKind::MarkdownWebImage.regex().captures_iter(content) {
        if let (Some(whole), Some(url)) = (caps.get(0), caps.get(1)) {
            covered.push(whole.range());
            urls.push(url.as_str().to_string());
        }
    }

    for caps in PatternKind::MarkdownImage.regex().captures_iter(content) {
        let (Some(whole), Some(target)) = (caps.get(0), caps.get(2)) else {
            continue;
        };
        let target = target.as_str().trim();
        if is_web_url(target) && !overlaps(&covered, &whole.range()) {
            urls.push(target.to_string());
        }
        covered.push(whole.range());
    }

    for caps in PatternKind::WebImageUrl.regex().captures_iter(content) {
        let Some(url) = caps.get(1) else {
            continue;
        };
        if !overlaps(&covered, &url.range()) {
            urls.push(url.as_str().to_string());
        }
    }

    urls
}

fn resolve_link<F: FileStore + ?Sized>(raw_name: &str, alt: &str, files: &F) -> LinkMatch {
    let link_text = urlencoding::decode(raw_name.trim())
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| raw_name.trim().to_string());
    let target = match files.resolve_link_path(&link_text, "") {
        Some(file) => LinkTarget::Resolved {
            display_path: files.resource_path(&file),
            file_path: file.path,
        },
        None => LinkTarget::Unresolved {
            original_name: link_text.clone(),
        },
    };

    LinkMatch {
        link_text,
        alt_text: alt.trim().to_string(),
        target,
    }
}

fn is_web_url(target: &str) -> bool {
    let lower = target.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn overlaps(ranges: &[Range<usize>], candidate: &Range<usize>) -> bool {
    ranges
        .iter()
        .any(|range| range.start < candidate.end && candidate.start < range.end)
}
