//! DOI and URL extraction.

use std::sync::LazyLock;

use regex::Regex;

static RE_DOI_REPAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:dx\.)?doi\.org/(?:\./)?(10\.)").unwrap()
});

static RE_DOI_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://doi\.org/(10\.\d{4,9}/[-._;()/:A-Za-z0-9]+)").unwrap()
});

static RE_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());

static RE_BARE_DOI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\bdoi:\s*)?\b(10\.\d{4,9}/[-._;()/:A-Za-z0-9]+)").unwrap()
});

/// A line with its links taken out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    /// The line text with every extracted link removed
    pub text: String,
    /// Unique link targets in order of first appearance
    pub links: Vec<String>,
}

/// Pull DOIs and URLs out of a raw line.
///
/// Malformed `doi.org/./` prefixes and scheme-less `doi.org` URLs are
/// repaired first. DOIs (bare, `doi:`-prefixed or inside a `doi.org` URL)
/// become `https://doi.org/<doi>`; other URLs are kept as written, minus
/// trailing punctuation.
pub fn extract_links(line: &str) -> Extracted {
    let repaired = RE_DOI_REPAIR.replace_all(line, "https://doi.org/$1");
    let text = repaired.as_ref();

    // (start, end, url)
    let mut found: Vec<(usize, usize, String)> = Vec::new();

    for caps in RE_DOI_URL.captures_iter(text) {
        let (Some(whole), Some(doi)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let trimmed = trim_trailing(doi.as_str());
        let end = doi.start() + trimmed.len();
        push_unless_overlapping(
            &mut found,
            whole.start(),
            end,
            format!("https://doi.org/{trimmed}"),
        );
    }

    for m in RE_URL.find_iter(text) {
        let url = trim_trailing(m.as_str());
        if url.len() <= "https://".len() {
            continue;
        }
        push_unless_overlapping(&mut found, m.start(), m.start() + url.len(), url.to_string());
    }

    for caps in RE_BARE_DOI.captures_iter(text) {
        let (Some(whole), Some(doi)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let trimmed = trim_trailing(doi.as_str());
        let end = doi.start() + trimmed.len();
        push_unless_overlapping(
            &mut found,
            whole.start(),
            end,
            format!("https://doi.org/{trimmed}"),
        );
    }

    if found.is_empty() {
        return Extracted {
            text: text.to_string(),
            links: Vec::new(),
        };
    }

    found.sort_by_key(|(start, _, _)| *start);

    let mut remaining = String::with_capacity(text.len());
    let mut links: Vec<String> = Vec::new();
    let mut cursor = 0;
    for (start, end, url) in found {
        remaining.push_str(&text[cursor..start]);
        cursor = end;
        if !links.contains(&url) {
            links.push(url);
        }
    }
    remaining.push_str(&text[cursor..]);

    Extracted {
        text: remaining,
        links,
    }
}

fn push_unless_overlapping(
    found: &mut Vec<(usize, usize, String)>,
    start: usize,
    end: usize,
    url: String,
) {
    let overlaps = found.iter().any(|(s, e, _)| start < *e && *s < end);
    if !overlaps {
        found.push((start, end, url));
    }
}

/// Strip trailing sentence punctuation and unbalanced closing brackets.
fn trim_trailing(mut url: &str) -> &str {
    loop {
        let before = url.len();
        url = url.trim_end_matches(['.', ',', ';', ':', '!', '?', '"', '\'']);
        for (open, close) in [('(', ')'), ('[', ']')] {
            if url.ends_with(close) && url.matches(open).count() < url.matches(close).count() {
                url = &url[..url.len() - close.len_utf8()];
            }
        }
        if url.len() == before {
            return url;
        }
    }
}
