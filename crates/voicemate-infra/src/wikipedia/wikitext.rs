//! Minimal wikitext reading for disambiguation pages.

/// Link prefixes that point outside the article namespace.
const SKIPPED_PREFIXES: &[&str] = &[
    "file", "image", "category", "wikt", "wiktionary", "help", "template", "wikipedia", "portal",
    "special", "talk",
];

/// The first article link of every bulleted line, in page order.
///
/// Targets keep their page title only: `[[Mercury (planet)#Orbit|the planet]]`
/// yields `Mercury (planet)`. Lines without an article link are skipped.
pub fn list_item_links(wikitext: &str) -> Vec<String> {
    wikitext
        .lines()
        .map(str::trim_start)
        .filter(|line| line.starts_with('*'))
        .filter_map(first_article_link)
        .collect()
}

fn first_article_link(line: &str) -> Option<String> {
    let mut rest = line;
    while let Some(start) = rest.find("[[") {
        let after = &rest[start + 2..];
        let end = after.find("]]")?;
        if let Some(title) = article_title(&after[..end]) {
            return Some(title);
        }
        rest = &after[end + 2..];
    }
    None
}

fn article_title(link: &str) -> Option<String> {
    let target = link.split('|').next().unwrap_or_default();
    let target = target.split('#').next().unwrap_or_default();
    let target = target.replace('_', " ");
    let target = target.trim();

    if target.is_empty() || target.starts_with(':') {
        return None;
    }
    if let Some((prefix, _)) = target.split_once(':') {
        let prefix = prefix.trim().to_ascii_lowercase();
        if SKIPPED_PREFIXES.contains(&prefix.as_str()) {
            return None;
        }
    }
    Some(target.to_string())
}
