//! start.gg link recognition
//!
//! Accepts full URLs, bare slugs and shorthand names and reduces them to the
//! slug the API expects.

use regex::Regex;
use std::sync::LazyLock;

static EVENT_SLUG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"tournament/[a-zA-Z0-9\-]+/event/[a-zA-Z0-9\-]+").expect("valid event regex")
});
static TOURNAMENT_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"tournament/[a-zA-Z0-9\-]+").expect("valid tournament regex"));
static SHORTHAND_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"start\.gg/([a-zA-Z0-9\-]+)").expect("valid shorthand regex"));

/// What a link points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Link {
    /// `tournament/<t>/event/<e>`
    Event(String),
    /// `tournament/<t>`
    Tournament(String),
    /// Short tournament alias, e.g. `evo`
    Shorthand(String),
}

impl Link {
    /// Slug to send to the API
    pub fn slug(&self) -> &str {
        match self {
            Link::Event(slug) | Link::Tournament(slug) | Link::Shorthand(slug) => slug,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    #[error("Empty link")]
    Empty,
}

/// Classify a link
///
/// Event slugs contain a tournament slug, so they are checked first. Anything
/// unrecognized is taken as a bare shorthand.
pub fn parse_link(link: &str) -> Result<Link, LinkError> {
    let link = link.trim();
    if link.is_empty() {
        return Err(LinkError::Empty);
    }

    if let Some(m) = EVENT_SLUG.find(link) {
        return Ok(Link::Event(m.as_str().to_string()));
    }
    if let Some(m) = TOURNAMENT_SLUG.find(link) {
        return Ok(Link::Tournament(m.as_str().to_string()));
    }
    if let Some(caps) = SHORTHAND_SLUG.captures(link) {
        if let Some(name) = caps.get(1) {
            return Ok(Link::Shorthand(name.as_str().to_string()));
        }
    }

    Ok(Link::Shorthand(link.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_link() {
        let link = parse_link("https://www.start.gg/tournament/evo-2023/event/street-fighter-6/overview")
            .unwrap();
        assert_eq!(
            link,
            Link::Event("tournament/evo-2023/event/street-fighter-6".to_string())
        );
    }

    #[test]
    fn test_tournament_link() {
        let link = parse_link("start.gg/tournament/evo-2023/details").unwrap();
        assert_eq!(link, Link::Tournament("tournament/evo-2023".to_string()));
        assert_eq!(link.slug(), "tournament/evo-2023");
    }

    #[test]
    fn test_shorthand_link() {
        assert_eq!(
            parse_link("https://start.gg/evo").unwrap(),
            Link::Shorthand("evo".to_string())
        );
    }

    #[test]
    fn test_bare_shorthand() {
        assert_eq!(
            parse_link("  genesis ").unwrap(),
            Link::Shorthand("genesis".to_string())
        );
    }

    #[test]
    fn test_empty_link() {
        assert_eq!(parse_link("   "), Err(LinkError::Empty));
    }
}
