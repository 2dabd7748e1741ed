use crate::config::ExtractorConfig;
use crate::error::Result;
use crate::filter::TitleFilter;
use crate::results::TitleList;
use crate::session::BrowserSession;
use crate::utils::normalize_title;

/// Attributes probed before and after the element's text
const PRIMARY_ATTRIBUTES: [&str; 2] = ["title", "aria-label"];
const LAST_RESORT_ATTRIBUTE: &str = "alt";

/// What a single node yielded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeTitle {
    /// A normalized title
    Title(String),
    /// Nothing usable (no source set, or too short after normalization)
    Skipped,
    /// Reading the node failed; carries the placeholder text
    Placeholder(String),
}

/// Placeholder recorded for a node that could not be read (1-based position)
pub fn placeholder(position: usize) -> String {
    format!("[Error extracting title {position}]")
}

/// Collects the titles of every matched node on the loaded page.
///
/// The structural selectors are tried in order and the first one with any
/// match supplies all nodes; matches of later selectors are never merged in.
/// If none match, the broad fallback selector is used. A node that fails to
/// read is recorded as a placeholder and the pass continues.
pub async fn extract_titles<S: BrowserSession>(
    session: &mut S,
    config: &ExtractorConfig,
) -> Result<TitleList> {
    ::log::info!("Extracting video titles...");

    let filter = TitleFilter::new(&config.exclude_patterns)?;
    let nodes = resolve_nodes(session, config).await?;

    let mut titles = TitleList::new();
    for (index, node) in nodes.iter().enumerate() {
        match read_node(session, node, index + 1).await {
            NodeTitle::Title(title) => {
                if filter.should_keep(&title) {
                    titles.push(title);
                }
            }
            NodeTitle::Placeholder(text) => {
                titles.push(text);
            }
            NodeTitle::Skipped => {}
        }
    }

    ::log::info!(
        "Extracted {} unique titles from {} nodes",
        titles.len(),
        nodes.len()
    );
    Ok(titles)
}

/// Picks the node set: first structural selector with a match, else the fallback
async fn resolve_nodes<S: BrowserSession>(
    session: &mut S,
    config: &ExtractorConfig,
) -> Result<Vec<S::Element>> {
    for selector in &config.title_selectors {
        match session.find_elements(selector).await {
            Ok(elements) if !elements.is_empty() => {
                ::log::info!(
                    "Found {} titles using selector: {}",
                    elements.len(),
                    selector
                );
                return Ok(elements);
            }
            Ok(_) => {}
            Err(e) => {
                ::log::debug!("Selector {} failed: {}", selector, e);
            }
        }
    }

    ::log::warn!(
        "Could not find video title elements, falling back to `{}`",
        config.fallback_selector
    );
    session.find_elements(&config.fallback_selector).await
}

/// Reads one node, turning any session error into a placeholder
pub async fn read_node<S: BrowserSession>(
    session: &mut S,
    node: &S::Element,
    position: usize,
) -> NodeTitle {
    match raw_title(session, node).await {
        Ok(Some(raw)) => match normalize_title(&raw) {
            Some(title) => NodeTitle::Title(title),
            None => NodeTitle::Skipped,
        },
        Ok(None) => NodeTitle::Skipped,
        Err(e) => {
            ::log::warn!("Error extracting title from element {}: {}", position, e);
            NodeTitle::Placeholder(placeholder(position))
        }
    }
}

/// First non-blank value among title, aria-label, text and alt
async fn raw_title<S: BrowserSession>(
    session: &mut S,
    node: &S::Element,
) -> Result<Option<String>> {
    for name in PRIMARY_ATTRIBUTES {
        if let Some(value) = non_blank(session.attribute(node, name).await?) {
            return Ok(Some(value));
        }
    }
    if let Some(value) = non_blank(Some(session.text(node).await?)) {
        return Ok(Some(value));
    }
    Ok(non_blank(
        session.attribute(node, LAST_RESORT_ATTRIBUTE).await?,
    ))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SnapshotSession;
    use crate::session::fake::{FakeElement, FakeSession};

    fn selectors(names: &[&str]) -> ExtractorConfig {
        ExtractorConfig {
            title_selectors: names.iter().map(|s| s.to_string()).collect(),
            fallback_selector: "[title]".to_string(),
            exclude_patterns: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_normalizes_and_dedups_in_order() {
        let nodes = ["Aa", "b  b", "Aa", "Cc"]
            .iter()
            .map(|t| FakeElement::with_text(t))
            .collect();
        let mut session = FakeSession::with_nodes("#video-title", nodes);

        let titles = extract_titles(&mut session, &selectors(&["#video-title"]))
            .await
            .unwrap();
        assert_eq!(titles.as_slice(), ["Aa", "b b", "Cc"]);
    }

    #[tokio::test]
    async fn test_short_titles_dropped() {
        let nodes = vec![
            FakeElement::with_text("-"),
            FakeElement::with_text("  x  "),
            FakeElement::with_text("ok"),
        ];
        let mut session = FakeSession::with_nodes("#video-title", nodes);

        let titles = extract_titles(&mut session, &selectors(&["#video-title"]))
            .await
            .unwrap();
        assert_eq!(titles.as_slice(), ["ok"]);
    }

    #[tokio::test]
    async fn test_first_matching_selector_wins_without_merge() {
        let mut session = FakeSession::with_nodes(
            "third",
            vec![
                FakeElement::with_text("One"),
                FakeElement::with_text("Two"),
                FakeElement::with_text("Three"),
            ],
        );
        session.nodes.insert(
            "fourth".to_string(),
            vec![FakeElement::with_text("Four")],
        );

        let config = selectors(&["first", "second", "third", "fourth"]);
        let titles = extract_titles(&mut session, &config).await.unwrap();

        assert_eq!(titles.as_slice(), ["One", "Two", "Three"]);
        assert_eq!(session.queried, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_failing_selector_is_skipped() {
        let mut session =
            FakeSession::with_nodes("second", vec![FakeElement::with_text("Kept")]);
        session.failing_selectors.push("first".to_string());

        let titles = extract_titles(&mut session, &selectors(&["first", "second"]))
            .await
            .unwrap();
        assert_eq!(titles.as_slice(), ["Kept"]);
    }

    #[tokio::test]
    async fn test_fallback_selector() {
        let mut session = FakeSession::with_nodes(
            "[title]",
            vec![FakeElement::with_attr("title", "Loose match")],
        );

        let titles = extract_titles(&mut session, &selectors(&["a#video-title"]))
            .await
            .unwrap();
        assert_eq!(titles.as_slice(), ["Loose match"]);
        assert_eq!(session.queried, ["a#video-title", "[title]"]);
    }

    #[tokio::test]
    async fn test_nothing_found_is_empty_not_error() {
        let mut session = FakeSession::with_nodes("unused", Vec::new());
        let titles = extract_titles(&mut session, &selectors(&["a#video-title"]))
            .await
            .unwrap();
        assert!(titles.is_empty());
    }

    #[tokio::test]
    async fn test_broken_node_becomes_placeholder() {
        let nodes = (1..=10)
            .map(|i| {
                if i == 7 {
                    FakeElement::broken()
                } else {
                    FakeElement::with_text(&format!("Video {i}"))
                }
            })
            .collect();
        let mut session = FakeSession::with_nodes("#video-title", nodes);

        let titles = extract_titles(&mut session, &selectors(&["#video-title"]))
            .await
            .unwrap();
        assert_eq!(titles.len(), 10);
        assert_eq!(titles.as_slice()[5], "Video 6");
        assert_eq!(titles.as_slice()[6], "[Error extracting title 7]");
        assert_eq!(titles.as_slice()[7], "Video 8");
    }

    #[tokio::test]
    async fn test_source_priority() {
        let mut both = FakeElement::with_text("From text");
        both.attributes
            .insert("aria-label".to_string(), "From label".to_string());
        both.attributes.insert("alt".to_string(), "From alt".to_string());

        let mut blank_title = FakeElement::with_text("Visible text");
        blank_title
            .attributes
            .insert("title".to_string(), "   ".to_string());

        let alt_only = FakeElement::with_attr("alt", "Thumbnail alt");

        let mut session =
            FakeSession::with_nodes("#video-title", vec![both, blank_title, alt_only]);
        let titles = extract_titles(&mut session, &selectors(&["#video-title"]))
            .await
            .unwrap();
        assert_eq!(
            titles.as_slice(),
            ["From label", "Visible text", "Thumbnail alt"]
        );
    }

    #[tokio::test]
    async fn test_exclude_patterns_applied_after_normalization() {
        let nodes = vec![
            FakeElement::with_text("Real  video"),
            FakeElement::with_text(" [Private   video] "),
        ];
        let mut session = FakeSession::with_nodes("#video-title", nodes);
        let mut config = selectors(&["#video-title"]);
        config.exclude_patterns = vec![r"^\[Private video\]$".to_string()];

        let titles = extract_titles(&mut session, &config).await.unwrap();
        assert_eq!(titles.as_slice(), ["Real video"]);
    }

    #[tokio::test]
    async fn test_playlist_markup_with_default_selectors() {
        let html = r#"<html><body>
            <div id="contents">
              <ytd-playlist-video-renderer>
                <h3><a id="video-title" title="Lesson 1:   Basics" href="/watch?v=a">Lesson 1: Basics</a></h3>
              </ytd-playlist-video-renderer>
              <ytd-playlist-video-renderer>
                <h3><a id="video-title" aria-label="Lesson 2 by Someone 3 minutes" href="/watch?v=b">
                  Lesson 2
                </a></h3>
              </ytd-playlist-video-renderer>
              <ytd-playlist-video-renderer>
                <h3><a id="video-title" href="/watch?v=c">
                  Lesson   3
                </a></h3>
              </ytd-playlist-video-renderer>
              <ytd-playlist-video-renderer>
                <h3><a id="video-title" title="Lesson 1: Basics" href="/watch?v=a2">dup</a></h3>
              </ytd-playlist-video-renderer>
            </div>
            <a href="/" title="Home">Home</a>
        </body></html>"#;
        let mut session = SnapshotSession::new(html);

        let titles = extract_titles(&mut session, &ExtractorConfig::default())
            .await
            .unwrap();
        assert_eq!(
            titles.as_slice(),
            [
                "Lesson 1: Basics",
                "Lesson 2 by Someone 3 minutes",
                "Lesson 3"
            ]
        );
    }

    #[tokio::test]
    async fn test_snapshot_falls_back_to_broad_selector() {
        let html = r#"<html><body>
            <div aria-label="Play video: Unstructured entry"></div>
            <span title="Tooltip text">x</span>
        </body></html>"#;
        let mut session = SnapshotSession::new(html);

        let titles = extract_titles(&mut session, &ExtractorConfig::default())
            .await
            .unwrap();
        assert_eq!(
            titles.as_slice(),
            ["Play video: Unstructured entry", "Tooltip text"]
        );
    }
}
