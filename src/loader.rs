use crate::config::LoaderConfig;
use crate::error::Result;
use crate::session::{BrowserSession, CLICK_ELEMENT, SCROLL_TO_BOTTOM};
use serde::Serialize;

/// How the scroll loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadOutcome {
    /// Loaded-item count observed after the loop
    pub final_count: usize,
    /// Number of rounds that polled the count
    pub rounds: usize,
    /// True when the count stopped changing, false when the attempt cap was hit
    pub converged: bool,
}

/// Scrolls until the number of loaded playlist entries stops changing.
///
/// Each round reads the current count, scrolls to the bottom, waits, and clicks
/// a visible "load more" control if one exists. The loop stops once the count
/// has been unchanged for `stagnation_limit` consecutive rounds, or after
/// `max_attempts` rounds.
pub async fn load_all<S: BrowserSession>(
    session: &mut S,
    config: &LoaderConfig,
) -> Result<LoadOutcome> {
    ::log::info!("Starting to scroll and load all videos...");

    let mut last_count = 0;
    let mut stagnant_rounds = 0;
    let mut rounds = 0;
    let mut converged = false;

    while rounds < config.max_attempts {
        let current = count_items(session, &config.item_selector).await?;
        rounds += 1;
        ::log::info!("Scroll {}: found {} videos", rounds, current);

        if current == last_count {
            stagnant_rounds += 1;
            if stagnant_rounds >= config.stagnation_limit {
                ::log::info!(
                    "No new videos loaded after {} attempts, finished loading",
                    stagnant_rounds
                );
                converged = true;
                break;
            }
        } else {
            stagnant_rounds = 0;
            last_count = current;
        }

        session.execute_script(SCROLL_TO_BOTTOM, &[]).await?;
        tokio::time::sleep(config.scroll_delay()).await;

        click_load_more(session, config).await?;
    }

    let final_count = count_items(session, &config.item_selector).await?;
    ::log::info!("Finished scrolling, total videos loaded: {}", final_count);

    Ok(LoadOutcome {
        final_count,
        rounds,
        converged,
    })
}

async fn count_items<S: BrowserSession>(session: &mut S, selector: &str) -> Result<usize> {
    Ok(session.find_elements(selector).await?.len())
}

/// Clicks the "load more" control when it is present and displayed.
/// Returns whether a click happened.
async fn click_load_more<S: BrowserSession>(
    session: &mut S,
    config: &LoaderConfig,
) -> Result<bool> {
    let Some(button) = session.find_element(&config.load_more_selector).await? else {
        return Ok(false);
    };
    if !session.is_visible(&button).await? {
        return Ok(false);
    }

    session.execute_script(CLICK_ELEMENT, &[&button]).await?;
    ::log::info!("Clicked 'Load more' button");
    tokio::time::sleep(config.load_more_delay()).await;
    Ok(true)
}
