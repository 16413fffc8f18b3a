//! Robots.txt handling module
//!
//! Before a scrape the origin's robots.txt is fetched once and evaluated for
//! the listing URL. The check fails open: when the file cannot be retrieved
//! the fetch is permitted, but the outcome is reported as `Unknown` so the
//! caller can log it apart from a real allow.

mod parser;

pub use parser::{product_token, RobotsPolicy};

use crate::crawler::RateLimiter;
use crate::HootError;
use reqwest::{Client, StatusCode};
use url::Url;

/// Outcome of evaluating robots.txt for one target URL
#[derive(Debug, Clone, PartialEq)]
pub enum PolicyDecision {
    /// The policy permits the fetch
    Allowed {
        /// `Crawl-delay` published for our agent, in seconds
        crawl_delay: Option<f64>,
    },

    /// The policy forbids the fetch
    Disallowed,

    /// No usable policy could be obtained; treated as allowed
    Unknown {
        /// Why the policy was unavailable
        reason: String,
    },
}

impl PolicyDecision {
    /// Returns true unless the policy explicitly forbids the fetch
    pub fn permits(&self) -> bool {
        !matches!(self, Self::Disallowed)
    }

    /// Returns the published crawl delay, if any
    pub fn crawl_delay(&self) -> Option<f64> {
        match self {
            Self::Allowed { crawl_delay } => *crawl_delay,
            _ => None,
        }
    }
}

/// Builds the robots.txt URL on the same origin as `target`
pub fn robots_url_for(target: &Url) -> Result<Url, HootError> {
    Ok(target.join("/robots.txt")?)
}

/// Fetches robots.txt for `target`'s origin and evaluates it for `user_agent`
///
/// # Status handling
///
/// | Response | Decision |
/// |----------|----------|
/// | 2xx | rules evaluated |
/// | 401 / 403 | Disallowed |
/// | other 4xx | Allowed (no policy published) |
/// | 5xx, network error, timeout | Unknown |
///
/// The request goes through `limiter` like every other outbound request.
pub async fn check_robots(
    client: &Client,
    limiter: &mut RateLimiter,
    target: &Url,
    user_agent: &str,
) -> PolicyDecision {
    let robots_url = match robots_url_for(target) {
        Ok(url) => url,
        Err(e) => {
            return PolicyDecision::Unknown {
                reason: e.to_string(),
            }
        }
    };

    limiter.wait().await;
    tracing::debug!(url = %robots_url, "Fetching robots.txt");

    let response = match client.get(robots_url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            return PolicyDecision::Unknown {
                reason: format!("request to {} failed: {}", robots_url, e),
            }
        }
    };

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return PolicyDecision::Disallowed;
    }
    if status.is_client_error() {
        tracing::info!(url = %robots_url, status = status.as_u16(), "No robots.txt published");
        return PolicyDecision::Allowed { crawl_delay: None };
    }
    if !status.is_success() {
        return PolicyDecision::Unknown {
            reason: format!("{} returned HTTP {}", robots_url, status.as_u16()),
        };
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            return PolicyDecision::Unknown {
                reason: format!("could not read {}: {}", robots_url, e),
            }
        }
    };

    evaluate(&RobotsPolicy::from_content(&body), target, user_agent)
}

/// Evaluates an already fetched policy for `target`
pub fn evaluate(policy: &RobotsPolicy, target: &Url, user_agent: &str) -> PolicyDecision {
    if policy.allows(target.as_str(), user_agent) {
        PolicyDecision::Allowed {
            crawl_delay: policy.crawl_delay(user_agent),
        }
    } else {
        PolicyDecision::Disallowed
    }
}

/// Checks robots.txt and reduces the outcome to allowed / not allowed
///
/// An unavailable policy is logged as a warning and counts as allowed.
pub async fn is_permitted(
    client: &Client,
    limiter: &mut RateLimiter,
    target: &Url,
    user_agent: &str,
) -> bool {
    let decision = check_robots(client, limiter, target, user_agent).await;
    log_decision(&decision, target);
    decision.permits()
}

/// Emits the event matching a policy decision
pub fn log_decision(decision: &PolicyDecision, target: &Url) {
    match decision {
        PolicyDecision::Allowed { crawl_delay } => {
            tracing::info!(url = %target, crawl_delay = ?crawl_delay, "robots.txt check: ALLOWED");
        }
        PolicyDecision::Disallowed => {
            tracing::warn!(url = %target, "robots.txt check: BLOCKED");
        }
        PolicyDecision::Unknown { reason } => {
            tracing::warn!(
                url = %target,
                reason = %reason,
                "Could not check robots.txt, assuming allowed"
            );
        }
    }
}
