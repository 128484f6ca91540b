//! Per-IP rate limiting for `/api`
//!
//! Uses a `governor` keyed limiter. The configured "N requests per window"
//! becomes a GCRA quota: a burst of N, refilled at one request per
//! `window / N`. A client that empties its burst is answered with 429 until
//! the bucket refills.
//!
//! Clients are keyed by socket peer. `X-Forwarded-For` only counts when the
//! peer is one of the configured trusted proxies.

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use std::collections::HashSet;
use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use crate::backend::error::ApiError;
use crate::shared::config::RateLimitSettings;

pub type IpRateLimiter = DefaultKeyedRateLimiter<IpAddr>;

/// Build the limiter. `None` if the settings describe no usable quota.
pub fn build_limiter(settings: &RateLimitSettings) -> Option<IpRateLimiter> {
    let burst = NonZeroU32::new(settings.max_requests)?;
    let period = settings.window / settings.max_requests;
    let quota = Quota::with_period(period)?.allow_burst(burst);
    Some(RateLimiter::keyed(quota))
}

/// Socket peer of the request, loopback when there is no connection info.
pub fn peer_ip(request: &Request) -> IpAddr {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::from([127, 0, 0, 1]))
}

/// Proxies allowed to name the client through `X-Forwarded-For`.
#[derive(Debug, Clone, Default)]
pub struct TrustedProxies(Arc<HashSet<IpAddr>>);

impl TrustedProxies {
    pub fn new(proxies: impl IntoIterator<Item = IpAddr>) -> Self {
        Self(Arc::new(proxies.into_iter().collect()))
    }

    pub fn contains(&self, ip: &IpAddr) -> bool {
        self.0.contains(ip)
    }

    /// Client address for `request`.
    ///
    /// The socket peer, unless that peer is a trusted proxy. Then the
    /// forwarded chain is walked from the right and the first hop that is
    /// not itself a trusted proxy wins. Hops left of it are client supplied
    /// and never read.
    pub fn client_ip(&self, request: &Request) -> IpAddr {
        let peer = peer_ip(request);
        if !self.contains(&peer) {
            return peer;
        }

        let hops: Vec<&str> = request
            .headers()
            .get_all("x-forwarded-for")
            .iter()
            .filter_map(|h| h.to_str().ok())
            .flat_map(|h| h.split(','))
            .collect();

        let mut client = peer;
        for hop in hops.into_iter().rev() {
            match hop.trim().parse::<IpAddr>() {
                Ok(ip) if self.contains(&ip) => client = ip,
                Ok(ip) => return ip,
                Err(_) => break,
            }
        }
        client
    }
}

/// State for the `/api` limiter layer.
#[derive(Clone)]
pub struct RateLimitState {
    pub limiter: Arc<IpRateLimiter>,
    pub proxies: TrustedProxies,
}

pub async fn rate_limit(
    State(state): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Response {
    let ip = state.proxies.client_ip(&request);
    if state.limiter.check_key(&ip).is_err() {
        tracing::warn!("Rate limit exceeded for IP: {}", ip);
        return ApiError::TooManyRequests.into_response();
    }
    next.run(request).await
}

/// Periodically drop keys whose buckets have fully refilled.
pub fn spawn_cleanup(limiter: Arc<IpRateLimiter>, every: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            limiter.retain_recent();
            limiter.shrink_to_fit();
            tracing::debug!("Rate limiter pruned, {} keys tracked", limiter.len());
        }
    });
}
