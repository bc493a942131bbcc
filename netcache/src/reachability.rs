//! Connectivity monitoring.
//!
//! A [`Reachability`] handle exposes the current connectivity state and a
//! stream of changes. The state is fed by a background task that periodically
//! runs a [`ConnectivityProbe`]. The fetch pipeline ignores it unless it is
//! attached with [`crate::FetchPipeline::with_reachability`].
use crate::NetworkError;
use async_trait::async_trait;
use netcache_config::ReachabilityParams;
use reqwest::Client;
use std::sync::OnceLock;
use std::thread;
use std::time::Duration;
use tokio::runtime;
use tokio::sync::watch;
use tokio::time::{MissedTickBehavior, timeout};
use tracing::{debug, info, warn};

/// Shortest accepted delay between two probes.
const MIN_PROBE_INTERVAL: Duration = Duration::from_millis(10);

#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    /// Whether the network is usable right now.
    async fn probe(&self) -> bool;
}

/// Check if internet is available by requesting a well-known URL.
///
/// Any HTTP response within the timeout counts as connected, whatever its
/// status. Hosts commonly used for this because of their uptime:
///     - Google's primary domain: https://www.google.com
///     - Cloudflare's DNS resolver: https://1.1.1.1
///     - Quad9's DNS resolver: https://9.9.9.9
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpProbe {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            timeout,
        }
    }

    pub fn from_params(params: &ReachabilityParams) -> Self {
        Self::new(params.probe_url.clone(), params.timeout)
    }
}

#[async_trait]
impl ConnectivityProbe for HttpProbe {
    async fn probe(&self) -> bool {
        match timeout(self.timeout, self.client.get(&self.url).send()).await {
            Ok(Ok(response)) => {
                debug!(url = %self.url, status = %response.status(), "Probe answered");
                true
            }
            Ok(Err(err)) => {
                debug!(url = %self.url, error = %err, "Probe request failed");
                false
            }
            Err(_) => {
                debug!(url = %self.url, timeout = ?self.timeout, "Probe timed out");
                false
            }
        }
    }
}

/// Handle on the connectivity state. Cheap to clone.
///
/// The state starts as `false` and flips once the first probe succeeds. The
/// background task stops only after every handle has been dropped.
#[derive(Debug, Clone)]
pub struct Reachability {
    state: watch::Receiver<bool>,
}

impl Reachability {
    /// Starts monitoring immediately on the current tokio runtime.
    ///
    /// # Panics
    /// Panics when called outside a tokio runtime.
    pub fn start<P>(probe: P, interval: Duration) -> Self
    where
        P: ConnectivityProbe + 'static,
    {
        let (tx, rx) = watch::channel(false);
        tokio::spawn(monitor(probe, interval.max(MIN_PROBE_INTERVAL), tx));
        Self { state: rx }
    }

    /// Monitor configured from the `reachability` section.
    ///
    /// # Panics
    /// Panics when called outside a tokio runtime.
    pub fn from_params(params: &ReachabilityParams) -> Self {
        Self::start(HttpProbe::from_params(params), params.interval)
    }

    /// Process-wide monitor with default settings, started on first use and
    /// never stopped.
    ///
    /// The monitor runs on its own thread and runtime, so it outlives the
    /// runtime of the first caller and may be used outside any runtime.
    pub fn shared() -> Self {
        static SHARED: OnceLock<Reachability> = OnceLock::new();
        SHARED
            .get_or_init(|| {
                let params = ReachabilityParams::default();
                Self::start_detached(HttpProbe::from_params(&params), params.interval)
            })
            .clone()
    }

    /// Like [`Reachability::start`], on a dedicated thread driving a
    /// current-thread runtime. When the thread cannot be started the state
    /// stays `false` and [`Reachability::changed`] returns `None`.
    fn start_detached<P>(probe: P, interval: Duration) -> Self
    where
        P: ConnectivityProbe + 'static,
    {
        let (tx, rx) = watch::channel(false);
        let interval = interval.max(MIN_PROBE_INTERVAL);
        let spawned = thread::Builder::new()
            .name("netcache-reachability".into())
            .spawn(move || {
                match runtime::Builder::new_current_thread().enable_all().build() {
                    Ok(rt) => rt.block_on(monitor(probe, interval, tx)),
                    Err(err) => {
                        warn!(error = %err, "Failed to build reachability runtime")
                    }
                }
            });
        if let Err(err) = spawned {
            warn!(error = %err, "Failed to spawn reachability thread");
        }
        Self { state: rx }
    }

    /// Wraps an existing state channel, for callers that already track
    /// connectivity through another signal.
    pub fn from_watch(state: watch::Receiver<bool>) -> Self {
        Self { state }
    }

    pub fn is_connected(&self) -> bool {
        *self.state.borrow()
    }

    /// Independent receiver of state changes.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.clone()
    }

    /// Waits for the next change and returns the new state, or `None` once
    /// the monitor is gone.
    pub async fn changed(&mut self) -> Option<bool> {
        self.state.changed().await.ok()?;
        Some(*self.state.borrow_and_update())
    }

    /// `Err(NoNetworkConnection)` while offline.
    pub fn require_connection(&self) -> Result<(), NetworkError> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(NetworkError::NoNetworkConnection)
        }
    }
}

async fn monitor<P>(probe: P, interval: Duration, tx: watch::Sender<bool>)
where
    P: ConnectivityProbe,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tx.closed() => {
                debug!("All reachability handles dropped, stopping monitor");
                break;
            }
        }

        let connected = probe.probe().await;
        tx.send_if_modified(|current| {
            if *current == connected {
                return false;
            }
            info!(connected, "Network reachability changed");
            *current = connected;
            true
        });
    }
}
