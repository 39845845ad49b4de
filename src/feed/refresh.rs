use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::sleep;

use super::error::FeedError;
use super::normalizer::Normalizer;
use super::provider::PositionProvider;
use super::types::{active_observatories, ProviderResponse};
use crate::store::PositionStore;

/// Used when the provider cannot list its satellites.
pub const DEFAULT_SATELLITES: [&str; 5] = ["iss", "ace", "wind", "goes16", "hubble"];

#[derive(Debug)]
pub struct SatelliteFailure {
    pub satellite: String,
    pub error: FeedError,
}

/// Outcome of one refresh cycle.
#[derive(Debug, Default)]
pub struct RefreshReport {
    pub installed: Vec<String>,
    pub failures: Vec<SatelliteFailure>,
    /// Requested satellites the provider returned nothing for.
    pub missing: Vec<String>,
    pub skipped_samples: usize,
}

/// What to fetch and where to put it.
#[derive(Debug, Clone)]
pub struct FeedJob {
    pub satellites: Vec<String>,
    pub window: Duration,
    pub batch_size: usize,
    pub normalizer: Normalizer,
}

/// Ids to query: the configured ones, or every active provider satellite when
/// none (or `all`) is configured.
pub async fn resolve_satellites<P: PositionProvider>(
    provider: &P,
    configured: &[String],
) -> Result<Vec<String>, FeedError> {
    let wants_all =
        configured.is_empty() || configured.iter().any(|s| s.eq_ignore_ascii_case("all"));
    if !wants_all {
        return Ok(configured.to_vec());
    }

    let observatories = provider.observatories().await?;
    let active = active_observatories(observatories, Utc::now());
    Ok(active.into_iter().map(|o| o.id).collect())
}

/// Start of a window of length `window` ending at `end`, clamped to the
/// earliest representable time.
pub fn window_start(end: DateTime<Utc>, window: Duration) -> DateTime<Utc> {
    end.checked_sub_signed(window).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Fetches `job.window` up to `end` in batches and installs every track that
/// normalizes. A failed batch or satellite leaves its previous tracks in place.
pub async fn refresh_once<P: PositionProvider>(
    provider: &P,
    store: &PositionStore,
    job: &FeedJob,
    end: DateTime<Utc>,
) -> RefreshReport {
    let start = window_start(end, job.window);
    let mut report = RefreshReport::default();

    for batch in job.satellites.chunks(job.batch_size.max(1)) {
        let coordinate_system = job.normalizer.coordinate_system();
        match provider.locations(batch, start, end, coordinate_system).await {
            Ok(response) => install(response, batch, store, &job.normalizer, &mut report),
            Err(error) => {
                log::warn!("Fetch failed for {}: {}", batch.join(","), error);
                report
                    .failures
                    .extend(batch.iter().map(|satellite| SatelliteFailure {
                        satellite: satellite.clone(),
                        error: error.clone(),
                    }));
            }
        }
    }

    report
}

fn install(
    response: ProviderResponse,
    requested: &[String],
    store: &PositionStore,
    normalizer: &Normalizer,
    report: &mut RefreshReport,
) {
    for id in requested {
        if !response.data.iter().any(|d| d.id.eq_ignore_ascii_case(id)) {
            log::debug!("{}: no data in response", id);
            report.missing.push(id.clone());
        }
    }

    for data in &response.data {
        match normalizer.normalize(data) {
            Ok(normalized) => {
                log::debug!("{}: installing {} samples", data.id, normalized.track.len());
                report.skipped_samples += normalized.skipped;
                store.replace_track(&data.id, normalized.track);
                report.installed.push(data.id.clone());
            }
            Err(error) => {
                log::warn!("{}", error);
                report.failures.push(SatelliteFailure {
                    satellite: data.id.clone(),
                    error,
                });
            }
        }
    }
}

struct WorkerHandle {
    stop_tx: oneshot::Sender<()>,
    join: JoinHandle<usize>,
}

/// Periodic refresh running on its own task.
#[derive(Default)]
pub struct Poller {
    worker: Option<WorkerHandle>,
}

impl Poller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Starts refreshing every `interval`. Each cycle's report is sent on the
    /// returned channel; dropping the receiver does not stop the poller.
    pub fn start<P>(
        &mut self,
        provider: Arc<P>,
        store: Arc<PositionStore>,
        job: FeedJob,
        interval: std::time::Duration,
    ) -> Result<mpsc::UnboundedReceiver<RefreshReport>, FeedError>
    where
        P: PositionProvider + 'static,
    {
        if self.worker.is_some() {
            return Err(FeedError::AlreadyRunning);
        }

        let (stop_tx, stop_rx) = oneshot::channel();
        let (report_tx, report_rx) = mpsc::unbounded_channel();

        let join = tokio::spawn(run_poll_loop(
            provider, store, job, interval, stop_rx, report_tx,
        ));

        self.worker = Some(WorkerHandle { stop_tx, join });
        Ok(report_rx)
    }

    /// Stops after the cycle in flight, returning the number of completed cycles.
    pub async fn stop(&mut self) -> usize {
        match self.worker.take() {
            Some(worker) => {
                let _ = worker.stop_tx.send(());
                worker.join.await.unwrap_or(0)
            }
            None => 0,
        }
    }
}

async fn run_poll_loop<P: PositionProvider>(
    provider: Arc<P>,
    store: Arc<PositionStore>,
    job: FeedJob,
    interval: std::time::Duration,
    mut stop_rx: oneshot::Receiver<()>,
    report_tx: mpsc::UnboundedSender<RefreshReport>,
) -> usize {
    let mut cycles = 0;

    loop {
        let report = refresh_once(provider.as_ref(), &store, &job, Utc::now()).await;
        cycles += 1;

        log::info!(
            "Refresh {}: {} tracks installed, {} failed, {} samples skipped",
            cycles,
            report.installed.len(),
            report.failures.len(),
            report.skipped_samples
        );
        let _ = report_tx.send(report);

        let should_stop = tokio::select! {
            _ = sleep(interval) => false,
            _ = &mut stop_rx => true,
        };
        if should_stop {
            break;
        }
    }

    cycles
}
