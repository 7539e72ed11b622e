use log::{debug, warn};
use rand::Rng;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore, mpsc, watch};
use tokio::time::{Duration, Instant, sleep};
use url::Url;

use crate::config::Config;
use crate::core::constants::{channels, error_messages, http_status, timeouts};
use crate::core::types::{Action, Link, Outcome};
use crate::validation::cooldown::{CooldownTable, host_key};
use crate::validation::gate::DedupGate;
use crate::validation::probe::{Probe, Verdict};

/// Knobs of the validator pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    /// Upper bound of probes in flight at the same time
    pub concurrency: usize,
    /// Pause a worker takes after each probe before taking the next link
    pub wait: Duration,
    /// 429 responses tolerated per URL before reporting an error
    pub max_retries: u32,
    /// Largest random delay added on top of every delayed retry
    pub max_jitter: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl PoolSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            concurrency: config.concurrency().max(1),
            wait: config.wait_duration(),
            max_retries: config.max_retries(),
            max_jitter: Duration::from_millis(timeouts::MAX_RETRY_JITTER_MS),
        }
    }
}

/// State shared by every worker of one run.
#[derive(Debug, Clone, Default)]
pub struct SharedState {
    pub gate: Arc<DedupGate>,
    pub cooldowns: Arc<CooldownTable>,
}

/// A link travelling through the dispatch queue.
#[derive(Debug, Clone)]
struct Job {
    link: Link,
    /// 429 responses this link has received so far
    rate_limited: u32,
}

impl Job {
    fn new(link: Link) -> Self {
        Self {
            link,
            rate_limited: 0,
        }
    }
}

/// Units of unfinished work.
///
/// Starts at one for the intake side, which is released once the link
/// sender is dropped, and holds one more unit per admitted link until that
/// link produced its action. Queued, in-flight and delayed links all count.
#[derive(Debug)]
struct Outstanding {
    count: watch::Sender<usize>,
}

impl Outstanding {
    fn new() -> Self {
        let (count, _) = watch::channel(1);
        Self { count }
    }

    fn add(&self) {
        self.count.send_modify(|n| *n += 1);
    }

    fn done(&self) {
        self.count.send_modify(|n| *n = n.saturating_sub(1));
    }

    /// Resolves once no work is left.
    async fn idle(&self) {
        let mut count = self.count.subscribe();
        let _ = count.wait_for(|n| *n == 0).await;
    }
}

/// Validates links with a bounded number of concurrent probes.
///
/// Links go in through the sender returned by [`ValidatorPool::start`];
/// one [`Action`] per distinct URL comes out of the receiver. The receiver
/// closes once the sender has been dropped and every admitted link is
/// resolved, including links waiting out a rate limit.
pub struct ValidatorPool {
    probe: Arc<dyn Probe>,
    state: SharedState,
    settings: PoolSettings,
}

impl ValidatorPool {
    pub fn new(probe: Arc<dyn Probe>, settings: PoolSettings) -> Self {
        Self {
            probe,
            state: SharedState::default(),
            settings,
        }
    }

    /// Use an existing gate and cooldown table instead of fresh ones.
    pub fn with_state(mut self, state: SharedState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> SharedState {
        self.state.clone()
    }

    /// Spawn the intake and dispatch tasks. Must be called inside a tokio
    /// runtime.
    pub fn start(self) -> (mpsc::Sender<Link>, mpsc::Receiver<Action>) {
        let (links_tx, links_rx) = mpsc::channel(channels::INTAKE_CAPACITY);
        let (queue_tx, queue_rx) = mpsc::channel(channels::DISPATCH_QUEUE_CAPACITY);
        let (results_tx, results_rx) = mpsc::channel(channels::RESULT_CAPACITY);
        let outstanding = Arc::new(Outstanding::new());

        tokio::spawn(admit(
            links_rx,
            queue_tx.clone(),
            Arc::clone(&self.state.gate),
            Arc::clone(&outstanding),
        ));

        let concurrency = self.settings.concurrency.max(1);
        let worker = Arc::new(Worker {
            probe: self.probe,
            state: self.state,
            settings: self.settings,
            queue: queue_tx,
            results: results_tx,
            outstanding,
        });
        tokio::spawn(dispatch(queue_rx, worker, concurrency));

        (links_tx, results_rx)
    }
}

/// Forward links that pass the deduplication gate into the dispatch queue.
async fn admit(
    mut links: mpsc::Receiver<Link>,
    queue: mpsc::Sender<Job>,
    gate: Arc<DedupGate>,
    outstanding: Arc<Outstanding>,
) {
    while let Some(link) = links.recv().await {
        if !gate.try_claim(link.url()) {
            debug!("Already seen {link}, skipping");
            continue;
        }

        outstanding.add();
        if queue.send(Job::new(link)).await.is_err() {
            outstanding.done();
            break;
        }
    }

    // Extraction finished
    outstanding.done();
}

/// Hand queued jobs to workers, at most `concurrency` at a time, until no
/// work is outstanding.
async fn dispatch(mut queue: mpsc::Receiver<Job>, worker: Arc<Worker>, concurrency: usize) {
    let slots = Arc::new(Semaphore::new(concurrency));
    let outstanding = Arc::clone(&worker.outstanding);

    loop {
        tokio::select! {
            biased;
            Some(job) = queue.recv() => {
                let Ok(permit) = Arc::clone(&slots).acquire_owned().await else {
                    break;
                };
                tokio::spawn(Arc::clone(&worker).run(job, permit));
            }
            _ = outstanding.idle() => break,
        }
    }

    debug!("All links resolved, closing result channel");
}

struct Worker {
    probe: Arc<dyn Probe>,
    state: SharedState,
    settings: PoolSettings,
    queue: mpsc::Sender<Job>,
    results: mpsc::Sender<Action>,
    outstanding: Arc<Outstanding>,
}

impl Worker {
    /// Take one job from `queued` to either a terminal action or back into
    /// the queue.
    async fn run(self: Arc<Self>, job: Job, permit: OwnedSemaphorePermit) {
        let url = match Url::parse(job.link.url()) {
            Ok(url) => url,
            Err(err) => {
                self.finish(job.link, Outcome::error(None, format!("invalid URL: {err}")))
                    .await;
                return;
            }
        };
        let host = host_key(&url);

        if let Some(host) = host.as_deref()
            && let Some(remaining) = self.state.cooldowns.remaining(host)
        {
            debug!("{host} is cooling down for {remaining:?}, postponing {}", job.link);
            drop(permit);
            self.requeue(job, remaining);
            return;
        }

        match self.probe.probe(&url).await {
            Verdict::Done(outcome) => self.finish(job.link, outcome).await,
            Verdict::RateLimited { retry_after } => {
                if let Some(host) = host.as_deref() {
                    self.state
                        .cooldowns
                        .set_cooldown(host, Instant::now() + retry_after);
                }

                if job.rate_limited >= self.settings.max_retries {
                    warn!(
                        "Giving up on {} after {} rate limited retries",
                        job.link, job.rate_limited
                    );
                    let reason = format!(
                        "{} {} retries",
                        error_messages::RATE_LIMIT_EXHAUSTED,
                        job.rate_limited
                    );
                    self.finish(
                        job.link,
                        Outcome::error(Some(http_status::TOO_MANY_REQUESTS), reason),
                    )
                    .await;
                } else {
                    debug!("Rate limited on {}, retrying in {retry_after:?}", job.link);
                    let retry = Job {
                        rate_limited: job.rate_limited + 1,
                        ..job
                    };
                    self.requeue(retry, retry_after);
                }
            }
        }

        if !self.settings.wait.is_zero() {
            sleep(self.settings.wait).await;
        }
        drop(permit);
    }

    /// Put `job` back into the dispatch queue after `delay` plus jitter.
    /// The job stays outstanding while it waits.
    fn requeue(&self, job: Job, delay: Duration) {
        let delay = delay + self.jitter();
        let queue = self.queue.clone();
        let outstanding = Arc::clone(&self.outstanding);

        tokio::spawn(async move {
            sleep(delay).await;
            if let Err(mpsc::error::SendError(job)) = queue.send(job).await {
                warn!("Dispatch queue closed, dropping {}", job.link);
                outstanding.done();
            }
        });
    }

    fn jitter(&self) -> Duration {
        let max = self.settings.max_jitter.as_millis() as u64;
        if max == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::rng().random_range(0..=max))
    }

    async fn finish(&self, link: Link, outcome: Outcome) {
        if self.results.send(Action::new(link, outcome)).await.is_err() {
            debug!("Result receiver dropped, discarding action");
        }
        self.outstanding.done();
    }
}
