//! Concurrent walk-and-scan pipeline.
//!
//! [`scan`] walks a [`FileTree`] on tokio's blocking pool, spawns one task per
//! file whose path matches the pattern set, and funnels every URL those tasks
//! find into a single bounded channel. The channel closes only after the walk
//! has stopped and every spawned task has returned.

use futures::stream::Stream;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};

use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll};

use crate::core::constants::scanning;
use crate::core::error::Result;
use crate::core::types::Match;
use crate::discovery::extract::find_urls;
use crate::discovery::patterns::PatternSet;
use crate::discovery::tree::FileTree;
use crate::reporting::logging::Logger;

/// Cooperative cancellation flag.
///
/// Cancelling is a request, never an interruption: the walk polls it before
/// spawning work, and tasks already reading a file run to completion. A child
/// token observes its parent's cancellation, but cancelling the child leaves
/// the parent untouched.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    parent: Option<Arc<CancellationToken>>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child_token(&self) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            parent: Some(Arc::new(self.clone())),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
            || self
                .parent
                .as_ref()
                .is_some_and(|parent| parent.is_cancelled())
    }
}

/// Knobs for a single scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Matches buffered before scan tasks start waiting on the consumer
    pub channel_capacity: usize,
    pub logger: Logger,
    /// Caller-side cancellation the scan should observe
    pub cancellation: Option<CancellationToken>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            channel_capacity: scanning::DEFAULT_CHANNEL_CAPACITY,
            logger: Logger::default(),
            cancellation: None,
        }
    }
}

impl ScanOptions {
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

/// Receiving end of a scan.
///
/// Yields matches until every scan task has finished, then `None`. Dropping
/// the stream, or calling [`MatchStream::finish`] before it is drained, tells
/// the scan nobody is listening any more.
#[derive(Debug)]
pub struct MatchStream {
    receiver: mpsc::Receiver<Match>,
    token: CancellationToken,
    session: JoinHandle<Result<()>>,
}

impl MatchStream {
    /// Next match, or `None` once the scan is over and the buffer is empty.
    pub async fn recv(&mut self) -> Option<Match> {
        self.receiver.recv().await
    }

    /// Stop traversing and spawning. In-flight tasks still deliver.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Stop listening, wait for the scan to wind down and return the walk's
    /// terminal error, if any.
    pub async fn finish(self) -> Result<()> {
        let MatchStream {
            receiver, session, ..
        } = self;
        drop(receiver);
        session.await?
    }
}

impl Stream for MatchStream {
    type Item = Match;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Match>> {
        self.receiver.poll_recv(cx)
    }
}

/// Scan `tree` for URLs in files matching any of `patterns`.
///
/// Returns immediately; all work happens on the current tokio runtime. Must
/// be called from within a runtime.
pub fn scan<T: FileTree>(tree: Arc<T>, patterns: Vec<String>, options: ScanOptions) -> MatchStream {
    let (sender, receiver) = mpsc::channel(options.channel_capacity.max(1));
    let token = options
        .cancellation
        .as_ref()
        .map(CancellationToken::child_token)
        .unwrap_or_default();

    let walker = Walker {
        tree,
        patterns: PatternSet::new(patterns),
        sender,
        token: token.clone(),
        logger: options.logger,
        handle: Handle::current(),
    };
    let session = tokio::spawn(run_session(walker));

    MatchStream {
        receiver,
        token,
        session,
    }
}

async fn run_session<T: FileTree>(walker: Walker<T>) -> Result<()> {
    let logger = walker.logger;
    let (outcome, mut tasks) = tokio::task::spawn_blocking(move || walker.walk()).await?;

    while let Some(joined) = tasks.join_next().await {
        if let Err(err) = joined {
            logger.debug(format_args!("scan task failed: {err}"));
        }
    }

    match &outcome {
        Ok(()) => logger.debug(format_args!("done scanning")),
        Err(err) => logger.debug(format_args!("walk aborted: {err}")),
    }
    outcome
}

struct Walker<T> {
    tree: Arc<T>,
    patterns: PatternSet,
    sender: mpsc::Sender<Match>,
    token: CancellationToken,
    logger: Logger,
    handle: Handle,
}

impl<T: FileTree> Walker<T> {
    /// Runs on a blocking thread. Hands the spawned tasks back so the session
    /// can wait for them.
    fn walk(self) -> (Result<()>, JoinSet<()>) {
        let mut tasks = JoinSet::new();
        let outcome = self.visit_entries(&mut tasks);
        if outcome.is_err() {
            self.token.cancel();
        }
        (outcome, tasks)
    }

    fn visit_entries(&self, tasks: &mut JoinSet<()>) -> Result<()> {
        for entry in self.tree.entries() {
            let entry = entry?;
            if !entry.is_regular_file() || !self.patterns.matches(&entry.path)? {
                continue;
            }

            if self.sender.is_closed() {
                // Receiver dropped before the walk finished
                self.token.cancel();
            }
            if self.token.is_cancelled() {
                self.logger.debug(format_args!("scanning canceled"));
                return Ok(());
            }

            let task = ScanTask {
                tree: Arc::clone(&self.tree),
                path: entry.path,
                sender: self.sender.clone(),
                token: self.token.clone(),
                logger: self.logger,
            };
            tasks.spawn_on(task.run(), &self.handle);
            reap_finished(tasks, self.logger);
        }
        Ok(())
    }
}

/// Drop the bookkeeping of tasks that have already returned, without waiting.
/// Returns how many were removed.
fn reap_finished(tasks: &mut JoinSet<()>, logger: Logger) -> usize {
    let mut reaped = 0;
    while let Some(joined) = tasks.try_join_next() {
        if let Err(err) = joined {
            logger.debug(format_args!("scan task failed: {err}"));
        }
        reaped += 1;
    }
    reaped
}

struct ScanTask<T> {
    tree: Arc<T>,
    path: String,
    sender: mpsc::Sender<Match>,
    token: CancellationToken,
    logger: Logger,
}

impl<T: FileTree> ScanTask<T> {
    async fn run(self) {
        self.logger.verbose(format_args!("scanning {}", self.path));

        let content = match self.tree.read_file(&self.path).await {
            Ok(content) => content,
            Err(err) => {
                self.logger.debug(format_args!("read {}: {}", self.path, err));
                return;
            }
        };

        let urls: Vec<String> = find_urls(&content).collect();
        for url in urls {
            let found = Match {
                url,
                path: self.path.clone(),
            };
            if self.sender.send(found).await.is_err() {
                // Receiver dropped: nobody wants the rest of the scan
                self.token.cancel();
                return;
            }
        }
    }
}
