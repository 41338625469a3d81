// crates/storefront-core/src/search/executor.rs

//! # Request executors
//!
//! An executor turns a settled query into an in-flight request and hands the
//! completion back to the thread that owns the [`SearchController`].
//!
//! [`SearchController`]: super::SearchController

use crate::api::CatalogClient;
use crate::error::{Result, StoreError};
use crate::model::SearchResult;
use log::{debug, warn};
use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// A search the controller wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Identifier that lets the controller correlate the completion with the
    /// cycle that issued it.
    pub seq: u64,
    /// Settled query text.
    pub query: String,
}

/// The answer to a [`SearchRequest`].
#[derive(Debug)]
pub struct Completion {
    pub seq: u64,
    pub outcome: Result<Vec<SearchResult>>,
}

pub trait RequestExecutor {
    /// Starts the request. Must not block on the network.
    fn submit(&mut self, request: SearchRequest);

    /// Completions that arrived since the last call, in arrival order.
    fn poll(&mut self) -> Vec<Completion>;

    /// Every request with a sequence number below `latest` is stale. An
    /// executor may skip queued work for those; it is never required to.
    fn invalidate(&mut self, _latest: u64) {}
}

// -----------------------------------------------------------------------------
// BACKGROUND WORKER
// -----------------------------------------------------------------------------

/// Commands understood by the background search worker.
#[derive(Debug)]
enum WorkerCommand {
    Query(SearchRequest),
    Shutdown,
}

/// Runs searches on one background thread.
///
/// Requests are served in submission order. Queued requests that were
/// invalidated before the worker got to them are dropped without touching
/// the network; a request already on the wire is allowed to finish and its
/// completion is delivered (the controller discards it).
///
/// If the worker thread dies (a panicking client), the latest outstanding
/// request and every later submission complete with a transport error.
pub struct ThreadExecutor {
    command_tx: Sender<WorkerCommand>,
    result_rx: Receiver<Completion>,
    latest_seq: Arc<AtomicU64>,
    /// Latest submitted request still waiting for its completion.
    outstanding: Option<u64>,
    /// Failures produced locally because the worker is gone.
    orphaned: Vec<Completion>,
}

impl ThreadExecutor {
    /// Launches the worker thread, which owns `client` from now on.
    pub fn spawn<C>(client: C) -> Result<Self>
    where
        C: CatalogClient + 'static,
    {
        let (command_tx, command_rx) = mpsc::channel();
        let (result_tx, result_rx) = mpsc::channel();
        let latest_seq = Arc::new(AtomicU64::new(0));
        let thread_latest = Arc::clone(&latest_seq);

        thread::Builder::new()
            .name("storefront-search".into())
            .spawn(move || worker_loop(&client, command_rx, result_tx, &thread_latest))
            .map_err(StoreError::Io)?;

        Ok(Self {
            command_tx,
            result_rx,
            latest_seq,
            outstanding: None,
            orphaned: Vec::new(),
        })
    }

    /// Like [`RequestExecutor::poll`], but waits up to `timeout` for the first
    /// completion when none is ready yet.
    pub fn poll_timeout(&mut self, timeout: Duration) -> Vec<Completion> {
        if !self.orphaned.is_empty() {
            return self.poll();
        }
        match self.result_rx.recv_timeout(timeout) {
            Ok(completion) => {
                let mut out = Vec::new();
                self.record(completion, &mut out);
                out.extend(self.poll());
                out
            }
            Err(RecvTimeoutError::Timeout) => Vec::new(),
            Err(RecvTimeoutError::Disconnected) => {
                let mut out = Vec::new();
                self.worker_gone(&mut out);
                out
            }
        }
    }

    fn record(&mut self, completion: Completion, out: &mut Vec<Completion>) {
        if self.outstanding == Some(completion.seq) {
            self.outstanding = None;
        }
        out.push(completion);
    }

    fn worker_gone(&mut self, out: &mut Vec<Completion>) {
        if let Some(seq) = self.outstanding.take() {
            warn!("search worker stopped before answering #{seq}");
            out.push(worker_stopped(seq));
        }
    }
}

fn worker_stopped(seq: u64) -> Completion {
    Completion {
        seq,
        outcome: Err(StoreError::Io(io::Error::new(
            io::ErrorKind::BrokenPipe,
            "search worker stopped",
        ))),
    }
}

impl RequestExecutor for ThreadExecutor {
    fn submit(&mut self, request: SearchRequest) {
        let seq = request.seq;
        self.latest_seq.fetch_max(seq, Ordering::SeqCst);
        if self.command_tx.send(WorkerCommand::Query(request)).is_err() {
            warn!("search worker is gone; failing #{seq}");
            self.orphaned.push(worker_stopped(seq));
            return;
        }
        self.outstanding = Some(seq);
    }

    fn poll(&mut self) -> Vec<Completion> {
        let mut out = std::mem::take(&mut self.orphaned);
        loop {
            match self.result_rx.try_recv() {
                Ok(completion) => self.record(completion, &mut out),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.worker_gone(&mut out);
                    break;
                }
            }
        }
        out
    }

    fn invalidate(&mut self, latest: u64) {
        self.latest_seq.fetch_max(latest, Ordering::SeqCst);
    }
}

impl Drop for ThreadExecutor {
    fn drop(&mut self) {
        // The worker may be blocked on the network; it exits after that call.
        let _ = self.command_tx.send(WorkerCommand::Shutdown);
    }
}

fn worker_loop<C: CatalogClient>(
    client: &C,
    command_rx: Receiver<WorkerCommand>,
    result_tx: Sender<Completion>,
    latest_seq: &AtomicU64,
) {
    while let Ok(command) = command_rx.recv() {
        match command {
            WorkerCommand::Query(request) => {
                if request.seq < latest_seq.load(Ordering::SeqCst) {
                    debug!("skipping stale search #{} ({:?})", request.seq, request.query);
                    continue;
                }
                let outcome = client.search(&request.query);
                let completion = Completion {
                    seq: request.seq,
                    outcome,
                };
                if result_tx.send(completion).is_err() {
                    break;
                }
            }
            WorkerCommand::Shutdown => break,
        }
    }
}

// -----------------------------------------------------------------------------
// HOST-DRIVEN EXECUTOR
// -----------------------------------------------------------------------------

/// Records requests and leaves it to the host to perform them.
///
/// The host drains [`QueuedExecutor::take_submitted`], does the I/O however
/// it likes and reports back with [`QueuedExecutor::resolve`], in any order.
/// The controller picks the completions up on its next `tick`.
#[derive(Debug, Default)]
pub struct QueuedExecutor {
    issued: Vec<SearchRequest>,
    ready: VecDeque<Completion>,
    latest_invalidated: u64,
}

impl QueuedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submitted requests not yet taken by the host, oldest first.
    pub fn issued(&self) -> &[SearchRequest] {
        &self.issued
    }

    pub fn last_issued(&self) -> Option<&SearchRequest> {
        self.issued.last()
    }

    /// Hands the submitted requests over to the host and forgets them.
    pub fn take_submitted(&mut self) -> Vec<SearchRequest> {
        std::mem::take(&mut self.issued)
    }

    /// Untaken requests that are not yet known to be stale.
    pub fn live(&self) -> impl Iterator<Item = &SearchRequest> {
        let floor = self.latest_invalidated;
        self.issued.iter().filter(move |r| r.seq >= floor)
    }

    pub fn resolve(&mut self, seq: u64, outcome: Result<Vec<SearchResult>>) {
        self.ready.push_back(Completion { seq, outcome });
    }
}

impl RequestExecutor for QueuedExecutor {
    fn submit(&mut self, request: SearchRequest) {
        self.issued.push(request);
    }

    fn poll(&mut self) -> Vec<Completion> {
        self.ready.drain(..).collect()
    }

    fn invalidate(&mut self, latest: u64) {
        self.latest_invalidated = self.latest_invalidated.max(latest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Product;
    use std::sync::Mutex;
    use std::time::Instant;

    /// Answers every query with a single result named after it. Queries
    /// starting with "slow" wait for the gate first.
    struct GatedCatalog {
        gate: Mutex<Receiver<()>>,
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl CatalogClient for GatedCatalog {
        fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
            self.seen.lock().unwrap().push(query.to_string());
            if query.starts_with("slow") {
                let _ = self.gate.lock().unwrap().recv();
            }
            Ok(vec![SearchResult::new(query)])
        }

        fn product(&self, _id: &str) -> Result<Option<Product>> {
            Ok(None)
        }
    }

    struct PanickingCatalog;

    impl CatalogClient for PanickingCatalog {
        fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
            panic!("catalog client blew up on {query:?}");
        }

        fn product(&self, _id: &str) -> Result<Option<Product>> {
            Ok(None)
        }
    }

    fn collect(exec: &mut ThreadExecutor, want: usize) -> Vec<Completion> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut out = Vec::new();
        while out.len() < want && Instant::now() < deadline {
            out.extend(exec.poll_timeout(Duration::from_millis(50)));
        }
        out
    }

    #[test]
    fn worker_delivers_completions() {
        let (_gate_tx, gate_rx) = mpsc::channel();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let client = GatedCatalog {
            gate: Mutex::new(gate_rx),
            seen: Arc::clone(&seen),
        };
        let mut exec = ThreadExecutor::spawn(client).unwrap();
        exec.submit(SearchRequest { seq: 1, query: "abc".into() });

        let done = collect(&mut exec, 1);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].seq, 1);
        assert_eq!(done[0].outcome.as_ref().unwrap()[0].name(), "abc");
    }

    #[test]
    fn worker_skips_queued_stale_requests() {
        let (gate_tx, gate_rx) = mpsc::channel();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let client = GatedCatalog {
            gate: Mutex::new(gate_rx),
            seen: Arc::clone(&seen),
        };
        let mut exec = ThreadExecutor::spawn(client).unwrap();

        exec.submit(SearchRequest { seq: 1, query: "slow one".into() });
        // wait until the worker is blocked inside the first request
        let deadline = Instant::now() + Duration::from_secs(5);
        while seen.lock().unwrap().is_empty() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        exec.submit(SearchRequest { seq: 2, query: "two".into() });
        exec.submit(SearchRequest { seq: 3, query: "three".into() });
        gate_tx.send(()).unwrap();

        let done = collect(&mut exec, 2);
        let seqs: Vec<u64> = done.iter().map(|c| c.seq).collect();
        assert_eq!(seqs, vec![1, 3]);
        assert_eq!(*seen.lock().unwrap(), vec!["slow one", "three"]);
    }

    #[test]
    fn queued_executor_resolves_in_any_order() {
        let mut exec = QueuedExecutor::new();
        exec.submit(SearchRequest { seq: 1, query: "abc".into() });
        exec.submit(SearchRequest { seq: 2, query: "abcd".into() });
        exec.invalidate(2);
        assert_eq!(exec.live().count(), 1);

        exec.resolve(2, Ok(vec![]));
        exec.resolve(1, Ok(vec![SearchResult::new("x")]));
        let seqs: Vec<u64> = exec.poll().iter().map(|c| c.seq).collect();
        assert_eq!(seqs, vec![2, 1]);
        assert!(exec.poll().is_empty());
    }

    #[test]
    fn dead_worker_fails_outstanding_and_later_requests() {
        let mut exec = ThreadExecutor::spawn(PanickingCatalog).unwrap();
        exec.submit(SearchRequest { seq: 1, query: "abc".into() });

        let done = collect(&mut exec, 1);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].seq, 1);
        let err = done[0].outcome.as_ref().unwrap_err();
        assert_eq!(err.kind(), crate::error::FailureKind::Transport);

        exec.submit(SearchRequest { seq: 2, query: "abcd".into() });
        let done = collect(&mut exec, 1);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].seq, 2);
        assert!(done[0].outcome.is_err());
        assert!(exec.poll_timeout(Duration::from_millis(10)).is_empty());
    }

    #[test]
    fn take_submitted_drains_requests() {
        let mut exec = QueuedExecutor::new();
        exec.submit(SearchRequest { seq: 1, query: "abc".into() });
        exec.submit(SearchRequest { seq: 2, query: "abcd".into() });

        let taken = exec.take_submitted();
        assert_eq!(taken.len(), 2);
        assert!(exec.issued().is_empty());
        assert_eq!(exec.live().count(), 0);

        exec.submit(SearchRequest { seq: 3, query: "abcde".into() });
        exec.invalidate(3);
        assert_eq!(exec.live().map(|r| r.seq).collect::<Vec<_>>(), vec![3]);
    }
}
