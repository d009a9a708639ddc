//! Bounded worker pool that solves every sub-instance of a partitioned instance
//!
//! The calling thread runs the only control loop: it hands out sub-instances,
//! receives responses and owns the aggregator and the counters. Workers are
//! plain threads that own nothing but the sub-instance they are solving.

use crate::algorithm::aggregate::{DisplaySolution, ResultAggregator};
use crate::algorithm::matrix::{Item, OptionMap};
use crate::algorithm::partition::{SubInstance, partition};
use crate::algorithm::protocol::{WorkerRequest, WorkerResponse, serve};
use crate::algorithm::search::SearchOutcome;
use crate::io::configuration::{DISPATCH_POLL_MS, SolveConfig};
use crate::io::error::{CoverError, Result};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded, unbounded};
use std::any::Any;
use std::collections::VecDeque;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Sub-instance counters of a running solve
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchProgress {
    /// Sub-instances whose worker reported completion
    pub completed: usize,
    /// Sub-instances currently assigned to a worker
    pub in_flight: usize,
    /// Sub-instances in the whole solve
    pub total: usize,
    /// Distinct solutions recorded so far
    pub solutions: usize,
}

impl DispatchProgress {
    /// Sub-instances not yet completed, including those in flight
    pub const fn remaining(&self) -> usize {
        self.total.saturating_sub(self.completed)
    }
}

/// Notification passed to the observer of [`Dispatcher::run`]
#[derive(Debug)]
pub enum DispatchEvent<'a> {
    /// Validation passed and workers are about to receive work
    Started {
        /// Number of sub-instances
        total: usize,
        /// Number of worker threads
        workers: usize,
    },
    /// A solution not seen before was recorded
    Solution(&'a DisplaySolution),
    /// A sub-instance completed
    Progress(DispatchProgress),
    /// Every sub-instance completed
    Finished(DispatchProgress),
}

/// Everything a finished solve produced
#[derive(Debug)]
pub struct SolveReport {
    /// The aggregator holding every distinct solution
    pub aggregator: ResultAggregator,
    /// Final counters
    pub progress: DispatchProgress,
    /// Number of worker threads used
    pub workers: usize,
    /// Wall-clock time from validation to the last completion
    pub elapsed: Duration,
    /// Sub-instances a worker could not solve, counted as completed
    pub failures: Vec<CoverError>,
}

/// What a worker sends back to the control loop
enum Reply {
    Response(WorkerResponse),
    /// The request could not be solved; stands in for its completion
    Failed(CoverError),
}

/// A running worker as seen from the control loop
struct WorkerSlot<I> {
    /// Dropped once the queue is empty, which lets the worker exit
    requests: Option<Sender<WorkerRequest<I>>>,
    handle: JoinHandle<()>,
    busy: bool,
}

/// Runs partitioned solves on a bounded pool of threads
#[derive(Clone, Debug)]
pub struct Dispatcher {
    config: SolveConfig,
}

impl Dispatcher {
    /// Create a dispatcher after validating its configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn new(config: SolveConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this dispatcher runs with
    pub const fn config(&self) -> &SolveConfig {
        &self.config
    }

    /// Partition the instance, solve every sub-instance and merge the results
    ///
    /// The instance is validated before any thread starts. Sub-instances are
    /// handed out largest first; a worker gets the next one as soon as it
    /// reports completion of its current one. `observe` is called from the
    /// calling thread for every [`DispatchEvent`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The instance fails validation, including items no option covers
    /// - A worker thread cannot be started
    /// - A worker thread dies before completing its sub-instance
    pub fn run<I, F>(
        &self,
        universe: &[I],
        options: &OptionMap<I>,
        aggregator: ResultAggregator,
        mut observe: F,
    ) -> Result<SolveReport>
    where
        I: Item,
        F: FnMut(DispatchEvent<'_>),
    {
        let start = Instant::now();
        let queue: VecDeque<SubInstance<I>> =
            partition(universe, options, &self.config.given_options)?.into();
        let total = queue.len();
        let workers = self.config.effective_concurrency().min(total);

        let abort = Arc::new(AtomicBool::new(false));
        let (response_tx, response_rx) = unbounded();
        let mut slots = Vec::with_capacity(workers);
        for worker in 0..workers {
            match self.spawn_worker(worker, response_tx.clone(), Arc::clone(&abort)) {
                Ok(slot) => slots.push(slot),
                Err(error) => {
                    shut_down(&abort, slots)?;
                    return Err(error);
                }
            }
        }
        drop(response_tx);

        observe(DispatchEvent::Started { total, workers });

        let mut pool = Pool {
            slots,
            queue,
            responses: response_rx,
            aggregator,
            progress: DispatchProgress {
                total,
                ..DispatchProgress::default()
            },
            failures: Vec::new(),
        };
        let result = pool.drive(&mut observe);
        let Pool {
            slots,
            aggregator,
            progress,
            failures,
            ..
        } = pool;
        // A panic explains a disconnect, so it is reported first
        shut_down(&abort, slots)?;
        result?;

        observe(DispatchEvent::Finished(progress));
        Ok(SolveReport {
            aggregator,
            progress,
            workers,
            elapsed: start.elapsed(),
            failures,
        })
    }

    fn spawn_worker<I: Item>(
        &self,
        worker: usize,
        responses: Sender<(usize, Reply)>,
        abort: Arc<AtomicBool>,
    ) -> Result<WorkerSlot<I>> {
        let (request_tx, request_rx) = bounded(1);
        let pulse_interval = self.config.pulse_interval;
        let handle = thread::Builder::new()
            .name(format!("wordlinks-worker-{worker}"))
            .spawn(move || work(worker, &request_rx, &responses, &abort, pulse_interval))
            .map_err(|source| CoverError::WorkerSpawn { worker, source })?;
        Ok(WorkerSlot {
            requests: Some(request_tx),
            handle,
            busy: false,
        })
    }
}

/// State of the control loop
struct Pool<I> {
    slots: Vec<WorkerSlot<I>>,
    queue: VecDeque<SubInstance<I>>,
    responses: Receiver<(usize, Reply)>,
    aggregator: ResultAggregator,
    progress: DispatchProgress,
    failures: Vec<CoverError>,
}

impl<I: Item> Pool<I> {
    fn drive<F>(&mut self, observe: &mut F) -> Result<()>
    where
        F: FnMut(DispatchEvent<'_>),
    {
        for worker in 0..self.slots.len() {
            self.assign(worker)?;
        }

        let poll = Duration::from_millis(DISPATCH_POLL_MS);
        while self.progress.completed < self.progress.total {
            match self.responses.recv_timeout(poll) {
                Ok((_, Reply::Response(WorkerResponse::Solution { solution }))) => {
                    if let Some(display) = self.aggregator.record(solution) {
                        self.progress.solutions += 1;
                        observe(DispatchEvent::Solution(display));
                    }
                }
                Ok((worker, Reply::Response(WorkerResponse::Completed))) => {
                    self.complete(worker, observe)?;
                }
                Ok((worker, Reply::Failed(error))) => {
                    self.failures.push(error);
                    self.complete(worker, observe)?;
                }
                Err(RecvTimeoutError::Timeout) => self.check_workers()?,
                Err(RecvTimeoutError::Disconnected) => {
                    let worker = self.slots.iter().position(|slot| slot.busy).unwrap_or(0);
                    return Err(CoverError::WorkerDisconnected { worker });
                }
            }
        }
        Ok(())
    }

    fn complete<F>(&mut self, worker: usize, observe: &mut F) -> Result<()>
    where
        F: FnMut(DispatchEvent<'_>),
    {
        self.progress.completed += 1;
        self.progress.in_flight = self.progress.in_flight.saturating_sub(1);
        if let Some(slot) = self.slots.get_mut(worker) {
            slot.busy = false;
        }
        self.assign(worker)?;
        observe(DispatchEvent::Progress(self.progress));
        Ok(())
    }

    /// Give the next queued sub-instance to an idle worker, or release the
    /// worker when the queue is empty
    fn assign(&mut self, worker: usize) -> Result<()> {
        let Some(slot) = self.slots.get_mut(worker) else {
            return Ok(());
        };
        let Some(sub_instance) = self.queue.pop_front() else {
            slot.requests = None;
            return Ok(());
        };
        let sent = slot
            .requests
            .as_ref()
            .is_some_and(|requests| requests.send(sub_instance.into_request()).is_ok());
        if !sent {
            return Err(CoverError::WorkerDisconnected { worker });
        }
        slot.busy = true;
        self.progress.in_flight += 1;
        Ok(())
    }

    fn check_workers(&self) -> Result<()> {
        match self
            .slots
            .iter()
            .position(|slot| slot.busy && slot.handle.is_finished())
        {
            Some(worker) => Err(CoverError::WorkerDisconnected { worker }),
            None => Ok(()),
        }
    }
}

/// Body of a worker thread: solve requests until the dispatcher hangs up
fn work<I: Item>(
    worker: usize,
    requests: &Receiver<WorkerRequest<I>>,
    responses: &Sender<(usize, Reply)>,
    abort: &AtomicBool,
    pulse_interval: Duration,
) {
    let keep_going = || {
        if abort.load(Ordering::Relaxed) {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    };
    let reply = |message: Reply| -> ControlFlow<()> {
        keep_going()?;
        match responses.send((worker, message)) {
            Ok(()) => ControlFlow::Continue(()),
            Err(_) => ControlFlow::Break(()),
        }
    };
    let respond = |response: WorkerResponse| reply(Reply::Response(response));

    for request in requests {
        let outcome = match serve(request, pulse_interval, respond, keep_going) {
            Ok(outcome) => outcome,
            Err(error) => match reply(Reply::Failed(error)) {
                ControlFlow::Continue(()) => SearchOutcome::Exhausted,
                ControlFlow::Break(()) => SearchOutcome::Stopped,
            },
        };
        if outcome == SearchOutcome::Stopped {
            break;
        }
    }
}

/// Stop every worker and wait for all of them
///
/// Request senders are dropped before the first join. Every thread is joined
/// even after a panic; the first panic found is returned.
fn shut_down<I>(abort: &AtomicBool, slots: Vec<WorkerSlot<I>>) -> Result<()> {
    abort.store(true, Ordering::Relaxed);
    let handles: Vec<JoinHandle<()>> = slots.into_iter().map(|slot| slot.handle).collect();
    let mut panicked = None;
    for (worker, handle) in handles.into_iter().enumerate() {
        if let Err(payload) = handle.join() {
            panicked.get_or_insert_with(|| CoverError::WorkerPanicked {
                worker,
                message: panic_message(payload.as_ref()),
            });
        }
    }
    panicked.map_or(Ok(()), Err)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string payload".to_string())
}
