// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The bootstrap coordinator.
//
// Concurrency scheme: an `AtomicBool` readiness flag plus an async mutex
// around the step sequence. The fast path reads the flag with Acquire and
// never touches the mutex once it is true; the slow path locks, re-checks
// the flag (late joiners land here after the winning caller finished), runs
// the steps, and publishes the flag with Release as the very last action of
// a successful pass. The Release store pairs with the Acquire loads, so any
// caller that observes `initialized == true` also observes every side
// effect the steps produced.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, error};

use blickwerk_core::Readiness;
use blickwerk_core::error::{BlickwerkError, Result};

use crate::observer::{InitObserver, TracingObserver};
use crate::report::{StartupReport, StepTiming};
use crate::step::InitStep;

/// Runs an ordered list of initialisation steps exactly once per process.
///
/// The coordinator is constructed with its full step list and never changes
/// it afterwards. It moves through `Uninitialized → Initializing → Ready`;
/// a failed pass rolls back to `Uninitialized` so the next caller retries
/// the whole sequence from the first step. There is no teardown.
pub struct Bootstrap {
    steps: Vec<InitStep>,
    observer: Box<dyn InitObserver>,
    /// Exclusive guard around the step sequence. Async-aware so waiting
    /// callers suspend instead of spinning while the winner runs.
    pass_lock: Mutex<()>,
    initialized: AtomicBool,
    report: OnceLock<StartupReport>,
}

impl Bootstrap {
    /// Create a coordinator that reports timings through `tracing`.
    pub fn new(steps: Vec<InitStep>) -> Self {
        Self::with_observer(steps, Box::new(TracingObserver))
    }

    /// Create a coordinator with a custom timing observer.
    pub fn with_observer(steps: Vec<InitStep>, observer: Box<dyn InitObserver>) -> Self {
        Self {
            steps,
            observer,
            pass_lock: Mutex::new(()),
            initialized: AtomicBool::new(false),
            report: OnceLock::new(),
        }
    }

    /// Run the step sequence if no pass has succeeded yet.
    ///
    /// Safe to call from any number of tasks concurrently: exactly one
    /// caller executes the steps while the rest wait on the guard and then
    /// return without repeating work. Once a pass has succeeded, calls
    /// return immediately without locking.
    ///
    /// # Errors
    ///
    /// Returns [`BlickwerkError::StepFailed`] naming the first step whose
    /// action failed. The coordinator keeps no partial progress — the next
    /// call starts again at the first step.
    pub async fn ensure_initialized(&self) -> Result<()> {
        // Fast path: a completed pass never takes the guard again.
        if self.initialized.load(Ordering::Acquire) {
            return Ok(());
        }

        let _guard = self.pass_lock.lock().await;

        // Late joiners: the winning caller finished while we waited.
        if self.initialized.load(Ordering::Acquire) {
            return Ok(());
        }

        debug!(steps = self.steps.len(), "starting initialisation pass");
        let pass_begin = Instant::now();
        let mut timings = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            let step_begin = Instant::now();
            if let Err(cause) = step.run().await {
                error!(step = step.name(), error = %cause, "initialisation step failed");
                return Err(BlickwerkError::step_failed(step.name(), cause));
            }
            let elapsed = step_begin.elapsed();
            self.observer.step_completed(step.name(), elapsed);
            timings.push(StepTiming {
                name: step.name().to_owned(),
                duration: elapsed,
            });
        }

        let total = pass_begin.elapsed();
        self.observer.pass_completed(total);
        let _ = self.report.set(StartupReport {
            completed_at: Utc::now(),
            steps: timings,
            total,
        });

        self.initialized.store(true, Ordering::Release);
        Ok(())
    }

    /// Non-blocking point-in-time readiness check.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Current lifecycle state, for presentation-layer loading screens.
    pub fn readiness(&self) -> Readiness {
        if self.is_initialized() {
            return Readiness::Ready;
        }
        // A held guard means a pass is in flight right now.
        match self.pass_lock.try_lock() {
            Ok(_guard) => Readiness::Uninitialized,
            Err(_) => Readiness::Initializing,
        }
    }

    /// Timing report of the successful pass, or `None` before one exists.
    pub fn report(&self) -> Option<&StartupReport> {
        self.report.get()
    }

    /// Names of the configured steps, in execution order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(InitStep::name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::AtomicUsize;
    use std::sync::{Arc, Mutex as StdMutex};
    use std::time::Duration;

    use tokio::sync::Notify;

    /// Step that increments `counter` each time its action runs.
    fn counting_step(name: &str, counter: Arc<AtomicUsize>) -> InitStep {
        InitStep::new(name, move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })
    }

    /// Step that appends its name to a shared ordered log.
    fn logging_step(name: &'static str, log: Arc<StdMutex<Vec<&'static str>>>) -> InitStep {
        InitStep::new(name, move || {
            let log = Arc::clone(&log);
            async move {
                log.lock().unwrap().push(name);
                Ok(())
            }
        })
    }

    /// Step that always fails with a missing-resource error.
    fn failing_step(name: &str) -> InitStep {
        InitStep::new(name, || async {
            Err(BlickwerkError::ResourceUnavailable(
                "files/facenet_512.tflite".into(),
            ))
        })
    }

    /// Observer that records every event it receives.
    #[derive(Default)]
    struct RecordingObserver {
        steps: StdMutex<Vec<(String, Duration)>>,
        totals: StdMutex<Vec<Duration>>,
    }

    impl InitObserver for RecordingObserver {
        fn step_completed(&self, name: &str, elapsed: Duration) {
            self.steps.lock().unwrap().push((name.to_owned(), elapsed));
        }

        fn pass_completed(&self, total: Duration) {
            self.totals.lock().unwrap().push(total);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_callers_share_one_pass() {
        let counter = Arc::new(AtomicUsize::new(0));
        let step = {
            let counter = Arc::clone(&counter);
            InitStep::new("slow", move || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    Ok(())
                }
            })
        };
        let bootstrap = Arc::new(Bootstrap::new(vec![step]));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let bootstrap = Arc::clone(&bootstrap);
            handles.push(tokio::spawn(
                async move { bootstrap.ensure_initialized().await },
            ));
        }
        for handle in handles {
            handle.await.expect("join").expect("ensure_initialized");
        }

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(bootstrap.is_initialized());
    }

    #[tokio::test]
    async fn second_call_skips_all_steps() {
        let counter = Arc::new(AtomicUsize::new(0));
        let bootstrap = Bootstrap::new(vec![counting_step("only", Arc::clone(&counter))]);

        bootstrap.ensure_initialized().await.expect("first call");
        bootstrap.ensure_initialized().await.expect("second call");

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(bootstrap.is_initialized());
    }

    #[tokio::test]
    async fn steps_run_in_declared_order() {
        let log = Arc::new(StdMutex::new(Vec::new()));
        let bootstrap = Bootstrap::new(vec![
            logging_step("A", Arc::clone(&log)),
            logging_step("B", Arc::clone(&log)),
            logging_step("C", Arc::clone(&log)),
        ]);

        bootstrap.ensure_initialized().await.expect("pass");
        assert_eq!(*log.lock().unwrap(), vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn failure_aborts_sequence_and_names_the_step() {
        let log = Arc::new(StdMutex::new(Vec::new()));
        let after = Arc::new(AtomicUsize::new(0));
        let bootstrap = Bootstrap::new(vec![
            logging_step("A", Arc::clone(&log)),
            failing_step("B"),
            counting_step("C", Arc::clone(&after)),
        ]);

        let err = bootstrap.ensure_initialized().await.unwrap_err();
        assert_eq!(err.failing_step(), Some("B"));
        match err {
            BlickwerkError::StepFailed { source, .. } => {
                assert!(matches!(*source, BlickwerkError::ResourceUnavailable(_)));
            }
            other => panic!("unexpected error variant: {other}"),
        }

        assert_eq!(*log.lock().unwrap(), vec!["A"]);
        assert_eq!(after.load(Ordering::SeqCst), 0);
        assert!(!bootstrap.is_initialized());
        assert!(bootstrap.report().is_none());
    }

    #[tokio::test]
    async fn retry_restarts_from_the_first_step() {
        let first = Arc::new(AtomicUsize::new(0));
        let attempts = Arc::new(AtomicUsize::new(0));

        // Fails on its first invocation, succeeds on the second.
        let flaky = {
            let attempts = Arc::clone(&attempts);
            InitStep::new("flaky", move || {
                let attempts = Arc::clone(&attempts);
                async move {
                    if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                        Err(BlickwerkError::Bridge("transient".into()))
                    } else {
                        Ok(())
                    }
                }
            })
        };

        let bootstrap = Bootstrap::new(vec![counting_step("first", Arc::clone(&first)), flaky]);

        let err = bootstrap.ensure_initialized().await.unwrap_err();
        assert_eq!(err.failing_step(), Some("flaky"));
        assert!(!bootstrap.is_initialized());

        bootstrap.ensure_initialized().await.expect("retry pass");
        assert!(bootstrap.is_initialized());
        // Earlier successful step re-ran — no partial-completion tracking.
        assert_eq!(first.load(Ordering::SeqCst), 2);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn timings_reach_observer_and_report() {
        let log = Arc::new(StdMutex::new(Vec::new()));
        let platform = {
            let log = Arc::clone(&log);
            InitStep::new("platform", move || {
                let log = Arc::clone(&log);
                async move {
                    log.lock().unwrap().push("platform");
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    Ok(())
                }
            })
        };
        let model = {
            let log = Arc::clone(&log);
            InitStep::new("model", move || {
                let log = Arc::clone(&log);
                async move {
                    log.lock().unwrap().push("model");
                    let blob = vec![0u8; 10];
                    assert_eq!(blob.len(), 10);
                    tokio::time::sleep(Duration::from_millis(2)).await;
                    Ok(())
                }
            })
        };

        let observer = Arc::new(RecordingObserver::default());
        let bootstrap = Bootstrap::with_observer(
            vec![platform, model],
            Box::new(ArcObserver(Arc::clone(&observer))),
        );

        bootstrap.ensure_initialized().await.expect("pass");

        let steps = observer.steps.lock().unwrap().clone();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].0, "platform");
        assert_eq!(steps[1].0, "model");
        assert!(steps[0].1 > Duration::ZERO);
        assert!(steps[1].1 > Duration::ZERO);

        let totals = observer.totals.lock().unwrap().clone();
        assert_eq!(totals.len(), 1);
        assert!(totals[0] >= steps[0].1 + steps[1].1);

        let report = bootstrap.report().expect("report after success");
        assert_eq!(report.steps.len(), 2);
        assert_eq!(report.steps[0].name, "platform");
        assert_eq!(report.steps[1].name, "model");
        assert!(report.total >= report.steps_total());

        assert_eq!(*log.lock().unwrap(), vec!["platform", "model"]);
    }

    /// Adapter so a test can keep reading an observer the coordinator owns.
    struct ArcObserver(Arc<RecordingObserver>);

    impl InitObserver for ArcObserver {
        fn step_completed(&self, name: &str, elapsed: Duration) {
            self.0.step_completed(name, elapsed);
        }

        fn pass_completed(&self, total: Duration) {
            self.0.pass_completed(total);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn late_joiner_blocks_until_the_pass_finishes() {
        let counter = Arc::new(AtomicUsize::new(0));
        let entered = Arc::new(Notify::new());
        let gate = Arc::new(Notify::new());

        let step = {
            let counter = Arc::clone(&counter);
            let entered = Arc::clone(&entered);
            let gate = Arc::clone(&gate);
            InitStep::new("gated", move || {
                let counter = Arc::clone(&counter);
                let entered = Arc::clone(&entered);
                let gate = Arc::clone(&gate);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    entered.notify_one();
                    gate.notified().await;
                    Ok(())
                }
            })
        };
        let bootstrap = Arc::new(Bootstrap::new(vec![step]));

        let winner = {
            let bootstrap = Arc::clone(&bootstrap);
            tokio::spawn(async move { bootstrap.ensure_initialized().await })
        };

        // Wait until the winner is inside the step, then join late.
        entered.notified().await;
        assert_eq!(bootstrap.readiness(), Readiness::Initializing);

        let joiner = {
            let bootstrap = Arc::clone(&bootstrap);
            tokio::spawn(async move { bootstrap.ensure_initialized().await })
        };

        gate.notify_one();
        winner.await.expect("join").expect("winner pass");
        joiner.await.expect("join").expect("joiner shares outcome");

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(bootstrap.readiness(), Readiness::Ready);
    }

    #[tokio::test]
    async fn readiness_starts_uninitialized() {
        let bootstrap = Bootstrap::new(vec![counting_step(
            "noop",
            Arc::new(AtomicUsize::new(0)),
        )]);
        assert_eq!(bootstrap.readiness(), Readiness::Uninitialized);
        assert!(!bootstrap.is_initialized());
        assert!(bootstrap.report().is_none());
    }

    #[tokio::test]
    async fn step_names_reflect_declaration_order() {
        let log = Arc::new(StdMutex::new(Vec::new()));
        let bootstrap = Bootstrap::new(vec![
            logging_step("platform", Arc::clone(&log)),
            logging_step("facematch-model", Arc::clone(&log)),
        ]);
        assert_eq!(bootstrap.step_names(), vec!["platform", "facematch-model"]);
    }
}
