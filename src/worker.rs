//! computes spectra on a background thread
//!
//! ```text
//!  request() ──> generation n ──> ┌────────────────┐
//!                                 │ worker thread  │ skips everything older than the
//!                                 │                │ latest generation, also mid build
//!  try_latest() <── Frame n ───── └────────────────┘
//! ```
//!
//! Only the frame of the latest request is ever handed out, older frames are dropped.
//!
//! ## Example
//! ```
//! use beamviz::beam::{ArrayGeometry, axes::Axes, builder::Builder, config::AxisConfig};
//! use beamviz::worker::Worker;
//!
//! fn main() {
//!     let axes = Axes::new(&AxisConfig::default()).unwrap();
//!     let worker = Worker::spawn(Builder::default(), axes);
//!
//!     worker.request(ArrayGeometry::new(10, 0.015), 4).unwrap();
//!     let generation = worker.request(ArrayGeometry::new(12, 0.015), 1).unwrap();
//!
//!     let frame = worker.wait_latest().unwrap();
//!     assert_eq!(frame.generation, generation);
//! }
//! ```

use std::cell::RefCell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use crate::beam::axes::Axes;
use crate::beam::builder::Builder;
use crate::beam::{ArrayGeometry, Frame};
use crate::error::{Error, InvalidParameter};

struct Request {
    generation: u64,
    geometry: ArrayGeometry,
    stride: usize,
}

/// result of a finished request, errors carry their generation too
struct Outcome {
    generation: u64,
    result: Result<Frame, Error>,
}

pub struct Worker {
    requests: Option<mpsc::Sender<Request>>,
    outcomes: mpsc::Receiver<Outcome>,
    latest: Arc<AtomicU64>,
    handle: Option<thread::JoinHandle<()>>,

    // last outcome that arrived for the latest generation at that time
    current: RefCell<Option<Outcome>>,
}

impl Worker {
    pub fn spawn(builder: Builder, axes: Axes) -> Self {
        let (request_sender, request_receiver) = mpsc::channel();
        let (outcome_sender, outcome_receiver) = mpsc::channel();
        let latest = Arc::new(AtomicU64::new(0));

        let l = latest.clone();
        let handle = thread::spawn(move || run(builder, axes, request_receiver, outcome_sender, l));

        Self {
            requests: Some(request_sender),
            outcomes: outcome_receiver,
            latest,
            handle: Some(handle),
            current: RefCell::new(None),
        }
    }

    /// queues a redraw and returns its generation
    ///
    /// every request supersedes all earlier ones
    pub fn request(&self, geometry: ArrayGeometry, stride: usize) -> Result<u64, Error> {
        geometry.validate()?;
        if stride < 1 {
            return Err(InvalidParameter::Stride(stride).into());
        }

        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let sender = self.requests.as_ref().ok_or(Error::WorkerDisconnected)?;
        sender
            .send(Request { generation, geometry, stride })
            .map_err(|_| Error::WorkerDisconnected)?;

        Ok(generation)
    }

    /// generation of the most recent request
    pub fn latest_generation(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// the frame of the latest request if it is done, without blocking
    ///
    /// a finished frame is returned again on every call until a newer request is made
    pub fn try_latest(&self) -> Result<Option<Frame>, Error> {
        loop {
            match self.outcomes.try_recv() {
                Ok(outcome) => self.accept(outcome),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    if self.current().is_none() {
                        return Err(Error::WorkerDisconnected);
                    }
                    break;
                }
            }
        }
        self.current().transpose()
    }

    /// blocks until the frame of the latest request is done
    ///
    /// returns right away if it is done already, blocks forever if nothing was requested yet
    pub fn wait_latest(&self) -> Result<Frame, Error> {
        loop {
            if let Some(result) = self.current() {
                return result;
            }
            let outcome = self.outcomes.recv().map_err(|_| Error::WorkerDisconnected)?;
            self.accept(outcome);
        }
    }

    fn current(&self) -> Option<Result<Frame, Error>> {
        let latest = self.latest_generation();
        self.current
            .borrow()
            .as_ref()
            .filter(|outcome| outcome.generation == latest)
            .map(|outcome| outcome.result.clone())
    }

    fn accept(&self, outcome: Outcome) {
        let latest = self.latest_generation();
        if outcome.generation == latest {
            *self.current.borrow_mut() = Some(outcome);
        } else {
            log::debug!("discarding stale outcome {} (latest is {})", outcome.generation, latest);
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        // abandons the running build and ends the request loop
        self.latest.fetch_add(1, Ordering::SeqCst);
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("worker thread panicked");
            }
        }
    }
}

fn run(
    builder: Builder,
    axes: Axes,
    requests: mpsc::Receiver<Request>,
    outcomes: mpsc::Sender<Outcome>,
    latest: Arc<AtomicU64>,
) {
    while let Ok(mut request) = requests.recv() {
        // only the newest queued request is worth computing
        while let Ok(newer) = requests.try_recv() {
            request = newer;
        }
        if request.generation < latest.load(Ordering::SeqCst) {
            log::trace!("skipping superseded request {}", request.generation);
            continue;
        }

        let generation = request.generation;
        let result = axes.strided(request.stride).and_then(|(frequencies, angles)| {
            builder.build_until(&request.geometry, &frequencies, &angles, || {
                latest.load(Ordering::SeqCst) == generation
            })
        });

        let result = match result {
            Ok(Some(spectrum)) => Ok(Frame {
                generation,
                geometry: request.geometry,
                stride: request.stride,
                spectrum,
            }),
            Ok(None) => continue,
            Err(e) => {
                log::warn!("request {} failed: {}", generation, e);
                Err(e)
            }
        };

        if outcomes.send(Outcome { generation, result }).is_err() {
            break;
        }
    }
    log::trace!("worker thread stopped");
}
