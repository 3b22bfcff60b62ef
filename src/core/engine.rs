//! Concurrent parse/format pipeline with order-preserving reassembly
//!
//! reader → bounded job queue → worker pool → report buffer slot →
//! completion channel → frontier → `on_ready(index)` in strict index order.

use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use parking_lot::{Mutex, RwLock};
use rayon::ThreadPoolBuilder;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::consts::INITIAL_REPORT_LEN;
use crate::core::{DisplayRecord, FilterConfig, TimeFormatter, parse_line};
use crate::error::ReportError;
use crate::reader::LineReader;

/// Queue slots per worker before the reader blocks
const JOBS_PER_WORKER: usize = 64;

/// Positionally indexed records, one slot per input line.
///
/// Slots are created by the producer under the write lock and filled exactly
/// once by a worker under the read lock.
pub(crate) struct ReportBuffer {
    slots: RwLock<Vec<OnceLock<DisplayRecord>>>,
}

impl ReportBuffer {
    pub(crate) fn new() -> Self {
        Self {
            slots: RwLock::new(Vec::new()),
        }
    }

    /// Make sure slot `index` exists
    pub(crate) fn reserve(&self, index: usize) {
        if index < self.slots.read().len() {
            return;
        }
        let mut slots = self.slots.write();
        if index >= slots.len() {
            let new_len = (index + 1).max(slots.len() * 2).max(INITIAL_REPORT_LEN);
            slots.resize_with(new_len, OnceLock::new);
        }
    }

    pub(crate) fn store(&self, index: usize, record: DisplayRecord) {
        let slots = self.slots.read();
        match slots.get(index) {
            Some(slot) => {
                if slot.set(record).is_err() {
                    warn!(index, "report slot written twice, keeping the first record");
                }
            }
            None => warn!(index, "report slot was never reserved"),
        }
    }

    /// Run `f` on a completed slot
    pub(crate) fn with_record<T>(&self, index: usize, f: impl FnOnce(&DisplayRecord) -> T) -> Option<T> {
        self.slots.read().get(index)?.get().map(f)
    }

    /// Take the first `len` records; unfilled slots become filtered-out records
    pub(crate) fn into_records(self, len: usize) -> Vec<DisplayRecord> {
        let mut slots = self.slots.into_inner();
        slots.truncate(len);
        slots
            .into_iter()
            .map(|slot| slot.into_inner().unwrap_or_default())
            .collect()
    }
}

/// Turns out-of-order completions into an in-order sequence
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    pending: BinaryHeap<Reverse<usize>>,
    next: usize,
}

impl Frontier {
    /// Record `index` as complete and hand every index that is now
    /// contiguous with the frontier to `ready`, in order.
    pub(crate) fn complete<F>(&mut self, index: usize, ready: &mut F) -> Result<(), ReportError>
    where
        F: FnMut(usize) -> Result<(), ReportError>,
    {
        self.pending.push(Reverse(index));
        while self.pending.peek() == Some(&Reverse(self.next)) {
            self.pending.pop();
            ready(self.next)?;
            self.next += 1;
        }
        Ok(())
    }

    pub(crate) fn position(&self) -> usize {
        self.next
    }

    pub(crate) fn waiting(&self) -> usize {
        self.pending.len()
    }
}

struct Job {
    index: usize,
    line: String,
}

/// Parse/filter/format stage of a report run
pub(crate) struct Pipeline<'a> {
    filter: &'a FilterConfig,
    time: &'a TimeFormatter,
    workers: usize,
}

impl<'a> Pipeline<'a> {
    pub(crate) fn new(filter: &'a FilterConfig, time: &'a TimeFormatter, workers: usize) -> Self {
        Self {
            filter,
            time,
            workers: workers.max(1),
        }
    }

    /// Feed every line of `reader` through the worker pool into `buffer`.
    ///
    /// `on_ready` runs on the calling thread once per line, in input order,
    /// as soon as that line and every line before it are in the buffer.
    /// Returns the number of lines read.
    pub(crate) fn run<F>(
        &self,
        reader: &mut dyn LineReader,
        buffer: &ReportBuffer,
        mut on_ready: F,
    ) -> Result<usize, ReportError>
    where
        F: FnMut(usize) -> Result<(), ReportError>,
    {
        // One extra thread for the producer
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.workers + 1)
            .thread_name(|i| format!("cmdlog-worker-{i}"))
            .build()?;

        let (job_tx, job_rx) = bounded::<Job>(self.workers * JOBS_PER_WORKER);
        let (done_tx, done_rx) = unbounded::<usize>();
        let produced: Mutex<Result<usize, ReportError>> = Mutex::new(Ok(0));

        debug!(workers = self.workers, "starting report pipeline");

        let reassembled = pool.in_place_scope(|scope| {
            for _ in 0..self.workers {
                let jobs = job_rx.clone();
                let done = done_tx.clone();
                scope.spawn(move |_| self.work(jobs, done, buffer));
            }
            // Only the workers hold these now, so the channels close with them
            drop(job_rx);
            drop(done_tx);

            let produced = &produced;
            scope.spawn(move |_| *produced.lock() = produce(reader, buffer, job_tx));

            reassemble(done_rx, &mut on_ready)
        });

        let lines = produced.into_inner()?;
        let ready = reassembled?;
        if ready != lines {
            warn!(lines, ready, "not every line reached the output stage");
        }
        Ok(lines)
    }

    fn work(&self, jobs: Receiver<Job>, done: Sender<usize>, buffer: &ReportBuffer) {
        for job in jobs.iter() {
            let record = parse_line(&job.line, self.filter, self.time);
            buffer.store(job.index, record);
            if done.send(job.index).is_err() {
                // Reassembly gave up; stop taking jobs so the reader stops too
                break;
            }
        }
    }
}

fn produce(
    reader: &mut dyn LineReader,
    buffer: &ReportBuffer,
    jobs: Sender<Job>,
) -> Result<usize, ReportError> {
    let mut index = 0;
    while let Some(line) = reader.read_line()? {
        buffer.reserve(index);
        if jobs.send(Job { index, line }).is_err() {
            debug!(index, "job queue closed before the reader finished");
            break;
        }
        index += 1;
    }
    Ok(index)
}

fn reassemble<F>(done: Receiver<usize>, on_ready: &mut F) -> Result<usize, ReportError>
where
    F: FnMut(usize) -> Result<(), ReportError>,
{
    let mut frontier = Frontier::default();
    for index in done.iter() {
        frontier.complete(index, on_ready)?;
    }
    if frontier.waiting() > 0 {
        warn!(waiting = frontier.waiting(), "completions left behind a gap");
    }
    Ok(frontier.position())
}
