//! Level loading off the interaction path.
//!
//! Every request gets a fresh sequence number and runs on its own worker
//! thread. Only the result carrying the latest sequence number ever replaces
//! the live [`Session`]; anything older is dropped when it arrives.

use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
    sync::Arc,
    thread::{self, JoinHandle},
};

use crate::{Question, QuestionError, Session};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read level {level}: {source}")]
    Io {
        level: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse level {level}: {source}")]
    Question {
        level: String,
        #[source]
        source: QuestionError,
    },
    #[error("Loader worker for level {0} panicked")]
    WorkerPanicked(String),
}
pub type LoadError = Error;

pub trait QuestionSource: Send + Sync + 'static {
    fn load(&self, level: &str) -> Result<Question, Error>;
}

impl<F> QuestionSource for F
where
    F: Fn(&str) -> Result<Question, Error> + Send + Sync + 'static,
{
    fn load(&self, level: &str) -> Result<Question, Error> {
        self(level)
    }
}

/// Reads `<root>/<level>.json`.
#[derive(Clone, Debug)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self, level: &str) -> PathBuf {
        self.root.join(format!("{level}.json"))
    }
}

impl QuestionSource for DirSource {
    fn load(&self, level: &str) -> Result<Question, Error> {
        let file = File::open(self.path(level)).map_err(|source| Error::Io {
            level: level.to_owned(),
            source,
        })?;
        Question::from_reader(BufReader::new(file)).map_err(|source| Error::Question {
            level: level.to_owned(),
            source,
        })
    }
}

/// Monotonic request counter. Sequence numbers start at 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadSequence {
    latest: u64,
}

impl LoadSequence {
    pub fn next(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest
    }
}

#[derive(Debug)]
pub enum LoadEvent {
    /// The level is now the live session.
    Loaded { seq: u64, level: String },
    /// The latest request failed; the previous session is still live.
    Failed { seq: u64, level: String, error: Error },
    /// A newer request was issued before this one completed.
    Superseded { seq: u64, level: String },
}

struct Pending {
    seq: u64,
    level: String,
    handle: JoinHandle<Result<Question, Error>>,
}

pub struct LevelLoader<S: QuestionSource> {
    source: Arc<S>,
    sequence: LoadSequence,
    pending: Option<Pending>,
    session: Option<Session>,
}

impl<S: QuestionSource> LevelLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            sequence: LoadSequence::default(),
            pending: None,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    pub fn latest(&self) -> u64 {
        self.sequence.latest()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts loading `level`, superseding any load still in flight.
    pub fn request(&mut self, level: &str) -> u64 {
        let seq = self.sequence.next();
        if let Some(stale) = self.pending.take() {
            log::debug!(
                "load #{}: {} superseded by #{seq} {level}",
                stale.seq,
                stale.level
            );
        }

        let source = Arc::clone(&self.source);
        let owned = level.to_owned();
        let handle = thread::spawn(move || source.load(&owned));
        self.pending = Some(Pending {
            seq,
            level: level.to_owned(),
            handle,
        });
        seq
    }

    /// Applies the pending load if it has completed, without blocking.
    pub fn poll(&mut self) -> Option<LoadEvent> {
        if !self.pending.as_ref()?.handle.is_finished() {
            return None;
        }
        self.pending.take().map(|pending| self.join(pending))
    }

    /// Blocks until the latest request completes and applies it.
    pub fn wait(&mut self) -> Option<LoadEvent> {
        self.pending.take().map(|pending| self.join(pending))
    }

    fn join(&mut self, pending: Pending) -> LoadEvent {
        let Pending { seq, level, handle } = pending;
        let result = handle
            .join()
            .unwrap_or_else(|_| Err(Error::WorkerPanicked(level.clone())));
        self.apply(seq, level, result)
    }

    /// Applies the outcome of request `seq`, unless a newer one was issued.
    pub fn apply(
        &mut self,
        seq: u64,
        level: String,
        result: Result<Question, Error>,
    ) -> LoadEvent {
        if !self.sequence.is_current(seq) {
            log::debug!("load #{seq}: dropping stale result for {level}");
            return LoadEvent::Superseded { seq, level };
        }

        match result {
            Ok(question) => {
                log::debug!(
                    "load #{seq}: {level} ready, {} inputs, {} slots",
                    question.inputs.len(),
                    question.slots.len()
                );
                self.session = Some(Session::new(question));
                LoadEvent::Loaded { seq, level }
            }
            Err(error) => {
                log::warn!("load #{seq}: {error}");
                LoadEvent::Failed { seq, level, error }
            }
        }
    }
}
