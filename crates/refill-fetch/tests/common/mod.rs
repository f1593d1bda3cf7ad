//! Scripted HTTP transport for exercising the pipeline without a network.

#![allow(dead_code)]

use std::fmt;
use std::sync::Mutex;

use bytes::Bytes;
use refill_fetch::{ByteRange, Chunk, HttpClient};

/// Deterministic, non-repeating-looking payload of `len` bytes.
pub fn payload(len: usize) -> Bytes {
    (0..len).map(|i| (i * 31 % 251) as u8).collect::<Vec<_>>().into()
}

/// One exchange observed by the scripted client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Probe,
    Initial,
    Range(ByteRange),
}

/// How the fake server answers range requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBehavior {
    /// Exactly the requested bytes.
    Honest,
    /// At most this many bytes per response.
    Capped(usize),
    /// Always an empty body.
    Empty,
    /// The first `n` range responses are empty, later ones honest.
    EmptyTimes(usize),
    /// This many bytes past the requested end.
    Overdeliver(usize),
    /// The range request with this index (0-based) fails.
    FailAt(usize),
    /// Never answers.
    Hang,
}

#[derive(Debug)]
pub struct ScriptError(pub String);

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl std::error::Error for ScriptError {}

/// A server holding `payload` whose initial GET is cut after `initial_len`
/// bytes.
pub struct ScriptedClient {
    payload:      Bytes,
    declared:     Option<u64>,
    initial_len:  usize,
    behavior:     RangeBehavior,
    fail_initial: bool,
    requests:     Mutex<Vec<Request>>,
}

impl ScriptedClient {
    pub fn new(payload: Bytes, initial_len: usize) -> Self {
        Self {
            declared: Some(payload.len() as u64),
            initial_len: initial_len.min(payload.len()),
            payload,
            behavior: RangeBehavior::Honest,
            fail_initial: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn behavior(mut self, behavior: RangeBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Override what the length oracle reports.
    pub fn declared(mut self, declared: Option<u64>) -> Self {
        self.declared = declared;
        self
    }

    pub fn fail_initial(mut self) -> Self {
        self.fail_initial = true;
        self
    }

    pub fn requests(&self) -> Vec<Request> { self.requests.lock().unwrap().clone() }

    pub fn ranges(&self) -> Vec<ByteRange> {
        self.requests()
            .into_iter()
            .filter_map(|r| match r {
                Request::Range(range) => Some(range),
                _ => None,
            })
            .collect()
    }

    fn record(&self, request: Request) -> usize {
        let mut requests = self.requests.lock().unwrap();
        requests.push(request);
        requests
            .iter()
            .filter(|r| matches!(r, Request::Range(_)))
            .count()
    }

    fn slice(&self, start: u64, end_exclusive: u64) -> Bytes {
        let len = self.payload.len();
        let start = (start as usize).min(len);
        let end = (end_exclusive as usize).min(len).max(start);
        self.payload.slice(start..end)
    }
}

impl HttpClient for ScriptedClient {
    type Error = ScriptError;

    async fn get(&self, _url: &str, range: Option<ByteRange>) -> Result<Chunk, Self::Error> {
        let Some(range) = range else {
            self.record(Request::Initial);
            if self.fail_initial {
                return Err(ScriptError("connection refused".into()));
            }
            return Ok(Chunk::new(
                self.payload.slice(..self.initial_len),
                Some(self.payload.len() as u64),
            ));
        };

        let index = self.record(Request::Range(range)) - 1;
        let declared = Some(range.len());
        let start = range.start();
        let end = range.end_exclusive();

        let body = match self.behavior {
            RangeBehavior::Honest => self.slice(start, end),
            RangeBehavior::Capped(cap) => self.slice(start, end.min(start + cap as u64)),
            RangeBehavior::Empty => Bytes::new(),
            RangeBehavior::EmptyTimes(n) if index < n => Bytes::new(),
            RangeBehavior::EmptyTimes(_) => self.slice(start, end),
            RangeBehavior::Overdeliver(extra) => self.slice(start, end + extra as u64),
            RangeBehavior::FailAt(n) if index == n => {
                return Err(ScriptError("connection reset by peer".into()));
            }
            RangeBehavior::FailAt(_) => self.slice(start, end),
            RangeBehavior::Hang => std::future::pending().await,
        };

        Ok(Chunk::new(body, declared))
    }

    async fn content_length(&self, _url: &str) -> Result<Option<u64>, Self::Error> {
        self.record(Request::Probe);
        Ok(self.declared)
    }
}
