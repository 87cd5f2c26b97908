//! Stub ports shared by the unit tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pokcli_domain::{AuthorizationState, Credentials};

use crate::auth::{CallbackSession, SessionSignals};
use crate::ports::{
    Browser, BrowserError, CallbackError, CallbackServer, CredentialStore, CredentialStoreError,
    Transport, TransportError,
};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub body: serde_json::Value,
}

/// Transport answering from a queue of canned responses.
#[derive(Debug, Default)]
pub struct StubTransport {
    responses: Mutex<VecDeque<Result<Vec<u8>, TransportError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(self, value: serde_json::Value) -> Self {
        self.with_raw(serde_json::to_vec(&value).unwrap())
    }

    pub fn with_raw(self, body: Vec<u8>) -> Self {
        self.responses.lock().unwrap().push_back(Ok(body));
        self
    }

    pub fn with_error(self, error: TransportError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn answer(
        &self,
        method: &'static str,
        url: &str,
        body: &[u8],
    ) -> Result<Vec<u8>, TransportError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            url: url.to_string(),
            body: serde_json::from_slice(body).unwrap_or(serde_json::Value::Null),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("no stubbed response".to_string())))
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn post(&self, url: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        self.answer("POST", url, &body)
    }

    async fn get(&self, url: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        self.answer("GET", url, &body)
    }
}

/// Callback server without sockets. Either reports the redirect right
/// away or never does.
#[derive(Debug)]
pub struct StubCallbackServer {
    redirect_immediately: bool,
    starts: AtomicUsize,
    stops: Arc<AtomicUsize>,
    last: Mutex<Option<SessionSignals>>,
}

impl StubCallbackServer {
    fn with_redirect(redirect_immediately: bool) -> Self {
        Self {
            redirect_immediately,
            starts: AtomicUsize::new(0),
            stops: Arc::new(AtomicUsize::new(0)),
            last: Mutex::new(None),
        }
    }

    pub fn immediate() -> Self {
        Self::with_redirect(true)
    }

    pub fn never() -> Self {
        Self::with_redirect(false)
    }

    pub fn starts(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    pub fn last_state(&self) -> Option<AuthorizationState> {
        self.last.lock().unwrap().as_ref().map(SessionSignals::current)
    }
}

#[async_trait]
impl CallbackServer for StubCallbackServer {
    async fn start(&self, _port: u16) -> Result<CallbackSession, CallbackError> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        let (signals, stop_rx) = SessionSignals::new();
        signals.listening();
        *self.last.lock().unwrap() = Some(signals.clone());

        let mut session = CallbackSession::new(signals.clone(), None);
        let stops = Arc::clone(&self.stops);
        let watcher = signals.clone();
        session.spawn(async move {
            if stop_rx.await.is_ok() {
                stops.fetch_add(1, Ordering::SeqCst);
            }
            watcher.terminate();
            Ok(())
        });

        if self.redirect_immediately {
            signals.succeed();
        }
        Ok(session)
    }
}

/// Browser that records URLs instead of opening them.
#[derive(Debug, Default)]
pub struct StubBrowser {
    fail: bool,
    opened: Mutex<Vec<String>>,
}

impl StubBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            opened: Mutex::new(Vec::new()),
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl Browser for StubBrowser {
    fn open(&self, url: &str) -> Result<(), BrowserError> {
        if self.fail {
            return Err(BrowserError {
                url: url.to_string(),
                message: "no browser".to_string(),
            });
        }
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

/// In-memory credential files. A `None` entry is a file without a
/// consumer key.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    files: Mutex<HashMap<PathBuf, Option<Credentials>>>,
    loads: AtomicUsize,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, credentials: Option<Credentials>) -> Self {
        self.files.lock().unwrap().insert(path.into(), credentials);
        self
    }

    pub fn get(&self, path: &Path) -> Option<Credentials> {
        self.files.lock().unwrap().get(path).cloned().flatten()
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self, path: &Path) -> Result<Credentials, CredentialStoreError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        match self.files.lock().unwrap().get(path) {
            Some(Some(credentials)) => Ok(credentials.clone()),
            Some(None) => Err(CredentialStoreError::MissingConsumerKey(path.to_path_buf())),
            None => Err(CredentialStoreError::NotFound(path.to_path_buf())),
        }
    }

    async fn save(
        &self,
        path: &Path,
        credentials: &Credentials,
    ) -> Result<(), CredentialStoreError> {
        let mut files = self.files.lock().unwrap();
        match files.get_mut(path) {
            Some(entry) => {
                *entry = Some(credentials.clone());
                Ok(())
            }
            None => Err(CredentialStoreError::NotFound(path.to_path_buf())),
        }
    }
}
