//! Shared Tokio runtime and mock API helpers for integration tests.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use rstest_bdd::Slot;
use serde_json::Value;
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer, Request};

/// Path prefix the mock API is served under, as on GitHub Enterprise Server.
pub const API_PREFIX: &str = "/api/v3";

/// Shared runtime wrapper that can be stored in an `rstest-bdd` Slot.
#[derive(Clone)]
pub struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    pub fn new(runtime: Runtime) -> Self {
        Self(Rc::new(RefCell::new(runtime)))
    }

    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

/// Ensures a Tokio runtime and Wiremock server are initialised.
///
/// # Errors
///
/// Returns an error if the Tokio runtime cannot be created or if the slots behave unexpectedly.
pub fn ensure_runtime_and_server(
    runtime: &Slot<SharedRuntime>,
    server: &Slot<MockServer>,
) -> Result<SharedRuntime, io::Error> {
    if runtime.with_ref(|_| ()).is_none() {
        runtime.set(SharedRuntime::new(Runtime::new()?));
    }

    let shared_runtime = runtime
        .get()
        .ok_or_else(|| io::Error::other("runtime not initialised after set"))?;

    if server.with_ref(|_| ()).is_none() {
        server.set(shared_runtime.block_on(MockServer::start()));
    }

    Ok(shared_runtime)
}

/// Mounts `mocks` on the started server.
///
/// # Errors
///
/// Returns an error if the server has not been started.
pub fn mount_all(
    runtime: &SharedRuntime,
    server: &Slot<MockServer>,
    mocks: Vec<Mock>,
) -> Result<(), io::Error> {
    server
        .with_ref(|started| {
            for mock in mocks {
                runtime.block_on(mock.mount(started));
            }
        })
        .ok_or_else(|| io::Error::other("mock server not initialised"))
}

/// API base URL of the started server.
///
/// # Errors
///
/// Returns an error if the server has not been started.
pub fn api_base(server: &Slot<MockServer>) -> Result<String, io::Error> {
    server
        .with_ref(|started| format!("{}{API_PREFIX}", started.uri()))
        .ok_or_else(|| io::Error::other("mock server not initialised"))
}

/// Path of a repository endpoint on the mock server.
pub fn repo_path(suffix: &str) -> String {
    format!("{API_PREFIX}/repos/owner/repo/{suffix}")
}

/// Requests the server received, in arrival order.
///
/// # Errors
///
/// Returns an error if the server has not been started or request
/// recording is disabled.
pub fn received(
    runtime: &SharedRuntime,
    server: &Slot<MockServer>,
) -> Result<Vec<Request>, io::Error> {
    server
        .with_ref(|started| runtime.block_on(started.received_requests()))
        .ok_or_else(|| io::Error::other("mock server not initialised"))?
        .ok_or_else(|| io::Error::other("request recording is disabled"))
}

/// JSON bodies of the received requests matching `verb` and `path`.
pub fn bodies(requests: &[Request], verb: &str, path: &str) -> Vec<Value> {
    requests
        .iter()
        .filter(|request| request.method.as_str() == verb && request.url.path() == path)
        .filter_map(|request| serde_json::from_slice(&request.body).ok())
        .collect()
}

