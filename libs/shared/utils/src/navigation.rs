use std::sync::Mutex;

use tracing::info;

/// Route changes requested by a workflow (e.g. redirect to login on 401).
pub trait Navigator: Send + Sync {
    fn redirect(&self, path: &str);
}

/// Logs redirects; used by front ends without a router.
#[derive(Debug, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn redirect(&self, path: &str) {
        info!("Redirecting to {}", path);
    }
}

/// Keeps every requested path in order.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn redirects(&self) -> Vec<String> {
        self.visited.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, path: &str) {
        if let Ok(mut visited) = self.visited.lock() {
            visited.push(path.to_string());
        }
    }
}
