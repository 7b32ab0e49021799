//! Background refresh of the used-name registry from an external roster.

use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::error::RosterError;
use crate::registry::NameRegistry;

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Somewhere the campaign's existing character names can be read from.
pub trait RosterSource: Send + 'static {
    fn existing_names(&self) -> Result<Vec<String>, RosterError>;
}

impl<F> RosterSource for F
where
    F: Fn() -> Result<Vec<String>, RosterError> + Send + 'static,
{
    fn existing_names(&self) -> Result<Vec<String>, RosterError> {
        self()
    }
}

/// Read `source` once and merge it into `registry`. Returns how many names were new.
pub fn refresh_once(registry: &NameRegistry, source: &dyn RosterSource) -> Result<usize, RosterError> {
    let names = source.existing_names()?;
    Ok(registry.refresh(names))
}

/// Periodically merges a [`RosterSource`] into a shared registry.
///
/// Refreshes immediately on spawn, then every `interval`. A failed read is
/// logged and retried at the next tick. Stops on [`stop`](Self::stop) or drop.
#[derive(Debug)]
pub struct RosterRefresher {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl RosterRefresher {
    pub fn spawn(
        registry: Arc<NameRegistry>,
        source: impl RosterSource,
        interval: Duration,
    ) -> io::Result<Self> {
        let (stop, stopped) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name("roster-refresh".into())
            .spawn(move || {
                loop {
                    match refresh_once(&registry, &source) {
                        Ok(0) => tracing::trace!("roster refresh found no new names"),
                        Ok(added) => tracing::info!(added, total = registry.len(), "roster refreshed"),
                        Err(error) => tracing::warn!(%error, "roster refresh failed"),
                    }
                    match stopped.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })?;
        Ok(Self {
            stop: Some(stop),
            handle: Some(handle),
        })
    }

    /// Signal the worker and wait for it to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("roster refresh thread panicked");
            }
        }
    }
}

impl Drop for RosterRefresher {
    fn drop(&mut self) {
        self.shutdown();
    }
}
