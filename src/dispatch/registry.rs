//! Ordered appender attachment registry

use super::AppenderHandle;
use crate::core::{Diagnostics, LogEvent, PipelineError};
use parking_lot::Mutex;
use std::sync::Arc;

/// Ordered set of attached appenders with fan-out dispatch
///
/// Dispatch order is insertion order. One lock protects the set: every
/// structural mutation and the whole dispatch iteration hold it, so a
/// flush never observes a half-updated sink set.
#[derive(Default)]
pub struct AppenderRegistry {
    appenders: Mutex<Vec<AppenderHandle>>,
}

fn same_handle(a: &AppenderHandle, b: &AppenderHandle) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

impl AppenderRegistry {
    pub fn new() -> Self {
        Self {
            appenders: Mutex::new(Vec::new()),
        }
    }

    /// Attach an appender; a no-op if the same handle is already present
    pub fn add(&self, handle: AppenderHandle) {
        let mut appenders = self.appenders.lock();
        if appenders.iter().any(|existing| same_handle(existing, &handle)) {
            return;
        }
        appenders.push(handle);
    }

    /// Detach the first occurrence of a handle; true if found
    pub fn remove(&self, handle: &AppenderHandle) -> bool {
        let mut appenders = self.appenders.lock();
        match appenders.iter().position(|existing| same_handle(existing, handle)) {
            Some(index) => {
                appenders.remove(index);
                true
            }
            None => false,
        }
    }

    /// Detach the first appender with the given name; true if found
    pub fn remove_by_name(&self, name: &str) -> bool {
        let mut appenders = self.appenders.lock();
        match appenders.iter().position(|a| a.lock().name() == name) {
            Some(index) => {
                appenders.remove(index);
                true
            }
            None => false,
        }
    }

    /// First appender with the given name, if any
    pub fn get(&self, name: &str) -> Option<AppenderHandle> {
        self.appenders
            .lock()
            .iter()
            .find(|a| a.lock().name() == name)
            .map(Arc::clone)
    }

    /// Snapshot of the attached handles in dispatch order
    pub fn list(&self) -> Vec<AppenderHandle> {
        self.appenders.lock().clone()
    }

    /// Detach everything
    pub fn clear(&self) {
        self.appenders.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.appenders.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.appenders.lock().is_empty()
    }

    /// Deliver one event to every attached appender in insertion order
    ///
    /// Per-appender isolation: an error return or a panic at one appender
    /// is reported to the diagnostics channel and the iteration continues.
    /// Returns the number of failed deliveries.
    pub fn dispatch(&self, event: &LogEvent, diagnostics: &Diagnostics) -> usize {
        let appenders = self.appenders.lock();
        let mut failures = 0;

        for handle in appenders.iter() {
            let mut appender = handle.lock();
            let name = appender.name().to_string();
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(event)
            }));

            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    diagnostics.report(&PipelineError::sink(&name, e.to_string()));
                    failures += 1;
                }
                Err(panic_info) => {
                    diagnostics
                        .report(&PipelineError::sink_panic(&name, panic_message(&panic_info)));
                    failures += 1;
                }
            }
        }

        failures
    }

    /// Close every attached appender, isolating failures like dispatch
    pub fn close_all(&self, diagnostics: &Diagnostics) {
        let appenders = self.appenders.lock();
        for handle in appenders.iter() {
            let mut appender = handle.lock();
            let name = appender.name().to_string();
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.close()
            }));

            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => diagnostics.report(&PipelineError::sink(&name, e.to_string())),
                Err(panic_info) => diagnostics
                    .report(&PipelineError::sink_panic(&name, panic_message(&panic_info))),
            }
        }
    }
}

fn panic_message(panic_info: &Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl std::fmt::Debug for AppenderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppenderRegistry")
            .field("attached", &self.len())
            .finish()
    }
}
