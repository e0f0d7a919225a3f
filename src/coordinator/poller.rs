// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Background task driving a coordinator.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::protocol::AirzoneApi;

use super::Coordinator;

/// Handle to a spawned polling loop.
///
/// The loop stops when the handle is shut down or dropped.
#[derive(Debug)]
pub struct PollerHandle {
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Spawns the polling loop of `coordinator` on the current runtime.
    ///
    /// The first scheduled poll happens one scan interval after this call.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn spawn<A>(coordinator: Arc<Coordinator<A>>) -> Self
    where
        A: AirzoneApi + 'static,
    {
        let start = Instant::now() + coordinator.config().scan_interval();
        let task = tokio::spawn(async move {
            coordinator.run_from(start).await;
        });
        Self { task }
    }

    /// Returns `true` if the loop is no longer running.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stops the loop and waits for it to exit.
    ///
    /// A poll in progress is abandoned; its queries are read-only.
    pub async fn shutdown(mut self) {
        self.task.abort();
        // Cancellation is the expected outcome
        let _ = (&mut self.task).await;
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
