//! Simulation actor - runs fake lookups with a fixed latency on the Tokio runtime

use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;

use crate::messages::{SimulationCommand, SimulationResponse};
use crate::simulation::oracle::Oracle;

/// Simulation actor that answers lookup commands after a delay
pub struct SimulationActor {
    oracle: Oracle,
    delay: Duration,
    response_tx: mpsc::UnboundedSender<SimulationResponse>,
    active_jobs: JoinSet<u64>,
    cancel_handles: HashMap<u64, oneshot::Sender<()>>,
}

impl SimulationActor {
    pub fn new(
        oracle: Oracle,
        delay: Duration,
        response_tx: mpsc::UnboundedSender<SimulationResponse>,
    ) -> Self {
        SimulationActor {
            oracle,
            delay,
            response_tx,
            active_jobs: JoinSet::new(),
            cancel_handles: HashMap::new(),
        }
    }

    /// Run the simulation actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<SimulationCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(SimulationCommand::Start { id, kind, developer }) => {
                            let (cancel_tx, cancel_rx) = oneshot::channel();
                            self.cancel_handles.insert(id, cancel_tx);

                            // Value is drawn now so job order alone decides the sequence
                            let result = self.oracle.resolve(kind, &developer);
                            let response_tx = self.response_tx.clone();
                            let delay = self.delay;

                            tracing::info!(id, kind = kind.as_str(), developer = %developer.id, "Starting lookup");
                            self.active_jobs.spawn(async move {
                                tokio::select! {
                                    _ = tokio::time::sleep(delay) => {
                                        tracing::info!(id, "Lookup completed");
                                        let _ = response_tx.send(SimulationResponse::Completed {
                                            id,
                                            kind,
                                            developer: result,
                                        });
                                    }
                                    _ = cancel_rx => {
                                        tracing::debug!(id, "Lookup task stopped");
                                    }
                                }
                                id
                            });
                        }

                        Some(SimulationCommand::Cancel(id)) => {
                            if let Some(cancel_tx) = self.cancel_handles.remove(&id) {
                                tracing::info!(id, "Cancelling lookup");
                                let _ = cancel_tx.send(());
                                let _ = self.response_tx.send(SimulationResponse::Cancelled { id });
                            }
                        }

                        Some(SimulationCommand::Shutdown) => {
                            for (_, cancel_tx) in self.cancel_handles.drain() {
                                let _ = cancel_tx.send(());
                            }
                            break;
                        }

                        None => break,
                    }
                }

                Some(result) = self.active_jobs.join_next() => {
                    if let Ok(id) = result {
                        self.cancel_handles.remove(&id);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GUESSABLE_NATIONS;
    use crate::messages::LookupKind;
    use crate::models::fixture_developers;

    fn spawn_actor(delay: Duration) -> (
        mpsc::UnboundedSender<SimulationCommand>,
        mpsc::UnboundedReceiver<SimulationResponse>,
    ) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (resp_tx, resp_rx) = mpsc::unbounded_channel();
        let actor = SimulationActor::new(Oracle::new(1), delay, resp_tx);
        tokio::spawn(actor.run(cmd_rx));
        (cmd_tx, resp_rx)
    }

    #[tokio::test]
    async fn test_guess_completes_after_delay() {
        let (cmd_tx, mut resp_rx) = spawn_actor(Duration::from_millis(20));
        let jane = fixture_developers()[1].clone();

        let started = std::time::Instant::now();
        cmd_tx
            .send(SimulationCommand::Start { id: 1, kind: LookupKind::GuessNation, developer: jane.clone() })
            .unwrap();

        match resp_rx.recv().await.unwrap() {
            SimulationResponse::Completed { id, kind, developer } => {
                assert_eq!(id, 1);
                assert_eq!(kind, LookupKind::GuessNation);
                assert_eq!(developer.id, jane.id);
                let nation = developer.nation.expect("nation guessed");
                assert!(GUESSABLE_NATIONS.contains(&nation.as_str()));
            }
            other => panic!("unexpected response {:?}", other),
        }
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_cancel_suppresses_completion() {
        let (cmd_tx, mut resp_rx) = spawn_actor(Duration::from_millis(200));
        let john = fixture_developers()[0].clone();

        cmd_tx
            .send(SimulationCommand::Start { id: 9, kind: LookupKind::RateDeveloper, developer: john })
            .unwrap();
        cmd_tx.send(SimulationCommand::Cancel(9)).unwrap();

        let first = resp_rx.recv().await.unwrap();
        assert!(matches!(first, SimulationResponse::Cancelled { id: 9 }));

        let late = tokio::time::timeout(Duration::from_millis(400), resp_rx.recv()).await;
        assert!(late.is_err(), "cancelled job must not complete");
    }

    #[tokio::test]
    async fn test_shutdown_stops_actor() {
        let (cmd_tx, mut resp_rx) = spawn_actor(Duration::from_millis(10));
        cmd_tx.send(SimulationCommand::Shutdown).unwrap();
        // actor drops its sender when the loop exits
        assert!(resp_rx.recv().await.is_none());
    }
}
