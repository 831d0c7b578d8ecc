use std::sync::{mpsc, Arc};
use std::thread;

use catalog_core::{CatalogError, ProductDraft, ProductId, ProductPatch};
use catalog_logging::{catalog_debug, catalog_error};

use crate::client::{CatalogClient, ClientSettings, ReqwestCatalogClient};
use crate::{EngineEvent, EventSink};

enum EngineCommand {
    FetchAll,
    Create(ProductDraft),
    Update { id: ProductId, patch: ProductPatch },
}

impl EngineCommand {
    fn failed(self, err: CatalogError) -> EngineEvent {
        match self {
            EngineCommand::FetchAll => EngineEvent::CatalogFetched(Err(err)),
            EngineCommand::Create(_) => EngineEvent::ProductCreated(Err(err)),
            EngineCommand::Update { id, .. } => EngineEvent::ProductUpdated {
                id,
                result: Err(err),
            },
        }
    }
}

/// Runs catalog requests on a background tokio runtime and reports each
/// completion to the sink. Requests run concurrently and complete in
/// whatever order the service answers.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn connect(
        settings: ClientSettings,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, CatalogError> {
        let client = ReqwestCatalogClient::new(settings)?;
        Ok(Self::spawn(Arc::new(client), sink))
    }

    pub fn spawn(client: Arc<dyn CatalogClient>, sink: Arc<dyn EventSink>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    catalog_error!("engine runtime failed to start: {err}");
                    let message = format!("engine runtime unavailable: {err}");
                    while let Ok(command) = cmd_rx.recv() {
                        sink.emit(command.failed(CatalogError::transport(message.clone())));
                    }
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    let event = handle_command(client.as_ref(), command).await;
                    sink.emit(event);
                });
            }
            catalog_debug!("engine command channel closed");
        });

        Self { cmd_tx }
    }

    pub fn fetch_all(&self) {
        self.send(EngineCommand::FetchAll);
    }

    pub fn create(&self, draft: ProductDraft) {
        self.send(EngineCommand::Create(draft));
    }

    pub fn update(&self, id: ProductId, patch: ProductPatch) {
        self.send(EngineCommand::Update { id, patch });
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            catalog_error!("engine thread is gone; request dropped");
        }
    }
}

async fn handle_command(client: &dyn CatalogClient, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::FetchAll => EngineEvent::CatalogFetched(client.fetch_all().await),
        EngineCommand::Create(draft) => EngineEvent::ProductCreated(client.create(&draft).await),
        EngineCommand::Update { id, patch } => EngineEvent::ProductUpdated {
            id,
            result: client.update(id, &patch).await,
        },
    }
}
