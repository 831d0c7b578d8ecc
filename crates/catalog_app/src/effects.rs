use std::sync::{mpsc, Arc};

use catalog_core::{Effect, Msg};
use catalog_engine::{EngineEvent, EngineHandle, EventSink, ExportWriter};
use catalog_logging::{catalog_info, catalog_warn};

use crate::config::DashboardConfig;
use crate::console::AppEvent;

/// Executes effects: network requests go to the engine, exports are written
/// here. Every outcome comes back as a `Msg` on the app channel.
pub struct EffectRunner {
    engine: EngineHandle,
    writer: ExportWriter,
    events: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn new(config: &DashboardConfig, events: mpsc::Sender<AppEvent>) -> anyhow::Result<Self> {
        let sink = Arc::new(MsgSink {
            tx: events.clone(),
        });
        let engine = EngineHandle::connect(config.client_settings(), sink)?;
        Ok(Self {
            engine,
            writer: ExportWriter::new(config.output_dir.clone()),
            events,
        })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchCatalog => {
                    catalog_info!("FetchCatalog");
                    self.engine.fetch_all();
                }
                Effect::CreateProduct(draft) => {
                    catalog_info!("CreateProduct title={:?}", draft.title);
                    self.engine.create(draft);
                }
                Effect::UpdateProduct { id, patch } => {
                    catalog_info!("UpdateProduct id={} title={:?}", id, patch.title);
                    self.engine.update(id, patch);
                }
                Effect::WriteExport { filename, contents } => {
                    let result = self
                        .writer
                        .write(&filename, &contents)
                        .map(|path| path.display().to_string())
                        .map_err(|err| {
                            catalog_warn!("export {} failed: {}", filename, err);
                            err.to_string()
                        });
                    let _ = self.events.send(AppEvent::Msg(Msg::ExportFinished(result)));
                }
            }
        }
    }
}

struct MsgSink {
    tx: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let msg = match event {
            EngineEvent::CatalogFetched(result) => Msg::CatalogLoaded(result),
            EngineEvent::ProductCreated(result) => Msg::ProductCreated(result),
            EngineEvent::ProductUpdated { id, result } => Msg::ProductUpdated { id, result },
        };
        let _ = self.tx.send(AppEvent::Msg(msg));
    }
}
