//! Catalog engine: HTTP access to the catalog service and export file output.
mod client;
mod engine;
mod export_writer;
mod types;

pub use client::{CatalogClient, ClientSettings, ReqwestCatalogClient, DEFAULT_BASE_URL};
pub use engine::EngineHandle;
pub use export_writer::{ensure_output_dir, ExportWriter, PersistError};
pub use types::{ChannelEventSink, EngineEvent, EventSink};
