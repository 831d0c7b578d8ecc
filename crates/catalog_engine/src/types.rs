use catalog_core::{CatalogError, Product, ProductFields, ProductId};

/// Completion of one engine request.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    CatalogFetched(Result<Vec<Product>, CatalogError>),
    ProductCreated(Result<Product, CatalogError>),
    ProductUpdated {
        id: ProductId,
        result: Result<ProductFields, CatalogError>,
    },
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}
