use crate::events::DataEvent;
use crate::state::filter::FetchTicket;
use cheapshark_api::Client;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Runs gateway calls and reports their outcome as data events
#[derive(Clone)]
pub struct DataLoader {
    pub api_client: Arc<Client>,
    pub data_tx: mpsc::UnboundedSender<DataEvent>,
}

impl DataLoader {
    pub fn new(api_client: Arc<Client>, data_tx: mpsc::UnboundedSender<DataEvent>) -> Self {
        Self {
            api_client,
            data_tx,
        }
    }

    /// Fetch deals for one commit; the result carries the commit's generation
    pub async fn load_deals(&self, ticket: FetchTicket) {
        let FetchTicket { generation, filter } = ticket;
        tracing::info!(generation, "Fetching deals");

        let event = match self.api_client.fetch_deals(&filter).await {
            Ok(deals) => {
                tracing::debug!(generation, "Fetched {} deals", deals.len());
                DataEvent::DealsLoaded { generation, deals }
            }
            Err(e) => {
                if e.is_timeout() {
                    tracing::warn!(generation, "Deals request timed out");
                }
                DataEvent::DealsLoadFailed {
                    generation,
                    kind: e.kind(),
                    error: e.to_string(),
                }
            }
        };
        let _ = self.data_tx.send(event);
    }

    pub async fn load_stores(&self) {
        tracing::info!("Fetching stores");
        let event = match self.api_client.fetch_stores().await {
            Ok(stores) => DataEvent::StoresLoaded { stores },
            Err(e) => DataEvent::StoresLoadFailed {
                error: e.to_string(),
            },
        };
        let _ = self.data_tx.send(event);
    }

    pub async fn load_game_detail(&self, game_id: String) {
        tracing::info!("Fetching game detail for {}", game_id);
        let event = match self.api_client.fetch_game_detail(&game_id).await {
            Ok(detail) => DataEvent::GameDetailLoaded {
                game_id,
                detail: Box::new(detail),
            },
            Err(e) => DataEvent::GameDetailLoadFailed {
                game_id,
                error: e.to_string(),
            },
        };
        let _ = self.data_tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cheapshark_api::{ClientOptions, DealFilter, ErrorKind};
    use std::time::Duration;

    fn unreachable_loader() -> (DataLoader, mpsc::UnboundedReceiver<DataEvent>) {
        // Bind then drop to get a port nothing listens on.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = Client::with_options(ClientOptions {
            base_url: format!("http://127.0.0.1:{port}"),
            timeout: Duration::from_secs(2),
            use_system_proxy: false,
        })
        .unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        (DataLoader::new(Arc::new(client), tx), rx)
    }

    #[tokio::test]
    async fn test_failed_deals_fetch_keeps_generation() {
        let (loader, mut rx) = unreachable_loader();

        loader
            .load_deals(FetchTicket {
                generation: 7,
                filter: DealFilter::new(),
            })
            .await;

        match rx.recv().await {
            Some(DataEvent::DealsLoadFailed {
                generation, kind, ..
            }) => {
                assert_eq!(generation, 7);
                assert_eq!(kind, ErrorKind::NetworkError);
            }
            other => panic!("Expected DealsLoadFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_game_detail_names_game() {
        let (loader, mut rx) = unreachable_loader();

        loader.load_game_detail("612".to_string()).await;

        match rx.recv().await {
            Some(DataEvent::GameDetailLoadFailed { game_id, .. }) => assert_eq!(game_id, "612"),
            other => panic!("Expected GameDetailLoadFailed, got {other:?}"),
        }
    }
}
