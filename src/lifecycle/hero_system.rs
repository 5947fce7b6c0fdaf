use crate::backend::InMemoryApi;
use crate::clients::HeroService;
use crate::config::ServiceConfig;
use crate::framework::HttpTransport;
use crate::messages::MessageService;
use crate::model::{next_hero_id, seed_heroes, Hero};
use crate::transport::ReqwestTransport;
use std::sync::Arc;
use tracing::{error, info};

/// The runtime orchestrator for the hero service.
///
/// `HeroSystem` is responsible for:
/// - **Dependency Wiring**: Building the message log and the transport, then
///   handing both to the [`HeroService`]
/// - **Lifecycle Management**: Starting the in-memory backend task (when no
///   `base_url` is configured) and stopping it again
///
/// # Example
///
/// ```ignore
/// let system = HeroSystem::new();
///
/// let heroes = system.hero_service.get_heroes().await;
/// let nova = system.hero_service.add_hero(HeroCreate::new("Nova")).await;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct HeroSystem {
    /// Service for the hero collection
    pub hero_service: HeroService,

    /// Message log the service reports to
    pub messages: MessageService,

    /// Task handles for running backends (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl HeroSystem {
    /// Creates a system backed by a seeded in-memory API.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new() -> Self {
        Self::from_config(&ServiceConfig::default())
    }

    /// Creates a system from configuration.
    ///
    /// With a `base_url` the service talks to that server over HTTP; otherwise an
    /// [`InMemoryApi`] task is spawned to answer requests.
    pub fn from_config(config: &ServiceConfig) -> Self {
        let messages = MessageService::new();
        let mut handles = Vec::new();

        let transport: Arc<dyn HttpTransport> = match &config.base_url {
            Some(base_url) => {
                info!(%base_url, "Using HTTP backend");
                Arc::new(ReqwestTransport::new(base_url))
            }
            None => {
                let (api, transport) = InMemoryApi::<Hero>::new(
                    config.channel_buffer,
                    config.collection_path.clone(),
                    next_hero_id,
                );
                let api = if config.seed_heroes {
                    api.with_seed(seed_heroes())
                } else {
                    api
                };
                handles.push(tokio::spawn(api.run()));
                info!(collection = %config.collection_path, "Using in-memory backend");
                Arc::new(transport)
            }
        };

        let hero_service = HeroService::with_collection_path(
            transport,
            Arc::new(messages.clone()),
            config.collection_path.clone(),
        );

        Self {
            hero_service,
            messages,
            handles,
        }
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the service closes the backend channel; the backend task then
    /// leaves its loop. Clones of the service that are still alive keep the
    /// channel open, so drop them first.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if every backend task finished cleanly
    /// - `Err(String)` if a task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        drop(self.hero_service);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Backend task failed: {:?}", e);
                return Err(format!("Backend task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for HeroSystem {
    fn default() -> Self {
        Self::new()
    }
}
