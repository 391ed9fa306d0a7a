use crate::assignment::DeliveryAssignmentEngine;
use crate::clients::{AddressClient, DriverClient, FoodPlaceClient, OrderClient};
use crate::config::DispatchConfig;
use crate::confirmation::OrderConfirmationEngine;
use crate::framework::RecordActor;
use crate::journey::StraightLineJourneyService;
use crate::model::{Address, Driver, FoodPlace, Order};
use crate::notify::BroadcastNotifier;
use crate::orchestrator::DispatchOrchestrator;
use crate::ports::Collaborators;
use std::sync::Arc;
use tracing::{error, info};

/// Pushes buffered per subscriber before the slowest one starts losing messages.
pub const NOTIFICATION_CAPACITY: usize = 256;

/// The whole dispatch service in one process.
///
/// `DispatchSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the record actors
/// - **Dependency Wiring**: Handing the clients, journey service and notifier to both engines
///
/// # Example
///
/// ```ignore
/// let system = DispatchSystem::new(DispatchConfig::default());
///
/// system.order_client.place_order(order).await?;
/// let outcome = system.orchestrator.dispatch(order_id).await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct DispatchSystem {
    pub driver_client: DriverClient,
    pub food_place_client: FoodPlaceClient,
    pub address_client: AddressClient,
    pub order_client: OrderClient,
    pub notifier: BroadcastNotifier,
    pub journeys: Arc<StraightLineJourneyService>,
    pub confirmation: Arc<OrderConfirmationEngine>,
    pub assignment: Arc<DeliveryAssignmentEngine>,
    pub orchestrator: Arc<DispatchOrchestrator>,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl DispatchSystem {
    /// Spawns the record actors and wires both engines. Must be called from
    /// within a Tokio runtime.
    pub fn new(config: DispatchConfig) -> Self {
        let buffer = config.channel_buffer;

        let (driver_actor, driver_records) = RecordActor::<Driver>::new(buffer);
        let (food_place_actor, food_place_records) = RecordActor::<FoodPlace>::new(buffer);
        let (address_actor, address_records) = RecordActor::<Address>::new(buffer);
        let (order_actor, order_records) = RecordActor::<Order>::new(buffer);

        let handles = vec![
            tokio::spawn(driver_actor.run()),
            tokio::spawn(food_place_actor.run()),
            tokio::spawn(address_actor.run()),
            tokio::spawn(order_actor.run()),
        ];

        let driver_client = DriverClient::new(driver_records);
        let food_place_client = FoodPlaceClient::new(food_place_records);
        let address_client = AddressClient::new(address_records);
        let order_client = OrderClient::new(order_records);
        let notifier = BroadcastNotifier::new(NOTIFICATION_CAPACITY);
        let journeys = Arc::new(StraightLineJourneyService::default());

        let collaborators = Collaborators {
            drivers: Arc::new(driver_client.clone()),
            food_places: Arc::new(food_place_client.clone()),
            addresses: Arc::new(address_client.clone()),
            orders: Arc::new(order_client.clone()),
            journeys: journeys.clone(),
            notifier: Arc::new(notifier.clone()),
        };

        let confirmation = Arc::new(OrderConfirmationEngine::new(collaborators.clone(), &config));
        let assignment = Arc::new(DeliveryAssignmentEngine::new(collaborators.clone(), &config));
        let orchestrator = Arc::new(DispatchOrchestrator::new(
            confirmation.clone(),
            assignment.clone(),
            collaborators.orders,
            collaborators.notifier,
        ));

        info!(?config, "Dispatch system started");
        Self {
            driver_client,
            food_place_client,
            address_client,
            order_client,
            notifier,
            journeys,
            confirmation,
            assignment,
            orchestrator,
            handles,
        }
    }

    /// Gracefully shuts down the record actors.
    ///
    /// Drops every client (including the copies held by the engines), which
    /// closes the actors' channels, then waits for the actor tasks. Dispatches
    /// spawned with [`DispatchOrchestrator::spawn_dispatch`] keep the actors
    /// alive until they finish.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down dispatch system...");

        let DispatchSystem {
            driver_client,
            food_place_client,
            address_client,
            order_client,
            notifier,
            journeys,
            confirmation,
            assignment,
            orchestrator,
            handles,
        } = self;

        drop(orchestrator);
        drop(assignment);
        drop(confirmation);
        drop(journeys);
        drop(notifier);
        drop(driver_client);
        drop(food_place_client);
        drop(address_client);
        drop(order_client);

        for handle in handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Dispatch system shutdown complete.");
        Ok(())
    }
}
