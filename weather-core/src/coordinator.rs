//! Query coordinator: drives one city lookup from input to UI state.
//!
//! A query moves the session through `Idle -> Loading -> Success | Error`.
//! Only the current-conditions call (the primary query) affects that state.
//! The forecast call (the secondary query) starts after a successful primary
//! call, runs detached, and only fills in the forecast series; its failures
//! are logged and never shown.
//!
//! Every query takes a new generation number. A response, primary or
//! secondary, is applied only while its generation is still the latest, so a
//! slow reply for an old city can never overwrite a newer one.

use std::sync::Arc;

use tokio::{sync::Mutex, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{
    error::WeatherError,
    forecast::daily_samples,
    model::{CurrentConditions, ForecastSeries},
    provider::WeatherProvider,
};

/// Lifecycle of the primary query.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum QueryState {
    #[default]
    Idle,
    Loading,
    Success(CurrentConditions),
    /// User-visible error line.
    Error(String),
}

impl QueryState {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn conditions(&self) -> Option<&CurrentConditions> {
        match self {
            QueryState::Success(c) => Some(c),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            QueryState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Everything the UI shows, kept in one place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// Current selector entry; `None` is the "no selection" placeholder.
    pub selected: Option<String>,
    /// Contents of the free-text field.
    pub typed: String,
    pub query: QueryState,
    pub forecast: ForecastSeries,
    /// Generation of the most recently started query.
    pub generation: u64,
}

/// Error line for a blank city.
pub fn validation_message() -> String {
    format!("❗ {}.", WeatherError::EmptyCity)
}

/// Error line for a failed primary query.
pub fn failure_message(err: &WeatherError) -> String {
    format!("❌ {}", err.user_message())
}

/// Handle to the detached forecast fetch of one query.
#[derive(Debug)]
pub struct ForecastTask {
    generation: u64,
    handle: JoinHandle<()>,
}

impl ForecastTask {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Wait until the forecast has been applied or discarded.
    pub async fn settled(self) {
        if let Err(err) = self.handle.await {
            warn!(generation = self.generation, error = %err, "Forecast task aborted");
        }
    }
}

#[derive(Debug, Clone)]
pub struct QueryCoordinator {
    provider: Arc<dyn WeatherProvider>,
    session: Arc<Mutex<Session>>,
}

impl QueryCoordinator {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            provider,
            session: Arc::new(Mutex::new(Session::default())),
        }
    }

    /// Copy of the current session for rendering.
    pub async fn snapshot(&self) -> Session {
        self.session.lock().await.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.session.lock().await.query.is_loading()
    }

    /// Apply a selector change. A real city is queried immediately, exactly
    /// as if it had been typed and submitted.
    pub async fn select_city(&self, choice: Option<&str>) -> Option<ForecastTask> {
        let choice = choice.filter(|c| !c.is_empty()).map(str::to_string);
        self.session.lock().await.selected = choice.clone();

        match choice {
            Some(city) => self.submit_query(&city).await,
            None => None,
        }
    }

    /// Update the free-text field. Ignored while a query is in flight.
    pub async fn set_typed(&self, text: &str) -> bool {
        let mut session = self.session.lock().await;
        if session.query.is_loading() {
            return false;
        }
        session.typed = text.to_string();
        true
    }

    /// Submit the free-text field (Enter key or submit button).
    pub async fn submit_typed(&self) -> Option<ForecastTask> {
        let typed = {
            let session = self.session.lock().await;
            if session.query.is_loading() {
                debug!("Submit ignored while a query is in flight");
                return None;
            }
            session.typed.clone()
        };

        self.submit_query(&typed).await
    }

    /// Run the primary query for `city` and, on success, start the forecast.
    ///
    /// Returns the forecast task when one was started. Dropping it leaves the
    /// fetch running; awaiting [`ForecastTask::settled`] waits for it.
    pub async fn submit_query(&self, city: &str) -> Option<ForecastTask> {
        if city.trim().is_empty() {
            let mut session = self.session.lock().await;
            session.generation += 1;
            session.query = QueryState::Error(validation_message());
            session.forecast = ForecastSeries::new(session.generation, Vec::new());
            return None;
        }

        let generation = {
            let mut session = self.session.lock().await;
            session.generation += 1;
            session.query = QueryState::Loading;
            session.forecast = ForecastSeries::new(session.generation, Vec::new());
            session.generation
        };
        debug!(city, generation, "Starting weather query");

        let result = self.provider.current_conditions(city).await;

        let mut session = self.session.lock().await;
        if session.generation != generation {
            debug!(city, generation, latest = session.generation, "Discarding stale result");
            return None;
        }

        match result {
            Ok(conditions) => {
                info!(
                    city = %conditions.location_name,
                    temp = conditions.temperature_c,
                    generation,
                    "Current conditions fetched"
                );
                session.query = QueryState::Success(conditions);
                drop(session);
                Some(self.spawn_forecast(city.to_string(), generation))
            }
            Err(err) => {
                warn!(city, generation, error = %err, "Weather query failed");
                session.query = QueryState::Error(failure_message(&err));
                None
            }
        }
    }

    fn spawn_forecast(&self, city: String, generation: u64) -> ForecastTask {
        let provider = Arc::clone(&self.provider);
        let session = Arc::clone(&self.session);

        let handle = tokio::spawn(async move {
            let samples = match provider.forecast(&city).await {
                Ok(samples) => daily_samples(samples),
                Err(err) => {
                    warn!(city = %city, generation, error = %err, "Forecast fetch failed");
                    return;
                }
            };

            let mut session = session.lock().await;
            if session.generation != generation {
                debug!(
                    city = %city,
                    generation,
                    latest = session.generation,
                    "Discarding stale forecast"
                );
                return;
            }
            debug!(city = %city, generation, days = samples.len(), "Forecast applied");
            session.forecast = ForecastSeries::new(generation, samples);
        });

        ForecastTask { generation, handle }
    }
}
