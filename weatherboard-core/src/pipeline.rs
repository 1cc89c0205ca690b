//! The two-step fetch: current conditions by name, then the forecast for the
//! coordinates that came back.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{LookupError, app::FetchRequest, model::Snapshot, provider::WeatherSource};

/// Run one fetch cycle. The forecast call needs the first call's
/// coordinates, so the two requests are strictly sequential.
pub async fn fetch_cycle(
    source: &dyn WeatherSource,
    city: &str,
) -> Result<Snapshot, LookupError> {
    debug!(city, "fetching current conditions");
    let current = source.current_conditions(city).await?;

    debug!(
        city,
        lat = current.coordinates.lat,
        lon = current.coordinates.lon,
        "fetching forecast"
    );
    let forecast = source.forecast(current.coordinates).await?;

    debug!(city, samples = forecast.samples.len(), "fetch cycle complete");
    Ok(Snapshot { current, forecast })
}

/// Runs fetch cycles. A newer request cancels any older one still in
/// flight; an older request never cancels a newer one.
#[derive(Debug)]
pub struct Pipeline {
    source: Arc<dyn WeatherSource>,
    active: Mutex<Option<(u64, CancellationToken)>>,
}

impl Pipeline {
    pub fn new(source: Arc<dyn WeatherSource>) -> Self {
        Self {
            source,
            active: Mutex::new(None),
        }
    }

    /// Register a cycle for `generation` and return its token.
    ///
    /// Cancels the active cycle if it is older. If a newer cycle is already
    /// registered, the returned token is cancelled from the start.
    pub fn begin(&self, generation: u64) -> CancellationToken {
        let token = CancellationToken::new();
        let mut active = self.lock_active();

        match active.as_ref() {
            Some((current, _)) if *current > generation => token.cancel(),
            _ => {
                if let Some((_, previous)) = active.replace((generation, token.clone())) {
                    previous.cancel();
                }
            }
        }

        token
    }

    /// Fetch the city of `request`, superseding older requests.
    pub async fn run(&self, request: &FetchRequest) -> Result<Snapshot, LookupError> {
        let token = self.begin(request.generation);
        self.run_with(token, &request.city).await
    }

    /// Fetch `city` under a token obtained from [`Pipeline::begin`].
    /// Resolves to [`LookupError::Cancelled`] once the token is cancelled.
    pub async fn run_with(
        &self,
        token: CancellationToken,
        city: &str,
    ) -> Result<Snapshot, LookupError> {
        let result = tokio::select! {
            biased;
            _ = token.cancelled() => Err(LookupError::Cancelled),
            res = fetch_cycle(self.source.as_ref(), city) => res,
        };

        match &result {
            Err(LookupError::Cancelled) => debug!(city, "fetch cycle superseded"),
            Err(err) => warn!(city, error = %err, "weather lookup failed"),
            Ok(_) => {}
        }

        result
    }

    /// Cancel whatever cycle is running, if any.
    pub fn cancel(&self) {
        if let Some((_, token)) = self.lock_active().take() {
            token.cancel();
        }
    }

    fn lock_active(&self) -> MutexGuard<'_, Option<(u64, CancellationToken)>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        app::{Applied, Dashboard},
        model::{Coordinates, CurrentConditions, Forecast, ForecastSample},
    };
    use async_trait::async_trait;
    use std::time::Duration;

    #[derive(Debug, Default)]
    struct FakeSource {
        forecast_calls: Mutex<Vec<Coordinates>>,
    }

    fn conditions(city: &str) -> CurrentConditions {
        CurrentConditions {
            location_name: city.to_string(),
            coordinates: Coordinates {
                lat: 37.5,
                lon: 127.0,
            },
            timestamp: 1_714_521_600,
            utc_offset: 32_400,
            temperature_c: 15.0,
            feels_like_c: 14.0,
            humidity_pct: 50,
            wind_speed_mps: 1.0,
            condition: None,
        }
    }

    fn request(generation: u64, city: &str) -> FetchRequest {
        FetchRequest {
            generation,
            city: city.to_string(),
        }
    }

    #[async_trait]
    impl WeatherSource for FakeSource {
        async fn current_conditions(&self, city: &str) -> Result<CurrentConditions, LookupError> {
            match city {
                "Nowhere" => Err(LookupError::Status {
                    endpoint: "weather",
                    status: reqwest::StatusCode::NOT_FOUND,
                    body: "city not found".into(),
                }),
                "Slow" => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok(conditions(city))
                }
                _ => Ok(conditions(city)),
            }
        }

        async fn forecast(&self, coordinates: Coordinates) -> Result<Forecast, LookupError> {
            self.forecast_calls.lock().unwrap().push(coordinates);
            Ok(Forecast {
                samples: vec![ForecastSample {
                    timestamp: 1_714_521_600,
                    temperature_c: 15.0,
                    pop: 0.0,
                    condition: None,
                }],
            })
        }
    }

    #[tokio::test]
    async fn forecast_uses_coordinates_from_current_conditions() {
        let source = FakeSource::default();

        let snapshot = fetch_cycle(&source, "Seoul").await.expect("fetch succeeds");

        assert_eq!(snapshot.current.location_name, "Seoul");
        assert_eq!(snapshot.forecast.samples.len(), 1);
        assert_eq!(
            *source.forecast_calls.lock().unwrap(),
            vec![Coordinates {
                lat: 37.5,
                lon: 127.0
            }]
        );
    }

    #[tokio::test]
    async fn failed_current_lookup_skips_forecast() {
        let source = FakeSource::default();

        let err = fetch_cycle(&source, "Nowhere").await.unwrap_err();

        assert!(matches!(err, LookupError::Status { .. }));
        assert!(source.forecast_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn new_cycle_cancels_the_one_in_flight() {
        let pipeline = Arc::new(Pipeline::new(Arc::new(FakeSource::default())));

        let slow = {
            let pipeline = Arc::clone(&pipeline);
            tokio::spawn(async move { pipeline.run(&request(1, "Slow")).await })
        };
        // Let the slow cycle register its token.
        tokio::time::sleep(Duration::from_millis(50)).await;

        let fast = pipeline
            .run(&request(2, "Busan"))
            .await
            .expect("fast cycle succeeds");
        let slow = slow.await.expect("task joins");

        assert_eq!(fast.current.location_name, "Busan");
        assert!(matches!(slow, Err(LookupError::Cancelled)));
    }

    #[test]
    fn older_generation_never_cancels_newer() {
        let pipeline = Pipeline::new(Arc::new(FakeSource::default()));

        let newer = pipeline.begin(2);
        let older = pipeline.begin(1);
        assert!(!newer.is_cancelled());
        assert!(older.is_cancelled());

        let newest = pipeline.begin(3);
        assert!(newer.is_cancelled());
        assert!(!newest.is_cancelled());
    }

    #[tokio::test]
    async fn newer_search_wins_when_polled_before_older_one() {
        let pipeline = Pipeline::new(Arc::new(FakeSource::default()));
        let mut app = Dashboard::new("Seoul");

        app.set_input("Slow");
        let first = app.submit().expect("fetch starts");
        app.set_input("Busan");
        let second = app.submit().expect("fetch starts");

        // The newer cycle is polled first, as can happen on a multi-threaded runtime.
        let (newer, older) = tokio::join!(pipeline.run(&second), pipeline.run(&first));

        assert!(newer.is_ok());
        assert!(matches!(older, Err(LookupError::Cancelled)));

        assert_eq!(app.apply(&second, newer), Applied::Updated);
        assert_eq!(app.apply(&first, older), Applied::Stale);
        assert_eq!(
            app.board().map(|b| b.location_name.as_str()),
            Some("Busan")
        );
        assert!(!app.is_loading());
    }

    #[tokio::test]
    async fn cancel_stops_the_running_cycle() {
        let pipeline = Arc::new(Pipeline::new(Arc::new(FakeSource::default())));

        let slow = {
            let pipeline = Arc::clone(&pipeline);
            tokio::spawn(async move { pipeline.run(&request(1, "Slow")).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        pipeline.cancel();

        assert!(slow.await.expect("task joins").unwrap_err().is_cancelled());
    }
}
