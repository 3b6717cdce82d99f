//! Device position acquisition with ordered fallback tiers.
//!
//! [`acquire`] walks an [`AcquisitionPolicy`] tier by tier, bounding each
//! attempt with its own timeout. Transient failures fall through to the next
//! tier; failures that every later tier would repeat stop immediately.

use std::time::Duration;

use async_trait::async_trait;
use ctaz_core::GeoPoint;

use crate::error::LocationError;

/// Options passed to the platform for a single position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// How old a cached fix may be. Zero demands a fresh fix.
    pub maximum_age: Duration,
}

/// Platform geolocation capability (browser, mobile OS, fixed test source).
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Whether the platform exposes geolocation at all.
    fn is_supported(&self) -> bool {
        true
    }

    /// Requests one position fix.
    ///
    /// Implementations may ignore `options.timeout`; [`acquire`] enforces it.
    async fn current_position(&self, options: PositionOptions)
        -> Result<GeoPoint, LocationError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackTier {
    /// GPS-grade fix, 10 s budget.
    HighAccuracy,
    /// Network/Wi-Fi fix, 15 s budget.
    LowAccuracy,
    /// Any fix up to five minutes old, 5 s budget.
    Cached,
}

impl FallbackTier {
    #[must_use]
    pub fn options(self) -> PositionOptions {
        match self {
            FallbackTier::HighAccuracy => PositionOptions {
                high_accuracy: true,
                timeout: Duration::from_secs(10),
                maximum_age: Duration::ZERO,
            },
            FallbackTier::LowAccuracy => PositionOptions {
                high_accuracy: false,
                timeout: Duration::from_secs(15),
                maximum_age: Duration::ZERO,
            },
            FallbackTier::Cached => PositionOptions {
                high_accuracy: false,
                timeout: Duration::from_secs(5),
                maximum_age: Duration::from_secs(300),
            },
        }
    }
}

impl std::fmt::Display for FallbackTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackTier::HighAccuracy => write!(f, "high_accuracy"),
            FallbackTier::LowAccuracy => write!(f, "low_accuracy"),
            FallbackTier::Cached => write!(f, "cached"),
        }
    }
}

/// Ordered list of tiers tried by [`acquire`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionPolicy {
    pub tiers: Vec<FallbackTier>,
}

impl AcquisitionPolicy {
    /// Coverage map: a single high-accuracy attempt.
    #[must_use]
    pub fn map_view() -> Self {
        Self {
            tiers: vec![FallbackTier::HighAccuracy],
        }
    }

    /// "Share My Location" on the quote form: high → low → cached.
    #[must_use]
    pub fn share_location() -> Self {
        Self {
            tiers: vec![
                FallbackTier::HighAccuracy,
                FallbackTier::LowAccuracy,
                FallbackTier::Cached,
            ],
        }
    }
}

/// Returns `true` when the next tier might succeed where this one failed.
///
/// **Falls through:**
/// - [`LocationError::PositionUnavailable`]: a coarser source may still have a fix.
/// - [`LocationError::Timeout`]: a cheaper source may answer in time.
///
/// **Stops:**
/// - [`LocationError::PermissionDenied`]: applies to every tier.
/// - [`LocationError::Unsupported`]: applies to every tier.
pub(crate) fn falls_through(err: LocationError) -> bool {
    matches!(
        err,
        LocationError::PositionUnavailable | LocationError::Timeout
    )
}

/// Obtains one position, trying each tier of `policy` in order.
///
/// # Errors
///
/// Returns [`LocationError::Unsupported`] up front if the source reports no
/// geolocation support, the first non-fall-through error, or the last error
/// once every tier has failed. An empty policy yields
/// [`LocationError::PositionUnavailable`].
pub async fn acquire(
    source: &dyn PositionSource,
    policy: &AcquisitionPolicy,
) -> Result<GeoPoint, LocationError> {
    if !source.is_supported() {
        return Err(LocationError::Unsupported);
    }

    let mut last = LocationError::PositionUnavailable;
    for &tier in &policy.tiers {
        let options = tier.options();
        let err = match tokio::time::timeout(options.timeout, source.current_position(options))
            .await
        {
            Ok(Ok(point)) => {
                tracing::debug!(%tier, %point, "acquired device position");
                return Ok(point);
            }
            Ok(Err(err)) => err,
            Err(_) => LocationError::Timeout,
        };

        if !falls_through(err) {
            tracing::info!(%tier, error = %err, "location acquisition stopped");
            return Err(err);
        }
        tracing::warn!(%tier, error = %err, "location tier failed, trying next");
        last = err;
    }

    Err(last)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    enum Outcome {
        Fix(GeoPoint),
        Fail(LocationError),
        Hang,
    }

    struct ScriptedSource {
        supported: bool,
        script: Mutex<VecDeque<Outcome>>,
        seen: Mutex<Vec<PositionOptions>>,
    }

    impl ScriptedSource {
        fn new(script: Vec<Outcome>) -> Self {
            Self {
                supported: true,
                script: Mutex::new(script.into()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<PositionOptions> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PositionSource for ScriptedSource {
        fn is_supported(&self) -> bool {
            self.supported
        }

        async fn current_position(
            &self,
            options: PositionOptions,
        ) -> Result<GeoPoint, LocationError> {
            self.seen.lock().unwrap().push(options);
            let next = self.script.lock().unwrap().pop_front();
            match next {
                Some(Outcome::Fix(p)) => Ok(p),
                Some(Outcome::Fail(e)) => Err(e),
                Some(Outcome::Hang) | None => std::future::pending().await,
            }
        }
    }

    const HOME: GeoPoint = GeoPoint::new(-112.0, 33.45);

    #[tokio::test]
    async fn first_tier_success_stops_early() {
        let source = ScriptedSource::new(vec![Outcome::Fix(HOME)]);
        let point = acquire(&source, &AcquisitionPolicy::share_location())
            .await
            .unwrap();
        assert_eq!(point, HOME);
        assert_eq!(source.calls().len(), 1);
        assert!(source.calls()[0].high_accuracy);
    }

    #[tokio::test]
    async fn unavailable_falls_through_to_low_accuracy() {
        let source = ScriptedSource::new(vec![
            Outcome::Fail(LocationError::PositionUnavailable),
            Outcome::Fix(HOME),
        ]);
        let point = acquire(&source, &AcquisitionPolicy::share_location())
            .await
            .unwrap();
        assert_eq!(point, HOME);
        let calls = source.calls();
        assert_eq!(calls.len(), 2);
        assert!(!calls[1].high_accuracy);
    }

    #[tokio::test(start_paused = true)]
    async fn hung_tier_times_out_and_falls_through() {
        let source = ScriptedSource::new(vec![
            Outcome::Hang,
            Outcome::Hang,
            Outcome::Fix(HOME),
        ]);
        let point = acquire(&source, &AcquisitionPolicy::share_location())
            .await
            .unwrap();
        assert_eq!(point, HOME);
        let calls = source.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[2].maximum_age, Duration::from_secs(300));
    }

    #[tokio::test(start_paused = true)]
    async fn map_view_policy_times_out_after_single_tier() {
        let source = ScriptedSource::new(vec![Outcome::Hang, Outcome::Fix(HOME)]);
        let started = tokio::time::Instant::now();
        let err = acquire(&source, &AcquisitionPolicy::map_view())
            .await
            .unwrap_err();
        assert_eq!(err, LocationError::Timeout);
        assert_eq!(source.calls().len(), 1);
        let elapsed = started.elapsed();
        assert!(
            elapsed >= Duration::from_secs(10) && elapsed < Duration::from_secs(11),
            "elapsed {elapsed:?}"
        );
    }

    #[tokio::test]
    async fn permission_denied_stops_without_trying_other_tiers() {
        let source = ScriptedSource::new(vec![
            Outcome::Fail(LocationError::PermissionDenied),
            Outcome::Fix(HOME),
        ]);
        let err = acquire(&source, &AcquisitionPolicy::share_location())
            .await
            .unwrap_err();
        assert_eq!(err, LocationError::PermissionDenied);
        assert_eq!(source.calls().len(), 1);
    }

    #[tokio::test]
    async fn all_tiers_failing_returns_last_error() {
        let source = ScriptedSource::new(vec![
            Outcome::Fail(LocationError::PositionUnavailable),
            Outcome::Fail(LocationError::PositionUnavailable),
            Outcome::Fail(LocationError::Timeout),
        ]);
        let err = acquire(&source, &AcquisitionPolicy::share_location())
            .await
            .unwrap_err();
        assert_eq!(err, LocationError::Timeout);
    }

    #[tokio::test]
    async fn unsupported_platform_is_rejected_up_front() {
        let mut source = ScriptedSource::new(vec![Outcome::Fix(HOME)]);
        source.supported = false;
        let err = acquire(&source, &AcquisitionPolicy::map_view())
            .await
            .unwrap_err();
        assert_eq!(err, LocationError::Unsupported);
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn empty_policy_reports_unavailable() {
        let source = ScriptedSource::new(vec![Outcome::Fix(HOME)]);
        let policy = AcquisitionPolicy { tiers: vec![] };
        assert_eq!(
            acquire(&source, &policy).await.unwrap_err(),
            LocationError::PositionUnavailable
        );
    }

    #[test]
    fn fall_through_classification() {
        assert!(falls_through(LocationError::PositionUnavailable));
        assert!(falls_through(LocationError::Timeout));
        assert!(!falls_through(LocationError::PermissionDenied));
        assert!(!falls_through(LocationError::Unsupported));
    }
}
