//! All-pairs close-approach scan

use rayon::prelude::*;
use satkit::{Duration, Instant};

use crate::data::OrbitingObject;
use crate::propagation::{OrbitStateProvider, StateVector};

/// A local minimum of the distance between two objects, below threshold
#[derive(Debug, Clone)]
pub struct CloseApproachEvent {
    /// Instant of closest approach, accurate to within one scan step
    pub time: Instant,
    /// Separation at that instant, meters
    pub distance_m: f64,
    /// Catalog number of the first object of the pair
    pub norad1: u32,
    /// Catalog number of the second object of the pair
    pub norad2: u32,
    /// State of the first object at the event instant
    pub state1: StateVector,
    /// State of the second object at the event instant
    pub state2: StateVector,
}

impl CloseApproachEvent {
    /// Relative speed of the pair at the event instant, m/s
    pub fn relative_speed_ms(&self) -> f64 {
        self.state1.relative_speed_ms(&self.state2)
    }
}

/// Input validation failures for a detection request
#[derive(Debug, Clone)]
pub enum DetectionError {
    /// Threshold must be positive
    InvalidThreshold(f64),
    /// Step must be positive
    InvalidStep(f64),
    /// At least two objects are needed to form a pair
    TooFewObjects(usize),
}

impl std::fmt::Display for DetectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidThreshold(value) => {
                write!(f, "Distance threshold must be > 0, got {}", value)
            }
            Self::InvalidStep(value) => {
                write!(f, "Scan step must be > 0 seconds, got {}", value)
            }
            Self::TooFewObjects(count) => {
                write!(f, "Need at least two objects to scan, got {}", count)
            }
        }
    }
}

impl std::error::Error for DetectionError {}

/// Scan all object pairs for close approaches within a time window
///
/// Walks `[start, end]` in increments of `step_seconds` for every unordered
/// pair of `objects` (in input order) and collects local minima of the
/// pairwise distance below `threshold_m`. A pair may register multiple
/// events when it re-enters the danger zone within the window.
///
/// Samples where either state cannot be propagated are skipped silently; a
/// pair that never propagates contributes no events. That makes propagation
/// failures explicit data loss, never fabricated values.
///
/// Events come back sorted by time ascending; simultaneous events keep the
/// pair enumeration order.
pub fn detect_close_approaches(
    provider: &dyn OrbitStateProvider,
    objects: &[OrbitingObject],
    start: Instant,
    end: Instant,
    step_seconds: f64,
    threshold_m: f64,
) -> Result<Vec<CloseApproachEvent>, DetectionError> {
    if threshold_m <= 0.0 {
        return Err(DetectionError::InvalidThreshold(threshold_m));
    }
    if step_seconds <= 0.0 {
        return Err(DetectionError::InvalidStep(step_seconds));
    }
    if objects.len() < 2 {
        return Err(DetectionError::TooFewObjects(objects.len()));
    }

    let mut pairs = Vec::with_capacity(objects.len() * (objects.len() - 1) / 2);
    for i in 0..objects.len() {
        for j in (i + 1)..objects.len() {
            pairs.push((objects[i].norad_id, objects[j].norad_id));
        }
    }

    log::info!(
        "Scanning {} pairs from {} to {} (step {}s, threshold {}m)",
        pairs.len(),
        start,
        end,
        step_seconds,
        threshold_m
    );

    // Collecting per-pair before flattening keeps the pair enumeration
    // order, which the stable sort below uses as the tie-break.
    let per_pair: Vec<Vec<CloseApproachEvent>> = pairs
        .par_iter()
        .map(|&(norad1, norad2)| {
            scan_pair(
                provider,
                norad1,
                norad2,
                start,
                end,
                step_seconds,
                threshold_m,
            )
        })
        .collect();

    let mut events: Vec<CloseApproachEvent> = per_pair.into_iter().flatten().collect();
    events.sort_by(|a, b| {
        (a.time - start)
            .as_seconds()
            .partial_cmp(&(b.time - start).as_seconds())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    log::info!("Found {} close-approach events", events.len());
    Ok(events)
}

struct PairSample {
    time: Instant,
    state1: StateVector,
    state2: StateVector,
    distance_m: f64,
}

/// Scan one object pair across the window
///
/// A sample is reported as an event only when the pair is below threshold,
/// was approaching (the previous sample is strictly farther out), and the
/// minimum is confirmed: either the sample is the last one in range or the
/// next sample recedes. This yields at most one event per local dip.
pub fn scan_pair(
    provider: &dyn OrbitStateProvider,
    norad1: u32,
    norad2: u32,
    start: Instant,
    end: Instant,
    step_seconds: f64,
    threshold_m: f64,
) -> Vec<CloseApproachEvent> {
    let window_seconds = (end - start).as_seconds();
    if window_seconds < 0.0 {
        return Vec::new();
    }
    let steps = (window_seconds / step_seconds).floor() as u64;

    let mut samples: Vec<PairSample> = Vec::with_capacity(steps as usize + 1);
    for step in 0..=steps {
        let time = start + Duration::from_seconds(step as f64 * step_seconds);

        let state1 = match provider.propagate(norad1, &time) {
            Ok(state) => state,
            Err(e) => {
                log::trace!("Skipping sample for pair ({}, {}): {}", norad1, norad2, e);
                continue;
            }
        };
        let state2 = match provider.propagate(norad2, &time) {
            Ok(state) => state,
            Err(e) => {
                log::trace!("Skipping sample for pair ({}, {}): {}", norad1, norad2, e);
                continue;
            }
        };

        let distance_m = state1.distance_km(&state2) * 1000.0;
        samples.push(PairSample {
            time,
            state1,
            state2,
            distance_m,
        });
    }

    let mut events = Vec::new();
    for k in 1..samples.len() {
        let current = &samples[k];
        if current.distance_m >= threshold_m {
            continue;
        }
        if samples[k - 1].distance_m <= current.distance_m {
            continue;
        }
        let confirmed = k + 1 == samples.len() || samples[k + 1].distance_m > current.distance_m;
        if confirmed {
            events.push(CloseApproachEvent {
                time: current.time,
                distance_m: current.distance_m,
                norad1,
                norad2,
                state1: current.state1,
                state2: current.state2,
            });
        }
    }

    events
}
