//! CLI commands: close-approach scan, collision simulation, model listing

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Datelike, Timelike, Utc};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::collision::{
    propagate_fragments, CollisionResult, CollisionSimulator, FragmentTrajectory, ModelRegistry,
};
use crate::data::{load_catalog, CatalogFile, ObjectRecord, OrbitingObject};
use crate::detection::{collision_probability, detect_close_approaches, CloseApproachEvent};
use crate::propagation::Sgp4Provider;

#[derive(Args, Debug, Clone)]
pub struct DetectArgs {
    /// Catalog JSON file (optionally gzipped)
    #[arg(long, default_value = "data/catalog.json")]
    pub catalog: PathBuf,
    /// Output JSON file path
    #[arg(long, default_value = "out/close_approaches.json")]
    pub output: PathBuf,
    /// Scan start, RFC 3339 UTC (defaults to now)
    #[arg(long)]
    pub start: Option<String>,
    /// Time horizon in hours
    #[arg(long, default_value_t = 24.0)]
    pub hours: f64,
    /// Scan step in seconds
    #[arg(long, default_value_t = 60.0)]
    pub step_seconds: f64,
    /// Distance threshold in meters
    #[arg(long, default_value_t = 5000.0)]
    pub threshold_m: f64,
    /// Assumed hard-body radius per object in meters, for probabilities
    #[arg(long, default_value_t = 5.0)]
    pub object_radius_m: f64,
    /// Restrict the scan to these catalog numbers (repeatable)
    #[arg(long = "norad")]
    pub norad_ids: Vec<u32>,
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// First object catalog number
    pub norad1: u32,
    /// Second object catalog number
    pub norad2: u32,
    /// Catalog JSON file (optionally gzipped)
    #[arg(long, default_value = "data/catalog.json")]
    pub catalog: PathBuf,
    /// Output JSON file path
    #[arg(long, default_value = "out/collision.json")]
    pub output: PathBuf,
    /// Collision instant, RFC 3339 UTC (defaults to now)
    #[arg(long)]
    pub at: Option<String>,
    /// Collision model name (defaults to the registry default)
    #[arg(long)]
    pub model: Option<String>,
    /// Seed for the debris randomness (defaults to an entropy seed)
    #[arg(long)]
    pub seed: Option<u64>,
    /// Forward-propagate fragments this many seconds (0 = skip)
    #[arg(long, default_value_t = 0.0)]
    pub propagate_seconds: f64,
    /// Fragment trajectory sample step in seconds
    #[arg(long, default_value_t = 60.0)]
    pub trajectory_step_seconds: f64,
}

#[derive(Debug, Serialize)]
struct ApproachRecord {
    norad1: u32,
    norad2: u32,
    time_utc: String,
    distance_m: f64,
    relative_speed_ms: f64,
    probability: f64,
    position1_km: [f64; 3],
    position2_km: [f64; 3],
    velocity1_kms: [f64; 3],
    velocity2_kms: [f64; 3],
}

#[derive(Debug, Serialize)]
struct ApproachReport {
    generated_at: String,
    start_time_utc: String,
    hours: f64,
    step_seconds: f64,
    threshold_m: f64,
    object_radius_m: f64,
    total_objects: usize,
    total_pairs: usize,
    events: Vec<ApproachRecord>,
}

#[derive(Debug, Serialize)]
struct FragmentRecord {
    id: String,
    mass_kg: f64,
    diameter_m: f64,
    position_km: [f64; 3],
    velocity_kms: [f64; 3],
    direction: [f64; 3],
}

#[derive(Debug, Serialize)]
struct SampleRecord {
    time_utc: String,
    position_km: [f64; 3],
    velocity_kms: [f64; 3],
}

#[derive(Debug, Serialize)]
struct TrajectoryRecord {
    id: String,
    samples: Vec<SampleRecord>,
}

#[derive(Debug, Serialize)]
struct CollisionReport {
    generated_at: String,
    model: String,
    time_utc: String,
    norad1: u32,
    norad2: u32,
    collision_point_km: [f64; 3],
    collision_axis: [f64; 3],
    total_mass_kg: f64,
    relative_velocity_ms: f64,
    energy_j: f64,
    fragment_count: usize,
    fragments: Vec<FragmentRecord>,
    trajectories: Vec<TrajectoryRecord>,
}

pub fn run_detect(args: DetectArgs) -> Result<()> {
    if args.hours <= 0.0 {
        return Err(anyhow!("hours must be > 0"));
    }
    if args.step_seconds <= 0.0 {
        return Err(anyhow!("step-seconds must be > 0"));
    }
    if args.threshold_m <= 0.0 {
        return Err(anyhow!("threshold-m must be > 0"));
    }

    let catalog = load_catalog(&args.catalog)?;
    let records = select_records(&catalog, &args.norad_ids)?;
    if records.len() < 2 {
        return Err(anyhow!(
            "need at least two objects with orbital elements, found {}",
            records.len()
        ));
    }

    let objects: Vec<OrbitingObject> = records.iter().map(|r| r.to_orbiting_object()).collect();

    let mut provider = Sgp4Provider::new();
    provider.load_tles(records.iter().copied());
    if provider.tle_count() < 2 {
        return Err(anyhow!(
            "only {} element sets parsed; need at least two propagable objects",
            provider.tle_count()
        ));
    }

    let start = parse_instant(args.start.as_deref())?;
    let end = start + satkit::Duration::from_seconds(args.hours * 3600.0);
    let total_pairs = objects.len() * (objects.len() - 1) / 2;

    let progress = ProgressBar::new_spinner();
    progress.set_style(ProgressStyle::with_template("{spinner} {elapsed_precise} {msg}").unwrap());
    progress.set_message(format!(
        "Scanning {} pairs over {} hours...",
        total_pairs, args.hours
    ));
    progress.enable_steady_tick(std::time::Duration::from_millis(120));

    let events = detect_close_approaches(
        &provider,
        &objects,
        start,
        end,
        args.step_seconds,
        args.threshold_m,
    )?;

    progress.finish_and_clear();

    let event_records: Vec<ApproachRecord> = events
        .iter()
        .map(|event| approach_record(event, args.object_radius_m))
        .collect();

    let report = ApproachReport {
        generated_at: Utc::now().to_rfc3339(),
        start_time_utc: start.to_string(),
        hours: args.hours,
        step_seconds: args.step_seconds,
        threshold_m: args.threshold_m,
        object_radius_m: args.object_radius_m,
        total_objects: objects.len(),
        total_pairs,
        events: event_records,
    };

    write_report(&args.output, &report)?;
    log::info!(
        "Wrote {} close-approach events to {:?}",
        report.events.len(),
        args.output
    );
    Ok(())
}

pub fn run_simulate(args: SimulateArgs) -> Result<()> {
    if args.propagate_seconds < 0.0 {
        return Err(anyhow!("propagate-seconds must be >= 0"));
    }
    if args.propagate_seconds > 0.0 && args.trajectory_step_seconds <= 0.0 {
        return Err(anyhow!("trajectory-step-seconds must be > 0"));
    }

    let catalog = load_catalog(&args.catalog)?;
    let record1 = require_record(&catalog, args.norad1)?;
    let record2 = require_record(&catalog, args.norad2)?;

    let mut provider = Sgp4Provider::new();
    provider.load_tles([record1, record2]);

    let registry = ModelRegistry::with_defaults();
    let simulator = CollisionSimulator::new(&provider, &registry);

    let epoch = parse_instant(args.at.as_deref())?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let result = simulator.simulate_collision(
        &record1.to_orbiting_object(),
        &record2.to_orbiting_object(),
        epoch,
        args.model.as_deref(),
        &mut rng,
    )?;

    let trajectories = if args.propagate_seconds > 0.0 {
        propagate_fragments(
            &result.fragments,
            epoch,
            epoch + satkit::Duration::from_seconds(args.propagate_seconds),
            args.trajectory_step_seconds,
        )
    } else {
        Vec::new()
    };

    let report = collision_report(&args, &result, &trajectories, epoch);
    write_report(&args.output, &report)?;
    log::info!(
        "Wrote collision report ({} fragments) to {:?}",
        report.fragments.len(),
        args.output
    );
    Ok(())
}

pub fn run_models() -> Result<()> {
    let registry = ModelRegistry::with_defaults();
    for (name, description) in registry.list() {
        println!("{:<12} {}", name, description);
    }
    Ok(())
}

/// Resolve the detection object set: an explicit catalog-number list, or
/// every record with elements
fn select_records<'a>(
    catalog: &'a CatalogFile,
    norad_ids: &[u32],
) -> Result<Vec<&'a ObjectRecord>> {
    if norad_ids.is_empty() {
        return Ok(catalog.records_with_tle());
    }

    let mut selected = Vec::with_capacity(norad_ids.len());
    for &norad_id in norad_ids {
        selected.push(require_record(catalog, norad_id)?);
    }
    Ok(selected)
}

fn require_record(catalog: &CatalogFile, norad_id: u32) -> Result<&ObjectRecord> {
    let record = catalog
        .objects
        .get(&norad_id.to_string())
        .ok_or_else(|| anyhow!("object {} not found in catalog", norad_id))?;
    if !record.has_tle() {
        return Err(anyhow!("object {} has no orbital elements", norad_id));
    }
    Ok(record)
}

/// Parse an RFC 3339 UTC timestamp into a satkit instant, defaulting to now
fn parse_instant(value: Option<&str>) -> Result<satkit::Instant> {
    let utc: DateTime<Utc> = match value {
        Some(text) => text
            .parse()
            .with_context(|| format!("Invalid UTC timestamp: {}", text))?,
        None => Utc::now(),
    };

    satkit::Instant::from_datetime(
        utc.year(),
        utc.month() as i32,
        utc.day() as i32,
        utc.hour() as i32,
        utc.minute() as i32,
        utc.second() as f64,
    )
    .map_err(|_| anyhow!("timestamp out of range: {}", utc))
}

fn approach_record(event: &CloseApproachEvent, object_radius_m: f64) -> ApproachRecord {
    ApproachRecord {
        norad1: event.norad1,
        norad2: event.norad2,
        time_utc: event.time.to_string(),
        distance_m: event.distance_m,
        relative_speed_ms: event.relative_speed_ms(),
        probability: collision_probability(event, object_radius_m, object_radius_m),
        position1_km: event.state1.position_km.into(),
        position2_km: event.state2.position_km.into(),
        velocity1_kms: event.state1.velocity_kms.into(),
        velocity2_kms: event.state2.velocity_kms.into(),
    }
}

fn collision_report(
    args: &SimulateArgs,
    result: &CollisionResult,
    trajectories: &[FragmentTrajectory],
    epoch: satkit::Instant,
) -> CollisionReport {
    let fragments = result
        .fragments
        .iter()
        .map(|fragment| FragmentRecord {
            id: fragment.id.clone(),
            mass_kg: fragment.mass_kg,
            diameter_m: fragment.diameter_m,
            position_km: fragment.position_km.into(),
            velocity_kms: fragment.velocity_kms.into(),
            direction: fragment.direction.into(),
        })
        .collect();

    let trajectories = trajectories
        .iter()
        .map(|trajectory| TrajectoryRecord {
            id: trajectory.fragment.id.clone(),
            samples: trajectory
                .samples
                .iter()
                .map(|sample| SampleRecord {
                    time_utc: sample.time.to_string(),
                    position_km: sample.position_km.into(),
                    velocity_kms: sample.velocity_kms.into(),
                })
                .collect(),
        })
        .collect();

    CollisionReport {
        generated_at: Utc::now().to_rfc3339(),
        model: result.model_name.clone(),
        time_utc: epoch.to_string(),
        norad1: args.norad1,
        norad2: args.norad2,
        collision_point_km: result.outcome.collision_point_km.into(),
        collision_axis: result.outcome.collision_axis.into(),
        total_mass_kg: result.outcome.total_mass_kg,
        relative_velocity_ms: result.outcome.relative_velocity_ms,
        energy_j: result.outcome.energy_j,
        fragment_count: result.outcome.fragment_count,
        fragments,
        trajectories,
    }
}

fn write_report<T: Serialize>(path: &PathBuf, report: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {:?}", parent))?;
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file {:?}", path))?;
    serde_json::to_writer_pretty(file, report).with_context(|| "Failed to serialize report")?;
    Ok(())
}
