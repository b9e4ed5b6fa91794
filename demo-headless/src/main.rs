use chem_hazard_core::core_types::units::{Atmospheres, Celsius, MetersPerSecond};
use chem_hazard_core::{
    BlastConditions, ConcentrationUnit, DispersionConfig, EngineConfig,
    HazardEngine, PhaseModel, ReleaseScenario, SpillInput, StabilityClass, Terrain, ZoneJitter,
    ZoneLevel,
};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Chemical release hazard assessment with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "chem-hazard-demo")]
#[command(about = "Screening-level chemical release hazard assessment", long_about = None)]
struct Args {
    /// Chemical identifier (case-insensitive)
    #[arg(short, long, default_value = "chlorine")]
    chemical: String,

    /// Release rate in kg/min
    #[arg(short, long, default_value_t = 10.0)]
    rate: f64,

    /// Release duration in minutes
    #[arg(short, long, default_value_t = 60.0)]
    duration: f64,

    /// Release temperature in °C
    #[arg(short, long, default_value_t = 25.0)]
    temperature: f64,

    /// Storage pressure in atm
    #[arg(short, long, default_value_t = 1.0)]
    pressure: f64,

    /// Wind speed in m/s
    #[arg(short, long, default_value_t = 3.0)]
    wind_speed: f64,

    /// Direction the wind blows from, in degrees (0=North, 90=East)
    #[arg(long, default_value_t = 270.0)]
    wind_direction: f64,

    /// Pasquill-Gifford stability class (A-F)
    #[arg(short, long, default_value = "D")]
    stability: String,

    /// Terrain (urban, suburban, rural, forest, water)
    #[arg(long, default_value = "suburban")]
    terrain: String,

    /// Release point latitude
    #[arg(long, default_value_t = 40.7128)]
    lat: f64,

    /// Release point longitude
    #[arg(long, default_value_t = -74.0060)]
    lng: f64,

    /// Release is inside a building
    #[arg(long)]
    indoor: bool,

    /// Sensor reading in mg/m³ for the leak check
    #[arg(short, long, default_value_t = 0.1)]
    measured: f64,

    /// Concentration in mg/m³ for the blast assessment (0 = use the zone peak)
    #[arg(long, default_value_t = 0.0)]
    blast_concentration: f64,

    /// Number of sensors to place
    #[arg(long, default_value_t = 6)]
    sensors: usize,

    /// Time needed to evacuate the affected area, in minutes
    #[arg(short, long, default_value_t = 15.0)]
    evacuation_time: f64,

    /// Zone jitter seed (omit for exact zone distances)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of downwind profile samples
    #[arg(long, default_value_t = 21)]
    profile_samples: usize,

    /// Profile extent as a multiple of the yellow-zone distance
    #[arg(long, default_value_t = 1.2)]
    profile_extent: f64,

    /// Receptor distance in metres for plume spread and peak concentration
    #[arg(long, default_value_t = 100.0)]
    receptor_distance: f64,

    /// Decide gas/liquid from the boiling point corrected for storage pressure
    #[arg(long)]
    pressure_corrected_boiling: bool,

    /// List the built-in chemicals and exit
    #[arg(long)]
    list: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let jitter = match args.seed {
        Some(seed) => ZoneJitter::seeded(seed, 0.05),
        None => ZoneJitter::Disabled,
    };
    let dispersion = DispersionConfig::default()
        .with_jitter(jitter)
        .with_profile_samples(args.profile_samples)
        .with_profile_extent(args.profile_extent)
        .with_receptor_distance(args.receptor_distance);
    let config = EngineConfig::default().with_dispersion(dispersion);
    info!("Using {:?}", config);
    let engine = HazardEngine::builtin().with_config(config);

    if args.list {
        println!("Built-in chemicals:");
        for name in engine.repository().names() {
            println!("  {}", name);
        }
        return;
    }

    println!("=== Chemical Release Hazard Assessment ===\n");

    let scenario = ReleaseScenario::new(&args.chemical, args.rate, args.duration)
        .with_temperature(Celsius::new(args.temperature))
        .with_pressure(Atmospheres::new(args.pressure))
        .with_wind(MetersPerSecond::new(args.wind_speed), args.wind_direction)
        .with_stability(StabilityClass::from_label(&args.stability))
        .with_terrain(Terrain::from_label(&args.terrain))
        .with_source(args.lat, args.lng)
        .with_indoor(args.indoor);

    if let Err(e) = scenario.validate() {
        error!("Invalid scenario: {}", e);
        std::process::exit(1);
    }
    if !engine.repository().contains(&args.chemical) {
        warn!("Unknown chemical '{}'", args.chemical);
        println!("'{}' is not in the chemical table; using fallback values\n", args.chemical);
    }

    println!("Chemical: {}", scenario.chemical);
    println!(
        "Release: {:.1} kg/min for {:.0} min at {}, {}",
        scenario.release_rate_kg_min,
        scenario.duration_min,
        scenario.temperature,
        scenario.pressure
    );
    println!(
        "Wind: {} from {}, class {}, terrain {:?}{}\n",
        scenario.wind_speed,
        scenario.wind_direction,
        scenario.stability,
        scenario.terrain,
        if scenario.indoor { " (indoor)" } else { "" }
    );
    if scenario.stability.is_stable() {
        println!("Stable air: expect a long, concentrated plume near the ground\n");
    }

    // Source term
    let mut spill = SpillInput::from_scenario(&scenario);
    if args.pressure_corrected_boiling {
        spill = spill.with_phase_model(PhaseModel::PressureCorrected);
    }
    let mass = engine.compute_mass_balance(&scenario.chemical, &spill);
    println!("--- Mass Balance ---");
    println!(
        "Phase: {} (vapor fraction {:.3})",
        if mass.is_gas { "gas" } else { "liquid" },
        mass.vapor_fraction
    );
    println!(
        "Released {:.1} kg: vapor {:.1} kg, pool {:.1} kg, evaporated {:.1} kg",
        mass.total_released_kg,
        mass.vapor_generated_kg,
        mass.pool_formation_kg,
        mass.pool_evaporation_kg
    );
    println!(
        "Airborne: {:.1} kg ({:.1}%)",
        mass.airborne_release_kg, mass.breakdown.airborne_percent
    );
    if let Some(minutes) = mass.pool_duration_min {
        println!("Pool: {:.1} m², evaporates in {:.0} min", mass.pool_area_m2, minutes);
    }
    println!();

    // Dispersion
    let detailed = engine.compute_detailed_dispersion(&scenario);
    println!("--- Hazard Zones ---");
    for level in [ZoneLevel::Red, ZoneLevel::Orange, ZoneLevel::Yellow] {
        let zone = detailed.zones.zone(level);
        println!(
            "{:<6} {:>6.2} km  {:>10.2} mg/m³  {:>7.2} km²  {:>8.0} people",
            level,
            zone.distance_km,
            zone.concentration_mg_m3,
            zone.area_km2,
            zone.population
        );
    }
    println!(
        "σy={:.1} m, σz={:.1} m, peak {:.2} mg/m³, lethal within {:.2} km",
        detailed.sigma_y_m,
        detailed.sigma_z_m,
        detailed.max_concentration_mg_m3,
        detailed.lethal_distance_km
    );
    println!(
        "Exposed: {:.2} km², {:.0} people\n",
        detailed.total_area_km2, detailed.total_population
    );

    println!("Downwind profile:");
    for point in detailed.profile.points.iter().step_by(4) {
        let ppm = engine.convert_concentration(
            point.concentration_mg_m3,
            &scenario.chemical,
            ConcentrationUnit::MgPerM3,
            ConcentrationUnit::Ppm,
        );
        println!(
            "  {:>6.2} km  {:>10.3} mg/m³  {:>10.3} ppm",
            point.distance_km, point.concentration_mg_m3, ppm
        );
    }
    for level in [ZoneLevel::Red, ZoneLevel::Orange, ZoneLevel::Yellow] {
        let threshold = detailed.zones.zone(level).concentration_mg_m3;
        match detailed.profile.reach_of(threshold) {
            Some(km) => println!("  {} threshold holds out to {:.2} km", level, km),
            None => println!("  {} threshold not reached on the centreline", level),
        }
    }
    println!();

    // Fire and explosion
    let blast_concentration = if args.blast_concentration > 0.0 {
        args.blast_concentration
    } else {
        detailed.max_concentration_mg_m3
    };
    let blast = engine.assess_blast(
        &scenario.chemical,
        &BlastConditions::new(blast_concentration, scenario.temperature, scenario.pressure),
    );
    println!("--- Fire and Explosion ---");
    println!(
        "At {:.2} mg/m³ ({:.4}%): flammability {}, explosion {}",
        blast_concentration,
        blast.concentration_percent,
        blast.flammability_risk,
        blast.explosion_risk
    );
    if let Some(lel) = blast.percent_of_lel {
        println!("{:.1}% of LEL", lel);
    }
    println!(
        "Overpressure {:.2} psi, thermal {:.2} kW/m², safe distance {:.0} m",
        blast.overpressure_psi, blast.thermal_radiation_kw_m2, blast.safe_distance_m
    );
    for comment in &blast.comments {
        println!("  - {}", comment);
    }
    println!();

    // Leak check
    let leak = engine.detect_leak(&scenario.chemical, args.measured, None, None);
    println!("--- Leak Detection ---");
    println!(
        "Reading {:.4} mg/m³ vs threshold {:.4} mg/m³: {}",
        args.measured,
        leak.detection_threshold_mg_m3,
        if leak.is_leaking { "LEAK" } else { "no leak" }
    );
    if leak.is_leaking {
        println!(
            "{:.1}x threshold, confidence {:.0}%, severity {}",
            leak.exceeds_factor,
            leak.confidence * 100.0,
            leak.severity
        );
        println!("Act within {:.0} min", leak.time_to_action_min);
    }
    for action in &leak.recommended_actions {
        println!("  - {}", action);
    }
    println!();

    // Response
    println!("--- Sensor Placement ---");
    for sensor in engine.recommend_sensors(&scenario, &detailed.zones, args.sensors) {
        println!(
            "P{} {:<10} {:<7} {:>7.4}, {:>8.4}  ({:.2} km at {})",
            sensor.priority,
            format!("{:?}", sensor.role),
            format!("{:?}", sensor.sensor_type),
            sensor.lat,
            sensor.lng,
            sensor.distance_km,
            sensor.bearing
        );
    }
    println!();

    let comparison = engine.compare_protective_actions(&scenario, args.evacuation_time);
    println!("--- Protective Action ---");
    for assessment in [&comparison.evacuation, &comparison.shelter] {
        println!(
            "{}: {:.0}% effective, {:.0}% casualty reduction",
            assessment.kind,
            assessment.effectiveness_percent,
            assessment.casualty_reduction_percent
        );
        println!("  {}", assessment.recommendation);
    }
    println!("Recommended: {}", comparison.recommended);
}
