use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use pse_app::{
    AppConfig, AppResult, FlowRequest, OrificeConvertRequest, OrificeSize, ReleaseInputs,
    RequiredAreaRequest, SaveRequest, calc_service, record_service, unit_catalog,
};
use pse_flow::{FlowUnit, ReleaseType, Site};
use pse_gas::gas_catalog;
use pse_records::RecordStore;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pse-cli")]
#[command(
    about = "PSE gas release calculator - orifice flow, tiering and saved calculations",
    long_about = None
)]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Saved calculations file (overrides config and PSE_STORE)
    #[arg(long, global = true)]
    store: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List gases, accepted unit tags and discharge coefficient presets
    Gases,
    /// Calculate release rate, totals and tier
    Calc(FlowArgs),
    /// Solve for the orifice size that reaches a target tier
    RequiredArea {
        /// Target tier: 1 or 2
        #[arg(long)]
        tier: String,
        #[command(flatten)]
        release: ReleaseArgs,
        #[arg(long, default_value = "mm²")]
        area_unit: String,
        #[arg(long, default_value = "mm")]
        diameter_unit: String,
    },
    /// Convert between orifice area and circular diameter
    Orifice {
        #[command(flatten)]
        size: OrificeArgs,
    },
    /// Save a calculation
    Save {
        #[arg(long)]
        user: String,
        #[arg(long)]
        title: String,
        #[command(flatten)]
        flow: FlowArgs,
    },
    /// List saved calculations
    List,
    /// Show a saved calculation and recompute it
    Show {
        /// Calculation ID
        id: String,
    },
    /// Delete a saved calculation
    Delete {
        /// Calculation ID
        id: String,
    },
}

#[derive(Args)]
struct ReleaseArgs {
    #[arg(long, default_value = "Natural Gas")]
    gas: String,
    #[arg(long, default_value = "outdoor")]
    release_type: ReleaseType,
    #[arg(long, default_value = "GTM US")]
    site: Site,
    /// Upstream gauge pressure
    #[arg(long, default_value_t = 100.0, allow_negative_numbers = true)]
    p0: f64,
    #[arg(long, default_value = "psi(g)")]
    p0_unit: String,
    /// Downstream gauge pressure
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    p2: f64,
    #[arg(long, default_value = "psi(g)")]
    p2_unit: String,
    /// Upstream temperature
    #[arg(long, default_value_t = 20.0, allow_negative_numbers = true)]
    t0: f64,
    #[arg(long, default_value = "°C")]
    t0_unit: String,
    /// Release duration
    #[arg(long, default_value_t = 10.0)]
    duration: f64,
    #[arg(long, default_value = "min")]
    duration_unit: String,
    /// Discharge coefficient (0.61 sharp-edged, 0.98 well-rounded, 0.85 typical PSV)
    #[arg(long, default_value_t = 0.61)]
    cd: f64,
}

impl From<ReleaseArgs> for ReleaseInputs {
    fn from(args: ReleaseArgs) -> Self {
        Self {
            gas: args.gas,
            release_type: args.release_type,
            site: args.site,
            p0: args.p0,
            p0_unit: args.p0_unit,
            p2: args.p2,
            p2_unit: args.p2_unit,
            t0: args.t0,
            t0_unit: args.t0_unit,
            duration: args.duration,
            duration_unit: args.duration_unit,
            cd: args.cd,
        }
    }
}

#[derive(Args)]
struct OrificeArgs {
    /// Orifice area
    #[arg(long, default_value_t = 10.0)]
    area: f64,
    #[arg(long, default_value = "mm²")]
    area_unit: String,
    /// Circular orifice diameter (replaces --area)
    #[arg(long, conflicts_with = "area")]
    diameter: Option<f64>,
    #[arg(long, default_value = "mm")]
    diameter_unit: String,
}

impl OrificeArgs {
    fn size(&self) -> OrificeSize {
        match self.diameter {
            Some(value) => OrificeSize::Diameter {
                value,
                unit: self.diameter_unit.clone(),
            },
            None => OrificeSize::Area {
                value: self.area,
                unit: self.area_unit.clone(),
            },
        }
    }
}

#[derive(Args)]
struct FlowArgs {
    #[command(flatten)]
    release: ReleaseArgs,
    #[command(flatten)]
    orifice: OrificeArgs,
}

impl FlowArgs {
    fn into_request(self) -> (FlowRequest, OrificeArgs) {
        let request = FlowRequest {
            release: self.release.into(),
            orifice: self.orifice.size(),
        };
        (request, self.orifice)
    }
}

fn main() -> AppResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_overrides(cli.store, None);

    match cli.command {
        Commands::Gases => cmd_gases(),
        Commands::Calc(flow) => cmd_calc(&flow.into_request().0),
        Commands::RequiredArea {
            tier,
            release,
            area_unit,
            diameter_unit,
        } => cmd_required_area(&RequiredAreaRequest {
            target_tier: tier,
            release: release.into(),
            area_unit,
            diameter_unit,
        }),
        Commands::Orifice { size } => cmd_orifice(&size),
        Commands::Save { user, title, flow } => {
            let (request, orifice) = flow.into_request();
            let request = SaveRequest {
                user_name: user,
                calculation_title: title,
                flow: request,
                area_unit: Some(orifice.area_unit),
            };
            cmd_save(&config.store_path, &request)
        }
        Commands::List => cmd_list(&config.store_path),
        Commands::Show { id } => cmd_show(&config.store_path, &id),
        Commands::Delete { id } => cmd_delete(&config.store_path, &id),
    }
}

fn cmd_gases() -> AppResult<()> {
    println!("Gases:");
    for entry in gas_catalog() {
        let gas = &entry.properties;
        println!(
            "  {:<12} gamma = {:.2}, R = {:.1} J/(kg·K), MW = {:.2}",
            entry.name, gas.gamma, gas.r_specific, gas.molecular_weight
        );
    }

    let units = unit_catalog();
    println!("Units:");
    println!("  pressure:    {}", units.pressure.join(", "));
    println!("  temperature: {}", units.temperature.join(", "));
    println!("  area:        {}", units.area.join(", "));
    println!("  diameter:    {}", units.diameter.join(", "));
    println!("  duration:    {}", units.duration.join(", "));
    println!("Discharge coefficients:");
    for preset in units.cd_presets {
        println!("  {:.2}  {}", preset.cd, preset.label);
    }
    println!("Typical hole sizes:");
    for preset in units.hole_sizes {
        println!(
            "  {:<12} {:<14} {:<7} {}",
            preset.category, preset.equipment, preset.failure, preset.hole
        );
    }
    Ok(())
}

fn cmd_calc(request: &FlowRequest) -> AppResult<()> {
    let report = calc_service::calculate(request)?;

    println!("Gas: {}", report.gas);
    println!(
        "Flow regime: {} (P2/P1 = {:.4}, critical {:.4})",
        report.regime_label, report.pressure_ratio, report.critical_pressure_ratio
    );
    println!("Flow rate:");
    for rate in &report.rates {
        println!("  {:>14.6} {}", rate.value, rate.unit);
    }
    println!("Total release over {:.0} s:", report.duration_s);
    for total in &report.totals {
        println!("  {:>14.6} {}", total.value, total.unit);
    }
    println!("Tier: {}", report.tier);
    Ok(())
}

fn cmd_required_area(request: &RequiredAreaRequest) -> AppResult<()> {
    let report = calc_service::required_area(request)?;

    println!(
        "Required orifice for {}: {:.6} {} (diameter {:.4} {})",
        report.target_tier, report.area, report.area_unit, report.diameter, report.diameter_unit
    );
    println!(
        "  Target rate: {:.6} {}, flow regime: {}",
        report.target_rate_mscf_per_hr,
        FlowUnit::MscfPerHr,
        report.regime.label()
    );
    Ok(())
}

fn cmd_orifice(size: &OrificeArgs) -> AppResult<()> {
    let conversion = calc_service::convert_orifice(&OrificeConvertRequest {
        orifice: size.size(),
        area_unit: size.area_unit.clone(),
        diameter_unit: size.diameter_unit.clone(),
    })?;
    println!(
        "Area: {:.6} {}  Diameter: {:.6} {}",
        conversion.area, conversion.area_unit, conversion.diameter, conversion.diameter_unit
    );
    Ok(())
}

fn cmd_save(store_path: &Path, request: &SaveRequest) -> AppResult<()> {
    let mut store = RecordStore::open(store_path);
    let outcome = record_service::save_calculation(&mut store, request)?;
    println!("✓ Saved calculation: {}", outcome.record.id);
    if let Some(warning) = outcome.warning {
        println!("⚠ {}", warning);
    }
    Ok(())
}

fn cmd_list(store_path: &Path) -> AppResult<()> {
    let store = RecordStore::open(store_path);
    if store.is_empty() {
        println!("No saved calculations in {}", store_path.display());
        return Ok(());
    }

    println!("Saved calculations:");
    for record in store.list() {
        let inputs = &record.inputs;
        println!(
            "  {}  {}  {} - {} ({}, {} {})",
            record.id,
            record.timestamp,
            inputs.user_name,
            inputs.calculation_title,
            inputs.gas,
            inputs.release_type,
            inputs.site
        );
    }
    Ok(())
}

fn cmd_show(store_path: &Path, id: &str) -> AppResult<()> {
    let store = RecordStore::open(store_path);
    let saved = record_service::view_calculation(&store, id)?;

    println!("{} by {} ({})", saved.calculation_title, saved.user_name, saved.timestamp);
    let release = &saved.request.release;
    println!(
        "  {} {}, {} {} -> {} {} at {} {}",
        release.gas,
        release.release_type,
        release.p0,
        release.p0_unit,
        release.p2,
        release.p2_unit,
        release.t0,
        release.t0_unit
    );
    cmd_calc(&saved.request)
}

fn cmd_delete(store_path: &Path, id: &str) -> AppResult<()> {
    let mut store = RecordStore::open(store_path);
    let outcome = record_service::delete_calculation(&mut store, id)?;
    for record in &outcome.removed {
        println!(
            "✓ Deleted calculation: {} ({})",
            record.id, record.inputs.calculation_title
        );
    }
    if let Some(warning) = outcome.warning {
        println!("⚠ {}", warning);
    }
    Ok(())
}
