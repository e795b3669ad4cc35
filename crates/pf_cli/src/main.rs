// crates/pf_cli/src/main.rs
//
// Exit codes, typed error mapping, logging setup, the validate-only
// short-circuit and the full run path (load → settings → allocate →
// calculation.json → optional reports).

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    pub const VALIDATION: i32 = 2;
    pub const IO: i32 = 4;
    pub const ENGINE: i32 = 5;
}

use std::path::Path;
use std::process::ExitCode;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use args::Args;

use pf_algo::{allocate_on, format_duration_message};
use pf_core::{AllocationPolicy, ManualAllocations, MultiPetCalculation, Pet, Purchase};
use pf_io::{canonical_json, loader, IoError};
use pf_report::{build_report_model, grams_label, map_intake_sources, ReportContext, ReportError, ReportModel};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Flags, schema, JSON shape, manifest, cross-record invariants
    Validation(String),
    /// Read/write/path/limits
    Io(String),
    /// Report build or renderer failure
    Render(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) => write!(f, "validation: {m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
            MainError::Render(m) => write!(f, "render: {m}"),
        }
    }
}

fn main() -> ExitCode {
    let raw = Args::parse();
    init_logging(raw.quiet);

    let args = match args::validate(raw) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("pf: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };

    let result = if args.validate_only { validate_only(&args) } else { run_once(&args) };
    let rc = match result {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("pf: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

/// `RUST_LOG` plus a default `pf=info` (`pf=warn` with --quiet); logs go to stderr.
fn init_logging(quiet: bool) {
    let default = if quiet { "pf=warn" } else { "pf=info" };
    let filter = match default.parse() {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env(),
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}

/// Map our typed errors to the exit-code table.
fn map_error(e: &MainError) -> i32 {
    use exitcodes::*;
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::Io(_) => IO,
        MainError::Render(_) => ENGINE,
    }
}

/// Translate pf_io::IoError into MainError buckets.
fn map_io_err(e: IoError) -> MainError {
    match e {
        IoError::Schema { pointer, msg } => MainError::Validation(format!("schema {pointer}: {msg}")),
        IoError::Json { pointer, msg } => MainError::Validation(format!("json {pointer}: {msg}")),
        IoError::Manifest(m) => MainError::Validation(format!("manifest: {m}")),
        IoError::Invalid(m) => MainError::Validation(format!("invalid: {m}")),

        IoError::Read(m) => MainError::Io(format!("read: {m}")),
        IoError::Path(m) => MainError::Io(format!("path: {m}")),
        IoError::Limit(m) => MainError::Io(format!("limit: {m}")),
    }
}

fn map_report_err(e: ReportError) -> MainError {
    match e {
        ReportError::Template(m) => MainError::Render(format!("template: {m}")),
        ReportError::Inconsistent(m) => MainError::Render(format!("inconsistent: {m}")),
    }
}

/* ---------------------------------- Inputs ---------------------------------- */

struct Inputs {
    pets: Vec<Pet>,
    purchases: Vec<Purchase>,
    policy: Option<AllocationPolicy>,
    start_date: Option<NaiveDate>,
    manual: Option<ManualAllocations>,
}

fn load_inputs(args: &Args) -> Result<Inputs, MainError> {
    if let Some(plan) = &args.plan {
        let loaded = loader::load_plan(plan).map_err(map_io_err)?;
        return Ok(Inputs {
            pets: loaded.household.pets,
            purchases: loaded.cart.items,
            policy: loaded.policy,
            start_date: loaded.start_date,
            manual: loaded.manual,
        });
    }
    let (Some(household), Some(cart)) = (&args.household, &args.cart) else {
        return Err(MainError::Validation("--household and --cart are required without --plan".into()));
    };
    Ok(Inputs {
        pets: loader::load_household(household).map_err(map_io_err)?.pets,
        purchases: loader::load_cart(cart).map_err(map_io_err)?.items,
        policy: None,
        start_date: None,
        manual: None,
    })
}

/// Validate-only path (no engine, no artifacts).
fn validate_only(args: &Args) -> Result<(), MainError> {
    let inputs = load_inputs(args)?;
    info!(pets = inputs.pets.len(), lines = inputs.purchases.len(), "validate-only: inputs OK");
    Ok(())
}

/* ---------------------------------- Settings ---------------------------------- */

/// Flags over plan values over engine defaults.
struct Settings {
    policy: AllocationPolicy,
    start_date: NaiveDate,
    now: NaiveDateTime,
    manual: Option<ManualAllocations>,
}

fn resolve_settings(args: &Args, inputs: &Inputs) -> Settings {
    let cli_manual = (!args.manual.is_empty()).then_some(AllocationPolicy::Manual);
    let policy = args.policy.or(cli_manual).or(inputs.policy).unwrap_or_default();

    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let now = match args.today {
        Some(d) => d.and_time(NaiveTime::default()),
        None => Local::now().naive_local(),
    };
    let start_date = args.start_date.or(inputs.start_date).unwrap_or(today);

    let manual = if policy == AllocationPolicy::Manual {
        let mut map = inputs.manual.clone().unwrap_or_default();
        for (id, grams) in &args.manual {
            map.insert(id.clone(), *grams);
        }
        Some(map)
    } else {
        if inputs.manual.is_some() {
            debug!(%policy, "plan manual_allocations ignored for non-manual policy");
        }
        None
    };

    Settings { policy, start_date, now, manual }
}

/* ---------------------------------- Run ---------------------------------- */

fn run_once(args: &Args) -> Result<(), MainError> {
    let mut inputs = load_inputs(args)?;

    if args.food_only {
        let before = inputs.purchases.len();
        inputs.purchases.retain(|line| line.product.is_food());
        let dropped = before - inputs.purchases.len();
        if dropped > 0 {
            warn!(dropped, "non-food cart lines dropped (--food-only)");
        }
    }

    let settings = resolve_settings(args, &inputs);
    if let Some(manual) = &settings.manual {
        if manual.is_empty() {
            warn!("manual policy without manual allocations; every pet gets 0 g");
        }
        for id in manual.keys() {
            if !inputs.pets.iter().any(|p| &p.id == id) {
                warn!(pet = %id, "manual allocation for unknown pet ignored");
            }
        }
    }

    let calc = allocate_on(
        &inputs.pets,
        &inputs.purchases,
        settings.policy,
        settings.start_date,
        settings.manual.as_ref(),
    );
    info!(
        total_grams = calc.total_grams,
        policy = %calc.policy_used,
        pets = calc.per_pet.len(),
        leftover = calc.leftover_grams.unwrap_or(0),
        "allocation done"
    );

    let calc_path = args.out.join("calculation.json");
    canonical_json::write_canonical_file(&calc_path, &calc).map_err(map_io_err)?;

    if !args.render.is_empty() {
        let ctx = ReportContext {
            start_date: settings.start_date,
            now: settings.now,
            intake_sources: map_intake_sources(&inputs.pets, &inputs.purchases),
        };
        let model = build_report_model(&calc, &ctx).map_err(map_report_err)?;
        for fmt in &args.render {
            match fmt.as_str() {
                "json" => render_json_report(&model, &args.out)?,
                "html" => render_html_report(&model, &args.out)?,
                other => return Err(MainError::Render(format!("unknown renderer: {other}"))),
            }
        }
    }

    if !args.quiet {
        print_summary(&calc);
    }
    info!(out = %args.out.display(), "artifacts written");
    Ok(())
}

fn print_summary(calc: &MultiPetCalculation) {
    println!("Tổng: {} ({})", grams_label(calc.total_grams), calc.policy_used);
    if calc.per_pet.is_empty() && calc.total_grams > 0 {
        println!("Chưa chia được: chưa có bé nào có đủ dữ liệu.");
    }
    for a in &calc.per_pet {
        println!(
            "- {}: {} · {}",
            a.pet_name,
            grams_label(a.grams_allocated),
            format_duration_message(a.estimated_days, Some(&a.pet_name))
        );
    }
    if let Some(g) = calc.leftover_grams {
        println!("Còn dư: {}", grams_label(g));
    }
}

#[cfg(feature = "report-json")]
fn render_json_report(model: &ReportModel, out_dir: &Path) -> Result<(), MainError> {
    let text = pf_report::render_json(model).map_err(map_report_err)?;
    canonical_json::write_atomic(&out_dir.join("report.json"), text.as_bytes())
        .map_err(|e| MainError::Io(format!("write report.json: {e}")))
}

#[cfg(not(feature = "report-json"))]
fn render_json_report(_model: &ReportModel, _out_dir: &Path) -> Result<(), MainError> {
    Err(MainError::Render("json renderer not enabled (build with feature `report-json`)".into()))
}

#[cfg(feature = "report-html")]
fn render_html_report(model: &ReportModel, out_dir: &Path) -> Result<(), MainError> {
    let html = pf_report::render_html(model).map_err(map_report_err)?;
    canonical_json::write_atomic(&out_dir.join("report.html"), html.as_bytes())
        .map_err(|e| MainError::Io(format!("write report.html: {e}")))
}

#[cfg(not(feature = "report-html"))]
fn render_html_report(_model: &ReportModel, _out_dir: &Path) -> Result<(), MainError> {
    Err(MainError::Render("html renderer not enabled (build with feature `report-html`)".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("pf").chain(argv.iter().copied())).unwrap()
    }

    fn inputs(policy: Option<AllocationPolicy>, manual: Option<ManualAllocations>) -> Inputs {
        Inputs {
            pets: Vec::new(),
            purchases: Vec::new(),
            policy,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            manual,
        }
    }

    #[test]
    fn flags_override_plan() {
        let a = args(&["--plan", "p.json", "--policy", "equal", "--start-date", "2024-06-01"]);
        let s = resolve_settings(&a, &inputs(Some(AllocationPolicy::Manual), None));
        assert_eq!(s.policy, AllocationPolicy::Equal);
        assert_eq!(s.start_date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert!(s.manual.is_none());
    }

    #[test]
    fn manual_flags_imply_policy_and_merge() {
        let mut plan_manual = ManualAllocations::new();
        plan_manual.insert("a".parse().unwrap(), 100.0);
        plan_manual.insert("b".parse().unwrap(), 200.0);
        let a = args(&["--plan", "p.json", "--manual", "b=50", "--today", "2024-03-01"]);
        let s = resolve_settings(&a, &inputs(Some(AllocationPolicy::Equal), Some(plan_manual)));
        assert_eq!(s.policy, AllocationPolicy::Manual);
        let m = s.manual.unwrap();
        assert_eq!(m[&"a".parse::<pf_core::PetId>().unwrap()], 100.0);
        assert_eq!(m[&"b".parse::<pf_core::PetId>().unwrap()], 50.0);
        assert_eq!(s.start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(s.now, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn default_policy_is_split_by_need() {
        let a = args(&["--plan", "p.json"]);
        let s = resolve_settings(&a, &inputs(None, None));
        assert_eq!(s.policy, AllocationPolicy::SplitByNeed);
    }

    #[test]
    fn io_errors_bucket_into_exit_codes() {
        assert_eq!(map_error(&map_io_err(IoError::Schema { pointer: "/".into(), msg: "x".into() })), 2);
        assert_eq!(map_error(&map_io_err(IoError::Invalid("dup".into()))), 2);
        assert_eq!(map_error(&map_io_err(IoError::Path("gone".into()))), 4);
        assert_eq!(map_error(&map_io_err(IoError::Limit("big".into()))), 4);
        assert_eq!(map_error(&map_report_err(ReportError::Template("render"))), 5);
    }
}
