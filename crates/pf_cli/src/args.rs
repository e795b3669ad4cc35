// crates/pf_cli/src/args.rs
//
// Offline CLI argument surface: types, value parsers, mode checks.
//
// Rules:
// - No networked paths (reject any scheme:// like http/https/file)
// - Exactly one of: --plan  XOR  (--household + --cart)
// - Settings flags (--policy, --manual, --start-date) override the plan's values
// - Output: --out dir, --render [json|html]*
// - --validate-only performs load + schema checks without running the engine

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Parser;

use pf_core::{AllocationPolicy, PetId};
use pf_io::looks_like_url_strict;

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "pf",
    version,
    disable_help_subcommand = true,
    about = "Split a food purchase across a household's pets and estimate how long it lasts"
)]
pub struct Args {
    // --- Mode selection ---
    /// Plan manifest naming the household and cart files (exclusive with --household/--cart).
    #[arg(long, conflicts_with_all = ["household", "cart"])]
    pub plan: Option<PathBuf>,

    /// Household JSON (`{"pets": [...]}`).
    #[arg(long)]
    pub household: Option<PathBuf>,
    /// Cart JSON (`{"items": [{"product": ..., "quantity": n}]}`).
    #[arg(long)]
    pub cart: Option<PathBuf>,

    // --- Allocation settings ---
    /// Allocation policy: split-by-need (default), equal, manual.
    #[arg(long, value_parser = parse_policy)]
    pub policy: Option<AllocationPolicy>,

    /// Manual grams for one pet as `petId=grams`; repeatable. Implies `--policy manual`.
    #[arg(long = "manual", value_name = "PET=GRAMS", value_parser = parse_manual_entry)]
    pub manual: Vec<(PetId, f64)>,

    /// First feeding day (YYYY-MM-DD). Defaults to the plan's value, then today.
    #[arg(long, value_parser = parse_date)]
    pub start_date: Option<NaiveDate>,

    /// Date used for "days remaining" / low-stock flags (YYYY-MM-DD). Defaults to now.
    #[arg(long, value_parser = parse_date)]
    pub today: Option<NaiveDate>,

    /// Drop cart lines whose category is not `food` before allocating.
    #[arg(long)]
    pub food_only: bool,

    // --- Output & rendering ---
    /// Output directory (default: current directory).
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
    /// Report format(s) to emit next to calculation.json. Omit to skip rendering.
    #[arg(long, value_parser = ["json", "html"])]
    pub render: Vec<String>,

    /// Validate inputs only (load + schema + invariants), do not run the engine.
    #[arg(long)]
    pub validate_only: bool,

    /// Only log warnings and errors.
    #[arg(long)]
    pub quiet: bool,
}

/// Errors surfaced by argument validation.
#[derive(Debug)]
pub enum CliError {
    BadCombo(&'static str),
    Missing(&'static str),
    NonLocalPath(String),
    NotFound(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CliError::*;
        match self {
            BadCombo(s) => write!(f, "invalid flag combination: {s}"),
            Missing(s) => write!(f, "missing required flag: {s}"),
            NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
            NotFound(p) => write!(f, "file not found: {p}"),
        }
    }
}
impl std::error::Error for CliError {}

/* ---------------- value parsers ---------------- */

pub fn parse_policy(s: &str) -> Result<AllocationPolicy, String> {
    s.parse::<AllocationPolicy>().map_err(|e| e.to_string())
}

pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

/// `petId=grams`; grams must be a finite, non-negative number.
pub fn parse_manual_entry(s: &str) -> Result<(PetId, f64), String> {
    let (id, grams) = s
        .split_once('=')
        .ok_or_else(|| format!("expected PET=GRAMS, got `{s}`"))?;
    let id: PetId = id.trim().parse().map_err(|_| format!("invalid pet id `{}`", id.trim()))?;
    let grams: f64 = grams
        .trim()
        .parse()
        .map_err(|_| format!("invalid grams `{}`", grams.trim()))?;
    if !grams.is_finite() || grams < 0.0 {
        return Err(format!("grams must be a non-negative number, got `{grams}`"));
    }
    Ok((id, grams))
}

/* ---------------- validation ---------------- */

/// Scheme checks, mode checks and input existence.
pub fn validate(args: Args) -> Result<Args, CliError> {
    for p in iter_all_paths(&args) {
        ensure_local_path(p)?;
    }

    if let Some(plan) = &args.plan {
        ensure_local_exists(plan, "--plan")?;
    } else {
        let household = args.household.as_ref().ok_or(CliError::Missing("--household (or --plan)"))?;
        let cart = args.cart.as_ref().ok_or(CliError::Missing("--cart (or --plan)"))?;
        ensure_local_exists(household, "--household")?;
        ensure_local_exists(cart, "--cart")?;
    }

    if !args.manual.is_empty() && args.policy.is_some_and(|p| p != AllocationPolicy::Manual) {
        return Err(CliError::BadCombo("--manual requires --policy manual"));
    }

    Ok(args)
}

#[inline]
fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    if let Some(s) = p.to_str() {
        if looks_like_url_strict(s) {
            return Err(CliError::NonLocalPath(s.to_string()));
        }
    }
    Ok(())
}

fn ensure_local_exists(p: &Path, label: &'static str) -> Result<(), CliError> {
    let meta = fs::metadata(p).map_err(|_| CliError::NotFound(format!("{label} {}", p.display())))?;
    if !meta.is_file() {
        return Err(CliError::NotFound(format!("{label} {}", p.display())));
    }
    Ok(())
}

/// All path-like flags (including `--out`) for scheme checks.
fn iter_all_paths(args: &Args) -> impl Iterator<Item = &Path> {
    [
        args.plan.as_deref(),
        args.household.as_deref(),
        args.cart.as_deref(),
        Some(args.out.as_path()),
    ]
    .into_iter()
    .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("pf").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn manual_entry_parser() {
        let (id, g) = parse_manual_entry("mochi=250.5").unwrap();
        assert_eq!(id.as_str(), "mochi");
        assert_eq!(g, 250.5);
        assert!(parse_manual_entry("mochi").is_err());
        assert!(parse_manual_entry("=20").is_err());
        assert!(parse_manual_entry("mochi=-1").is_err());
        assert!(parse_manual_entry("mochi=abc").is_err());
        assert!(parse_manual_entry("mochi=inf").is_err());
    }

    #[test]
    fn date_and_policy_parsers() {
        assert_eq!(parse_date("2024-06-01").unwrap(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert!(parse_date("01/06/2024").is_err());
        assert_eq!(parse_policy("Equal").unwrap(), AllocationPolicy::Equal);
        assert!(parse_policy("random").is_err());
    }

    #[test]
    fn plan_conflicts_with_explicit_files() {
        let r = Args::try_parse_from(["pf", "--plan", "p.json", "--household", "h.json"]);
        assert!(r.is_err());
    }

    #[test]
    fn repeated_flags_collect() {
        let a = parse(&["--household", "h", "--cart", "c", "--manual", "a=1", "--manual", "b=2", "--render", "json", "--render", "html"]);
        assert_eq!(a.manual.len(), 2);
        assert_eq!(a.render, vec!["json".to_string(), "html".to_string()]);
    }

    #[test]
    fn validate_rejects_urls_and_missing_inputs() {
        let a = parse(&["--plan", "https://example.org/plan.json"]);
        assert!(matches!(validate(a), Err(CliError::NonLocalPath(_))));
        let a = parse(&["--household", "FILE:h.json", "--cart", "c.json"]);
        assert!(matches!(validate(a), Err(CliError::NonLocalPath(_))));

        let a = parse(&["--household", "h.json"]);
        assert!(matches!(validate(a), Err(CliError::Missing(_))));

        let a = parse(&["--plan", "definitely/not/here.json"]);
        assert!(matches!(validate(a), Err(CliError::NotFound(_))));
    }

    #[test]
    fn manual_with_other_policy_is_bad_combo() {
        let dir = tempfile::tempdir().unwrap();
        let h = dir.path().join("h.json");
        let c = dir.path().join("c.json");
        fs::write(&h, "{}").unwrap();
        fs::write(&c, "{}").unwrap();
        let a = parse(&[
            "--household", h.to_str().unwrap(),
            "--cart", c.to_str().unwrap(),
            "--policy", "equal",
            "--manual", "a=10",
        ]);
        assert!(matches!(validate(a), Err(CliError::BadCombo(_))));
    }
}
