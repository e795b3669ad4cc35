//! Model assembly from a real allocation, then both renderers.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use pf_algo::{allocate_on, AllocationPolicy};
use pf_core::{Category, Pet, Product, Purchase, Species};
use pf_report::{build_report_model, map_intake_sources, ReportContext};

fn scenario() -> (Vec<Pet>, Vec<Purchase>) {
    let pets = vec![
        Pet::new("a".parse().unwrap(), "Cún <Bông>", Species::Dog).with_weight(10.0),
        Pet::new("b".parse().unwrap(), "Mướp", Species::Cat).with_weight(4.0),
    ];
    let cart = vec![Purchase::new(Product::new("hat".parse().unwrap(), "2kg", Category::Food), 1)];
    (pets, cart)
}

fn context(pets: &[Pet], cart: &[Purchase]) -> ReportContext {
    let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    ReportContext {
        start_date: start,
        now: start.and_hms_opt(9, 30, 0).unwrap(),
        intake_sources: map_intake_sources(pets, cart),
    }
}

#[test]
fn model_from_end_to_end_allocation() {
    let (pets, cart) = scenario();
    let ctx = context(&pets, &cart);
    let calc = allocate_on(&pets, &cart, AllocationPolicy::SplitByNeed, ctx.start_date, None);
    let m = build_report_model(&calc, &ctx).unwrap();

    assert_eq!(m.total_label, "2.000 g");
    assert_eq!(m.pets[0].grams_label, "1.220 g");
    assert_eq!(m.pets[0].intake_source.as_deref(), Some("species_heuristic"));
    assert_eq!(m.pets[0].duration_message, "Đủ cho Cún <Bông> ăn 5 ngày");
    assert_eq!(m.pets[0].finish_date, "2024-06-05");
    assert_eq!(m.pets[0].days_remaining, 4);
    assert_eq!(m.low_stock.len(), 2);
    assert!(m.leftover.is_none());
}

#[cfg(feature = "render_json")]
#[test]
fn json_report_parses_back() {
    let (pets, cart) = scenario();
    let ctx = context(&pets, &cart);
    let calc = allocate_on(&pets, &cart, AllocationPolicy::Equal, ctx.start_date, None);
    let m = build_report_model(&calc, &ctx).unwrap();
    let v: serde_json::Value = serde_json::from_str(&pf_report::render_json(&m).unwrap()).unwrap();
    assert_eq!(v["policy"], "equal");
    assert_eq!(v["pets"][1]["grams_allocated"], 1000);
}

#[cfg(feature = "render_html")]
#[test]
fn html_report_escapes_names() {
    let (pets, cart) = scenario();
    let ctx = context(&pets, &cart);
    let calc = allocate_on(&pets, &cart, AllocationPolicy::SplitByNeed, ctx.start_date, None);
    let html = pf_report::render_html(&build_report_model(&calc, &ctx).unwrap()).unwrap();
    assert!(html.starts_with("<!doctype html>"));
    assert!(html.contains("Cún &lt;Bông&gt;"));
    assert!(!html.contains("<Bông>"));
    assert!(html.contains("1.220 g"));
}

#[test]
fn empty_rows_without_sources() {
    let (pets, _) = scenario();
    let ctx = ReportContext {
        start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        now: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
        intake_sources: BTreeMap::new(),
    };
    let calc = allocate_on(&pets, &[], AllocationPolicy::SplitByNeed, ctx.start_date, None);
    let m = build_report_model(&calc, &ctx).unwrap();
    assert_eq!(m.total_grams, 0);
    assert!(m.pets.is_empty());
}
