// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::Arc;

fn fields(pairs: &[(&str, &str)]) -> Fields {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[test]
fn no_entries_is_always_valid() {
    let cfg = AppConfig::default();
    let registry = FunctionRegistry::new();
    assert!(is_valid(&registry, &cfg, &fields(&[])).unwrap());
}

#[test]
fn matches_any_field() {
    let mut cfg = AppConfig::default();
    cfg.valid_if_or.0.insert("profile".to_string(), ValidIfEntry::Values(vec!["prod".to_string()]));
    let registry = FunctionRegistry::new();

    assert!(is_valid(&registry, &cfg, &fields(&[("profile", "prod")])).unwrap());
    assert!(!is_valid(&registry, &cfg, &fields(&[("profile", "dev")])).unwrap());
}

#[test]
fn several_fields_are_ored_not_anded() {
    let mut cfg = AppConfig::default();
    cfg.valid_if_or.0.insert("profile".to_string(), ValidIfEntry::Values(vec!["prod".to_string()]));
    cfg.valid_if_or.0.insert("region".to_string(), ValidIfEntry::Values(vec!["us".to_string()]));
    let registry = FunctionRegistry::new();

    assert!(!is_valid(&registry, &cfg, &fields(&[("profile", "dev"), ("region", "eu")])).unwrap());
    assert!(is_valid(&registry, &cfg, &fields(&[("profile", "dev"), ("region", "us")])).unwrap());
    assert!(is_valid(&registry, &cfg, &fields(&[("profile", "prod"), ("region", "eu")])).unwrap());
}

#[test]
fn named_function_entry() {
    let mut cfg = AppConfig::default();
    cfg.valid_if_or.0.insert("_func".to_string(), ValidIfEntry::Func("stolos.examples.is_weekday".to_string()));
    let mut registry = FunctionRegistry::new();
    registry.register_valid_if(
        "stolos.examples.is_weekday",
        Arc::new(|fields| fields.get("day").map(|d| d != "sat" && d != "sun").unwrap_or(false)),
    );
    assert!(is_valid(&registry, &cfg, &fields(&[("day", "mon")])).unwrap());
    assert!(!is_valid(&registry, &cfg, &fields(&[("day", "sun")])).unwrap());
}

#[test]
fn unregistered_function_is_config_error() {
    let mut cfg = AppConfig::default();
    cfg.valid_if_or.0.insert("_func".to_string(), ValidIfEntry::Func("missing".to_string()));
    let registry = FunctionRegistry::new();
    assert!(is_valid(&registry, &cfg, &fields(&[])).is_err());
}
