#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use rentline_console::types::{Invite, Lease, MaintenanceRequest, Property, PropertyUnit, Tenant};

pub fn tenants() -> Vec<Tenant> {
    vec![
        tenant("t1", "Alice Johnson", "alice@example.com"),
        tenant("t2", "", "bob@example.com"),
        tenant("t3", "Carol Diaz", "carol@example.com"),
    ]
}

fn tenant(id: &str, name: &str, email: &str) -> Tenant {
    Tenant {
        id: id.to_string(),
        email: email.to_string(),
        display_name: name.to_string(),
        role: "Tenant".to_string(),
    }
}

pub fn leases() -> Vec<Lease> {
    vec![
        lease("l1", "1", "t1", 120000, "Active"),
        lease("l2", "2", "t2", 90000, "Active"),
        lease("l3", "4", "t3", 150000, "Ended"),
        lease("l4", "5", "ghost", 80000, "Active"),
    ]
}

fn lease(id: &str, unit_id: &str, tenant_id: &str, cents: i64, status: &str) -> Lease {
    Lease {
        id: id.to_string(),
        unit_id: unit_id.to_string(),
        tenant_user_id: tenant_id.to_string(),
        start_date: "2024-01-01".to_string(),
        end_date: "2024-12-31".to_string(),
        monthly_rent: Decimal::new(cents, 2),
        status: status.to_string(),
    }
}

pub fn maintenance() -> Vec<MaintenanceRequest> {
    vec![
        ticket("m1", "1", "Leaking faucet", "Open"),
        ticket("m2", "2", "Broken heater", "InProgress"),
        ticket("m3", "4", "Faucet drip in bathroom", "Resolved"),
        ticket("m4", "1", "Door lock sticks", "Open"),
    ]
}

fn ticket(id: &str, unit_id: &str, title: &str, status: &str) -> MaintenanceRequest {
    MaintenanceRequest {
        id: id.to_string(),
        unit_id: unit_id.to_string(),
        title: title.to_string(),
        description: None,
        status: status.to_string(),
        created_by_user_id: "t1".to_string(),
    }
}

pub fn invites() -> Vec<Invite> {
    vec![
        invite("i1", "new.tenant@example.com", "Tenant", "Pending", 2030),
        invite("i2", "fixit@example.com", "Maintenance", "Accepted", 2030),
        invite("i3", "viewer@example.com", "Viewer", "Pending", 2020),
    ]
}

fn invite(id: &str, email: &str, role: &str, status: &str, year: i32) -> Invite {
    Invite {
        id: id.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        status: status.to_string(),
        expires_at: Utc.with_ymd_and_hms(year, 6, 1, 0, 0, 0).unwrap(),
    }
}

/// p1 owns units 1 and 2; p2 has no units yet
pub fn properties() -> Vec<Property> {
    vec![property("p1", "Boardman Portfolio", &["1", "2"]), property("p2", "Empty Lot", &[])]
}

fn property(id: &str, name: &str, unit_ids: &[&str]) -> Property {
    Property {
        id: id.to_string(),
        organization_id: "org-1".to_string(),
        name: name.to_string(),
        street: None,
        city: None,
        state: None,
        postal_code: None,
        country: None,
        units: unit_ids
            .iter()
            .map(|u| PropertyUnit {
                id: u.to_string(),
                property_id: id.to_string(),
                unit_number: format!("U-{}", u),
                bedrooms: None,
                bathrooms: None,
                area_sqm: None,
                rent_amount: None,
                currency: None,
            })
            .collect(),
        images: vec![],
        owner_user_id: None,
    }
}

/// Scratch directory unique to one test
pub fn scratch_dir(label: &str) -> Result<PathBuf> {
    let dir = std::env::temp_dir().join(format!("rentline-{}-{}", label, uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
    Ok(dir)
}

pub fn write_json<T: Serialize>(dir: &Path, name: &str, value: &T) -> Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value)?)?;
    Ok(path)
}

/// Run the built CLI with its config directory pointed at `config_dir`
pub fn rentline(config_dir: &Path, args: &[&str]) -> Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_rentline"))
        .args(args)
        .env("RENTLINE_CONFIG_DIR", config_dir)
        .env("APP_ENV", "development")
        .env_remove("RUST_LOG")
        .env_remove("CLI_VERBOSE")
        .output()
        .context("failed to run rentline binary")
}

/// Run the CLI in JSON mode and parse stdout
pub fn rentline_json(config_dir: &Path, args: &[&str]) -> Result<(Output, serde_json::Value)> {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let output = rentline(config_dir, &full)?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let value = serde_json::from_str(&stdout)
        .with_context(|| format!("stdout was not JSON: {}\nstderr: {}", stdout, String::from_utf8_lossy(&output.stderr)))?;
    Ok((output, value))
}
