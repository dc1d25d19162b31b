mod common;

use anyhow::Result;
use serde_json::json;

#[test]
fn login_status_and_logout_roundtrip() -> Result<()> {
    let dir = common::scratch_dir("cli-login")?;

    let (out, body) = common::rentline_json(&dir, &["auth", "login", "--token", "jwt", "--role", "Tenant", "--org", "o1"])?;
    assert!(out.status.success());
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["role"], json!("Tenant"));

    let (_, status) = common::rentline_json(&dir, &["auth", "status"])?;
    assert_eq!(status["authenticated"], json!(true));
    assert_eq!(status["organizationId"], json!("o1"));

    common::rentline_json(&dir, &["auth", "logout"])?;
    let (_, status) = common::rentline_json(&dir, &["auth", "status"])?;
    assert_eq!(status["authenticated"], json!(false));
    Ok(())
}

#[test]
fn login_from_response_file() -> Result<()> {
    let dir = common::scratch_dir("cli-response")?;
    let file = common::write_json(&dir, "login.json", &json!({ "token": "abc", "role": "Landlord", "orgId": "org-7" }))?;

    let (out, _) = common::rentline_json(&dir, &["auth", "login", "--response", file.to_str().unwrap()])?;
    assert!(out.status.success());

    let (_, status) = common::rentline_json(&dir, &["auth", "status"])?;
    assert_eq!(status["role"], json!("Landlord"));
    Ok(())
}

#[test]
fn route_check_reflects_stored_role() -> Result<()> {
    let dir = common::scratch_dir("cli-route")?;

    let (_, body) = common::rentline_json(&dir, &["route", "check", "/units"])?;
    assert_eq!(body["result"], json!({ "decision": "redirectTo", "target": "/login" }));

    common::rentline_json(&dir, &["auth", "login", "--token", "t", "--role", "Tenant", "--org", "o"])?;
    let (_, body) = common::rentline_json(&dir, &["route", "check", "/units"])?;
    assert_eq!(body["result"], json!({ "decision": "redirectTo", "target": "/" }));

    let (_, body) = common::rentline_json(&dir, &["route", "check", "/leases"])?;
    assert_eq!(body["result"], json!({ "decision": "allow" }));
    Ok(())
}

#[test]
fn unauthorized_status_signs_out() -> Result<()> {
    let dir = common::scratch_dir("cli-401")?;
    common::rentline_json(&dir, &["auth", "login", "--token", "t", "--role", "Manager", "--org", "o"])?;

    let (_, body) = common::rentline_json(&dir, &["auth", "handle-status", "401"])?;
    assert_eq!(body["redirect"], json!("/login"));

    let (_, status) = common::rentline_json(&dir, &["auth", "status"])?;
    assert_eq!(status["authenticated"], json!(false));
    Ok(())
}

#[test]
fn nav_lists_tenant_links() -> Result<()> {
    let dir = common::scratch_dir("cli-nav")?;
    common::rentline_json(&dir, &["auth", "login", "--token", "t", "--role", "Tenant", "--org", "o"])?;

    let (_, body) = common::rentline_json(&dir, &["nav"])?;
    let paths: Vec<&str> = body["links"]
        .as_array()
        .map(|links| links.iter().filter_map(|l| l["path"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(paths, vec!["/", "/leases", "/maintenance", "/settings"]);
    Ok(())
}

#[test]
fn list_demo_units_with_search_and_order() -> Result<()> {
    let dir = common::scratch_dir("cli-units")?;

    let (out, body) = common::rentline_json(&dir, &["list", "units", "--search", "BOARDMAN", "--order", "unitNumber desc"])?;
    assert!(out.status.success());

    let ids: Vec<&str> = body["units"]
        .as_array()
        .map(|units| units.iter().filter_map(|u| u["id"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(ids, vec!["6", "8", "1"]);
    Ok(())
}

#[test]
fn list_maintenance_for_property() -> Result<()> {
    let dir = common::scratch_dir("cli-maintenance")?;
    let tickets = common::write_json(&dir, "maintenance.json", &common::maintenance())?;
    let properties = common::write_json(&dir, "properties.json", &common::properties())?;

    let (_, body) = common::rentline_json(
        &dir,
        &[
            "list",
            "maintenance",
            "--file",
            tickets.to_str().unwrap(),
            "--property",
            "p1",
            "--properties-file",
            properties.to_str().unwrap(),
            "--status",
            "Open",
        ],
    )?;
    let ids: Vec<&str> = body["maintenance"]
        .as_array()
        .map(|rows| rows.iter().filter_map(|r| r["id"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(ids, vec!["m1", "m4"]);
    Ok(())
}

#[test]
fn list_without_matches_prints_empty_collection() -> Result<()> {
    let dir = common::scratch_dir("cli-empty")?;
    let (out, body) = common::rentline_json(&dir, &["list", "units", "--search", "doesnotexist"])?;
    assert!(out.status.success());
    assert_eq!(body, json!({ "units": [] }));
    Ok(())
}

#[test]
fn list_errors_carry_codes() -> Result<()> {
    let dir = common::scratch_dir("cli-errors")?;

    let (out, body) = common::rentline_json(&dir, &["list", "leases"])?;
    assert_eq!(out.status.code(), Some(2));
    assert_eq!(body["error_code"], json!("INVALID_INPUT"));

    let tenants = common::write_json(&dir, "tenants.json", &common::tenants())?;
    let (out, body) = common::rentline_json(&dir, &["list", "tenants", "--file", tenants.to_str().unwrap(), "--unit", "1"])?;
    assert_eq!(out.status.code(), Some(2));
    assert_eq!(body["success"], json!(false));

    let (out, body) = common::rentline_json(&dir, &["list", "units", "--order", "weight"])?;
    assert_eq!(out.status.code(), Some(2));
    assert_eq!(body["error_code"], json!("INVALID_INPUT"));
    Ok(())
}

#[test]
fn list_rejects_criteria_without_a_field() -> Result<()> {
    let dir = common::scratch_dir("cli-unsupported")?;
    let tickets = common::write_json(&dir, "maintenance.json", &common::maintenance())?;

    let (out, body) = common::rentline_json(
        &dir,
        &["list", "maintenance", "--file", tickets.to_str().unwrap(), "--category", "Plumbing"],
    )?;
    assert_eq!(out.status.code(), Some(2));
    assert_eq!(body["error_code"], json!("INVALID_INPUT"));
    Ok(())
}
