use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Args, ValueEnum};
use serde::Serialize;

use crate::cli::config::load_records;
use crate::cli::utils::{output_empty_collection, output_table};
use crate::cli::OutputFormat;
use crate::error::ConsoleError;
use crate::filter::{
    filter_refs, lease_accessors, FieldAccessors, FilterCriteria, FilterOrder, Filterable, Sortable,
};
use crate::store::units::demo_units;
use crate::types::{Invite, Lease, MaintenanceRequest, Property, Tenant, Unit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Entity {
    Units,
    Leases,
    Maintenance,
    Invites,
    Tenants,
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(value_enum, help = "Record type to list")]
    pub entity: Entity,

    #[arg(long, help = "JSON array of records (units default to the demo data)")]
    pub file: Option<PathBuf>,

    #[arg(long, help = "Case-insensitive substring search")]
    pub search: Option<String>,

    #[arg(long, help = "Exact category, e.g. a unit type or role")]
    pub category: Option<String>,

    #[arg(long, help = "Exact status")]
    pub status: Option<String>,

    #[arg(long = "unit", conflicts_with = "property", help = "Keep records of this unit id (repeatable)")]
    pub units: Vec<String>,

    #[arg(long, requires = "properties_file", help = "Keep records belonging to this property's units")]
    pub property: Option<String>,

    #[arg(long, help = "JSON array of properties used to resolve --property")]
    pub properties_file: Option<PathBuf>,

    #[arg(long, help = "JSON array of tenants used to search leases by tenant name")]
    pub tenants_file: Option<PathBuf>,

    #[arg(long, help = "Column ordering, e.g. \"marketRent desc, propertyName\"")]
    pub order: Option<String>,
}

/// Columns printed for one record type in text mode
trait ListRow: Serialize {
    const COLLECTION: &'static str;
    const HEADERS: &'static [&'static str];

    fn row(&self) -> Vec<String>;
}

impl ListRow for Unit {
    const COLLECTION: &'static str = "units";
    const HEADERS: &'static [&'static str] = &["Id", "Property", "Unit", "Type", "Status", "Tenant", "Rent"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.property_name.clone(),
            self.unit_number.clone(),
            self.unit_type.clone(),
            self.status.to_string(),
            self.tenant_name.clone().unwrap_or_else(|| "-".to_string()),
            self.market_rent.clone(),
        ]
    }
}

impl ListRow for Lease {
    const COLLECTION: &'static str = "leases";
    const HEADERS: &'static [&'static str] = &["Id", "Unit", "Tenant", "Start", "End", "Rent", "Status"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.unit_id.clone(),
            self.tenant_user_id.clone(),
            self.start_date.clone(),
            self.end_date.clone(),
            self.monthly_rent.to_string(),
            self.status.clone(),
        ]
    }
}

impl ListRow for MaintenanceRequest {
    const COLLECTION: &'static str = "maintenance";
    const HEADERS: &'static [&'static str] = &["Id", "Unit", "Title", "Status"];

    fn row(&self) -> Vec<String> {
        vec![self.id.clone(), self.unit_id.clone(), self.title.clone(), self.status.clone()]
    }
}

impl ListRow for Invite {
    const COLLECTION: &'static str = "invites";
    const HEADERS: &'static [&'static str] = &["Id", "Email", "Role", "Status", "Expires"];

    fn row(&self) -> Vec<String> {
        let expires = if self.is_expired(Utc::now()) {
            format!("{} (expired)", self.expires_at.format("%Y-%m-%d"))
        } else {
            self.expires_at.format("%Y-%m-%d").to_string()
        };
        vec![self.id.clone(), self.email.clone(), self.role.clone(), self.status.clone(), expires]
    }
}

impl ListRow for Tenant {
    const COLLECTION: &'static str = "tenants";
    const HEADERS: &'static [&'static str] = &["Id", "Name", "Email", "Role"];

    fn row(&self) -> Vec<String> {
        vec![self.id.clone(), self.label().to_string(), self.email.clone(), self.role.clone()]
    }
}

pub fn handle(args: ListArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let criteria = FilterCriteria {
        search_term: args.search.clone(),
        category_filter: args.category.clone(),
        status_filter: args.status.clone(),
        scope: resolve_scope(&args)?,
    };
    let order = match &args.order {
        Some(order) => FilterOrder::parse(order).map_err(ConsoleError::from)?,
        None => FilterOrder::default(),
    };

    tracing::debug!("Listing {:?} with {:?}", args.entity, criteria);

    match args.entity {
        Entity::Units => {
            let units = match &args.file {
                Some(path) => load_records::<Unit>(path)?,
                None => demo_units(),
            };
            list(&units, &Unit::accessors(), &criteria, &order, &output_format)
        }
        Entity::Leases => {
            let leases: Vec<Lease> = load_records(required_file(&args)?)?;
            let tenants: Vec<Tenant> = match &args.tenants_file {
                Some(path) => load_records(path)?,
                None => vec![],
            };
            list(&leases, &lease_accessors(&tenants), &criteria, &order, &output_format)
        }
        Entity::Maintenance => {
            let requests: Vec<MaintenanceRequest> = load_records(required_file(&args)?)?;
            list(&requests, &MaintenanceRequest::accessors(), &criteria, &order, &output_format)
        }
        Entity::Invites => {
            let invites: Vec<Invite> = load_records(required_file(&args)?)?;
            list(&invites, &Invite::accessors(), &criteria, &order, &output_format)
        }
        Entity::Tenants => {
            let tenants: Vec<Tenant> = load_records(required_file(&args)?)?;
            list(&tenants, &Tenant::accessors(), &criteria, &order, &output_format)
        }
    }
}

fn list<T: ListRow + Sortable>(
    records: &[T],
    accessors: &FieldAccessors<T>,
    criteria: &FilterCriteria,
    order: &FilterOrder,
    output_format: &OutputFormat,
) -> anyhow::Result<()> {
    check_supported(criteria, accessors, T::COLLECTION)?;

    let mut visible = filter_refs(records, criteria, accessors);
    order.sort(&mut visible, &T::sort_keys()).map_err(ConsoleError::from)?;

    if visible.is_empty() {
        return output_empty_collection(output_format, T::COLLECTION, &format!("No {} match", T::COLLECTION));
    }

    let rows: Vec<Vec<String>> = visible.iter().map(|r| r.row()).collect();
    output_table(output_format, T::COLLECTION, serde_json::to_value(&visible)?, T::HEADERS, &rows)
}

/// Reject criteria the record type has no field for
fn check_supported<T>(criteria: &FilterCriteria, accessors: &FieldAccessors<T>, collection: &str) -> Result<(), ConsoleError> {
    let unsupported = if criteria.active_category().is_some() && !accessors.has_category() {
        Some("--category")
    } else if criteria.active_status().is_some() && !accessors.has_status() {
        Some("--status")
    } else if criteria.scope.is_some() && !accessors.has_scope() {
        Some("--unit/--property")
    } else {
        None
    };

    match unsupported {
        Some(flag) => Err(ConsoleError::invalid_input(format!("{} cannot be filtered by {}", collection, flag))),
        None => Ok(()),
    }
}

fn required_file(args: &ListArgs) -> Result<&Path, ConsoleError> {
    args.file
        .as_deref()
        .ok_or_else(|| ConsoleError::invalid_input("--file is required for this record type"))
}

/// Unit ids the listing is narrowed to, if any
fn resolve_scope(args: &ListArgs) -> Result<Option<BTreeSet<String>>, ConsoleError> {
    if !args.units.is_empty() {
        return Ok(Some(args.units.iter().cloned().collect()));
    }

    let (Some(property_id), Some(path)) = (&args.property, &args.properties_file) else {
        return Ok(None);
    };

    let properties: Vec<Property> = load_records(path)?;
    let property = properties
        .iter()
        .find(|p| &p.id == property_id)
        .ok_or_else(|| ConsoleError::invalid_input(format!("Property '{}' not found in {}", property_id, path.display())))?;

    Ok(Some(property.unit_ids().map(str::to_string).collect()))
}
