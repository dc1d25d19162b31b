use std::borrow::Cow;
use std::collections::HashMap;

use rust_decimal::Decimal;

use super::filter_fields::{field, FieldAccessors};
use super::filter_order::{SortKeys, SortValue};
use crate::types::{Invite, Lease, MaintenanceRequest, Tenant, Unit};

/// Record types with a standard mapping onto the filter's logical fields
pub trait Filterable: Sized {
    fn accessors() -> FieldAccessors<Self>;
}

/// Record types with named sortable columns
pub trait Sortable: Sized {
    fn sort_keys() -> SortKeys<Self>;
}

// Units: search property name and address, category is the unit type
impl Filterable for Unit {
    fn accessors() -> FieldAccessors<Self> {
        FieldAccessors::new()
            .text("propertyName", |u: &Unit| field(&u.property_name))
            .text("address", |u: &Unit| field(&u.address))
            .category(|u: &Unit| field(&u.unit_type))
            .status(|u: &Unit| Some(Cow::Borrowed(u.status.as_str())))
            .scope(|u: &Unit| field(&u.id))
    }
}

impl Filterable for MaintenanceRequest {
    fn accessors() -> FieldAccessors<Self> {
        FieldAccessors::new()
            .text("title", |m: &MaintenanceRequest| field(&m.title))
            .status(|m: &MaintenanceRequest| field(&m.status))
            .scope(|m: &MaintenanceRequest| field(&m.unit_id))
    }
}

impl Filterable for Invite {
    fn accessors() -> FieldAccessors<Self> {
        FieldAccessors::new()
            .text("email", |i: &Invite| field(&i.email))
            .category(|i: &Invite| field(&i.role))
            .status(|i: &Invite| field(&i.status))
    }
}

impl Filterable for Tenant {
    fn accessors() -> FieldAccessors<Self> {
        FieldAccessors::new()
            .text("displayName", |t: &Tenant| field(&t.display_name))
            .text("email", |t: &Tenant| field(&t.email))
            .category(|t: &Tenant| field(&t.role))
    }
}

/// Lease accessors resolving the searched tenant name through `tenants`.
/// Leases whose tenant is unknown have no searchable text.
pub fn lease_accessors(tenants: &[Tenant]) -> FieldAccessors<Lease> {
    let names: HashMap<String, String> = tenants
        .iter()
        .map(|t| (t.id.clone(), t.label().to_string()))
        .collect();

    FieldAccessors::new()
        .text("tenant", move |l: &Lease| {
            names
                .get(&l.tenant_user_id)
                .filter(|name| !name.is_empty())
                .map(|name| Cow::Owned(name.clone()))
        })
        .status(|l: &Lease| field(&l.status))
        .scope(|l: &Lease| field(&l.unit_id))
}

/// Parse a display amount such as "$6,760" into a number
pub fn parse_amount(display: &str) -> Option<Decimal> {
    let digits: String = display
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    digits.parse().ok()
}

fn text(value: &str) -> Option<SortValue<'_>> {
    Some(SortValue::Text(Cow::Borrowed(value)))
}

impl Sortable for Unit {
    fn sort_keys() -> SortKeys<Self> {
        SortKeys::new()
            .key("propertyName", |u: &Unit| text(&u.property_name))
            .key("address", |u: &Unit| text(&u.address))
            .key("unitNumber", |u: &Unit| text(&u.unit_number))
            .key("unitType", |u: &Unit| text(&u.unit_type))
            .key("status", |u: &Unit| text(u.status.as_str()))
            .key("tenantName", |u: &Unit| u.tenant_name.as_deref().and_then(text))
            .key("marketRent", |u: &Unit| parse_amount(&u.market_rent).map(SortValue::Number))
    }
}

impl Sortable for Lease {
    fn sort_keys() -> SortKeys<Self> {
        SortKeys::new()
            .key("startDate", |l: &Lease| text(&l.start_date))
            .key("endDate", |l: &Lease| text(&l.end_date))
            .key("monthlyRent", |l: &Lease| Some(SortValue::Number(l.monthly_rent)))
            .key("status", |l: &Lease| text(&l.status))
    }
}

impl Sortable for MaintenanceRequest {
    fn sort_keys() -> SortKeys<Self> {
        SortKeys::new()
            .key("title", |m: &MaintenanceRequest| text(&m.title))
            .key("status", |m: &MaintenanceRequest| text(&m.status))
            .key("unitId", |m: &MaintenanceRequest| text(&m.unit_id))
    }
}

impl Sortable for Invite {
    fn sort_keys() -> SortKeys<Self> {
        SortKeys::new()
            .key("email", |i: &Invite| text(&i.email))
            .key("role", |i: &Invite| text(&i.role))
            .key("status", |i: &Invite| text(&i.status))
            .key("expiresAt", |i: &Invite| Some(SortValue::Time(i.expires_at)))
    }
}

impl Sortable for Tenant {
    fn sort_keys() -> SortKeys<Self> {
        SortKeys::new()
            .key("displayName", |t: &Tenant| text(&t.display_name))
            .key("email", |t: &Tenant| text(&t.email))
            .key("role", |t: &Tenant| text(&t.role))
    }
}

