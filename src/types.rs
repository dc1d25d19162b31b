/// Domain records shared across the console

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::auth::Role;

/// Occupancy status of a rental unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitStatus {
    Occupied,
    Vacant,
}

impl UnitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitStatus::Occupied => "Occupied",
            UnitStatus::Vacant => "Vacant",
        }
    }
}

impl std::fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rentable space as shown in the units listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: String,
    pub property_name: String,
    pub address: String,
    pub unit_number: String,
    /// Free-form type, e.g. "Studio" or "2 BHK"
    pub unit_type: String,
    pub status: UnitStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_avatar_url: Option<String>,
    /// Display string, kept verbatim to preserve formatting ("$6,760")
    pub market_rent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyImage {
    pub id: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// Unit as nested under a property by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyUnit {
    pub id: String,
    pub property_id: String,
    pub unit_number: String,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<u32>,
    #[serde(default)]
    pub area_sqm: Option<f64>,
    #[serde(default)]
    pub rent_amount: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub organization_id: String,
    pub name: String,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub units: Vec<PropertyUnit>,
    #[serde(default)]
    pub images: Vec<PropertyImage>,
    #[serde(default)]
    pub owner_user_id: Option<String>,
}

impl Property {
    /// Ids of the units belonging to this property
    pub fn unit_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.units.iter().map(|u| u.id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lease {
    pub id: String,
    pub unit_id: String,
    pub tenant_user_id: String,
    pub start_date: String,
    pub end_date: String,
    pub monthly_rent: Decimal,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequest {
    pub id: String,
    pub unit_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,
    pub created_by_user_id: String,
}

/// Status values a maintenance ticket moves through
pub const MAINTENANCE_STATUSES: &[&str] = &["Open", "InProgress", "Resolved", "Closed"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: String,
}

impl Tenant {
    /// Name shown for a tenant, falling back to the email address
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.email
        } else {
            &self.display_name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invite {
    pub id: String,
    pub email: String,
    pub role: String,
    pub status: String,
    pub expires_at: DateTime<Utc>,
}

impl Invite {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Kind of organization registered with the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrgType {
    Landlord = 0,
    Agency = 1,
}

impl OrgType {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(OrgType::Landlord),
            1 => Some(OrgType::Agency),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrgType::Landlord => "Landlord",
            OrgType::Agency => "Agency",
        }
    }
}

/// Label for a numeric organization type; unknown codes print as the number
pub fn org_type_label(code: i64) -> String {
    match OrgType::from_code(code) {
        Some(org_type) => org_type.label().to_string(),
        None => code.to_string(),
    }
}

/// Body returned by login, organization registration and invite acceptance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub role: Role,
    pub org_id: String,
}
