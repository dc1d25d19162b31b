use crate::filter::{filter, Filterable, FilterCriteria};
use crate::types::{Unit, UnitStatus};

use super::Store;

/// Units plus the criteria the units listing is filtered by
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitsState {
    pub units: Vec<Unit>,
    pub criteria: FilterCriteria,
}

pub type UnitsStore = Store<UnitsState>;

impl UnitsState {
    pub fn new(units: Vec<Unit>) -> Self {
        Self {
            units,
            criteria: FilterCriteria::default(),
        }
    }

    /// Units passing the current criteria, recomputed on every call
    pub fn filtered_units(&self) -> Vec<Unit> {
        filter(&self.units, &self.criteria, &Unit::accessors())
    }

    pub fn set_units(&mut self, units: Vec<Unit>) {
        self.units = units;
    }

    /// Search against property names and addresses
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.criteria.search_term = Some(term.into());
    }

    /// Filter by unit type; an empty string clears it
    pub fn set_property_type(&mut self, unit_type: impl Into<String>) {
        self.criteria.category_filter = Some(unit_type.into());
    }

    /// Filter by occupancy; `None` clears it
    pub fn set_status(&mut self, status: Option<UnitStatus>) {
        self.criteria.status_filter = status.map(|s| s.as_str().to_string());
    }

    /// Replace every unit with the same id. Returns false if none matched.
    pub fn update_unit(&mut self, updated: Unit) -> bool {
        let mut replaced = false;
        for slot in self.units.iter_mut().filter(|u| u.id == updated.id) {
            *slot = updated.clone();
            replaced = true;
        }
        if !replaced {
            tracing::debug!("update_unit: no unit with id {}", updated.id);
        }
        replaced
    }

    pub fn add_unit(&mut self, unit: Unit) {
        self.units.push(unit);
    }

    pub fn reset_filters(&mut self) {
        self.criteria = FilterCriteria::default();
    }

    /// Sample portfolio used during development until units come from the API
    pub fn demo() -> Self {
        Self::new(demo_units())
    }
}

fn demo_unit(
    id: &str,
    property_name: &str,
    address: &str,
    unit_number: &str,
    unit_type: &str,
    tenant: Option<(&str, &str)>,
    market_rent: &str,
) -> Unit {
    Unit {
        id: id.to_string(),
        property_name: property_name.to_string(),
        address: address.to_string(),
        unit_number: unit_number.to_string(),
        unit_type: unit_type.to_string(),
        status: if tenant.is_some() { UnitStatus::Occupied } else { UnitStatus::Vacant },
        tenant_name: tenant.map(|(name, _)| name.to_string()),
        tenant_avatar_url: tenant.map(|(_, avatar)| avatar.to_string()),
        market_rent: market_rent.to_string(),
    }
}

pub fn demo_units() -> Vec<Unit> {
    vec![
        demo_unit(
            "1",
            "Boardman Main House",
            "123 3rd St NE, Boardman, 97818, US",
            "A-101",
            "Storage",
            Some(("Guy Hawkins", "https://randomuser.me/api/portraits/men/32.jpg")),
            "$6,760",
        ),
        demo_unit(
            "2",
            "Greenfield Apartments",
            "456 Pine St SW, Denver, CO, 80202, US",
            "A-102",
            "Studio",
            Some(("Bessie Cooper", "https://randomuser.me/api/portraits/women/44.jpg")),
            "$9,800",
        ),
        demo_unit(
            "3",
            "Blue Sky Towers",
            "1012 Maple Rd, Austin, TX, 73301, US",
            "A-103",
            "2 BHK",
            None,
            "$0.00",
        ),
        demo_unit(
            "4",
            "Cedar Ridge Apartments",
            "1542 Elm St, Portland, OR, 97205, US",
            "B-203",
            "3 BHK",
            Some(("Devon Lane", "https://randomuser.me/api/portraits/men/56.jpg")),
            "$10,000",
        ),
        demo_unit(
            "5",
            "Crystal Bay Villas",
            "876 Bay Ln, San Diego, CA, 92037, US",
            "PH-1",
            "Studio",
            Some(("Jane Cooper", "https://randomuser.me/api/portraits/women/65.jpg")),
            "$6,530",
        ),
        demo_unit(
            "6",
            "Golden Valley Homes",
            "123 3rd St NE, Boardman, 97818, US",
            "F-106",
            "Penthouse",
            None,
            "$0.00",
        ),
        demo_unit(
            "7",
            "Sunset Hills Estates",
            "1023 Cedar St, Houston, TX, 77002, US",
            "A-303",
            "1 BHK",
            Some(("Wade Warren", "https://randomuser.me/api/portraits/men/76.jpg")),
            "$12,300",
        ),
        demo_unit(
            "8",
            "Blue Sky Towers",
            "123 3rd St NE, Boardman, 97818, US",
            "B-102",
            "Duplex",
            Some(("Jenny Wilson", "https://randomuser.me/api/portraits/women/71.jpg")),
            "$11,345",
        ),
    ]
}
