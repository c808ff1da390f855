use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Length assumed for a service whose kind is not in the catalog.
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

/// The kinds of work the shop books.
///
/// Unknown ids deserialize to [`ServiceType::Other`], which books for
/// [`DEFAULT_DURATION_MINUTES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    #[serde(rename = "maintenance")]
    RegularMaintenance,
    Repair,
    Inspection,
    Diagnostic,
    #[serde(other)]
    Other,
}

impl ServiceType {
    /// Every bookable service, in the order the shop lists them.
    pub const CATALOG: [ServiceType; 4] = [
        ServiceType::RegularMaintenance,
        ServiceType::Repair,
        ServiceType::Inspection,
        ServiceType::Diagnostic,
    ];

    pub fn from_id(id: &str) -> Self {
        match id {
            "maintenance" => ServiceType::RegularMaintenance,
            "repair" => ServiceType::Repair,
            "inspection" => ServiceType::Inspection,
            "diagnostic" => ServiceType::Diagnostic,
            _ => ServiceType::Other,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            ServiceType::RegularMaintenance => "maintenance",
            ServiceType::Repair => "repair",
            ServiceType::Inspection => "inspection",
            ServiceType::Diagnostic => "diagnostic",
            ServiceType::Other => "other",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ServiceType::RegularMaintenance => "Regular Maintenance",
            ServiceType::Repair => "Repair Service",
            ServiceType::Inspection => "Vehicle Inspection",
            ServiceType::Diagnostic => "Diagnostic Check",
            ServiceType::Other => "Other Service",
        }
    }

    pub fn duration_minutes(&self) -> u32 {
        match self {
            ServiceType::RegularMaintenance => 120,
            ServiceType::Repair => 180,
            ServiceType::Inspection => 60,
            ServiceType::Diagnostic => 90,
            ServiceType::Other => DEFAULT_DURATION_MINUTES,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes()))
    }
}

/// Catalog entry as presented to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTypeInfo {
    pub id: String,
    pub name: String,
    pub duration: u32,
}

impl From<ServiceType> for ServiceTypeInfo {
    fn from(service: ServiceType) -> Self {
        Self {
            id: service.id().to_string(),
            name: service.display_name().to_string(),
            duration: service.duration_minutes(),
        }
    }
}
