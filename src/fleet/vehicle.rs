use std::fmt::Display;

use serde::{Deserialize, Serialize};

const BUS_KEYWORDS: &[&str] = &["ônibus", "onibus", "bus"];
const VAN_KEYWORDS: &[&str] = &["van", "sprint", "ducato", "boxer", "kombi"];
const TRUCK_KEYWORDS: &[&str] = &["caminhão", "caminhao", "truck"];
const MOTORCYCLE_KEYWORDS: &[&str] = &["moto", "bike", "motorcycle"];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    #[default]
    Car,
    Bus,
    Van,
    Truck,
    Motorcycle,
}

impl VehicleType {
    /// Classifies a free-text vehicle model by keyword.
    ///
    /// Categories are checked in the order bus, van, truck, motorcycle and
    /// the first one with a matching keyword wins. Anything else is a car.
    pub fn from_model(model: Option<&str>) -> Self {
        let model = model.unwrap_or_default().to_lowercase();
        if model.is_empty() {
            return Self::Car;
        }

        let checks = [
            (Self::Bus, BUS_KEYWORDS),
            (Self::Van, VAN_KEYWORDS),
            (Self::Truck, TRUCK_KEYWORDS),
            (Self::Motorcycle, MOTORCYCLE_KEYWORDS),
        ];
        checks
            .into_iter()
            .find(|(_, keywords)| keywords.iter().any(|keyword| model.contains(keyword)))
            .map(|(kind, _)| kind)
            .unwrap_or(Self::Car)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Car => "car",
            VehicleType::Bus => "bus",
            VehicleType::Van => "van",
            VehicleType::Truck => "truck",
            VehicleType::Motorcycle => "motorcycle",
        }
    }
}

impl Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub license_plate: String,
    #[serde(default)]
    pub seats: u32,
    #[serde(default)]
    pub driver: Option<String>,
}

impl Vehicle {
    pub fn vehicle_type(&self) -> VehicleType {
        VehicleType::from_model(Some(&self.model))
    }

    /// Occupancy label such as `3/15 (20%)`, or `None` without a seat count.
    pub fn occupancy(&self, passengers: usize) -> Option<String> {
        if self.seats == 0 {
            return None;
        }
        let percent = passengers as u64 * 100 / self.seats as u64;
        Some(format!("{}/{} ({}%)", passengers, self.seats, percent))
    }
}

#[test]
fn occupancy_test() {
    let vehicle = Vehicle {
        model: "Sprinter".into(),
        seats: 15,
        ..Default::default()
    };
    assert_eq!(vehicle.occupancy(3).as_deref(), Some("3/15 (20%)"));
    assert_eq!(Vehicle::default().occupancy(3), None);
}
