use fleetmap::{fleet::VehicleType, routing::TravelMode};

#[test]
fn keyword_test() {
    assert_eq!(VehicleType::from_model(Some("Ônibus Marcopolo")), VehicleType::Bus);
    assert_eq!(VehicleType::from_model(Some("Mercedes Sprinter")), VehicleType::Van);
    assert_eq!(VehicleType::from_model(Some("Fiat Ducato")), VehicleType::Van);
    assert_eq!(VehicleType::from_model(Some("Caminhão Volvo")), VehicleType::Truck);
    assert_eq!(VehicleType::from_model(Some("Honda moto CG")), VehicleType::Motorcycle);
    assert_eq!(VehicleType::from_model(Some("Toyota Corolla")), VehicleType::Car);
}

#[test]
fn bus_keywords_test() {
    assert_eq!(VehicleType::from_model(Some("Ônibus")), VehicleType::Bus);
    assert_eq!(VehicleType::from_model(Some("onibus escolar")), VehicleType::Bus);
    assert_eq!(VehicleType::from_model(Some("BUS")), VehicleType::Bus);
}

#[test]
fn missing_model_test() {
    assert_eq!(VehicleType::from_model(None), VehicleType::Car);
    assert_eq!(VehicleType::from_model(Some("")), VehicleType::Car);
}

#[test]
fn first_category_wins_test() {
    // Matches both bus and van keywords.
    assert_eq!(VehicleType::from_model(Some("Micro bus Kombi")), VehicleType::Bus);
    assert_eq!(VehicleType::from_model(Some("Van truck")), VehicleType::Van);
}

#[test]
fn case_insensitive_test() {
    assert_eq!(VehicleType::from_model(Some("VOLVO TRUCK")), VehicleType::Truck);
}

#[test]
fn travel_mode_test() {
    assert_eq!(TravelMode::from(VehicleType::Truck), TravelMode::Truck);
    assert_eq!(TravelMode::from(VehicleType::Motorcycle), TravelMode::Motorcycle);
    assert_eq!(TravelMode::from(VehicleType::Bus), TravelMode::Drive);
    assert_eq!(TravelMode::from(VehicleType::Van), TravelMode::Drive);
    assert_eq!(TravelMode::from(VehicleType::Car).to_string(), "drive");
}
