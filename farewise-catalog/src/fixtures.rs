use chrono::NaiveDate;
use farewise_core::{FareRecord, Price, TransportMode};
use serde::{Deserialize, Serialize};

/// Transport operator with its stable identifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Company {
    pub id: String,
    pub name: String,
}

/// Popular destination offered as a search suggestion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Destination {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: String,
    pub fare_id: String,
    pub company_id: String,
    pub author: String,
    pub rating: u8,
    pub comment: String,
    pub date: NaiveDate,
}

fn company(id: &str, name: &str) -> Company {
    Company {
        id: id.to_string(),
        name: name.to_string(),
    }
}

fn destination(name: &str, code: &str) -> Destination {
    Destination {
        name: name.to_string(),
        code: code.to_string(),
    }
}

fn review(
    id: &str,
    fare_id: &str,
    company_id: &str,
    author: &str,
    rating: u8,
    comment: &str,
    (year, month, day): (i32, u32, u32),
) -> Review {
    Review {
        id: id.to_string(),
        fare_id: fare_id.to_string(),
        company_id: company_id.to_string(),
        author: author.to_string(),
        rating,
        comment: comment.to_string(),
        date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
    }
}

pub fn companies() -> Vec<Company> {
    vec![
        company("peace-mass", "Peace Mass Transit"),
        company("guo-transport", "GUO Transport"),
        company("abc-transport", "ABC Transport"),
        company("gigm", "God is Good Motors"),
        company("enugu-city", "Enugu City Transport"),
        company("ifesinachi", "Ifesinachi Transport"),
    ]
}

pub fn popular_destinations() -> Vec<Destination> {
    vec![
        destination("Enugu", "ENU"),
        destination("Nsukka", "NSK"),
        destination("Awgu", "AWG"),
        destination("Udi", "UDI"),
        destination("Oji River", "OJR"),
        destination("Ezeagu", "EZA"),
        destination("Nkanu", "NKA"),
        destination("Abakaliki", "ABK"),
        destination("Onitsha", "ONI"),
        destination("Owerri", "OWE"),
    ]
}

/// Seven recent fares per route, keyed by "ORIGIN-DESTINATION" code
pub fn price_history() -> Vec<(String, Vec<Price>)> {
    let route = |code: &str, fares: [i64; 7]| {
        (code.to_string(), fares.into_iter().map(Price::from_major).collect::<Vec<_>>())
    };
    vec![
        route("ENU-NSK", [1200, 1300, 1400, 1250, 1350, 1450, 1500]),
        route("ENU-OWE", [2500, 2400, 2600, 2700, 2550, 2450, 2600]),
        route("ENU-ONI", [1800, 1900, 1750, 1850, 2000, 1950, 1900]),
        route("ENU-ABK", [1000, 1100, 1050, 1150, 1200, 1100, 1150]),
    ]
}

pub fn transport_fares() -> Vec<FareRecord> {
    vec![
        FareRecord::new("1", "Peace Mass Transit", "Enugu", "Nsukka", Price::from_major(1500))
            .with_duration("1h 30m")
            .with_departure("08:30 AM")
            .with_mode(TransportMode::Bus)
            .with_rating(4.2)
            .with_amenities(["Air Conditioning", "Comfortable Seats", "Storage Space"]),
        FareRecord::new("2", "GUO Transport", "Enugu", "Nsukka", Price::from_major(1300))
            .with_discount(10)
            .with_duration("1h 45m")
            .with_departure("09:15 AM")
            .with_mode(TransportMode::Bus)
            .with_rating(4.0)
            .with_amenities(["Air Conditioning", "Comfortable Seats", "Free Water", "Storage Space"]),
        FareRecord::new("3", "ABC Transport", "Enugu", "Owerri", Price::from_major(2600))
            .with_duration("2h 45m")
            .with_departure("10:00 AM")
            .with_mode(TransportMode::Bus)
            .with_rating(4.5)
            .with_amenities(["Air Conditioning", "Refreshments", "Extra Legroom"]),
        FareRecord::new("4", "God is Good Motors", "Enugu", "Onitsha", Price::from_major(1900))
            .with_duration("2h 00m")
            .with_departure("11:30 AM")
            .with_mode(TransportMode::Bus)
            .with_rating(4.3)
            .with_amenities(["Air Conditioning", "Comfortable Seats", "Power Outlets"]),
        FareRecord::new("5", "Enugu City Transport", "Enugu", "Awgu", Price::from_major(800))
            .with_duration("1h 10m")
            .with_departure("09:00 AM")
            .with_mode(TransportMode::Bus)
            .with_rating(3.7)
            .with_amenities(["Basic Seating", "Storage Space"]),
        FareRecord::new("6", "Ifesinachi Transport", "Enugu", "Abakaliki", Price::from_major(1150))
            .with_discount(15)
            .with_duration("1h 30m")
            .with_departure("07:45 AM")
            .with_mode(TransportMode::Bus)
            .with_rating(4.1)
            .with_amenities(["Air Conditioning", "Refreshments", "Extra Baggage"]),
        FareRecord::new("7", "Peace Mass Transit", "Enugu", "Udi", Price::from_major(600))
            .with_duration("45m")
            .with_departure("08:00 AM")
            .with_mode(TransportMode::Bus)
            .with_rating(3.9)
            .with_amenities(["Basic Seating", "Storage Space"]),
        FareRecord::new("8", "GUO Transport", "Enugu", "Oji River", Price::from_major(750))
            .with_duration("1h 00m")
            .with_departure("10:30 AM")
            .with_mode(TransportMode::Bus)
            .with_rating(4.4)
            .with_amenities(["Air Conditioning", "Comfortable Seats", "Storage Space"]),
    ]
}

pub fn reviews() -> Vec<Review> {
    vec![
        review("r1", "1", "peace-mass", "Chidi N.", 4, "Left on time and the seats were comfortable.", (2024, 3, 2)),
        review("r2", "1", "peace-mass", "Amaka O.", 5, "Driver was careful, AC worked the whole way.", (2024, 3, 9)),
        review("r3", "2", "guo-transport", "Emeka U.", 4, "Good value with the discount, a bit crowded.", (2024, 2, 21)),
        review("r4", "3", "abc-transport", "Ngozi E.", 5, "Refreshments and legroom made the trip easy.", (2024, 1, 15)),
        review("r5", "5", "enugu-city", "Tobi A.", 3, "Basic bus but cheap and got there fine.", (2024, 2, 28)),
        review("r6", "7", "peace-mass", "Ifeoma K.", 4, "Short ride, luggage space was enough.", (2024, 3, 12)),
    ]
}
