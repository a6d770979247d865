//! City list classification with a latitude fallback.

use std::collections::HashMap;

use super::{finite, ZoneClassifier};
use crate::models::{Classification, Components, Zone, ZoneSource};

const NORTH_CITIES: &[&str] = &[
    "sacramento",
    "redding",
    "chico",
    "eureka",
    "arcata",
    "crescent city",
    "yreka",
    "red bluff",
    "oroville",
    "yuba city",
    "marysville",
    "grass valley",
    "auburn",
    "roseville",
    "davis",
    "woodland",
    "vacaville",
    "fairfield",
    "napa",
    "santa rosa",
    "petaluma",
    "ukiah",
    "san francisco",
    "oakland",
    "berkeley",
    "richmond",
    "concord",
    "walnut creek",
    "south lake tahoe",
    "truckee",
];

const CENTRAL_CITIES: &[&str] = &[
    "fresno",
    "clovis",
    "madera",
    "merced",
    "modesto",
    "turlock",
    "stockton",
    "lodi",
    "tracy",
    "manteca",
    "visalia",
    "tulare",
    "hanford",
    "lemoore",
    "porterville",
    "san jose",
    "fremont",
    "hayward",
    "livermore",
    "salinas",
];

const SOUTH_CITIES: &[&str] = &[
    "bakersfield",
    "delano",
    "lancaster",
    "palmdale",
    "los angeles",
    "long beach",
    "pasadena",
    "glendale",
    "burbank",
    "anaheim",
    "santa ana",
    "irvine",
    "riverside",
    "san bernardino",
    "ontario",
    "palm springs",
    "indio",
    "el centro",
    "calexico",
    "san diego",
    "chula vista",
    "escondido",
    "oceanside",
];

const COASTAL_CITIES: &[&str] = &[
    "santa cruz",
    "monterey",
    "carmel-by-the-sea",
    "pacific grove",
    "half moon bay",
    "san luis obispo",
    "pismo beach",
    "morro bay",
    "santa barbara",
    "ventura",
    "oxnard",
    "malibu",
    "santa monica",
];

/// Lat above this is North
const FALLBACK_NORTH_ABOVE: f64 = 37.6;
/// Lat at or above this (up to FALLBACK_NORTH_ABOVE) is Central
const FALLBACK_CENTRAL_MIN: f64 = 36.0;

/// Lists in lookup order; the first list containing a city wins.
fn default_lists() -> Vec<(Zone, &'static [&'static str])> {
    vec![
        (Zone::North, NORTH_CITIES),
        (Zone::Central, CENTRAL_CITIES),
        (Zone::South, SOUTH_CITIES),
        (Zone::Coastal, COASTAL_CITIES),
    ]
}

/// Cities in the shipped lists that appear under more than one zone.
///
/// Lookups resolve overlaps by list order, so this only reports them.
pub fn overlapping_cities() -> Vec<(&'static str, Vec<Zone>)> {
    CityListPolicy::new().overlaps()
}

/// Classifies by city name, falling back to latitude thresholds.
#[derive(Debug, Clone)]
pub struct CityListPolicy {
    lists: Vec<(Zone, &'static [&'static str])>,
}

impl CityListPolicy {
    pub fn new() -> Self {
        Self::with_lists(default_lists())
    }

    /// Policy over custom lists, checked in the given order. Names must be lowercase.
    pub fn with_lists(lists: Vec<(Zone, &'static [&'static str])>) -> Self {
        Self { lists }
    }

    /// Cities listed under more than one zone, with every zone in list order.
    pub fn overlaps(&self) -> Vec<(&'static str, Vec<Zone>)> {
        let mut seen: HashMap<&'static str, Vec<Zone>> = HashMap::new();
        for (zone, cities) in &self.lists {
            for city in cities.iter() {
                seen.entry(*city).or_default().push(*zone);
            }
        }

        let mut overlaps: Vec<_> = seen.into_iter().filter(|(_, z)| z.len() > 1).collect();
        overlaps.sort_by(|a, b| a.0.cmp(b.0));
        overlaps
    }

    pub fn lookup_city(&self, city: &str) -> Option<Zone> {
        let city = city.trim().to_lowercase();
        self.lists
            .iter()
            .find(|(_, cities)| cities.iter().any(|c| *c == city))
            .map(|(zone, _)| *zone)
    }

    pub fn zone_for_latitude(lat: Option<f64>) -> Zone {
        match finite(lat) {
            None => Zone::Unknown,
            Some(lat) if lat > FALLBACK_NORTH_ABOVE => Zone::North,
            Some(lat) if lat >= FALLBACK_CENTRAL_MIN => Zone::Central,
            Some(_) => Zone::South,
        }
    }
}

impl Default for CityListPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl ZoneClassifier for CityListPolicy {
    fn classify(&self, components: &Components, lat: Option<f64>) -> Classification {
        if let Some(zone) = components
            .city_name()
            .and_then(|city| self.lookup_city(city))
        {
            return Classification::new(zone, ZoneSource::CityList);
        }

        match Self::zone_for_latitude(lat) {
            Zone::Unknown => Classification::unknown(),
            zone => Classification::new(zone, ZoneSource::LatitudeFallback),
        }
    }
}
