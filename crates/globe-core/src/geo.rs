//! Input dataset: named cities and the routes flown between them.

use fnv::FnvHashSet;

/// A named location in degrees; longitude is positive east.
#[derive(Clone, Debug, PartialEq)]
pub struct GeoPoint {
    pub name: String,
    pub longitude_deg: f64,
    pub latitude_deg: f64,
}

impl GeoPoint {
    pub fn new(name: impl Into<String>, longitude_deg: f64, latitude_deg: f64) -> Self {
        Self {
            name: name.into(),
            longitude_deg,
            latitude_deg,
        }
    }
}

/// One directed city pair.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionEdge<'a> {
    pub origin: &'a GeoPoint,
    pub destination: &'a GeoPoint,
}

/// A single origin with its ordered destinations.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteRecord {
    pub start: GeoPoint,
    pub ends: Vec<GeoPoint>,
}

/// Whether a city appears as a route origin or only as a destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CityRole {
    Origin,
    Destination,
}

/// Iterate every (origin, destination) pair in dataset order.
pub fn edges(routes: &[RouteRecord]) -> impl Iterator<Item = ConnectionEdge<'_>> {
    routes.iter().flat_map(|r| {
        r.ends.iter().map(move |d| ConnectionEdge {
            origin: &r.start,
            destination: d,
        })
    })
}

/// Every distinct coordinate in the dataset, first occurrence wins.
///
/// Origins are visited before their destinations, so a city that is both keeps
/// the `Origin` role.
pub fn unique_places(routes: &[RouteRecord]) -> Vec<(&GeoPoint, CityRole)> {
    let mut seen: FnvHashSet<(u64, u64)> = FnvHashSet::default();
    let mut out = Vec::new();
    for r in routes {
        let candidates = std::iter::once((&r.start, CityRole::Origin))
            .chain(r.ends.iter().map(|e| (e, CityRole::Destination)));
        for (p, role) in candidates {
            let key = (p.longitude_deg.to_bits(), p.latitude_deg.to_bits());
            if seen.insert(key) {
                out.push((p, role));
            }
        }
    }
    out
}

/// Every distinct city name in the dataset, first occurrence wins.
pub fn unique_names(routes: &[RouteRecord]) -> Vec<&GeoPoint> {
    let mut seen: FnvHashSet<&str> = FnvHashSet::default();
    let mut out = Vec::new();
    for r in routes {
        for p in std::iter::once(&r.start).chain(r.ends.iter()) {
            if seen.insert(p.name.as_str()) {
                out.push(p);
            }
        }
    }
    out
}

/// Built-in dataset: flights out of Hanoi.
pub fn default_routes() -> Vec<RouteRecord> {
    let ends = [
        ("Japan", 139.6503, 35.6762),
        ("Korea", 126.978, 37.5665),
        ("Singapore", 103.8198, 1.3521),
        ("Hong Kong", 114.1694, 22.3193),
        ("China", 116.4074, 39.9042),
        // Europe
        ("United Kingdom", -0.1278, 51.5074),
        ("Germany", 13.405, 52.52),
        ("France", 2.3522, 48.8566),
        ("Netherlands", 4.9041, 52.3676),
        ("Sweden", 18.0686, 59.3293),
        // Americas
        ("United States", -77.0369, 38.9072),
        ("Canada", -75.6972, 45.4215),
        ("Mexico", -99.1332, 19.4326),
        ("Brazil", -47.8919, -15.7975),
        // Oceania
        ("Australia", 149.13, -35.2809),
        ("New Zealand", 174.7762, -41.2865),
        ("United Arab Emirates", 54.3773, 24.4539),
        ("Saudi Arabia", 46.6753, 24.7136),
    ];
    vec![RouteRecord {
        start: GeoPoint::new("Hanoi", 105.8542, 21.0285),
        ends: ends
            .iter()
            .map(|&(name, lon, lat)| GeoPoint::new(name, lon, lat))
            .collect(),
    }]
}
