/// Geographic envelope in degrees.
///
/// Field order follows the map library's `[west, south, east, north]` bounds array.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LngLatBounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl LngLatBounds {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        LngLatBounds {
            west,
            south,
            east,
            north,
        }
    }

    /// Degenerate box around a single position.
    pub fn point(lng: f64, lat: f64) -> Self {
        LngLatBounds::new(lng, lat, lng, lat)
    }

    pub fn contains(&self, lng: f64, lat: f64) -> bool {
        lng >= self.west && lng <= self.east && lat >= self.south && lat <= self.north
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.west, self.south, self.east, self.north]
    }
}

/// Single-pass min/max fold over positions.
///
/// An accumulator that has seen nothing has no bounds; `finish` returns `None`
/// rather than a placeholder box.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BoundsAccumulator {
    bounds: Option<LngLatBounds>,
}

impl BoundsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, lng: f64, lat: f64) {
        let Some(b) = &mut self.bounds else {
            self.bounds = Some(LngLatBounds::point(lng, lat));
            return;
        };
        // Strict comparisons: ties keep the earliest value.
        if lng < b.west {
            b.west = lng;
        }
        if lat < b.south {
            b.south = lat;
        }
        if lng > b.east {
            b.east = lng;
        }
        if lat > b.north {
            b.north = lat;
        }
    }

    pub fn finish(self) -> Option<LngLatBounds> {
        self.bounds
    }
}

impl FromIterator<(f64, f64)> for BoundsAccumulator {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        let mut acc = BoundsAccumulator::new();
        for (lng, lat) in iter {
            acc.extend(lng, lat);
        }
        acc
    }
}
