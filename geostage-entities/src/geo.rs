/// Latitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct LatCoord(f64);

impl LatCoord {
    pub const MIN_DEG: f64 = -90.0;
    pub const MAX_DEG: f64 = 90.0;

    pub fn try_from_deg(deg: f64) -> Option<Self> {
        if deg.is_finite() && (Self::MIN_DEG..=Self::MAX_DEG).contains(&deg) {
            Some(Self(deg))
        } else {
            None
        }
    }

    pub const fn to_deg(self) -> f64 {
        self.0
    }
}

/// Longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct LngCoord(f64);

impl LngCoord {
    pub const MIN_DEG: f64 = -180.0;
    pub const MAX_DEG: f64 = 180.0;

    pub fn try_from_deg(deg: f64) -> Option<Self> {
        if deg.is_finite() && (Self::MIN_DEG..=Self::MAX_DEG).contains(&deg) {
            Some(Self(deg))
        } else {
            None
        }
    }

    pub const fn to_deg(self) -> f64 {
        self.0
    }
}

/// A point on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPoint {
    pub lat: LatCoord,
    pub lng: LngCoord,
}

impl MapPoint {
    pub fn new(lat: LatCoord, lng: LngCoord) -> Self {
        Self { lat, lng }
    }

    /// Fails if either coordinate is out of range or not finite.
    pub fn try_from_lat_lng_deg(lat_deg: f64, lng_deg: f64) -> Option<Self> {
        let lat = LatCoord::try_from_deg(lat_deg)?;
        let lng = LngCoord::try_from_deg(lng_deg)?;
        Some(Self { lat, lng })
    }

    pub fn to_lat_lng_deg(self) -> (f64, f64) {
        (self.lat.to_deg(), self.lng.to_deg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_from_lat_lng_deg_in_range() {
        let pt = MapPoint::try_from_lat_lng_deg(39.78, -89.65).unwrap();
        assert_eq!((39.78, -89.65), pt.to_lat_lng_deg());
        assert!(MapPoint::try_from_lat_lng_deg(-90.0, 180.0).is_some());
        assert!(MapPoint::try_from_lat_lng_deg(90.0, -180.0).is_some());
    }

    #[test]
    fn try_from_lat_lng_deg_out_of_range() {
        assert!(MapPoint::try_from_lat_lng_deg(90.1, 0.0).is_none());
        assert!(MapPoint::try_from_lat_lng_deg(-90.1, 0.0).is_none());
        assert!(MapPoint::try_from_lat_lng_deg(0.0, 180.1).is_none());
        assert!(MapPoint::try_from_lat_lng_deg(0.0, -180.1).is_none());
    }

    #[test]
    fn try_from_lat_lng_deg_not_finite() {
        assert!(MapPoint::try_from_lat_lng_deg(f64::NAN, 0.0).is_none());
        assert!(MapPoint::try_from_lat_lng_deg(0.0, f64::INFINITY).is_none());
    }
}
