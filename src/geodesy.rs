use vek::vec::Vec3;

#[allow(unused_imports)]
use vek::num_traits::real::Real;

pub type Degrees = f64;
pub type Meters = f64;
pub type Cartesian = Vec3<f64>;

/// Horizontal position, in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoPoint {
    pub longitude: Degrees,
    pub latitude: Degrees,
}

impl GeoPoint {
    pub const fn new(longitude: Degrees, latitude: Degrees) -> Self {
        Self { longitude, latitude }
    }

    pub fn is_finite(&self) -> bool {
        self.longitude.is_finite() && self.latitude.is_finite()
    }
}

/// An endpoint as the caller describes it: a position plus its elevation
/// above the ellipsoid.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Waypoint {
    pub position: GeoPoint,
    pub height: Meters,
}

impl Waypoint {
    pub const fn new(longitude: Degrees, latitude: Degrees, height: Meters) -> Self {
        Self {
            position: GeoPoint::new(longitude, latitude),
            height,
        }
    }
}

/// One sampled point of an arc.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Cartographic {
    pub longitude: Degrees,
    pub latitude: Degrees,
    pub height: Meters,
}

impl Cartographic {
    pub const fn new(longitude: Degrees, latitude: Degrees, height: Meters) -> Self {
        Self { longitude, latitude, height }
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.longitude, self.latitude)
    }
}

/// Conversion from geodetic coordinates to the renderer's 3D space.
///
/// Hosts with their own globe model implement this; [`Ellipsoid::WGS84`]
/// covers the common earth-fixed frame.
pub trait Geodetic {
    fn to_cartesian(&self, point: Cartographic) -> Cartesian;
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ellipsoid {
    pub radii: Vec3<f64>,
}

impl Ellipsoid {
    pub const WGS84: Self = Self::new(6378137.0, 6378137.0, 6356752.314245179);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { radii: Vec3::new(x, y, z) }
    }

    pub fn radii_squared(&self) -> Vec3<f64> {
        self.radii * self.radii
    }

    /// Unit normal of the ellipsoid surface at the given position.
    pub fn surface_normal(&self, position: GeoPoint) -> Vec3<f64> {
        let lon = position.longitude.to_radians();
        let lat = position.latitude.to_radians();
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_lon, cos_lon) = lon.sin_cos();
        Vec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat).normalized()
    }
}

impl Geodetic for Ellipsoid {
    fn to_cartesian(&self, point: Cartographic) -> Cartesian {
        let n = self.surface_normal(point.position());
        let k = self.radii_squared() * n;
        let gamma = n.dot(k).sqrt();
        k / gamma + n * point.height
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}
