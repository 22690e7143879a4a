use crate::geodesy::Cartesian;
use crate::geodesy::Cartographic;
use crate::geodesy::Degrees;
use crate::geodesy::GeoPoint;
use crate::geodesy::Geodetic;
use crate::geodesy::Meters;

use alloc::vec::Vec;

#[allow(unused_imports)]
use vek::num_traits::real::Real;

use ArcError::*;

pub const MIN_APEX_HEIGHT: Meters = 1000.0;
pub const MIN_SAMPLE_COUNT: usize = 50;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ArcError {
    CoincidentEndpoints,
    NonFiniteCoordinate,
}

pub type ArcResult<T> = Result<T, ArcError>;

/// Which coordinate the sampler steps along.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Axis {
    Longitude,
    Latitude,
}

/// A parabolic flight path between two positions, sampled at a fixed
/// number of points. Immutable once sampled.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    points: Vec<Cartographic>,
    apex: Meters,
    axis: Axis,
}

impl Arc {
    pub fn points(&self) -> &[Cartographic] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Effective apex height, after clamping.
    pub fn apex(&self) -> Meters {
        self.apex
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn to_cartesian<G: Geodetic>(&self, globe: &G) -> Vec<Cartesian> {
        self.points.iter().map(|p| globe.to_cartesian(*p)).collect()
    }
}

impl core::ops::Index<usize> for Arc {
    type Output = Cartographic;

    fn index(&self, i: usize) -> &Cartographic {
        &self.points[i]
    }
}

/// Samples a downward parabola `h = apex - 4 * apex * x^2 / L^2` between
/// `start` and `end`, where `L` is the span along the dominant axis and `x`
/// runs from `-L/2` in steps of `L / sample_count`.
///
/// `apex_height` is clamped to at least [`MIN_APEX_HEIGHT`] and
/// `sample_count` to at least [`MIN_SAMPLE_COUNT`]. Coincident endpoints
/// yield a flat arc at the apex height.
pub fn sample_arc(start: GeoPoint, end: GeoPoint, apex_height: Meters, sample_count: usize) -> Arc {
    match try_sample_arc(start, end, apex_height, sample_count) {
        Ok(arc) => arc,
        Err(CoincidentEndpoints) => {
            log::warn!("coincident arc endpoints at ({}, {}); using a flat arc", start.longitude, start.latitude);
            flat_arc(start, apex_height, sample_count)
        }
        Err(NonFiniteCoordinate) => {
            log::warn!("non-finite arc input: {:?} -> {:?} at {}", start, end, apex_height);
            sample_unchecked(start, end, apex_height, sample_count)
        }
    }
}

/// Same as [`sample_arc`], but reports the inputs it cannot sample
/// meaningfully instead of degrading.
pub fn try_sample_arc(start: GeoPoint, end: GeoPoint, apex_height: Meters, sample_count: usize) -> ArcResult<Arc> {
    if !(start.is_finite() && end.is_finite() && apex_height.is_finite()) {
        return Err(NonFiniteCoordinate);
    }

    if span(start, end) == 0.0 {
        return Err(CoincidentEndpoints);
    }

    Ok(sample_unchecked(start, end, apex_height, sample_count))
}

fn span(start: GeoPoint, end: GeoPoint) -> Degrees {
    let diff_lon = (start.longitude - end.longitude).abs();
    let diff_lat = (start.latitude - end.latitude).abs();
    diff_lon.max(diff_lat)
}

fn flat_arc(start: GeoPoint, apex_height: Meters, sample_count: usize) -> Arc {
    let apex = apex_height.max(MIN_APEX_HEIGHT);
    let count = sample_count.max(MIN_SAMPLE_COUNT);
    let point = Cartographic::new(start.longitude, start.latitude, apex);
    Arc {
        points: alloc::vec![point; count],
        apex,
        axis: Axis::Latitude,
    }
}

fn sample_unchecked(start: GeoPoint, end: GeoPoint, apex_height: Meters, sample_count: usize) -> Arc {
    let apex = apex_height.max(MIN_APEX_HEIGHT);
    let count = sample_count.max(MIN_SAMPLE_COUNT);

    let diff_lon = (start.longitude - end.longitude).abs();
    let diff_lat = (start.latitude - end.latitude).abs();
    let span = diff_lon.max(diff_lat);
    let step = span / (count as f64);

    let axis = match diff_lon > diff_lat {
        true => Axis::Longitude,
        false => Axis::Latitude,
    };

    // (dominant start, dominant end, other start, other end)
    let (d0, d1, o0, o1) = match axis {
        Axis::Longitude => (start.longitude, end.longitude, start.latitude, end.latitude),
        Axis::Latitude => (start.latitude, end.latitude, start.longitude, end.longitude),
    };

    let d_step = match d0 > d1 {
        true => -step,
        false => step,
    };
    let o_step = (o1 - o0) / (count as f64);

    log::debug!("sampling arc {:?} -> {:?}: {:?} span {}, {} points, apex {}", start, end, axis, span, count, apex);

    let mut points = Vec::with_capacity(count);
    for i in 0..count {
        let i = i as f64;
        let x = -0.5 * span + step * i;
        let height = apex - (x * x * 4.0 * apex) / (span * span);
        let dominant = d0 + d_step * i;
        let other = o0 + o_step * i;
        points.push(match axis {
            Axis::Longitude => Cartographic::new(dominant, other, height),
            Axis::Latitude => Cartographic::new(other, dominant, height),
        });
    }

    Arc { points, apex, axis }
}
