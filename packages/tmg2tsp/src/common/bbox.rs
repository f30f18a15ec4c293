//! Defines a struct to represent a bounding box, which is used to represent
//! a 2d square(ish) on the planet's surface. This is used when summarising a
//! loaded graph, as it gives the extent covered by its waypoints along with
//! the waypoints which sit on each edge of that extent.

use serde::Serialize;

use crate::common::graph_data::{LatLng, Waypoint};

/// A bounding box for geographical data. Contains the minimum and maximum
/// latitudes & longitudes, defining a 'rectangle' on the surface of the Earth
#[derive(Debug, Serialize, PartialEq, Clone, Copy)]
pub struct BBox {
    pub min_lat: f64,
    pub min_lng: f64,
    pub max_lat: f64,
    pub max_lng: f64,
}

/// Indices of the waypoints which set each edge of a bounding box. Where
/// several waypoints share an extreme coordinate, the first one wins
#[derive(Debug, Serialize, PartialEq, Clone, Copy)]
pub struct Extremes {
    pub north: usize,
    pub south: usize,
    pub east: usize,
    pub west: usize,
}

impl BBox {
    /// Determine the smallest bounding box containing every provided
    /// waypoint, along with the index of the waypoint on each of its edges.
    /// Returns None if no waypoints are provided
    pub fn from_waypoints<'a, I>(waypoints: I) -> Option<(BBox, Extremes)>
    where
        I: IntoIterator<Item = &'a Waypoint>,
    {
        let mut waypoints = waypoints.into_iter();
        let first = waypoints.next()?.coords;

        let mut bbox = BBox {
            min_lat: first.lat,
            min_lng: first.lng,
            max_lat: first.lat,
            max_lng: first.lng,
        };
        let mut extremes = Extremes {
            north: 0,
            south: 0,
            east: 0,
            west: 0,
        };

        for (inx, waypoint) in waypoints.enumerate() {
            let inx = inx + 1;
            let LatLng { lat, lng } = waypoint.coords;
            if lat > bbox.max_lat {
                bbox.max_lat = lat;
                extremes.north = inx;
            }
            if lat < bbox.min_lat {
                bbox.min_lat = lat;
                extremes.south = inx;
            }
            if lng > bbox.max_lng {
                bbox.max_lng = lng;
                extremes.east = inx;
            }
            if lng < bbox.min_lng {
                bbox.min_lng = lng;
                extremes.west = inx;
            }
        }

        Some((bbox, extremes))
    }

    /// Determine the latitude and longitude which form the centre point of
    /// the bounding box
    pub fn get_centre(&self) -> LatLng {
        let lat_delta = self.max_lat - self.min_lat;
        let lng_delta = self.max_lng - self.min_lng;
        LatLng::new(
            self.min_lat + (lat_delta / 2.0),
            self.min_lng + (lng_delta / 2.0),
        )
    }
}
