//! Core data types for the station geometry

use std::fmt;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::constants::{EDGE_COUNT, STATION_COUNT};

/// A measured edge between two stations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    D01,
    D02,
    D03,
    D12,
    D13,
    D23,
}

impl Edge {
    /// All edges in canonical order
    pub const ALL: [Edge; EDGE_COUNT] = [Edge::D01, Edge::D02, Edge::D03, Edge::D12, Edge::D13, Edge::D23];

    /// Edges the solver divides by; they must be strictly positive
    pub const REFERENCE: [Edge; 3] = [Edge::D01, Edge::D12, Edge::D13];

    /// Station indices joined by this edge
    pub fn stations(self) -> (usize, usize) {
        match self {
            Edge::D01 => (0, 1),
            Edge::D02 => (0, 2),
            Edge::D03 => (0, 3),
            Edge::D12 => (1, 2),
            Edge::D13 => (1, 3),
            Edge::D23 => (2, 3),
        }
    }

    pub fn is_reference(self) -> bool {
        Self::REFERENCE.contains(&self)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b) = self.stations();
        write!(f, "D{}{}", a, b)
    }
}

/// Six pairwise range measurements between stations 0..3 (meters)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceSet {
    pub d01: f64,
    pub d02: f64,
    pub d03: f64,
    pub d12: f64,
    pub d13: f64,
    pub d23: f64,
}

impl DistanceSet {
    pub fn new(d01: f64, d02: f64, d03: f64, d12: f64, d13: f64, d23: f64) -> Self {
        Self { d01, d02, d03, d12, d13, d23 }
    }

    /// Build from an array in canonical edge order (D01, D02, D03, D12, D13, D23)
    pub fn from_array(values: [f64; EDGE_COUNT]) -> Self {
        let [d01, d02, d03, d12, d13, d23] = values;
        Self { d01, d02, d03, d12, d13, d23 }
    }

    pub fn to_array(&self) -> [f64; EDGE_COUNT] {
        [self.d01, self.d02, self.d03, self.d12, self.d13, self.d23]
    }

    /// Measured range for one edge
    pub fn get(&self, edge: Edge) -> f64 {
        match edge {
            Edge::D01 => self.d01,
            Edge::D02 => self.d02,
            Edge::D03 => self.d03,
            Edge::D12 => self.d12,
            Edge::D13 => self.d13,
            Edge::D23 => self.d23,
        }
    }

    /// Iterate `(edge, range)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Edge, f64)> + '_ {
        Edge::ALL.iter().map(move |&edge| (edge, self.get(edge)))
    }
}

/// Planar positions of the four stations
///
/// When produced by the solver the frame is canonical: station 1 sits at the
/// origin and station 2 on the positive x-axis, so `y1 == y2 == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSet {
    stations: [Vector2<f64>; STATION_COUNT],
}

impl CoordinateSet {
    pub fn new(stations: [Vector2<f64>; STATION_COUNT]) -> Self {
        Self { stations }
    }

    /// Build from the eight scalars in (x0, y0, x1, y1, x2, y2, x3, y3) order
    pub fn from_array(values: [f64; 2 * STATION_COUNT]) -> Self {
        let [x0, y0, x1, y1, x2, y2, x3, y3] = values;
        Self::new([
            Vector2::new(x0, y0),
            Vector2::new(x1, y1),
            Vector2::new(x2, y2),
            Vector2::new(x3, y3),
        ])
    }

    /// Flatten to (x0, y0, x1, y1, x2, y2, x3, y3)
    pub fn to_array(&self) -> [f64; 2 * STATION_COUNT] {
        let s = &self.stations;
        [s[0].x, s[0].y, s[1].x, s[1].y, s[2].x, s[2].y, s[3].x, s[3].y]
    }

    pub fn stations(&self) -> &[Vector2<f64>; STATION_COUNT] {
        &self.stations
    }

    pub fn station(&self, index: usize) -> Option<&Vector2<f64>> {
        self.stations.get(index)
    }

    /// Euclidean distance between the two stations joined by `edge`
    pub fn edge_length(&self, edge: Edge) -> f64 {
        let (a, b) = edge.stations();
        (self.stations[a] - self.stations[b]).norm()
    }

    /// All six pairwise Euclidean distances
    pub fn pairwise_distances(&self) -> DistanceSet {
        DistanceSet::new(
            self.edge_length(Edge::D01),
            self.edge_length(Edge::D02),
            self.edge_length(Edge::D03),
            self.edge_length(Edge::D12),
            self.edge_length(Edge::D13),
            self.edge_length(Edge::D23),
        )
    }
}
