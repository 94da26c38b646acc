use std::fmt;
use std::hash::{Hash, Hasher};

use crate::domain::network::bandwidth::Bandwidth;
use crate::domain::network::connect_point::ConnectPoint;

/// Identity of a realizing link: its (source, destination) endpoint pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkKey {
    pub src: ConnectPoint,
    pub dst: ConnectPoint,
}

impl LinkKey {
    pub fn new(src: ConnectPoint, dst: ConnectPoint) -> Self {
        Self { src, dst }
    }
}

impl fmt::Display for LinkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.src, self.dst)
    }
}

/// A packet-layer hop that is realized by an optical-layer path segment.
///
/// Two realizing links are equal when they connect the same endpoints, regardless of
/// bandwidth, realizing key or established flag.
#[derive(Debug, Clone)]
pub struct RealizingLink {
    key: LinkKey,

    /// Capacity of the optical path that realizes this hop.
    pub bandwidth: Bandwidth,

    /// Key of the optical-layer request that realizes this hop, if known.
    pub realizing_key: Option<String>,

    established: bool,
}

impl RealizingLink {
    pub fn new(src: ConnectPoint, dst: ConnectPoint, bandwidth: Bandwidth) -> Self {
        Self { key: LinkKey::new(src, dst), bandwidth, realizing_key: None, established: false }
    }

    pub fn with_realizing_key(mut self, realizing_key: impl Into<String>) -> Self {
        self.realizing_key = Some(realizing_key.into());
        self
    }

    pub fn key(&self) -> &LinkKey {
        &self.key
    }

    pub fn is_established(&self) -> bool {
        self.established
    }

    pub fn set_established(&mut self, established: bool) {
        self.established = established;
    }
}

impl PartialEq for RealizingLink {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for RealizingLink {}

impl Hash for RealizingLink {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}
