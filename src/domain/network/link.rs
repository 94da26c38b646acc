use std::fmt;

use crate::domain::network::connect_point::ConnectPoint;
use crate::error::{Error, Result};

/// A directed packet-layer link between two connect points.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    pub src: ConnectPoint,
    pub dst: ConnectPoint,
}

impl Link {
    pub fn new(src: ConnectPoint, dst: ConnectPoint) -> Self {
        Self { src, dst }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.src, self.dst)
    }
}

/// Represents a specific route through the packet network, as handed out by path computation.
///
/// A `Path` is composed of a non-empty vector of [`Link`]s that must be traversed in order.
/// Consecutive hops have to chain: the device a hop ends on is the device the next hop starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    links: Vec<Link>,
}

impl Path {
    pub fn new(links: Vec<Link>) -> Result<Self> {
        if links.is_empty() {
            return Err(Error::InvalidPath("a path needs at least one link".to_string()));
        }

        for pair in links.windows(2) {
            if pair[0].dst.device != pair[1].src.device {
                return Err(Error::InvalidPath(format!("hop '{}' does not continue at hop '{}'", pair[0], pair[1])));
            }
        }

        Ok(Self { links })
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hop(a: &str, a_port: u32, b: &str, b_port: u32) -> Link {
        Link::new(ConnectPoint::new(a, a_port), ConnectPoint::new(b, b_port))
    }

    #[test]
    fn chained_hops_form_a_path() {
        let path = Path::new(vec![hop("s1", 1, "s2", 1), hop("s2", 2, "s3", 1)]).unwrap();

        assert_eq!(path.links().len(), 2);
        assert_eq!(path.links()[0].src, ConnectPoint::new("s1", 1));
        assert_eq!(path.links()[1].dst, ConnectPoint::new("s3", 1));
    }

    #[test]
    fn empty_path_is_rejected() {
        assert!(matches!(Path::new(vec![]), Err(Error::InvalidPath(_))));
    }

    #[test]
    fn broken_chain_is_rejected() {
        let result = Path::new(vec![hop("s1", 1, "s2", 1), hop("s9", 2, "s3", 1)]);
        assert!(matches!(result, Err(Error::InvalidPath(_))));
    }
}
