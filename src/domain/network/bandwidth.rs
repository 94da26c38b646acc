use std::fmt;

const KBPS: u64 = 1_000;
const MBPS: u64 = 1_000_000;
const GBPS: u64 = 1_000_000_000;

/// A bandwidth quantity in bits per second.
///
/// The unit constructors saturate at `u64::MAX` bps instead of overflowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Bandwidth {
    bps: u64,
}

impl Bandwidth {
    pub const ZERO: Bandwidth = Bandwidth { bps: 0 };

    pub const fn bps(bps: u64) -> Self {
        Self { bps }
    }

    pub const fn kbps(kbps: u64) -> Self {
        Self { bps: kbps.saturating_mul(KBPS) }
    }

    pub const fn mbps(mbps: u64) -> Self {
        Self { bps: mbps.saturating_mul(MBPS) }
    }

    pub const fn gbps(gbps: u64) -> Self {
        Self { bps: gbps.saturating_mul(GBPS) }
    }

    pub fn as_bps(&self) -> u64 {
        self.bps
    }

    /// True if this capacity is enough to carry `demand`.
    pub fn covers(&self, demand: Bandwidth) -> bool {
        self.bps >= demand.bps
    }
}

impl fmt::Display for Bandwidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (unit, divisor) = match self.bps {
            b if b >= GBPS && b % GBPS == 0 => ("Gbps", GBPS),
            b if b >= MBPS && b % MBPS == 0 => ("Mbps", MBPS),
            b if b >= KBPS && b % KBPS == 0 => ("Kbps", KBPS),
            _ => ("bps", 1),
        };

        write!(f, "{} {}", self.bps / divisor, unit)
    }
}
