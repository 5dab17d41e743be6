use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CourierError;

/// The five delivery states of a package.
///
/// Each package flows through:
/// ACKNOWLEDGED → SHIPPED → IN_TRANSITION → OUT_FOR_DELIVERY → DELIVERED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PackageState {
    #[default]
    Acknowledged,
    Shipped,
    InTransition,
    OutForDelivery,
    Delivered,
}

impl PackageState {
    /// Every state, in transition order.
    pub const ALL: [PackageState; 5] = [
        PackageState::Acknowledged,
        PackageState::Shipped,
        PackageState::InTransition,
        PackageState::OutForDelivery,
        PackageState::Delivered,
    ];

    /// The transition table: the state a package moves to after this
    /// state's handler runs. `Delivered` maps to itself.
    pub const fn successor(self) -> PackageState {
        match self {
            PackageState::Acknowledged => PackageState::Shipped,
            PackageState::Shipped => PackageState::InTransition,
            PackageState::InTransition => PackageState::OutForDelivery,
            PackageState::OutForDelivery => PackageState::Delivered,
            PackageState::Delivered => PackageState::Delivered,
        }
    }

    /// Status phrase announced by this state's handler.
    pub const fn status(self) -> &'static str {
        match self {
            PackageState::Acknowledged => "acknowledged",
            PackageState::Shipped => "shipped",
            PackageState::InTransition => "in transit",
            PackageState::OutForDelivery => "out for delivery",
            PackageState::Delivered => "delivered",
        }
    }

    /// True only for `Delivered`.
    pub const fn is_terminal(self) -> bool {
        matches!(self, PackageState::Delivered)
    }

    /// Zero-based position in [`PackageState::ALL`].
    pub const fn ordinal(self) -> usize {
        match self {
            PackageState::Acknowledged => 0,
            PackageState::Shipped => 1,
            PackageState::InTransition => 2,
            PackageState::OutForDelivery => 3,
            PackageState::Delivered => 4,
        }
    }
}

impl fmt::Display for PackageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageState::Acknowledged => write!(f, "ACKNOWLEDGED"),
            PackageState::Shipped => write!(f, "SHIPPED"),
            PackageState::InTransition => write!(f, "IN_TRANSITION"),
            PackageState::OutForDelivery => write!(f, "OUT_FOR_DELIVERY"),
            PackageState::Delivered => write!(f, "DELIVERED"),
        }
    }
}

impl FromStr for PackageState {
    type Err = CourierError;

    /// Accepts the display form (`IN_TRANSITION`) as well as kebab-case
    /// (`in-transition`) and the bare variant name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "acknowledged" => Ok(PackageState::Acknowledged),
            "shipped" => Ok(PackageState::Shipped),
            "intransition" | "intransit" => Ok(PackageState::InTransition),
            "outfordelivery" => Ok(PackageState::OutForDelivery),
            "delivered" => Ok(PackageState::Delivered),
            _ => Err(CourierError::UnknownState(s.to_string())),
        }
    }
}
