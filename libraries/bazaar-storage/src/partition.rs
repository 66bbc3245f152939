//! Region to table routing
//!
//! Both regions share one schema; only the table names differ. Table names
//! come from this closed set and are the only strings ever spliced into SQL.

use bazaar_core::Region;

/// Physical tables backing one region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub users: &'static str,
    pub inventory: &'static str,
    pub purchased: &'static str,
}

const EAST: Partition = Partition {
    users: "east_users",
    inventory: "east_inventory",
    purchased: "east_purchased",
};

const WEST: Partition = Partition {
    users: "west_users",
    inventory: "west_inventory",
    purchased: "west_purchased",
};

/// Tables for a region
pub fn partition(region: Region) -> &'static Partition {
    match region {
        Region::East => &EAST,
        Region::West => &WEST,
    }
}
