pub mod commissions;
pub mod orders;
pub mod products;
pub mod startups;
pub mod structures;
