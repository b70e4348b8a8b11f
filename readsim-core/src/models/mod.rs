pub mod chromosome;
pub mod params;
pub mod region;

// re-export for cleaner imports
pub use self::chromosome::ChromosomeRecord;
pub use self::params::SimulationParams;
pub use self::region::{ByteRange, Region};
