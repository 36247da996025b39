pub mod allocator;
pub mod error;
pub mod io;
pub mod paging;
pub mod policy;

// Re-export commonly used items for convenience
pub use allocator::{Allocator, MemoryBlock, Process};
pub use error::{AllocationError, DeallocationError, SimulationError};
pub use paging::{simulate, SimulationResult, StepRecord};
pub use policy::Policy;
