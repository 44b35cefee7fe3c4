//! Team balancing search
//!
//! Splits ten players into two teams of five by enumerating every partition,
//! resolving positions per side, and ranking partitions by balance cost.

pub mod assignment;
pub mod balancer;
pub mod partition;
pub mod selector;

// Re-export commonly used types
pub use assignment::{AssignmentOptimizer, TeamLineup, ADJACENT_ROLES};
pub use balancer::TeamBalancer;
pub use partition::{Partition, PartitionEnumerator};
pub use selector::{
    match_cost, AssignedPlayer, PositionAssignment, ResultSelector, ScoredMatch, TeamProposal,
};
