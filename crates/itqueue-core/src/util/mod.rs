pub mod group;

pub use group::{group_adjacent, try_group_adjacent, try_group_adjacent_by};
