pub mod feedback;
pub mod health;
pub mod join;
pub mod stats;
pub mod submissions;
pub mod visit;
