pub mod capture;
pub mod feedback;
pub mod layout;
pub mod puzzle;
pub mod reconstruct;
pub mod rng;
pub mod transition;
pub mod visited;
