pub mod progress_simulator;

pub use progress_simulator::ProgressSimulator;
