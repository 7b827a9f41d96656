pub mod filled_segments;
