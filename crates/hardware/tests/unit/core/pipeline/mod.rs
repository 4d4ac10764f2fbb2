
/// Cycle-by-cycle engine behaviour: stalls, flushes, and the timeline.
pub mod engine;



/// Whole programs run to their expected architectural results.
pub mod programs;
