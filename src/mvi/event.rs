//! Base trait for state events.

/// Marker trait for event objects.
///
/// Events represent engine steps that have already been decided on:
/// a provider page arriving, a batch consumed from a buffer, a failure.
/// Staleness is resolved before an event is produced.
pub trait Event: Send + 'static {}
