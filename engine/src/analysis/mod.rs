// Derived fields and aggregates computed over normalized rental records
pub mod aggregate;
pub mod open_rentals;
pub mod remaining;
pub mod summary;
pub mod urgency;

use shared::models::Urgency;

/// Maps days remaining to an urgency class. Implementations must be
/// monotonic: fewer days never yields a less urgent class.
pub trait UrgencyPolicy: Send + Sync {
    fn name(&self) -> &str;
    fn classify(&self, days_remaining: i64) -> Urgency;
}
