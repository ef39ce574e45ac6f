//! Cache model tests.


/// Victim selection for the LRU and FIFO policies.
pub mod policies;
