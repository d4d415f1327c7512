//! Quadrature counter peripheral trait

/// Counting direction reported by the quadrature decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CountDirection {
    Up,
    Down,
}

/// A free-running hardware counter in encoder mode
///
/// The counter runs over `[0, autoreload]` and raises an update interrupt
/// each time it wraps in either direction. Methods take `&self` because
/// the same peripheral is touched from interrupt and thread context;
/// implementations are plain register accesses.
pub trait QuadratureCounter {
    /// Current raw count
    fn count(&self) -> u16;

    /// Direction the counter was moving at the last edge
    fn direction(&self) -> CountDirection;

    /// Wrap value; the counter period is `autoreload + 1`
    fn autoreload(&self) -> u32;

    /// Overwrite the raw count
    fn set_count(&self, count: u16);

    /// Enable counting
    fn start(&self);
}
