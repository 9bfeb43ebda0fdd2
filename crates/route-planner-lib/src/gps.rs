//! GPS boundary
//!
//! Position acquisition is an external collaborator. The screens only see the
//! [`PositionSource`] capability; no real receiver is wired up yet.

use crate::geodesy::Coordinate;

/// Something that may know where the vehicle is
pub trait PositionSource {
    /// Whether a position fix is currently available
    fn is_available(&self) -> bool;

    /// The current position, `None` while no fix is available
    fn current_position(&self) -> Option<Coordinate>;
}

/// Placeholder source that never has a fix
#[derive(Clone, Copy, Debug, Default)]
pub struct NoGps;

impl PositionSource for NoGps {
    fn is_available(&self) -> bool {
        false
    }

    fn current_position(&self) -> Option<Coordinate> {
        None
    }
}

/// Source that always reports the same position (simulation and tests)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedPosition(pub Coordinate);

impl PositionSource for FixedPosition {
    fn is_available(&self) -> bool {
        true
    }

    fn current_position(&self) -> Option<Coordinate> {
        Some(self.0)
    }
}

impl<T: PositionSource + ?Sized> PositionSource for Box<T> {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn current_position(&self) -> Option<Coordinate> {
        (**self).current_position()
    }
}
