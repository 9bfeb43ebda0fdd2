//! Status message shown while waiting for a GPS fix

/// Base message while no fix is available
pub const WAITING_MESSAGE: &str = "Waiting for GPS Signal";

/// Message once a fix is available
pub const FOUND_MESSAGE: &str = "GPS Found";

const MAX_DOTS: usize = 3;

/// The loading screen's message, advanced once per tick
///
/// While waiting, each tick appends a period up to three and then starts over
/// from the bare message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadingStatus {
    dots: usize,
    found: bool,
}

impl LoadingStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one tick given the current GPS availability
    pub fn tick(&mut self, gps_available: bool) {
        if gps_available {
            if !self.found {
                tracing::info!("GPS fix acquired");
            }
            self.found = true;
            self.dots = 0;
            return;
        }

        if self.found {
            tracing::warn!("GPS fix lost");
            self.found = false;
            self.dots = 0;
        } else if self.dots == MAX_DOTS {
            self.dots = 0;
        } else {
            self.dots += 1;
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        self.found
    }

    pub fn message(&self) -> String {
        if self.found {
            FOUND_MESSAGE.to_string()
        } else {
            format!("{WAITING_MESSAGE}{}", ".".repeat(self.dots))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waiting_cycle() {
        let mut status = LoadingStatus::new();
        assert_eq!(status.message(), "Waiting for GPS Signal");

        let expected = [
            "Waiting for GPS Signal.",
            "Waiting for GPS Signal..",
            "Waiting for GPS Signal...",
            "Waiting for GPS Signal",
            "Waiting for GPS Signal.",
        ];
        for message in expected {
            status.tick(false);
            assert_eq!(status.message(), message);
        }
    }

    #[test]
    fn test_found_is_stable() {
        let mut status = LoadingStatus::new();
        status.tick(false);
        status.tick(true);
        assert!(status.is_found());
        assert_eq!(status.message(), FOUND_MESSAGE);

        status.tick(true);
        assert_eq!(status.message(), FOUND_MESSAGE);
    }

    #[test]
    fn test_lost_fix_restarts_cycle() {
        let mut status = LoadingStatus::new();
        status.tick(true);
        status.tick(false);
        assert!(!status.is_found());
        assert_eq!(status.message(), WAITING_MESSAGE);
    }
}
