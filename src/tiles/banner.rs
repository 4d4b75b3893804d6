use crate::MapError;

/// User-facing notice for tile failures. Failures accumulate until the user
/// dismisses the banner; a new failure after dismissal shows it again.
#[derive(Debug, Clone, Default)]
pub struct TileErrorBanner {
    last_error: Option<String>,
    failures: usize,
    dismissed: bool,
}

impl TileErrorBanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, error: &MapError) {
        log::warn!("tile failure: {}", error);
        self.failures += 1;
        self.last_error = Some(error.to_string());
        self.dismissed = false;
    }

    /// Text to show, `None` while hidden
    pub fn message(&self) -> Option<String> {
        if !self.is_visible() {
            return None;
        }
        let last = self.last_error.as_deref().unwrap_or_default();
        Some(match self.failures {
            1 => format!("Some map tiles could not be loaded: {last}"),
            n => format!("{n} map tiles could not be loaded (last: {last})"),
        })
    }

    pub fn is_visible(&self) -> bool {
        self.failures > 0 && !self.dismissed
    }

    /// Hides the banner and resets the failure count
    pub fn dismiss(&mut self) {
        self.dismissed = true;
        self.failures = 0;
    }

    pub fn failure_count(&self) -> usize {
        self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::TileCoord;

    fn failure() -> MapError {
        MapError::TileLoad {
            coord: TileCoord::new(1, 2, 3),
            reason: "HTTP 503".to_string(),
        }
    }

    #[test]
    fn test_report_and_dismiss() {
        let mut banner = TileErrorBanner::new();
        assert!(!banner.is_visible());
        assert_eq!(banner.message(), None);

        banner.report(&failure());
        assert!(banner.is_visible());
        let message = banner.message().unwrap();
        assert!(message.contains("3/1/2"));
        assert!(message.contains("HTTP 503"));

        banner.report(&failure());
        assert!(banner.message().unwrap().starts_with("2 map tiles"));

        banner.dismiss();
        assert!(!banner.is_visible());
        assert_eq!(banner.failure_count(), 0);

        banner.report(&failure());
        assert!(banner.is_visible());
    }
}
