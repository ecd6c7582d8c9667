use std::time::Duration;

pub const DEFAULT_DELAY_MS: u64 = 1000;

/// Fixed pause between two calls to an external source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn wait(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::from_millis(DEFAULT_DELAY_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_zero_delay_returns_immediately() {
        let started = Instant::now();
        FixedDelay::from_millis(0).wait().await;
        assert!(started.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_waits_at_least_the_delay() {
        let started = Instant::now();
        FixedDelay::from_millis(30).wait().await;
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_default_is_one_second() {
        assert_eq!(FixedDelay::default().delay(), Duration::from_secs(1));
    }
}
