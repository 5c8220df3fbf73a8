//! Provider health tracking and request pacing.
//!
//! Slow responses and implausible result sets raise a degradation level;
//! each level adds a fixed delay before the next request is issued. This is
//! pacing, not a circuit breaker: requests are delayed, never refused.

use std::time::Duration;

use tokio::time::Instant;

use crate::config::HealthConfig;

/// Classification of one provider response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    Healthy,
    Slow,
    Implausible,
}

impl ResponseClass {
    pub fn is_suspicious(self) -> bool {
        !matches!(self, ResponseClass::Healthy)
    }
}

/// Snapshot of provider health.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApiHealth {
    pub rolling_average_latency_ms: f64,
    pub degradation_level: u8,
    pub last_request_at: Option<Instant>,
}

#[derive(Debug)]
pub struct HealthMonitor {
    config: HealthConfig,
    rolling_average_latency_ms: Option<f64>,
    degradation_level: u8,
    suspicious_streak: u32,
    healthy_streak: u32,
    last_request_at: Option<Instant>,
}

impl HealthMonitor {
    pub fn new(config: HealthConfig) -> Self {
        Self {
            config,
            rolling_average_latency_ms: None,
            degradation_level: 0,
            suspicious_streak: 0,
            healthy_streak: 0,
            last_request_at: None,
        }
    }

    pub fn snapshot(&self) -> ApiHealth {
        ApiHealth {
            rolling_average_latency_ms: self.rolling_average_latency_ms.unwrap_or(0.0),
            degradation_level: self.degradation_level,
            last_request_at: self.last_request_at,
        }
    }

    pub fn degradation_level(&self) -> u8 {
        self.degradation_level
    }

    /// Minimum spacing between requests at the current level.
    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.config.delay_step_ms * self.degradation_level as u64)
    }

    /// How long to wait at `now` before issuing the next request.
    pub fn delay_before_next(&self, now: Instant) -> Duration {
        let min_delay = self.min_delay();
        match self.last_request_at {
            Some(last) => min_delay.saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }

    pub fn mark_request_issued(&mut self, now: Instant) {
        self.last_request_at = Some(now);
    }

    pub fn classify(
        &self,
        duration: Duration,
        result_count: u64,
        query_len: usize,
    ) -> ResponseClass {
        if duration.as_millis() as u64 > self.config.slow_threshold_ms {
            ResponseClass::Slow
        } else if query_len > 0
            && query_len <= self.config.short_query_max_len
            && result_count > self.config.implausible_result_count
        {
            ResponseClass::Implausible
        } else {
            ResponseClass::Healthy
        }
    }

    /// Fold one response into the rolling average and degradation level.
    pub fn record_result(
        &mut self,
        duration: Duration,
        result_count: u64,
        query_len: usize,
    ) -> ResponseClass {
        let latency_ms = duration.as_secs_f64() * 1000.0;
        let alpha = self.config.latency_alpha;
        self.rolling_average_latency_ms = Some(match self.rolling_average_latency_ms {
            Some(avg) => alpha * latency_ms + (1.0 - alpha) * avg,
            None => latency_ms,
        });

        let class = self.classify(duration, result_count, query_len);
        if class.is_suspicious() {
            self.healthy_streak = 0;
            self.suspicious_streak += 1;
            if self.suspicious_streak >= self.config.suspicious_run {
                self.suspicious_streak = 0;
                self.degrade(class);
            }
        } else {
            self.suspicious_streak = 0;
            self.healthy_streak += 1;
            if self.healthy_streak >= self.config.recovery_run {
                self.healthy_streak = 0;
                self.recover();
            }
        }

        class
    }

    fn degrade(&mut self, class: ResponseClass) {
        if self.degradation_level >= self.config.max_level {
            return;
        }
        self.degradation_level += 1;
        tracing::warn!(
            level = self.degradation_level,
            reason = ?class,
            avg_latency_ms = self.rolling_average_latency_ms.unwrap_or(0.0),
            "Search provider degraded, slowing requests"
        );
    }

    fn recover(&mut self) {
        if self.degradation_level == 0 {
            return;
        }
        self.degradation_level -= 1;
        tracing::info!(
            level = self.degradation_level,
            "Search provider recovering"
        );
    }
}
