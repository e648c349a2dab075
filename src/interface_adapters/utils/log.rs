use std::time::{Duration, Instant};

pub const LOG_THROTTLE: Duration = Duration::from_secs(2);

/// Returns true at most once per `LOG_THROTTLE` for the given timestamp slot.
pub fn should_log(last: &mut Instant) -> bool {
    if last.elapsed() >= LOG_THROTTLE {
        *last = Instant::now();
        true
    } else {
        false
    }
}

/// A timestamp slot whose first `should_log` check passes.
pub fn log_slot() -> Instant {
    Instant::now()
        .checked_sub(LOG_THROTTLE)
        .unwrap_or_else(Instant::now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttles_repeated_logs() {
        let mut slot = Instant::now()
            .checked_sub(LOG_THROTTLE)
            .expect("monotonic clock is past the throttle window");
        assert!(should_log(&mut slot));
        assert!(!should_log(&mut slot));
    }
}
