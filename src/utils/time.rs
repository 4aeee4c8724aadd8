use std::time::{Duration, SystemTime};
use chrono::{DateTime, Local};

pub fn format_datetime(time: SystemTime) -> String {
    let datetime: DateTime<Local> = time.into();
    datetime.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Seconds with four decimals, the precision every timing log uses.
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.4}", elapsed.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_has_four_decimals() {
        assert_eq!(format_elapsed(Duration::from_millis(1500)), "1.5000");
        assert_eq!(format_elapsed(Duration::ZERO), "0.0000");
    }

    #[test]
    fn datetime_has_second_precision() {
        let formatted = format_datetime(SystemTime::now());
        assert_eq!(formatted.len(), "2024-01-01 00:00:00".len());
    }
}
