use time::OffsetDateTime;

pub fn millis_to_utc(ms: i64) -> OffsetDateTime {
    let nanos = i128::from(ms).saturating_mul(1_000_000);
    OffsetDateTime::from_unix_timestamp_nanos(nanos).unwrap_or_else(|_| OffsetDateTime::now_utc())
}

pub fn current_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_convert_to_utc() {
        let at = millis_to_utc(1_500);
        assert_eq!(at.unix_timestamp(), 1);
        assert_eq!(at.millisecond(), 500);
    }

    #[test]
    fn current_millis_is_after_epoch() {
        assert!(current_millis() > 0);
    }
}
