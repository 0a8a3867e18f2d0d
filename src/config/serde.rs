use std::time::Duration;

use humantime::parse_duration;
use serde::Deserialize;
use serde_with::DeserializeAs;

/// Reads durations written the human way (`"3s"`, `"1500ms"`).
pub(crate) struct HumantimeDuration;

impl<'de> DeserializeAs<'de, Duration> for HumantimeDuration {
    fn deserialize_as<D>(deserializer: D) -> std::result::Result<Duration, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_duration(raw.trim()).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::HumantimeDuration;
    use serde::Deserialize;
    use serde_with::serde_as;
    use std::time::Duration;

    #[serde_as]
    #[derive(Deserialize)]
    struct Sample {
        #[serde_as(as = "HumantimeDuration")]
        hide_after: Duration,
    }

    #[test]
    fn parses_millisecond_strings() {
        let sample: Sample = match serde_json::from_str(r#"{"hide_after":"1500ms"}"#) {
            Ok(value) => value,
            Err(err) => panic!("failed to parse sample json: {err}"),
        };
        assert_eq!(sample.hide_after, Duration::from_millis(1500));
    }

    #[test]
    fn rejects_bare_numbers() {
        let parsed = serde_json::from_str::<Sample>(r#"{"hide_after":"3000"}"#);
        assert!(parsed.is_err());
    }
}
