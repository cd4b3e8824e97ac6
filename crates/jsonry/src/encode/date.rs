use chrono::{NaiveDateTime, NaiveTime, Timelike};

use crate::encode::{Encoder, unsupported};
use crate::error::Result;
use crate::options::DateFormat;
use crate::reflect::{Reflect, ReflectRef};
use crate::writer::JsonWriter;

/// Dates and timestamps.
///
/// Without an explicit format the encoder follows the registry's
/// [`Options::date_format`](crate::Options::date_format).
#[derive(Debug, Clone, Copy, Default)]
pub struct DateEncoder {
    format: Option<DateFormat>,
}

impl DateEncoder {
    pub fn iso() -> Self {
        Self {
            format: Some(DateFormat::Iso),
        }
    }

    pub fn epoch_millis() -> Self {
        Self {
            format: Some(DateFormat::EpochMillis),
        }
    }
}

impl Encoder for DateEncoder {
    fn encode(&self, value: &dyn Reflect, w: &mut dyn JsonWriter) -> Result<()> {
        let ReflectRef::Date(at) = value.reflect_ref() else {
            return Err(unsupported(self, value));
        };
        let format = match self.format {
            Some(format) => format,
            None => w.registry().options().date_format,
        };
        write_date(w, at, format)
    }
}

pub(crate) fn write_date(w: &mut dyn JsonWriter, at: NaiveDateTime, format: DateFormat) -> Result<()> {
    match format {
        DateFormat::Iso => w.write_quoted(&iso_8601(at)),
        DateFormat::EpochMillis => w.write_raw(&at.and_utc().timestamp_millis().to_string()),
    }
}

fn iso_8601(at: NaiveDateTime) -> String {
    let pattern = if at.time() == NaiveTime::MIN {
        "%Y-%m-%d"
    } else if at.nanosecond() < 1_000_000 {
        "%Y-%m-%dT%H:%M:%S"
    } else {
        "%Y-%m-%dT%H:%M:%S%.3f"
    };
    at.format(pattern).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32, milli: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 29)
            .and_then(|d| d.and_hms_milli_opt(h, m, s, milli))
            .unwrap()
    }

    #[test]
    fn midnight_drops_time() {
        assert_eq!(iso_8601(at(0, 0, 0, 0)), "2024-02-29");
    }

    #[test]
    fn whole_seconds_drop_fraction() {
        assert_eq!(iso_8601(at(13, 5, 9, 0)), "2024-02-29T13:05:09");
    }

    #[test]
    fn millis_are_kept() {
        assert_eq!(iso_8601(at(0, 0, 0, 26)), "2024-02-29T00:00:00.026");
    }
}
