//! Date properties.
//!
//! A date converts to and from a numeric timestamp: `seconds × scale`. The
//! scale defaults to 1.0 (plain Unix seconds) and can be changed process-wide
//! with [`set_default_date_scale`], per property with `#[model(scale = ...)]`,
//! or per instance by overriding [`Model::date_scale`](crate::Model::date_scale).
//! A scale of 1000.0 reads and writes millisecond timestamps.
//!
//! Sub-second precision is preserved to the microsecond.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::convert::{Coercion, Convert};
use crate::info::{Described, TypeDescriptor};

// -----------------------------------------------------------------------------
// Process-wide default scale

// f64 bits in an atomic; scales are plain configuration values, so relaxed
// ordering is enough.
static DEFAULT_SCALE_BITS: AtomicU64 = AtomicU64::new(f64::to_bits(1.0));

/// Returns the process-wide default date timestamp scale.
pub fn default_date_scale() -> f64 {
    f64::from_bits(DEFAULT_SCALE_BITS.load(Ordering::Relaxed))
}

/// Sets the process-wide default date timestamp scale.
///
/// Applies to every date property that declares no static scale and belongs
/// to an instance that does not override
/// [`Model::date_scale`](crate::Model::date_scale).
pub fn set_default_date_scale(scale: f64) {
    DEFAULT_SCALE_BITS.store(scale.to_bits(), Ordering::Relaxed);
}

// -----------------------------------------------------------------------------
// DateTime<Utc>

impl Described for DateTime<Utc> {
    fn descriptor() -> &'static TypeDescriptor {
        static DESC: TypeDescriptor = TypeDescriptor::Date;
        &DESC
    }
}

impl Convert for DateTime<Utc> {
    fn from_document(value: &Value, cx: &Coercion) -> Option<Self> {
        let stamp = value.as_f64()?;
        let seconds = stamp / cx.scale();
        if !seconds.is_finite() {
            return None;
        }
        DateTime::from_timestamp_micros((seconds * 1_000_000.0).round() as i64)
    }

    fn to_document(&self, cx: &Coercion) -> Option<Value> {
        let seconds = self.timestamp_micros() as f64 / 1_000_000.0;
        serde_json::Number::from_f64(seconds * cx.scale()).map(Value::Number)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use serde_json::json;

    use crate::convert::Mode;
    use crate::derive::Model;
    use crate::{Coercion, Convert, Model, ModelExt};

    fn instant(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(seconds, 0).unwrap()
    }

    #[test]
    fn seconds_by_default() {
        let cx = Coercion::default();
        let birthday = instant(827_251_200);
        assert_eq!(birthday.to_document(&cx), Some(json!(827_251_200.0)));
        assert_eq!(
            DateTime::<Utc>::from_document(&json!(827_251_200), &cx),
            Some(birthday)
        );
    }

    #[test]
    fn scale_1000_round_trips_milliseconds() {
        let cx = Coercion::new(1000.0, Mode::Document);
        let birthday = instant(827_251_200);

        let encoded = birthday.to_document(&cx).unwrap();
        assert_eq!(encoded.as_f64().unwrap(), 827_251_200.0 * 1000.0);

        let decoded = DateTime::<Utc>::from_document(&encoded, &cx).unwrap();
        assert_eq!(decoded, birthday);
    }

    #[test]
    fn sub_second_precision_survives() {
        let cx = Coercion::default();
        let instant = DateTime::from_timestamp_micros(1_218_124_800_250_000).unwrap();
        let encoded = instant.to_document(&cx).unwrap();
        let decoded = DateTime::<Utc>::from_document(&encoded, &cx).unwrap();
        assert_eq!(decoded, instant);
    }

    #[test]
    fn non_numeric_values_do_not_convert() {
        let cx = Coercion::default();
        assert!(DateTime::<Utc>::from_document(&json!("1996-03-20"), &cx).is_none());
        assert!(DateTime::<Utc>::from_document(&json!(null), &cx).is_none());
    }

    #[test]
    fn static_property_scale_applies() {
        #[derive(Default, Model)]
        struct Event {
            #[model(scale = 1000.0)]
            at: Option<DateTime<Utc>>,
        }

        let event = Event {
            at: Some(instant(1_218_124_800)),
        };
        let doc = ModelExt::to_document(&event);
        assert_eq!(doc["at"].as_f64().unwrap(), 1_218_124_800_000.0);

        let back = <Event as ModelExt>::from_document(&doc);
        assert_eq!(back.at, event.at);
    }

    #[test]
    fn instance_scale_override_wins() {
        #[derive(Default, Model)]
        #[model(Model = false)]
        struct Stamped {
            at: Option<DateTime<Utc>>,
        }

        impl Model for Stamped {
            fn date_scale(&self, _property: &str) -> f64 {
                1000.0
            }
        }

        let stamped = Stamped {
            at: Some(instant(827_251_200)),
        };
        let doc = ModelExt::to_document(&stamped);
        assert_eq!(doc["at"].as_f64().unwrap(), 827_251_200_000.0);

        let mut back = Stamped::default();
        back.merge_document(&doc);
        assert_eq!(back.at, stamped.at);
    }

    #[test]
    fn date_collections_use_the_date_rule() {
        #[derive(Default, Model)]
        struct Timeline {
            important: Vec<DateTime<Utc>>,
        }

        let timeline = Timeline {
            important: vec![instant(827_251_200), instant(1_218_124_800)],
        };
        let doc = ModelExt::to_document(&timeline);
        assert_eq!(
            doc["important"],
            json!([827_251_200.0, 1_218_124_800.0])
        );

        let back = <Timeline as ModelExt>::from_document(&doc);
        assert_eq!(back.important, timeline.important);

        // Non-numeric elements are dropped, silently.
        let partial = <Timeline as ModelExt>::from_document(&json!({
            "important": [827_251_200, "someday"],
        }));
        assert_eq!(partial.important, vec![instant(827_251_200)]);
    }
}
