// Sensor channel registry
use std::ops::{Bound, RangeBounds};

/// Number of most recent samples charted per channel.
pub const SAMPLE_COUNT: usize = 10;

/// Plausible reading range for a channel; values outside it are sensor faults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidRange {
    pub lower: Bound<f64>,
    pub upper: Bound<f64>,
}

impl ValidRange {
    pub const fn inclusive(min: f64, max: f64) -> Self {
        Self {
            lower: Bound::Included(min),
            upper: Bound::Included(max),
        }
    }

    pub const fn exclusive(min: f64, max: f64) -> Self {
        Self {
            lower: Bound::Excluded(min),
            upper: Bound::Excluded(max),
        }
    }

    /// NaN is never plausible.
    pub fn accepts(&self, value: f64) -> bool {
        (self.lower, self.upper).contains(&value)
    }
}

/// How the chart's vertical axis is scaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisScale {
    Auto,
    Fixed { low: f64, high: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelSpec {
    pub name: &'static str,
    /// Last segment of the store path under the device namespace.
    pub key: &'static str,
    pub chart_id: &'static str,
    pub valid_range: ValidRange,
    pub axis: AxisScale,
    pub sample_count: usize,
}

impl ChannelSpec {
    /// Store path of this channel for a device, e.g. `devices/0/humidity`.
    pub fn store_path(&self, device_id: &str) -> String {
        device_path(device_id, self.key)
    }
}

/// Path of a field under a device's namespace.
pub fn device_path(device_id: &str, key: &str) -> String {
    format!("devices/{}/{}", device_id, key)
}

const fn channel(
    name: &'static str,
    key: &'static str,
    chart_id: &'static str,
    valid_range: ValidRange,
    axis: AxisScale,
) -> ChannelSpec {
    ChannelSpec {
        name,
        key,
        chart_id,
        valid_range,
        axis,
        sample_count: SAMPLE_COUNT,
    }
}

static CHANNELS: [ChannelSpec; 8] = [
    channel(
        "Air temperature",
        "temperature",
        "chart1",
        ValidRange::exclusive(-30.0, 60.0),
        AxisScale::Auto,
    ),
    channel(
        "Air humidity",
        "humidity",
        "chart2",
        ValidRange::inclusive(0.0, 100.0),
        AxisScale::Fixed {
            low: 0.0,
            high: 100.0,
        },
    ),
    channel(
        "Air pressure",
        "pressure",
        "chart3",
        ValidRange::inclusive(500.0, 1800.0),
        AxisScale::Auto,
    ),
    channel(
        "Soil temperature",
        "soil-temperature",
        "chart4",
        ValidRange::inclusive(-5.0, 60.0),
        AxisScale::Auto,
    ),
    channel(
        "Soil moisture",
        "soil-moisture",
        "chart5",
        ValidRange::inclusive(0.0, 4096.0),
        AxisScale::Auto,
    ),
    channel(
        "Leaf moisture",
        "leaf-moisture",
        "chart6",
        ValidRange::inclusive(0.0, 4096.0),
        AxisScale::Auto,
    ),
    channel(
        "Light intensity",
        "light-intensity",
        "chart7",
        ValidRange::inclusive(0.0, 4096.0),
        AxisScale::Auto,
    ),
    channel(
        "UV intensity",
        "uv-intensity",
        "chart8",
        ValidRange::inclusive(0.0, 25.0),
        AxisScale::Auto,
    ),
];

/// All charted channels in dashboard order.
pub fn all_channels() -> &'static [ChannelSpec] {
    &CHANNELS
}

pub fn find_channel(key: &str) -> Option<&'static ChannelSpec> {
    CHANNELS.iter().find(|c| c.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_has_eight_distinct_channels() {
        let channels = all_channels();
        assert_eq!(channels.len(), 8);

        let keys: HashSet<_> = channels.iter().map(|c| c.key).collect();
        let charts: HashSet<_> = channels.iter().map(|c| c.chart_id).collect();
        assert_eq!(keys.len(), 8);
        assert_eq!(charts.len(), 8);
        assert!(channels.iter().all(|c| c.sample_count == SAMPLE_COUNT));
    }

    #[test]
    fn test_store_path_uses_device_namespace() {
        let pressure = find_channel("pressure").unwrap();
        assert_eq!(pressure.store_path("0"), "devices/0/pressure");
        assert_eq!(pressure.store_path("greenhouse-2"), "devices/greenhouse-2/pressure");
    }

    #[test]
    fn test_humidity_bounds_are_inclusive() {
        let range = find_channel("humidity").unwrap().valid_range;
        assert!(range.accepts(0.0));
        assert!(range.accepts(100.0));
        assert!(range.accepts(45.5));
        assert!(!range.accepts(150.0));
        assert!(!range.accepts(-1.0));
    }

    #[test]
    fn test_air_temperature_bounds_are_exclusive() {
        let range = find_channel("temperature").unwrap().valid_range;
        assert!(!range.accepts(-30.0));
        assert!(!range.accepts(60.0));
        assert!(range.accepts(59.9));
        assert!(range.accepts(-29.9));
    }

    #[test]
    fn test_nan_is_rejected() {
        for channel in all_channels() {
            assert!(!channel.valid_range.accepts(f64::NAN), "{}", channel.key);
        }
    }

    #[test]
    fn test_only_humidity_has_fixed_axis() {
        let fixed: Vec<_> = all_channels()
            .iter()
            .filter(|c| matches!(c.axis, AxisScale::Fixed { .. }))
            .map(|c| c.key)
            .collect();
        assert_eq!(fixed, vec!["humidity"]);
    }
}
