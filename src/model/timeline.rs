use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Controls what granularity the timeline displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ZoomLevel {
    Day,
    #[default]
    Week,
    Month,
}

impl ZoomLevel {
    pub const ALL: [ZoomLevel; 3] = [ZoomLevel::Day, ZoomLevel::Week, ZoomLevel::Month];

    /// Days covered by one horizontal unit at this zoom.
    pub fn days_per_unit(self) -> f32 {
        match self {
            ZoomLevel::Day => 1.0,
            ZoomLevel::Week => 7.0,
            ZoomLevel::Month => 30.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ZoomLevel::Day => "Day",
            ZoomLevel::Week => "Week",
            ZoomLevel::Month => "Month",
        }
    }
}

/// Smallest closed date interval covering the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// Sizing knobs recognized by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Horizontal pixels per zoom unit (one day, week, or month).
    pub pixels_per_unit: f32,
    /// Vertical pixels per task row.
    pub row_height: f32,
    /// Minimum vertical gap between bars of adjacent rows.
    pub min_row_gap: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            pixels_per_unit: 28.0,
            row_height: 30.0,
            min_row_gap: 2.0,
        }
    }
}

impl LayoutConfig {
    pub const MIN_PIXELS_PER_UNIT: f32 = 8.0;
    pub const MAX_PIXELS_PER_UNIT: f32 = 120.0;

    /// Day-to-pixel scale for the given zoom level.
    pub fn pixels_per_day(&self, zoom: ZoomLevel) -> f32 {
        self.pixels_per_unit / zoom.days_per_unit()
    }

    pub fn zoom_in(&mut self) {
        self.pixels_per_unit = (self.pixels_per_unit * 1.2).min(Self::MAX_PIXELS_PER_UNIT);
    }

    pub fn zoom_out(&mut self) {
        self.pixels_per_unit = (self.pixels_per_unit / 1.2).max(Self::MIN_PIXELS_PER_UNIT);
    }
}
