use plotters::style::RGBColor;

/// Chart theme configuration
pub struct ChartTheme {
    pub background_color: plotters::style::RGBAColor,
    pub text_color: plotters::style::RGBAColor,
    pub grid_color: plotters::style::RGBAColor,
    pub axis_color: plotters::style::RGBAColor,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background_color: plotters::style::RGBAColor(0, 0, 0, 0.94),
            text_color: plotters::style::RGBAColor(255, 255, 255, 0.8),
            grid_color: plotters::style::RGBAColor(255, 255, 255, 0.15),
            axis_color: plotters::style::RGBAColor(255, 255, 255, 0.8),
        }
    }
}

/// Chart style configuration
pub struct ChartStyle {
    pub line_width: u32,
    pub font_size: u32,
    pub margin: u32,
    pub label_area_size: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            line_width: 2,
            font_size: 15,
            margin: 10,
            label_area_size: 50,
        }
    }
}

/// Slice/series palette, cycled when a chart has more buckets than colors.
pub const SERIES_PALETTE: [RGBColor; 8] = [
    RGBColor(69, 163, 245),
    RGBColor(102, 187, 106),
    RGBColor(255, 167, 38),
    RGBColor(239, 83, 80),
    RGBColor(171, 71, 188),
    RGBColor(38, 198, 218),
    RGBColor(255, 213, 79),
    RGBColor(141, 110, 99),
];
