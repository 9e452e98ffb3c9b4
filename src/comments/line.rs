use crate::ocr::Detection;

/// Positional record derived from one surviving detection.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Trimmed recognized text
    pub text: String,
    pub confidence: f64,
    /// Minimum y of the polygon
    pub top_y: f64,
    /// Minimum x of the polygon
    pub left_x: f64,
    /// Mean of the polygon's y coordinates
    pub center_y: f64,
    /// Mean of the polygon's x coordinates
    pub center_x: f64,
}

impl Line {
    /// Computes the positional fields from a detection's four corners.
    pub fn from_detection(detection: &Detection) -> Self {
        let xs = detection.bbox.map(|[x, _]| x);
        let ys = detection.bbox.map(|[_, y]| y);

        Self {
            text: detection.text.trim().to_string(),
            confidence: detection.confidence,
            top_y: ys.iter().copied().fold(f64::INFINITY, f64::min),
            left_x: xs.iter().copied().fold(f64::INFINITY, f64::min),
            center_y: ys.iter().sum::<f64>() / ys.len() as f64,
            center_x: xs.iter().sum::<f64>() / xs.len() as f64,
        }
    }
}

/// Keeps detections at or above `min_conf` whose trimmed text is non-empty.
pub fn filter_detections(detections: &[Detection], min_conf: f64) -> Vec<&Detection> {
    detections
        .iter()
        .filter(|d| d.confidence >= min_conf && !d.text.trim().is_empty())
        .collect()
}

/// Filters detections and turns the survivors into lines.
pub fn normalize_lines(detections: &[Detection], min_conf: f64) -> Vec<Line> {
    filter_detections(detections, min_conf)
        .into_iter()
        .map(Line::from_detection)
        .collect()
}
