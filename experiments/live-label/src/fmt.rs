use glance_infer::RankedLabel;

/// Score with two decimal places, e.g. "0.87".
pub fn format_score(score: f32) -> String {
    format!("{score:.2}")
}

/// Whole milliseconds, e.g. "45ms".
pub fn format_ms(ms: u64) -> String {
    format!("{ms}ms")
}

/// Throughput derived from a per-frame wall time, e.g. "22.2FPS".
pub fn format_fps(total_ms: u64) -> String {
    if total_ms == 0 {
        return "-FPS".to_string();
    }
    format!("{:.1}FPS", 1000.0 / total_ms as f64)
}

/// Smoothed latency readout, e.g. "avg:46ms".
pub fn format_avg_ms(avg_ms: f64) -> String {
    format!("avg:{avg_ms:.0}ms")
}

/// Ranked labels joined into one line, e.g. "tabby 0.87 | lynx 0.07 | tiger 0.03".
pub fn format_labels(labels: &[RankedLabel]) -> String {
    labels
        .iter()
        .map(|ranked| format!("{} {}", ranked.label, format_score(ranked.score)))
        .collect::<Vec<_>>()
        .join(" | ")
}
