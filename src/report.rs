//! 比較結果のテキスト出力

use panoptic_caption_common::{ComparisonView, MetricBar, PipelineView};
use std::fmt::Write;

/// バーのトラック幅（文字数）
pub const BAR_WIDTH: usize = 30;

/// メトリクス1行分のバー。欠落時はバーを描かず "unavailable" と明示する。
pub fn render_bar(bar: &MetricBar, width: usize) -> String {
    match bar.percent() {
        Some(percent) => {
            let filled = ((percent / 100.0) * width as f64).round() as usize;
            let filled = filled.min(width);
            format!(
                "{}{} {:>6}",
                "█".repeat(filled),
                "░".repeat(width - filled),
                bar.percent_text()
            )
        }
        None => format!("{:<width$} {:>6} (unavailable)", "", bar.percent_text(), width = width),
    }
}

fn write_pipeline(out: &mut String, pipeline: &PipelineView) {
    let _ = writeln!(out, "{}", pipeline.kind.title());
    let _ = writeln!(out, "  {}", pipeline.caption);
    for metric in pipeline.metrics() {
        let _ = writeln!(
            out,
            "  {:<10} {}",
            metric.kind.label(),
            render_bar(&metric, BAR_WIDTH)
        );
    }
}

pub fn format_report(view: &ComparisonView) -> String {
    let mut out = String::new();
    for pipeline in view.pipelines() {
        write_pipeline(&mut out, pipeline);
        out.push('\n');
    }
    if view.show_labels() {
        let _ = writeln!(out, "Top-K labels: {}", view.labels.join(", "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use panoptic_caption_common::{ComparisonResult, MetricKind};

    #[test]
    fn test_render_bar_full_and_half() {
        let bar = MetricBar::new(MetricKind::RecallAtK, Some(0.5));
        let line = render_bar(&bar, 10);
        assert_eq!(line, "█████░░░░░  50.0%");

        let bar = MetricBar::new(MetricKind::RecallAtK, Some(1.0));
        assert!(render_bar(&bar, 10).starts_with("██████████ "));
    }

    #[test]
    fn test_render_bar_zero_differs_from_unavailable() {
        let zero = render_bar(&MetricBar::new(MetricKind::ClipScore, Some(0.0)), 10);
        let missing = render_bar(&MetricBar::new(MetricKind::ClipScore, None), 10);

        assert!(zero.starts_with("░░░░░░░░░░"));
        assert!(zero.contains("0.0%"));
        assert!(missing.contains("N/A"));
        assert!(missing.contains("unavailable"));
        assert!(!missing.contains('░'));
    }

    #[test]
    fn test_format_report() {
        let result = ComparisonResult {
            baseline_caption: Some("a dog on grass".into()),
            panoptic_caption: None,
            clipscore_baseline: Some(0.712),
            clipscore_panoptic: Some(0.781),
            recall_baseline: Some(0.5),
            recall_panoptic: None,
            labels_topk: vec!["dog".into(), "grass".into()],
        };
        let report = format_report(&ComparisonView::from_result(&result));

        assert!(report.contains("Baseline\n  a dog on grass"));
        assert!(report.contains("Panoptic-aware\n  (no caption)"));
        assert!(report.contains("71.2%"));
        assert!(report.contains("78.1%"));
        assert!(report.contains("unavailable"));
        assert!(report.contains("Top-K labels: dog, grass"));
    }

    #[test]
    fn test_format_report_without_labels() {
        let report = format_report(&ComparisonView::from_result(&ComparisonResult::default()));
        assert!(!report.contains("Top-K labels"));
    }
}
