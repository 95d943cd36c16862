//! 比較表示モデル
//!
//! `Succeeded` 状態から、ベースラインとパノプティックの2系統の表示内容と
//! メトリクスバーの長さを作る。状態を持たない純粋な変換。

use crate::orchestrator::RequestState;
use crate::types::ComparisonResult;

/// キャプションが無いときの表示
pub const CAPTION_PLACEHOLDER: &str = "(no caption)";

/// メトリクスが無いときの表示
pub const UNAVAILABLE_TEXT: &str = "N/A";

/// キャプション系統
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineKind {
    Baseline,
    Panoptic,
}

impl PipelineKind {
    pub fn title(&self) -> &'static str {
        match self {
            PipelineKind::Baseline => "Baseline",
            PipelineKind::Panoptic => "Panoptic-aware",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineKind::Baseline => "baseline",
            PipelineKind::Panoptic => "panoptic",
        }
    }
}

/// メトリクス種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    ClipScore,
    RecallAtK,
}

impl MetricKind {
    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::ClipScore => "CLIPScore",
            MetricKind::RecallAtK => "Recall@K",
        }
    }
}

/// メトリクスバー1本分
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricBar {
    pub kind: MetricKind,
    /// サービスが返した値そのもの（非有限値は欠落扱い）
    pub value: Option<f64>,
}

impl MetricBar {
    pub fn new(kind: MetricKind, value: Option<f64>) -> Self {
        Self {
            kind,
            value: value.filter(|v| v.is_finite()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.value.is_some()
    }

    /// バーの長さ（トラック幅に対する%）。欠落時は `None`
    pub fn percent(&self) -> Option<f64> {
        self.value.map(|v| v.clamp(0.0, 1.0) * 100.0)
    }

    /// 描画用の幅。欠落時は0だが、`is_available` で区別すること
    pub fn width_percent(&self) -> f64 {
        self.percent().unwrap_or(0.0)
    }

    /// "71.2%" / "N/A"
    pub fn percent_text(&self) -> String {
        match self.percent() {
            Some(p) => format!("{:.1}%", p),
            None => UNAVAILABLE_TEXT.to_string(),
        }
    }

    /// "0.712" / "N/A"
    pub fn value_text(&self) -> String {
        match self.value {
            Some(v) => format!("{:.3}", v),
            None => UNAVAILABLE_TEXT.to_string(),
        }
    }
}

/// 1系統分の表示
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineView {
    pub kind: PipelineKind,
    pub caption: String,
    pub caption_available: bool,
    pub clip_score: MetricBar,
    pub recall: MetricBar,
}

impl PipelineView {
    fn new(kind: PipelineKind, caption: Option<&str>, clip: Option<f64>, recall: Option<f64>) -> Self {
        let caption = caption.map(str::trim).filter(|c| !c.is_empty());
        Self {
            kind,
            caption: caption.unwrap_or(CAPTION_PLACEHOLDER).to_string(),
            caption_available: caption.is_some(),
            clip_score: MetricBar::new(MetricKind::ClipScore, clip),
            recall: MetricBar::new(MetricKind::RecallAtK, recall),
        }
    }

    pub fn metrics(&self) -> [MetricBar; 2] {
        [self.clip_score, self.recall]
    }
}

/// 比較表示全体
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonView {
    pub baseline: PipelineView,
    pub panoptic: PipelineView,
    /// サービスの順序のまま
    pub labels: Vec<String>,
}

impl ComparisonView {
    pub fn from_result(result: &ComparisonResult) -> Self {
        Self {
            baseline: PipelineView::new(
                PipelineKind::Baseline,
                result.baseline_caption.as_deref(),
                result.clipscore_baseline,
                result.recall_baseline,
            ),
            panoptic: PipelineView::new(
                PipelineKind::Panoptic,
                result.panoptic_caption.as_deref(),
                result.clipscore_panoptic,
                result.recall_panoptic,
            ),
            labels: result.labels_topk.clone(),
        }
    }

    /// `Succeeded` のときだけ表示がある
    pub fn from_state(state: &RequestState) -> Option<Self> {
        state.result().map(Self::from_result)
    }

    pub fn pipelines(&self) -> [&PipelineView; 2] {
        [&self.baseline, &self.panoptic]
    }

    /// ラベルが空ならチップ欄ごと描画しない
    pub fn show_labels(&self) -> bool {
        !self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_result() -> ComparisonResult {
        ComparisonResult {
            baseline_caption: Some("a dog on grass".to_string()),
            panoptic_caption: Some("a dog on green grass near a fence".to_string()),
            clipscore_baseline: Some(0.712),
            clipscore_panoptic: Some(0.781),
            recall_baseline: Some(0.5),
            recall_panoptic: Some(0.75),
            labels_topk: vec!["dog".into(), "grass".into(), "fence".into()],
        }
    }

    #[test]
    fn test_full_response_percentages_and_labels() {
        let view = ComparisonView::from_result(&full_result());

        assert_eq!(view.baseline.clip_score.percent_text(), "71.2%");
        assert_eq!(view.baseline.recall.percent_text(), "50.0%");
        assert_eq!(view.panoptic.clip_score.percent_text(), "78.1%");
        assert_eq!(view.panoptic.recall.percent_text(), "75.0%");
        assert_eq!(view.labels, vec!["dog", "grass", "fence"]);
        assert!(view.show_labels());

        assert_eq!(view.baseline.caption, "a dog on grass");
        assert_eq!(view.panoptic.caption, "a dog on green grass near a fence");
        assert_eq!(view.baseline.clip_score.value_text(), "0.712");
    }

    #[test]
    fn test_missing_recall_is_unavailable_not_zero() {
        let mut result = full_result();
        result.recall_panoptic = None;
        result.recall_baseline = Some(0.0);
        let view = ComparisonView::from_result(&result);

        let missing = view.panoptic.recall;
        assert!(!missing.is_available());
        assert_eq!(missing.percent(), None);
        assert_eq!(missing.percent_text(), "N/A");
        assert_eq!(missing.width_percent(), 0.0);

        let zero = view.baseline.recall;
        assert!(zero.is_available());
        assert_eq!(zero.percent(), Some(0.0));
        assert_eq!(zero.percent_text(), "0.0%");
        assert_ne!(missing, zero);
    }

    #[test]
    fn test_values_are_clamped_for_bars() {
        let bar = MetricBar::new(MetricKind::ClipScore, Some(-0.2));
        assert_eq!(bar.percent(), Some(0.0));
        assert_eq!(bar.value_text(), "-0.200");

        let bar = MetricBar::new(MetricKind::ClipScore, Some(1.7));
        assert_eq!(bar.width_percent(), 100.0);
    }

    #[test]
    fn test_non_finite_value_is_unavailable() {
        let bar = MetricBar::new(MetricKind::RecallAtK, Some(f64::NAN));
        assert!(!bar.is_available());
        assert_eq!(bar.percent_text(), "N/A");
    }

    #[test]
    fn test_empty_result_degrades_to_placeholders() {
        let view = ComparisonView::from_result(&ComparisonResult::default());

        for pipeline in view.pipelines() {
            assert_eq!(pipeline.caption, CAPTION_PLACEHOLDER);
            assert!(!pipeline.caption_available);
            for metric in pipeline.metrics() {
                assert!(!metric.is_available());
            }
        }
        assert!(!view.show_labels());
    }

    #[test]
    fn test_blank_caption_uses_placeholder() {
        let result = ComparisonResult {
            baseline_caption: Some("   ".to_string()),
            ..Default::default()
        };
        let view = ComparisonView::from_result(&result);
        assert_eq!(view.baseline.caption, CAPTION_PLACEHOLDER);
    }

    #[test]
    fn test_only_succeeded_state_renders() {
        assert!(ComparisonView::from_state(&RequestState::Idle).is_none());
        assert!(ComparisonView::from_state(&RequestState::Submitting).is_none());
        assert!(ComparisonView::from_state(&RequestState::Failed("x".into())).is_none());
        assert!(ComparisonView::from_state(&RequestState::Succeeded(full_result())).is_some());
    }

    #[test]
    fn test_pipeline_titles() {
        let view = ComparisonView::from_result(&full_result());
        let titles: Vec<_> = view.pipelines().iter().map(|p| p.kind.title()).collect();
        assert_eq!(titles, vec!["Baseline", "Panoptic-aware"]);
        assert_eq!(view.panoptic.clip_score.kind.label(), "CLIPScore");
        assert_eq!(view.panoptic.recall.kind.label(), "Recall@K");
    }
}
