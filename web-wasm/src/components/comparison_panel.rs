//! 比較結果パネル

use leptos::prelude::*;
use panoptic_caption_common::{ComparisonView, PipelineKind, PipelineView};
use crate::components::metric_row::MetricRow;

#[component]
pub fn ComparisonPanel(comparison: ComparisonView) -> impl IntoView {
    let labels = comparison.labels.clone();
    let show_labels = comparison.show_labels();

    view! {
        <div class="comparison">
            <PipelineCard pipeline=comparison.baseline />
            <PipelineCard pipeline=comparison.panoptic>
                // ラベルが空なら何も描画しない
                {show_labels.then(|| view! { <LabelChips labels=labels.clone() /> })}
            </PipelineCard>
        </div>
    }
}

#[component]
fn PipelineCard(pipeline: PipelineView, #[prop(optional)] children: Option<Children>) -> impl IntoView {
    let caption_class = if pipeline.caption_available {
        "caption"
    } else {
        "caption placeholder"
    };
    let caption = pipeline.caption.clone();
    let emphasize = pipeline.kind == PipelineKind::Panoptic && pipeline.caption_available;

    view! {
        <div class=format!("pipeline-card {}", pipeline.kind.as_str())>
            <h3>{pipeline.kind.title()}</h3>
            <p class=caption_class>
                {if emphasize {
                    view! { <strong>{caption}</strong> }.into_any()
                } else {
                    caption.into_any()
                }}
            </p>
            <MetricRow metric=pipeline.clip_score />
            <MetricRow metric=pipeline.recall />
            {children.map(|children| children())}
        </div>
    }
}

#[component]
fn LabelChips(labels: Vec<String>) -> impl IntoView {
    view! {
        <div class="label-chips">
            <strong>"Top-K labels:"</strong>
            <div>
                {labels
                    .into_iter()
                    .map(|label| view! { <span class="chip">{label}</span> })
                    .collect_view()}
            </div>
        </div>
    }
}
