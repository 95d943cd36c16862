//! メトリクスバーコンポーネント

use leptos::prelude::*;
use panoptic_caption_common::MetricBar;

/// 値が無いときは長さ0のバーではなく "N/A" と unavailable クラスで表示する
#[component]
pub fn MetricRow(metric: MetricBar) -> impl IntoView {
    let available = metric.is_available();
    let class = if available { "metric" } else { "metric unavailable" };
    let title = if available {
        metric.value_text()
    } else {
        "unavailable".to_string()
    };

    view! {
        <div class=class title=title>
            <span class="metric-label">{metric.kind.label()}</span>
            <div class="metric-track">
                <Show when=move || available>
                    <div
                        class="metric-fill"
                        style=format!("width: {:.1}%", metric.width_percent())
                    />
                </Show>
            </div>
            <span class="metric-value">{metric.percent_text()}</span>
        </div>
    }
}
