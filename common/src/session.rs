//! 選択 → 送信 → 比較表示 をまとめたセッション
//!
//! 各スキン（Web / デスクトップ / CLI）はこの型だけを操作する。

use crate::error::Error;
use crate::orchestrator::{Orchestrator, RequestState, Ticket};
use crate::render::ComparisonView;
use crate::selection::{PreviewProvider, Selection, SelectionManager};
use crate::types::ComparisonResult;

/// 送信待ちのリクエスト。スキンが通信を実行し、結果を [`Session::complete`] に返す。
#[derive(Debug, Clone)]
pub struct PendingRequest<I> {
    pub ticket: Ticket,
    pub image: I,
    pub top_k: i64,
}

pub struct Session<P: PreviewProvider> {
    selection: SelectionManager<P>,
    orchestrator: Orchestrator,
}

impl<P> Session<P>
where
    P: PreviewProvider,
    P::Image: Clone,
{
    pub fn new(provider: P) -> Self {
        Self {
            selection: SelectionManager::new(provider),
            orchestrator: Orchestrator::new(),
        }
    }

    /// 画像を選択する。選択が変わったら状態を `Idle` に戻す。
    pub fn select_image(&mut self, image: Option<P::Image>) -> bool {
        let changed = self.selection.select_image(image);
        if changed {
            self.orchestrator.reset();
        }
        changed
    }

    pub fn current_selection(&self) -> Option<&Selection<P::Image, P::Handle>> {
        self.selection.current_selection()
    }

    pub fn preview(&self) -> Option<&P::Handle> {
        self.current_selection().map(Selection::preview)
    }

    /// 選択を破棄する（画面を閉じるとき）
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.orchestrator.reset();
    }

    /// 送信する。画像が未選択なら何もせず `None`。
    pub fn submit(&mut self, top_k: i64) -> Option<PendingRequest<P::Image>> {
        let image = self.selection.current_selection()?.image().clone();
        let ticket = self.orchestrator.begin();
        Some(PendingRequest {
            ticket,
            image,
            top_k,
        })
    }

    /// 通信結果を反映する。古い要求の結果なら `false`。
    pub fn complete(&mut self, ticket: Ticket, outcome: Result<ComparisonResult, Error>) -> bool {
        self.orchestrator.resolve(ticket, outcome)
    }

    pub fn current_state(&self) -> &RequestState {
        self.orchestrator.current_state()
    }

    pub fn can_submit(&self) -> bool {
        self.selection.has_selection() && !self.current_state().is_submitting()
    }

    pub fn comparison_view(&self) -> Option<ComparisonView> {
        ComparisonView::from_state(self.current_state())
    }
}
