//! リクエスト状態機械
//!
//! ```text
//! Idle ──submit──▶ Submitting ──resolve──▶ Succeeded / Failed
//! Succeeded / Failed / Idle ──submit──▶ Submitting
//! Submitting ──submit──▶ Submitting   (前の要求は破棄)
//! any ──reset──▶ Idle
//! ```
//!
//! 通信そのものは行わない。`begin` でチケットを発行し、各スキンが通信を終えたら
//! `resolve` に結果を渡す。最後に発行したチケット以外の結果は捨てる。

use crate::error::Error;
use crate::types::ComparisonResult;

/// リクエスト状態
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    #[default]
    Idle,
    Submitting,
    Succeeded(ComparisonResult),
    Failed(String),
}

impl RequestState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, RequestState::Submitting)
    }

    pub fn result(&self) -> Option<&ComparisonResult> {
        match self {
            RequestState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestState::Idle => "idle",
            RequestState::Submitting => "submitting",
            RequestState::Succeeded(_) => "succeeded",
            RequestState::Failed(_) => "failed",
        }
    }
}

/// 発行済みリクエストの識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// リクエストオーケストレータ
#[derive(Debug, Default)]
pub struct Orchestrator {
    state: RequestState,
    latest_issued: u64,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_state(&self) -> &RequestState {
        &self.state
    }

    /// `Submitting` に遷移してチケットを発行する
    ///
    /// 送信中に呼ばれた場合は前の要求を上書きする。
    pub fn begin(&mut self) -> Ticket {
        if self.state.is_submitting() {
            log::debug!("superseding request #{}", self.latest_issued);
        }
        self.latest_issued += 1;
        self.state = RequestState::Submitting;
        log::debug!("request #{} submitting", self.latest_issued);
        Ticket(self.latest_issued)
    }

    /// 通信結果を反映する。古いチケットの結果は捨てて `false` を返す。
    pub fn resolve(&mut self, ticket: Ticket, outcome: Result<ComparisonResult, Error>) -> bool {
        if !self.is_current(ticket) {
            log::debug!(
                "discarding stale response #{} (latest #{})",
                ticket.0,
                self.latest_issued
            );
            return false;
        }

        self.state = match outcome {
            Ok(result) => {
                log::debug!("request #{} succeeded", ticket.0);
                RequestState::Succeeded(result)
            }
            Err(err) => {
                let message = err.user_message();
                log::warn!("request #{} failed: {}", ticket.0, message);
                RequestState::Failed(message)
            }
        };
        true
    }

    /// `Idle` に戻す。送信中の要求もすべて無効になる。
    pub fn reset(&mut self) {
        if self.state.is_submitting() {
            log::debug!("abandoning in-flight request #{}", self.latest_issued);
        }
        // 未解決のチケットを全部古くする
        self.latest_issued += 1;
        self.state = RequestState::Idle;
    }

    /// このチケットの結果がまだ反映可能か
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest_issued && self.state.is_submitting()
    }
}
