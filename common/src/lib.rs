//! Panoptic Caption Common Library
//!
//! Web(WASM)・デスクトップ・CLIで共有する中核部分:
//! 画像選択、リクエスト状態機械、比較表示モデル、サービス契約

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod render;
pub mod selection;
pub mod service;
pub mod session;
pub mod types;

pub use config::{ServiceConfig, BACKEND_URL_ENV, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use orchestrator::{Orchestrator, RequestState, Ticket};
pub use render::{ComparisonView, MetricBar, MetricKind, PipelineKind, PipelineView};
pub use selection::{NoPreview, PreviewProvider, Selection, SelectionManager};
pub use service::{interpret_response, HealthStatus};
pub use session::{PendingRequest, Session};
pub use types::{ComparisonResult, ImageFile, RequestParameters, DEFAULT_TOP_K};
