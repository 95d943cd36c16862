//! 共有データ型
//!
//! - ImageFile: ネイティブ側（CLI/デスクトップ）で選択された画像
//! - RequestParameters: 送信パラメータ（top-K）
//! - ComparisonResult: キャプションサービスのレスポンス（全フィールド省略可）

use serde::{Deserialize, Deserializer, Serialize};

/// top-K のデフォルト値
pub const DEFAULT_TOP_K: i64 = 8;

/// 画像として受け付ける拡張子
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// 拡張子からMIMEタイプを判定（対象外ならNone）
pub fn mime_type_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

/// 選択された画像（中身は検証しない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// 送信パラメータ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestParameters {
    /// クライアント側では範囲を制限しない（範囲外はサービスが拒否する）
    pub top_k: i64,
}

impl Default for RequestParameters {
    fn default() -> Self {
        Self { top_k: DEFAULT_TOP_K }
    }
}

/// キャプション比較結果
///
/// どのフィールドも欠落・`null` があり得る。欠落はエラーではない。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonResult {
    pub baseline_caption: Option<String>,
    pub panoptic_caption: Option<String>,
    pub clipscore_baseline: Option<f64>,
    pub clipscore_panoptic: Option<f64>,
    pub recall_baseline: Option<f64>,
    pub recall_panoptic: Option<f64>,

    /// サービスが返した順序を保持する
    #[serde(deserialize_with = "null_as_empty")]
    pub labels_topk: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_parameters_default() {
        assert_eq!(RequestParameters::default().top_k, 8);
    }

    #[test]
    fn test_mime_type_for_extension() {
        assert_eq!(mime_type_for_extension("JPG"), Some("image/jpeg"));
        assert_eq!(mime_type_for_extension("png"), Some("image/png"));
        assert_eq!(mime_type_for_extension("txt"), None);
        for ext in IMAGE_EXTENSIONS {
            assert!(mime_type_for_extension(ext).is_some(), "{} has no mime type", ext);
        }
    }

    #[test]
    fn test_comparison_result_deserialize_full() {
        let json = r#"{
            "baseline_caption": "a dog on grass",
            "panoptic_caption": "a dog on green grass near a fence",
            "clipscore_baseline": 0.712,
            "clipscore_panoptic": 0.781,
            "recall_baseline": 0.5,
            "recall_panoptic": 0.75,
            "labels_topk": ["dog", "grass", "fence"]
        }"#;

        let result: ComparisonResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(result.baseline_caption.as_deref(), Some("a dog on grass"));
        assert_eq!(result.clipscore_panoptic, Some(0.781));
        assert_eq!(result.labels_topk, vec!["dog", "grass", "fence"]);
    }

    #[test]
    fn test_comparison_result_missing_and_null_fields() {
        let json = r#"{"panoptic_caption": null, "labels_topk": null, "recall_baseline": 0.25}"#;

        let result: ComparisonResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(result.baseline_caption, None);
        assert_eq!(result.panoptic_caption, None);
        assert_eq!(result.recall_baseline, Some(0.25));
        assert_eq!(result.recall_panoptic, None);
        assert!(result.labels_topk.is_empty());
    }

    #[test]
    fn test_comparison_result_ignores_unknown_fields() {
        let json = r#"{"baseline_caption": "x", "model": "blip"}"#;
        let result: ComparisonResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(result.baseline_caption.as_deref(), Some("x"));
    }
}
