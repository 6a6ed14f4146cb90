//! Transform Module
//!
//! Strategy Patternによる行変換の抽象化を提供するモジュール。
//! ワークシートの行をJSON値のシーケンス（変換結果）に変換します。

mod direct;
mod log_extract;

use serde_json::Value;

use crate::api::TransformMode;
use crate::types::Worksheet;

/// 変換結果と統計情報
///
/// `values`が変換結果本体（JSON配列の要素）、`rows_read`が入力行数、
/// `rows_dropped`がログ抽出モードで解析に失敗して脱落した行数です。
/// 直接変換モードでは`rows_dropped`は常に0です。
#[derive(Debug, Clone)]
pub struct TransformOutcome {
    /// 変換されたJSON値のシーケンス
    pub values: Vec<Value>,

    /// 読み込んだ行数
    pub rows_read: usize,

    /// 脱落した行数（ログ抽出モードのみ非ゼロ）
    pub rows_dropped: usize,
}

impl TransformMode {
    /// ワークシートの行を指定された戦略で変換する
    pub(crate) fn apply(&self, worksheet: &Worksheet) -> TransformOutcome {
        let rows_read = worksheet.rows.len();
        match self {
            TransformMode::Direct => {
                let values = direct::transform(&worksheet.rows);
                TransformOutcome {
                    values,
                    rows_read,
                    rows_dropped: 0,
                }
            }
            TransformMode::LogExtraction => {
                let (values, rows_dropped) = log_extract::transform(&worksheet.rows);
                TransformOutcome {
                    values,
                    rows_read,
                    rows_dropped,
                }
            }
        }
    }
}
