//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use serde_json::Value;

/// セルの値を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CellValue {
    /// 数値（f64）
    Number(f64),

    /// 文字列
    String(String),

    /// 論理値
    Bool(bool),

    /// エラー値（例: #DIV/0!）
    Error(String),

    /// 日時（ISO 8601形式の文字列に変換済み）
    DateTime(String),

    /// 空セル
    Empty,
}

impl CellValue {
    /// 値が空かどうかを判定
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// 値を文字列として取得
    ///
    /// 直接変換モードのヘッダーキー、およびログ抽出モードの
    /// ログ行テキストとして使用されます。
    pub fn as_raw_string(&self) -> String {
        match self {
            CellValue::Number(n) => n.to_string(),
            CellValue::String(s) => s.clone(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Error(e) => e.clone(),
            CellValue::DateTime(s) => s.clone(),
            CellValue::Empty => String::new(),
        }
    }

    /// 値をJSON値に変換
    ///
    /// 数値は数値のまま、文字列は文字列のまま保持します（型強制なし）。
    /// 有限でない数値（NaN、無限大）はJSONで表現できないため`null`になります。
    pub fn to_json(&self) -> Value {
        match self {
            CellValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            CellValue::String(s) => Value::String(s.clone()),
            CellValue::Bool(b) => Value::Bool(*b),
            CellValue::Error(e) => Value::String(e.clone()),
            CellValue::DateTime(s) => Value::String(s.clone()),
            CellValue::Empty => Value::Null,
        }
    }
}

/// ワークブックの最初のシートから抽出された表データ
///
/// 各行はセル値の順序付きシーケンスです。リクエスト処理の間だけ
/// メモリ上に存在し、永続化されません。
#[derive(Debug, Clone)]
pub(crate) struct Worksheet {
    /// シート名
    pub name: String,

    /// 行データ（行 × セル）
    pub rows: Vec<Vec<CellValue>>,
}
