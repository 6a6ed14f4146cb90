//! Log Extraction Transform
//!
//! 各行の最初のセルをログ行テキストとして扱い、埋め込まれたJSON
//! オブジェクトを抽出する戦略。

use serde_json::Value;
use tracing::warn;

use crate::types::CellValue;

/// ログ行からJSON部分文字列を抽出して解析
///
/// 最初の`{`から最後の`}`まで（両端を含む）を1つのJSON値として解析します。
/// 1行に複数のトップレベル`{...}`がある場合も分割せず、あえて1つの
/// スパンとして解析を試みます（大抵は失敗して行ごと脱落します）。
/// この「最初の波括弧から最後の波括弧まで」のヒューリスティックは
/// 挙動互換のために変更しないこと。
///
/// # 戻り値
///
/// * `Some(Value)` - 抽出した部分文字列の解析に成功した場合
/// * `None` - 波括弧が見つからない、順序が逆、または解析に失敗した場合
pub(crate) fn extract_json(log_line: &str) -> Option<Value> {
    let start = log_line.find('{')?;
    let end = log_line.rfind('}')?;
    if end < start {
        return None;
    }

    serde_json::from_str(&log_line[start..=end]).ok()
}

/// 行データをログ抽出モードで変換
///
/// ヘッダー解釈は行いません。抽出に失敗した行は出力に含まれないため、
/// 出力の長さは入力行数以下になります。失敗は行単位で回復可能な
/// エラーとして扱い、warnログにのみ記録します（呼び出し元には
/// 伝播しません）。
///
/// # 戻り値
///
/// 抽出されたJSON値のシーケンスと、脱落した行数のペア。
pub(crate) fn transform(rows: &[Vec<CellValue>]) -> (Vec<Value>, usize) {
    let mut values = Vec::new();
    let mut dropped = 0;

    for (row_idx, row) in rows.iter().enumerate() {
        // ログデータは最初の列にあると想定
        let log_line = row
            .first()
            .map(|cell| cell.as_raw_string())
            .unwrap_or_default();

        match extract_json(&log_line) {
            Some(value) => values.push(value),
            None => {
                dropped += 1;
                warn!(row = row_idx, "Failed to extract JSON from log line");
            }
        }
    }

    (values, dropped)
}
