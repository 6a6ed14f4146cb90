//! Direct Transform
//!
//! 最初の行をヘッダーとして解釈し、以降の各行をヘッダー名をキーとする
//! JSONオブジェクトに変換する戦略。

use serde_json::{Map, Value};

use crate::types::CellValue;

/// 行データをヘッダーキーのオブジェクト列に変換
///
/// # 変換規則
///
/// - 最初の行のセル値（文字列化したもの）がキーになる
/// - ヘッダーより短い行は、末尾のキーが単に欠落する（nullは挿入しない）
/// - 空セルはキーを生成しない
/// - すべてのセルが空の行はスキップされる
/// - ヘッダーセルが空の列はスキップされる
/// - ヘッダーより右のセルは無視される
/// - 重複するヘッダー名は同じキーに挿入され、後の列の値が残る
///
/// # 戻り値
///
/// データ行ごとに1つのJSONオブジェクト。ワークシートが空、または
/// ヘッダー行しかない場合は空のシーケンス。
pub(crate) fn transform(rows: &[Vec<CellValue>]) -> Vec<Value> {
    let Some(header_row) = rows.first() else {
        return Vec::new();
    };

    // ヘッダーキー（空セルの列はNoneとしてスキップ対象に）
    let headers: Vec<Option<String>> = header_row
        .iter()
        .map(|cell| {
            if cell.is_empty() {
                None
            } else {
                Some(cell.as_raw_string())
            }
        })
        .collect();

    let mut values = Vec::new();

    for row in &rows[1..] {
        // 空行のスキップ
        if row.iter().all(|cell| cell.is_empty()) {
            continue;
        }

        let mut object = Map::new();
        for (cell, header) in row.iter().zip(headers.iter()) {
            let Some(key) = header else {
                continue;
            };
            if cell.is_empty() {
                continue;
            }
            // キーの順序は挿入順（= ヘッダー順）で保持される
            object.insert(key.clone(), cell.to_json());
        }

        values.push(Value::Object(object));
    }

    values
}
