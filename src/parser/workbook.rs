//! Workbook Parser
//!
//! calamineのラッパーとして、ワークブックレベルの操作を提供します。
//! 変換パイプラインが必要とするのは最初のシートのみです。

use calamine::{open_workbook_auto_from_rs, Data, Reader, Sheets};
use std::io::{Cursor, Read};

use crate::error::XlsxToJsonError;
use crate::security::SecurityConfig;
use crate::types::{CellValue, Worksheet};

/// ワークブックパーサー
///
/// calamineの自動フォーマット判定を使用するため、XLSXの他にXLS、XLSB、
/// ODSも読み込めます。
pub(crate) struct WorkbookParser {
    /// calamineのワークブック
    workbook: Sheets<Cursor<Vec<u8>>>,
}

impl WorkbookParser {
    /// ワークブックを開く
    ///
    /// # 引数
    ///
    /// * `reader` - スプレッドシートファイルを読み込むためのリーダー
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - ワークブックの読み込みに成功した場合
    /// * `Err(XlsxToJsonError::SecurityViolation)` - サイズ上限を超過した場合
    /// * `Err(XlsxToJsonError::Parse)` - 解析に失敗した場合
    pub fn open<R: Read>(
        mut reader: R,
        security_config: &SecurityConfig,
    ) -> Result<Self, XlsxToJsonError> {
        // ファイル全体をメモリに読み込む
        // セキュリティ: 入力ファイルサイズの上限を適用
        let mut buffer = Vec::new();
        let bytes_read = reader.read_to_end(&mut buffer)?;

        if bytes_read as u64 > security_config.max_input_file_size {
            return Err(XlsxToJsonError::SecurityViolation(format!(
                "Input file size exceeds maximum: {} bytes (max: {} bytes)",
                bytes_read, security_config.max_input_file_size
            )));
        }

        // calamineでワークブックを開く（フォーマット自動判定）
        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;

        Ok(WorkbookParser { workbook })
    }

    /// 最初のシートをパースして行データを抽出
    ///
    /// # 戻り値
    ///
    /// * `Ok(Worksheet)` - 最初のシートの行データ
    /// * `Err(XlsxToJsonError::Config)` - ワークブックにシートが存在しない場合
    /// * `Err(XlsxToJsonError::Parse)` - パースエラーが発生した場合
    pub fn first_worksheet(&mut self) -> Result<Worksheet, XlsxToJsonError> {
        // 1. 最初のシート名の取得
        let sheet_name = self
            .workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| XlsxToJsonError::Config("Workbook has no sheets".to_string()))?;

        // 2. シートの取得
        let range = self.workbook.worksheet_range(&sheet_name)?;

        // 3. セルデータの抽出
        let rows = range
            .rows()
            .map(|row| row.iter().map(convert_cell).collect())
            .collect();

        Ok(Worksheet {
            name: sheet_name,
            rows,
        })
    }
}

/// calamineのセルデータを`CellValue`に変換
///
/// 数値は数値のまま保持し、日時セルはISO 8601形式の文字列に変換します。
/// 日時のデコードに失敗した場合はシリアル値（f64）にフォールバックします。
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Error(e) => CellValue::Error(format!("{:?}", e)),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => CellValue::DateTime(naive.format("%Y-%m-%dT%H:%M:%S").to_string()),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => CellValue::DateTime(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Empty => CellValue::Empty,
    }
}

// ワークブック全体のテストは統合テスト（tests/）で実装します。
// 実際のXLSXファイルが必要なため、単体テストではなく統合テストとして実装します。
