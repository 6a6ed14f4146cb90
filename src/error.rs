//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// xlsx2jsonクレート全体で使用するエラー型
///
/// このエラー型は、アップロードファイルの保存、Excelファイルの解析、
/// JSON変換、結果ファイルの書き込み中に発生するすべてのエラーを
/// 統一的に扱うために使用されます。
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー（ファイル読み書き失敗など）
/// - `Parse`: Excelファイルの解析中に発生したエラー（calamine由来）
/// - `Json`: JSON値のシリアライズに失敗したエラー（serde_json由来）
/// - `Config`: 設定の検証に失敗したエラー（無効なポート指定など）
/// - `SecurityViolation`: セキュリティ制限に違反したエラー
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsx2json::XlsxToJsonError;
/// use std::fs::File;
///
/// fn read_excel_file(path: &str) -> Result<(), XlsxToJsonError> {
///     let file = File::open(path)?;  // Ioエラーが自動的に変換される
///     // ... 処理 ...
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum XlsxToJsonError {
    /// I/O操作中に発生したエラー
    ///
    /// アップロードファイルの保存失敗、結果ファイルの書き込み失敗など、
    /// 標準ライブラリの`std::io::Error`が発生した場合に使用されます。
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Excelファイルの解析中に発生したエラー
    ///
    /// calamineクレートがExcelファイルを解析する際に発生したエラーです。
    /// ファイル形式が不正、破損したファイル、サポートされていない形式などが
    /// 原因となります。
    ///
    /// `#[from]`属性により、`calamine::Error`から自動的に変換されます。
    #[error("Failed to parse spreadsheet file: {0}")]
    Parse(#[from] calamine::Error),

    /// JSON値のシリアライズエラー
    ///
    /// 変換結果をJSONテキストへシリアライズする際に発生したエラーです。
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時の設定検証、シートが存在しない
    /// ワークブック、無効なアップロードファイル名、起動時の環境変数の
    /// 検証などで発生します。
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力ファイルサイズの上限超過、アップロードファイル名の
    /// パストラバーサルなどのセキュリティ制限に違反した場合に発生します。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use xlsx2json::XlsxToJsonError;
    ///
    /// let error = XlsxToJsonError::SecurityViolation(
    ///     "Input file size exceeds maximum allowed size".to_string()
    /// );
    /// ```
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}
