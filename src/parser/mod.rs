//! Parser Module
//!
//! calamineを使用したスプレッドシート解析の基礎実装。
//! ワークブックの最初のシートを行データとして抽出します。

mod workbook;

pub(crate) use workbook::WorkbookParser;
