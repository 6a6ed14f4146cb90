//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// 行変換の処理戦略
///
/// ワークシートの行をJSON値のシーケンスに変換する方法を指定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransformMode {
    /// 直接変換（デフォルト）
    ///
    /// 最初の行をヘッダーとして解釈し、以降の各行をヘッダー名をキーとする
    /// JSONオブジェクトに変換します。空セルはキーを生成しません。
    ///
    /// # 出力例
    ///
    /// ```json
    /// [
    ///   { "Name": "Alice", "Age": 30 },
    ///   { "Name": "Bob", "Age": 25 }
    /// ]
    /// ```
    Direct,

    /// ログ抽出変換
    ///
    /// ヘッダー解釈を行わず、各行の最初のセルをログ行テキストとして扱い、
    /// 最初の`{`から最後の`}`までの部分文字列をJSON値として解析します。
    /// 解析に失敗した行は出力に含まれません（プレースホルダーなし）。
    ///
    /// # 出力例
    ///
    /// ログ行 `2025-01-01 INFO {"event":"login","user":"alice"}` は
    /// 次の要素になります。
    ///
    /// ```json
    /// { "event": "login", "user": "alice" }
    /// ```
    LogExtraction,
}
