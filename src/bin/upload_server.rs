//! upload-server
//!
//! ログ抽出サービス。アップロードされたスプレッドシートの各行の最初の
//! セルをログ行として扱い、埋め込まれたJSONオブジェクトを抽出して
//! `output_data.json`に永続化します。すべてのオリジンからのアクセスを
//! 許可します。待ち受けポートは環境変数`PORT`（未設定時は3004）。

use xlsx2json::server::{self, AppState, ServiceConfig};
use xlsx2json::{ConverterBuilder, TransformMode, XlsxToJsonError};

#[tokio::main]
async fn main() -> Result<(), XlsxToJsonError> {
    tracing_subscriber::fmt::init();

    let port = server::port_from_env(Some(3004))?;

    let converter = ConverterBuilder::new()
        .with_transform_mode(TransformMode::LogExtraction)
        .build()?;

    let config = ServiceConfig {
        convert_route: "/upload".to_string(),
        upload_dir: "uploads".into(),
        result_path: "output_data.json".into(),
        permissive_cors: true,
        error_message: "Error processing the file.".to_string(),
    };

    server::serve(AppState::new(config, converter), port).await
}
