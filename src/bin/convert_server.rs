//! convert-server
//!
//! 直接変換サービス。アップロードされたスプレッドシートの最初のシートを
//! ヘッダー行をキーとするJSONオブジェクト列に変換し、`data.json`に
//! 永続化します。待ち受けポートは環境変数`PORT`（必須）。

use xlsx2json::server::{self, AppState, ServiceConfig};
use xlsx2json::{ConverterBuilder, TransformMode, XlsxToJsonError};

#[tokio::main]
async fn main() -> Result<(), XlsxToJsonError> {
    tracing_subscriber::fmt::init();

    // PORTは必須（フォールバックなし）
    let port = server::port_from_env(None)?;

    let converter = ConverterBuilder::new()
        .with_transform_mode(TransformMode::Direct)
        .build()?;

    let config = ServiceConfig {
        convert_route: "/convert".to_string(),
        upload_dir: "uploads".into(),
        result_path: "data.json".into(),
        permissive_cors: false,
        error_message: "Error while processing the file.".to_string(),
    };

    server::serve(AppState::new(config, converter), port).await
}
