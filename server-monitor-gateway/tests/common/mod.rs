//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::time::Duration;

use serde_json::{Value, json};
use server_monitor_gateway::{GatewayConfig, HttpServerGateway};
use wiremock::MockServer;

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_backend {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 断言 `Option` 为 `Some`，并解包返回内部值。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// Gateway pointed at a mock backend, with a short request timeout.
pub fn gateway_for(server: &MockServer) -> HttpServerGateway {
    let config = GatewayConfig::default()
        .with_base_url(server.uri())
        .with_request_timeout(Duration::from_millis(500));
    HttpServerGateway::new(&config).expect("client builds")
}

/// Server JSON as the backend writes it.
pub fn server_json(id: i64, ip: &str, status: &str) -> Value {
    json!({
        "id": id,
        "ipAddress": ip,
        "name": format!("node-{id}"),
        "memory": "16 GB",
        "type": "SERVER",
        "imageUrl": format!("http://localhost:8080/server/image/server{id}.png"),
        "status": status
    })
}

/// Envelope JSON around a payload.
pub fn envelope_json(status_code: u16, message: &str, data: Value) -> Value {
    json!({
        "timestamp": "2024-03-01T10:15:30.123",
        "statusCode": status_code,
        "status": if status_code == 201 { "CREATED" } else { "OK" },
        "message": message,
        "data": data
    })
}
