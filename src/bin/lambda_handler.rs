//! AWS Lambda handler for the calculator endpoint
//!
//! Accepts a calculator request as the JSON body of a Lambda Function URL
//! call and returns the projection plus formatted headline figures.
//!
//! Assumptions are loaded once per cold start from `ASSUMPTIONS_DIR` when set,
//! otherwise the in-memory defaults are used.

use aws_lambda_events::event::lambda_function_urls::LambdaFunctionUrlRequest;
use family_bank::{evaluate, Assumptions, CalculatorRequest, ProjectionError};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Build a Function URL response with a JSON body
fn http_response(status: u16, body: &Value) -> Value {
    json!({
        "statusCode": status,
        "headers": {
            "Content-Type": "application/json",
            "Access-Control-Allow-Origin": "*",
        },
        "body": body.to_string(),
        "isBase64Encoded": false,
    })
}

fn error_response(status: u16, message: &str) -> Value {
    http_response(status, &json!({ "error": message }))
}

/// Evaluate one request body; returns (status, body)
fn handle_body(body: Option<&str>, assumptions: &Assumptions) -> (u16, Value) {
    let body = match body {
        Some(b) if !b.trim().is_empty() => b,
        _ => return (400, json!({ "error": "request body is required" })),
    };

    let request = match CalculatorRequest::from_json(body) {
        Ok(r) => r,
        Err(e) => return (400, json!({ "error": e.to_string() })),
    };

    let start = Instant::now();
    match evaluate(&request, assumptions) {
        Ok(response) => {
            let mut value = match serde_json::to_value(&response) {
                Ok(v) => v,
                Err(e) => return (500, json!({ "error": e.to_string() })),
            };
            value["execution_time_ms"] = json!(start.elapsed().as_millis() as u64);
            (200, value)
        }
        Err(e @ ProjectionError::InvalidInput { .. }) => (422, json!({ "error": e.to_string() })),
        Err(e) => {
            log::error!("calculator {} failed: {}", request.calculator.name(), e);
            (500, json!({ "error": e.to_string() }))
        }
    }
}

async fn handler(
    event: LambdaEvent<LambdaFunctionUrlRequest>,
    assumptions: Arc<Assumptions>,
) -> Result<Value, Error> {
    let request = event.payload;

    if request.is_base64_encoded {
        return Ok(error_response(400, "base64 bodies are not supported"));
    }

    let (status, body) = handle_body(request.body.as_deref(), &assumptions);
    log::info!("request {} -> {}", event.context.request_id, status);
    Ok(http_response(status, &body))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let assumptions = match std::env::var("ASSUMPTIONS_DIR") {
        Ok(dir) => Assumptions::from_csv_path(Path::new(&dir))?,
        Err(_) => Assumptions::default_illustration(),
    };
    let assumptions = Arc::new(assumptions);

    run(service_fn(move |event| {
        let assumptions = Arc::clone(&assumptions);
        async move { handler(event, assumptions).await }
    }))
    .await
}
