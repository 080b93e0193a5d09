use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::{json, Value};
use then_context_core::response::InvocationResponse;
use then_context_lambda::handler::handle_invocation;

async fn handle_request(event: LambdaEvent<Value>) -> Result<InvocationResponse, Error> {
    let verbosity = std::env::var("DEBUG")
        .ok()
        .and_then(|value| value.parse::<u8>().ok())
        .unwrap_or(0);

    let platform_context = json!({
        "request_id": event.context.request_id,
        "invoked_function_arn": event.context.invoked_function_arn,
        "deadline": event.context.deadline,
    });

    handle_invocation(event.payload, platform_context, verbosity)
        .await
        .map_err(Error::from)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
