use crate::{error::Error, Context};
use hyper::{body::to_bytes, Body, Request, Response};
use vantage_util::error::Result;

#[derive(serde::Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct Action {
	columns: Option<Vec<String>>,
}

pub(crate) async fn post(context: &Context, mut request: Request<Body>) -> Result<Response<Body>> {
	let data = match to_bytes(request.body_mut()).await {
		Ok(data) => data,
		Err(_) => return Err(Error::BadRequest.into()),
	};
	let action: Action = match serde_json::from_slice(&data) {
		Ok(action) => action,
		Err(_) => return Err(Error::BadRequest.into()),
	};
	let mut state = match context.state.lock() {
		Ok(state) => state,
		Err(_) => return Err(Error::ServiceUnavailable.into()),
	};
	let dashboard = state.session.set_table_columns(action.columns);
	drop(state);
	super::json_response(&dashboard)
}
