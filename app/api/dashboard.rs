use crate::{error::Error, Context};
use hyper::{Body, Request, Response};
use vantage_util::error::Result;

pub(crate) async fn get(context: &Context, _request: Request<Body>) -> Result<Response<Body>> {
	let state = match context.state.lock() {
		Ok(state) => state,
		Err(_) => return Err(Error::ServiceUnavailable.into()),
	};
	let dashboard = state.session.dashboard();
	drop(state);
	super::json_response(&dashboard)
}
